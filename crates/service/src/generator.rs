//! Random school data for demos and seeding.
//!
//! The RNG is injected so runs can be reproduced with a seeded generator.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::errors::ServiceError;

pub const FIRST_NAMES: [&str; 20] = [
    "Liam", "Olivia", "Noah", "Emma", "Oliver", "Ava", "Elijah", "Charlotte", "William", "Sophia",
    "James", "Amelia", "Benjamin", "Isabella", "Lucas", "Mia", "Henry", "Evelyn", "Alexander", "Harper",
];

pub const LAST_NAMES: [&str; 20] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Miller", "Davis", "Garcia", "Rodriguez", "Wilson",
    "Martinez", "Anderson", "Taylor", "Thomas", "Hernande", "Moore", "Martin", "Jackson", "Thompson", "White",
];

pub const COURSES: [&str; 20] = [
    "Art", "Citizenship", "Geography", "History", "French", "German", "Literacy", "Music",
    "Natural history", "Science", "Arithmetic", "Social studies", "Reading", "Writing", "Math",
    "Business studies", "Drama", "Modern studies", "Computer studies", "Chemistry",
];

const GROUP_NAME_SPACE: usize = 26 * 26 * 100;
const GROUP_SIZE: (usize, usize) = (10, 30);
const COURSES_PER_STUDENT: (usize, usize) = (1, 3);

fn max_count_error(max: usize) -> ServiceError {
    ServiceError::Validation(format!("Max count is - {}", max))
}

pub struct SchoolGenerator<R: Rng> {
    rng: R,
}

impl<R: Rng> SchoolGenerator<R> {
    pub fn new(rng: R) -> Self { Self { rng } }

    /// Unique names shaped like `AB-42`.
    pub fn generate_random_groups_name(&mut self, count: usize) -> Result<Vec<String>, ServiceError> {
        if count > GROUP_NAME_SPACE {
            return Err(max_count_error(GROUP_NAME_SPACE));
        }
        let mut seen = HashSet::with_capacity(count);
        let mut names = Vec::with_capacity(count);
        while names.len() < count {
            let a = self.rng.gen_range(b'A'..=b'Z') as char;
            let b = self.rng.gen_range(b'A'..=b'Z') as char;
            let name = format!("{}{}-{:02}", a, b, self.rng.gen_range(0..100));
            if seen.insert(name.clone()) {
                names.push(name);
            }
        }
        Ok(names)
    }

    /// `count` distinct course names from the fixed pool.
    pub fn generate_random_courses(&mut self, count: usize) -> Result<Vec<String>, ServiceError> {
        if count > COURSES.len() {
            return Err(max_count_error(COURSES.len()));
        }
        Ok(COURSES.choose_multiple(&mut self.rng, count).map(|c| c.to_string()).collect())
    }

    /// `count` distinct "First Last" names.
    pub fn generate_random_students(&mut self, count: usize) -> Result<Vec<String>, ServiceError> {
        let max = FIRST_NAMES.len() * LAST_NAMES.len();
        if count > max {
            return Err(max_count_error(max));
        }
        let all: Vec<String> = FIRST_NAMES
            .iter()
            .flat_map(|f| LAST_NAMES.iter().map(move |l| format!("{} {}", f, l)))
            .collect();
        Ok(all.choose_multiple(&mut self.rng, count).cloned().collect())
    }

    /// Fill groups in order with 10 to 30 random students each until nobody is left.
    ///
    /// Groups reached after the pool runs dry are left out of the result.
    pub fn assign_student_to_group(&mut self, students: &[String], groups: &[String]) -> Vec<(String, Vec<String>)> {
        let mut pool = students.to_vec();
        let mut out = Vec::new();
        for group in groups {
            if pool.is_empty() {
                break;
            }
            let size = self.rng.gen_range(GROUP_SIZE.0..=GROUP_SIZE.1).min(pool.len());
            let mut members = Vec::with_capacity(size);
            for _ in 0..size {
                let idx = self.rng.gen_range(0..pool.len());
                members.push(pool.swap_remove(idx));
            }
            out.push((group.clone(), members));
        }
        out
    }

    /// Give every student one to three distinct courses.
    pub fn assign_student_to_course(&mut self, students: &[String], courses: &[String]) -> Vec<(String, Vec<String>)> {
        if courses.is_empty() {
            return Vec::new();
        }
        students
            .iter()
            .map(|s| {
                let n = self
                    .rng
                    .gen_range(COURSES_PER_STUDENT.0..=COURSES_PER_STUDENT.1)
                    .min(courses.len());
                let picked = courses.choose_multiple(&mut self.rng, n).cloned().collect();
                (s.clone(), picked)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn generator() -> SchoolGenerator<StdRng> {
        SchoolGenerator::new(StdRng::seed_from_u64(7))
    }

    #[test]
    fn group_names_are_unique_and_well_formed() {
        let names = generator().generate_random_groups_name(300).unwrap();
        assert_eq!(names.len(), 300);
        assert_eq!(names.iter().collect::<HashSet<_>>().len(), 300);
        for n in &names {
            let b = n.as_bytes();
            assert_eq!(b.len(), 5, "{n}");
            assert!(b[0].is_ascii_uppercase() && b[1].is_ascii_uppercase());
            assert_eq!(b[2], b'-');
            assert!(b[3].is_ascii_digit() && b[4].is_ascii_digit());
        }
    }

    #[test]
    fn courses_come_from_pool_and_are_capped() {
        let mut g = generator();
        let picked = g.generate_random_courses(20).unwrap();
        assert_eq!(picked.iter().collect::<HashSet<_>>().len(), 20);
        assert!(picked.iter().all(|c| COURSES.contains(&c.as_str())));

        let err = g.generate_random_courses(21).unwrap_err();
        assert_eq!(err.to_string(), "validation error: Max count is - 20");
    }

    #[test]
    fn students_are_distinct() {
        let mut g = generator();
        let students = g.generate_random_students(400).unwrap();
        assert_eq!(students.iter().collect::<HashSet<_>>().len(), 400);
        assert!(g.generate_random_students(401).is_err());
    }

    #[test]
    fn every_student_lands_in_at_most_one_group() {
        let mut g = generator();
        let students = g.generate_random_students(100).unwrap();
        let groups = g.generate_random_groups_name(10).unwrap();
        let assigned = g.assign_student_to_group(&students, &groups);

        let mut seen = HashSet::new();
        for (i, (_, members)) in assigned.iter().enumerate() {
            assert!(members.len() <= 30);
            if i + 1 < assigned.len() {
                assert!(members.len() >= 10);
            }
            for m in members {
                assert!(seen.insert(m.clone()), "{m} assigned twice");
            }
        }
        // 10 groups of at least 10 exhaust 100 students.
        assert_eq!(seen.len(), 100);
    }

    #[test]
    fn group_cut_short_by_pool_keeps_partial_members() {
        let mut g = generator();
        let students = g.generate_random_students(12).unwrap();
        let groups = g.generate_random_groups_name(4).unwrap();
        let assigned = g.assign_student_to_group(&students, &groups);

        // The first group takes 10..=12, a second one (if any) gets the 1 or 2 left.
        assert!(matches!(assigned.len(), 1 | 2));
        assert!(assigned.iter().all(|(_, members)| !members.is_empty()));
        assert_eq!(assigned.iter().map(|(_, m)| m.len()).sum::<usize>(), 12);
        let names: Vec<_> = assigned.iter().map(|(n, _)| n.clone()).collect();
        assert_eq!(names, groups[..assigned.len()]);
    }

    #[test]
    fn course_assignment_sizes() {
        let mut g = generator();
        let students = g.generate_random_students(50).unwrap();
        let courses = g.generate_random_courses(10).unwrap();
        for (_, picked) in g.assign_student_to_course(&students, &courses) {
            assert!((1..=3).contains(&picked.len()));
            assert_eq!(picked.iter().collect::<HashSet<_>>().len(), picked.len());
        }
        assert!(g.assign_student_to_course(&students, &[]).is_empty());
    }
}
