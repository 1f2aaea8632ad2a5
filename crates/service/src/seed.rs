//! Store initialization: schema creation and bulk loading of a school.

use std::collections::HashMap;

use migration::{Migrator, MigratorTrait};
use rand::Rng;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set, TransactionTrait};
use tracing::info;

use models::{course, course_student, group, student};
use crate::errors::ServiceError;
use crate::generator::SchoolGenerator;

/// Everything one seeding run writes.
///
/// `students_group` and `students_courses` refer to groups, courses and
/// students by name.
#[derive(Clone, Debug, Default)]
pub struct SchoolSeed {
    pub groups: Vec<String>,
    pub courses: Vec<String>,
    pub students: Vec<String>,
    pub students_group: Vec<(String, Vec<String>)>,
    pub students_courses: Vec<(String, Vec<String>)>,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl SchoolSeed {
    pub fn random<R: Rng>(rng: R, groups: usize, courses: usize, students: usize) -> Result<Self, ServiceError> {
        let mut gen = SchoolGenerator::new(rng);
        let groups = gen.generate_random_groups_name(groups)?;
        let courses = gen.generate_random_courses(courses)?;
        let students = gen.generate_random_students(students)?;
        let students_group = gen.assign_student_to_group(&students, &groups);
        let students_courses = gen.assign_student_to_course(&students, &courses);
        Ok(Self { groups, courses, students, students_group, students_courses })
    }

    /// Small fixed school: five groups, five courses, ten students.
    ///
    /// Loaded into an empty store, students get ids 1 to 10 in the order listed here.
    pub fn fixture() -> Self {
        let students_group: Vec<(String, Vec<String>)> = [
            ("SD-58", &["Benjamin Miller", "Alexander Johnson", "Mia Wilson"][..]),
            ("TU-69", &["Charlotte Brown", "Evelyn White"][..]),
            ("DD-30", &["Olivia White", "Isabella Martin"][..]),
            ("QK-85", &["Mia Thompson", "Ava Thompson"][..]),
            ("CX-73", &["Lucas Jones"][..]),
        ]
        .iter()
        .map(|(g, members)| (g.to_string(), owned(members)))
        .collect();

        let students_courses: Vec<(String, Vec<String>)> = [
            ("Benjamin Miller", &["Computer studies", "Art", "Geography"][..]),
            ("Alexander Johnson", &["Geography"][..]),
            ("Mia Wilson", &["German", "Geography", "Writing"][..]),
            ("Charlotte Brown", &["Art"][..]),
            ("Evelyn White", &["German", "Art"][..]),
            ("Olivia White", &["Writing"][..]),
            ("Isabella Martin", &["Writing"][..]),
            ("Mia Thompson", &["Geography", "German", "Computer studies"][..]),
            ("Ava Thompson", &["German", "Art", "Writing"][..]),
            ("Lucas Jones", &["Computer studies", "German", "Art"][..]),
        ]
        .iter()
        .map(|(s, courses)| (s.to_string(), owned(courses)))
        .collect();

        Self {
            groups: students_group.iter().map(|(g, _)| g.clone()).collect(),
            courses: owned(&["Geography", "Art", "Computer studies", "Writing", "German"]),
            students: students_courses.iter().map(|(s, _)| s.clone()).collect(),
            students_group,
            students_courses,
        }
    }
}

fn split_name(full: &str) -> Result<(&str, &str), ServiceError> {
    full.split_once(' ')
        .ok_or_else(|| ServiceError::Validation(format!("student name '{}' has no last name", full)))
}

fn lookup(ids: &HashMap<String, i32>, kind: &str, name: &str) -> Result<i32, ServiceError> {
    ids.get(name)
        .copied()
        .ok_or_else(|| ServiceError::Validation(format!("unknown {} '{}' in seed", kind, name)))
}

/// Creates, fills and drops the school schema.
#[derive(Clone)]
pub struct InitSchoolDb {
    db: DatabaseConnection,
}

impl InitSchoolDb {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    /// Run migrations, then load `seed` in a single transaction.
    pub async fn init_db(&self, seed: &SchoolSeed) -> Result<(), ServiceError> {
        Migrator::up(&self.db, None).await?;
        let txn = self.db.begin().await?;

        let mut group_ids = HashMap::new();
        for name in &seed.groups {
            group::validate_name(name)?;
            let g = group::ActiveModel { name: Set(name.clone()), ..Default::default() }.insert(&txn).await?;
            group_ids.insert(name.clone(), g.id);
        }

        let mut course_ids = HashMap::new();
        for name in &seed.courses {
            course::validate_name(name)?;
            let c = course::ActiveModel {
                name: Set(name.clone()),
                description: Set(Some(format!("Test description for {}", name))),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            course_ids.insert(name.clone(), c.id);
        }

        // Grouped students first, in group order; the rest without a group.
        let mut ordered: Vec<(&str, Option<i32>)> = Vec::with_capacity(seed.students.len());
        for (group_name, members) in &seed.students_group {
            let gid = lookup(&group_ids, "group", group_name)?;
            ordered.extend(members.iter().map(|m| (m.as_str(), Some(gid))));
        }
        for name in &seed.students {
            if !ordered.iter().any(|(n, _)| *n == name.as_str()) {
                ordered.push((name.as_str(), None));
            }
        }

        let mut student_ids = HashMap::new();
        for (full, gid) in ordered {
            let (first, last) = split_name(full)?;
            student::validate_names(first, last)?;
            let s = student::ActiveModel {
                group_id: Set(gid),
                first_name: Set(first.to_string()),
                last_name: Set(last.to_string()),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            student_ids.insert(full.to_string(), s.id);
        }

        let mut links = Vec::new();
        for (student_name, courses) in &seed.students_courses {
            let sid = lookup(&student_ids, "student", student_name)?;
            for c in courses {
                let cid = lookup(&course_ids, "course", c)?;
                links.push(course_student::ActiveModel { course_id: Set(cid), student_id: Set(sid) });
            }
        }
        let link_count = links.len();
        if !links.is_empty() {
            course_student::Entity::insert_many(links).exec_without_returning(&txn).await?;
        }

        txn.commit().await?;
        info!(
            groups = group_ids.len(),
            courses = course_ids.len(),
            students = student_ids.len(),
            links = link_count,
            "school database initialized"
        );
        Ok(())
    }

    /// Roll back every migration, dropping all school tables.
    pub async fn drop_tables(&self) -> Result<(), ServiceError> {
        Migrator::down(&self.db, None).await?;
        info!("school tables dropped");
        Ok(())
    }

    /// True when no group has been stored yet.
    pub async fn is_empty(&self) -> Result<bool, ServiceError> {
        Ok(group::Entity::find().count(&self.db).await? == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_empty_db;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use sea_orm::{ColumnTrait, QueryFilter};

    #[tokio::test]
    async fn fixture_loads_with_expected_ids() -> Result<(), anyhow::Error> {
        let db = get_empty_db().await?;
        let init = InitSchoolDb::new(db.clone());
        assert!(init.is_empty().await?);
        init.init_db(&SchoolSeed::fixture()).await?;
        assert!(!init.is_empty().await?);

        let lucas = student::Entity::find_by_id(10).one(&db).await?.expect("student 10");
        assert_eq!((lucas.first_name.as_str(), lucas.last_name.as_str()), ("Lucas", "Jones"));
        assert_eq!(lucas.group_id, Some(5));
        assert_eq!(course_student::Entity::find().count(&db).await?, 21);
        Ok(())
    }

    #[tokio::test]
    async fn random_seed_loads_every_student() -> Result<(), anyhow::Error> {
        let db = get_empty_db().await?;
        let seed = SchoolSeed::random(StdRng::seed_from_u64(11), 3, 5, 100)?;
        InitSchoolDb::new(db.clone()).init_db(&seed).await?;

        assert_eq!(student::Entity::find().count(&db).await?, 100);
        assert_eq!(course::Entity::find().count(&db).await?, 5);
        // Three groups take at most 90 students, so some are left without a group.
        let loose = student::Entity::find()
            .filter(student::Column::GroupId.is_null())
            .count(&db)
            .await?;
        assert!(loose >= 10);
        Ok(())
    }

    #[tokio::test]
    async fn bad_seed_rolls_back() -> Result<(), anyhow::Error> {
        let db = get_empty_db().await?;
        let mut seed = SchoolSeed::fixture();
        seed.students_courses.push(("Lucas Jones".into(), vec!["Alchemy".into()]));
        let init = InitSchoolDb::new(db.clone());
        assert!(matches!(init.init_db(&seed).await, Err(ServiceError::Validation(_))));
        assert!(init.is_empty().await?);
        Ok(())
    }

    #[tokio::test]
    async fn drop_tables_removes_schema() -> Result<(), anyhow::Error> {
        let db = get_empty_db().await?;
        let init = InitSchoolDb::new(db.clone());
        init.init_db(&SchoolSeed::fixture()).await?;
        init.drop_tables().await?;
        assert!(init.is_empty().await.is_err());
        Ok(())
    }
}
