pub mod errors;
pub mod db;
pub mod group;
pub mod student;
pub mod course;
pub mod course_student;

#[cfg(test)]
mod tests;
