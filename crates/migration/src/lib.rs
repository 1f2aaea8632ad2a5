//! Migrator registering the school tables in dependency order.
//! Link table and indexes come after the tables they reference.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_group;
mod m20240101_000002_create_course;
mod m20240101_000003_create_student;
mod m20240101_000004_create_course_student;
mod m20240101_000005_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_group::Migration),
            Box::new(m20240101_000002_create_course::Migration),
            Box::new(m20240101_000003_create_student::Migration),
            Box::new(m20240101_000004_create_course_student::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000005_add_indexes::Migration),
        ]
    }
}
