use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Student: lookups and the per-group count join go through group_id
        manager
            .create_index(
                Index::create()
                    .name("idx_student_group")
                    .table(Student::Table)
                    .col(Student::GroupId)
                    .to_owned(),
            )
            .await?;

        // CourseStudent: the PK leads with course_id, so student-side scans need their own index
        manager
            .create_index(
                Index::create()
                    .name("idx_course_student_student")
                    .table(CourseStudent::Table)
                    .col(CourseStudent::StudentId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_course_student_student").table(CourseStudent::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_student_group").table(Student::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Student { Table, GroupId }

#[derive(DeriveIden)]
enum CourseStudent { Table, StudentId }
