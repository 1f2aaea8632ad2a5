//! Create `student` table with a nullable FK to `group`.
//!
//! The id is auto-incremented for seeded rows but callers may also insert
//! explicit ids. Removing a group detaches its students instead of deleting them.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Student::Table)
                    .if_not_exists()
                    .col(pk_auto(Student::Id))
                    .col(integer_null(Student::GroupId))
                    .col(string_len(Student::FirstName, 30).not_null())
                    .col(string_len(Student::LastName, 40).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_group")
                            .from(Student::Table, Student::GroupId)
                            .to(Group::Table, Group::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Student::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Student { Table, Id, GroupId, FirstName, LastName }

#[derive(DeriveIden)]
enum Group { Table, Id }
