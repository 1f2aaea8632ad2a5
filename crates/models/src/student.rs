use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{course, course_student, errors, group};

pub const FIRST_NAME_MAX_LEN: usize = 30;
pub const LAST_NAME_MAX_LEN: usize = 40;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "student")]
pub struct Model {
    /// Auto-assigned when seeding; explicit when created through the API.
    #[sea_orm(primary_key)]
    pub id: i32,
    pub group_id: Option<i32>,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Group,
    CourseStudent,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Group => Entity::belongs_to(group::Entity)
                .from(Column::GroupId)
                .to(group::Column::Id)
                .on_delete(ForeignKeyAction::SetNull)
                .into(),
            Relation::CourseStudent => Entity::has_many(course_student::Entity).into(),
        }
    }
}

impl Related<group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Group.def()
    }
}

impl Related<course_student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseStudent.def()
    }
}

impl Related<course::Entity> for Entity {
    fn to() -> RelationDef {
        course_student::Relation::Course.def()
    }

    fn via() -> Option<RelationDef> {
        Some(course_student::Relation::Student.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_names(first_name: &str, last_name: &str) -> Result<(), errors::ModelError> {
    errors::check_text("first name", first_name, FIRST_NAME_MAX_LEN)?;
    errors::check_text("last name", last_name, LAST_NAME_MAX_LEN)
}
