use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{course_student, errors, student};

pub const NAME_MAX_LEN: usize = 40;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "course")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    CourseStudent,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::CourseStudent => Entity::has_many(course_student::Entity).into(),
        }
    }
}

impl Related<course_student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseStudent.def()
    }
}

impl Related<student::Entity> for Entity {
    fn to() -> RelationDef {
        course_student::Relation::Student.def()
    }

    fn via() -> Option<RelationDef> {
        Some(course_student::Relation::Course.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    errors::check_text("course name", name, NAME_MAX_LEN)
}
