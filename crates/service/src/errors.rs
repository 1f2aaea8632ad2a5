use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("student {0} does not exist")]
    InvalidStudent(i32),
    #[error("course {0} does not exist")]
    InvalidCourse(String),
    #[error("already exists: {0}")]
    AlreadyExists(String),
    #[error("student {student_id} is not linked to course {course_name}")]
    InvalidAssociation { student_id: i32, course_name: String },
    #[error("validation error: {0}")]
    Validation(String),
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    /// True for the variants that mean "the referenced record is missing".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::InvalidStudent(_) | Self::InvalidCourse(_))
    }
}

impl From<models::errors::ModelError> for ServiceError {
    fn from(e: models::errors::ModelError) -> Self { Self::Validation(e.to_string()) }
}

impl From<DbErr> for ServiceError {
    fn from(e: DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(m)) => Self::ConstraintViolation(m),
            Some(SqlErr::ForeignKeyConstraintViolation(m)) => Self::ConstraintViolation(m),
            _ => Self::Db(e.to_string()),
        }
    }
}
