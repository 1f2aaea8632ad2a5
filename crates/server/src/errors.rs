use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::error;

use service::errors::ServiceError;

/// Error returned by REST handlers, rendered as `{"message": ...}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<Value>) -> Self {
        Self { status, body: json!({ "message": message.into() }) }
    }

    pub fn not_found(message: impl Into<Value>) -> Self { Self::new(StatusCode::NOT_FOUND, message) }

    pub fn bad_request(message: impl Into<Value>) -> Self { Self::new(StatusCode::BAD_REQUEST, message) }

    pub fn internal() -> Self { Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error") }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Db(msg) => {
                error!(error = %msg, "database failure");
                Self::internal()
            }
            e if e.is_not_found() => Self::not_found(e.to_string()),
            e => Self::bad_request(e.to_string()),
        }
    }
}

/// Client-facing messages.
pub mod messages {
    pub fn group_not_found(id: i32) -> String { format!("Group with given id ({}) does not exists!", id) }
    pub fn student_not_found(id: i32) -> String { format!("Student with given id ({}) does not exists!", id) }
    pub fn course_not_found(id: i32) -> String { format!("Course with given id ({}) does not exists!", id) }

    pub const NO_GROUPS: &str = "There is no information about any group!";
    pub const NO_STUDENTS: &str = "There is no information about any student!";
    pub const NO_COURSES: &str = "There is no information about any course!";

    pub fn student_exists(id: i32) -> String { format!("Student with given id ({}) already exists!", id) }
    pub fn student_added(id: i32) -> String { format!("Student with given id ({}) was successfully added", id) }
    pub fn student_deleted(id: i32) -> String { format!("Student (id: {}) was successfully deleted", id) }

    pub fn course_name_not_found(name: &str) -> String { format!("Course with given name ({}) does not exists!", name) }
    pub fn added_to_course(id: i32, name: &str) -> String {
        format!("Student (id: {}) successfully added to the course ({})", id, name)
    }
    pub fn not_in_course(id: i32, name: &str) -> String {
        format!("Student (id: {}) does not have given course ({})!", id, name)
    }
    pub fn removed_from_course(id: i32, name: &str) -> String {
        format!("Student (id: {}) was successfully removed from course ({})", id, name)
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("template registration failed: {0}")]
    Templates(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
