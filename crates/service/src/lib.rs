//! Data-access layer over the school schema.
//! - One interface per entity, each holding only a pooled connection.
//! - Every multi-step operation runs inside a single transaction.
//! - Random seed generation and store initialization for demos and tests.

pub mod errors;
pub mod group_service;
pub mod student_service;
pub mod course_service;
pub mod generator;
pub mod seed;
#[cfg(test)]
pub mod test_support;

pub use course_service::CourseInterface;
pub use group_service::GroupInterface;
pub use student_service::{StudentFullInfo, StudentInterface, StudentWithCourses};
