use axum::{
    extract::{Path, State},
    Json,
};

use crate::errors::{messages, ApiError};
use crate::schemas::{CourseJson, CoursesJson};
use crate::state::ServerState;

#[utoipa::path(
    get,
    path = "/api/v1/courses/",
    tag = "courses",
    responses(
        (status = 200, description = "Courses found", body = CoursesJson),
        (status = 404, description = "No course stored", body = crate::schemas::MessageJson)
    )
)]
pub async fn list_courses(State(state): State<ServerState>) -> Result<Json<CoursesJson>, ApiError> {
    let courses = state.courses.get_all_courses().await?;
    if courses.is_empty() {
        return Err(ApiError::not_found(messages::NO_COURSES));
    }
    Ok(Json(CoursesJson { courses: courses.iter().map(CourseJson::from).collect() }))
}

#[utoipa::path(
    get,
    path = "/api/v1/courses/{course_id}/",
    tag = "courses",
    params(("course_id" = i32, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course found", body = CourseJson),
        (status = 404, description = "Unknown course", body = crate::schemas::MessageJson)
    )
)]
pub async fn get_course(State(state): State<ServerState>, Path(course_id): Path<i32>) -> Result<Json<CourseJson>, ApiError> {
    let course = state
        .courses
        .get_course_by_id(course_id)
        .await?
        .ok_or_else(|| ApiError::not_found(messages::course_not_found(course_id)))?;
    Ok(Json(CourseJson::from(&course)))
}
