use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use tracing::{info, warn};

use service::errors::ServiceError;

use crate::errors::{messages, ApiError};
use crate::schemas::{parse_student_body, ApiQuery, CourseJson, MessageJson, StudentJson, StudentQuery, StudentsJson};
use crate::state::ServerState;

async fn ensure_student(state: &ServerState, student_id: i32) -> Result<(), ApiError> {
    if !state.students.check_if_student_exists(student_id).await? {
        return Err(ApiError::not_found(messages::student_not_found(student_id)));
    }
    Ok(())
}

/// List students, optionally only those enrolled in `course_name`.
#[utoipa::path(
    get,
    path = "/api/v1/students/",
    tag = "students",
    params(StudentQuery),
    responses(
        (status = 200, description = "Students found", body = StudentsJson),
        (status = 404, description = "No student matches", body = MessageJson)
    )
)]
pub async fn list_students(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<StudentQuery>,
) -> Result<Json<StudentsJson>, ApiError> {
    let students: Vec<StudentJson> = match query.course_name() {
        Some(course_name) => state
            .students
            .get_students_related_to_course(course_name)
            .await?
            .unwrap_or_default()
            .iter()
            .map(|s| StudentJson::from(&s.student))
            .collect(),
        None => state.students.get_all_students().await?.iter().map(StudentJson::from).collect(),
    };
    if students.is_empty() {
        return Err(ApiError::not_found(messages::NO_STUDENTS));
    }
    Ok(Json(StudentsJson { students }))
}

/// Fetch one student, or with `show_courses=true` its courses keyed by student id.
#[utoipa::path(
    get,
    path = "/api/v1/students/{student_id}/",
    tag = "students",
    params(
        ("student_id" = i32, Path, description = "Student id"),
        StudentQuery
    ),
    responses(
        (status = 200, description = "Student or its courses", body = StudentJson),
        (status = 404, description = "Unknown student", body = MessageJson)
    )
)]
pub async fn get_student(
    State(state): State<ServerState>,
    Path(student_id): Path<i32>,
    ApiQuery(query): ApiQuery<StudentQuery>,
) -> Result<Json<Value>, ApiError> {
    if query.show_courses() {
        let info = state
            .students
            .get_student_with_full_info(student_id)
            .await?
            .ok_or_else(|| ApiError::not_found(messages::student_not_found(student_id)))?;
        let courses: Vec<CourseJson> = info.courses.iter().map(CourseJson::from).collect();
        return Ok(Json(json!({ (student_id.to_string()): { "courses": courses } })));
    }
    let student = state
        .students
        .get_student_by_id(student_id)
        .await?
        .ok_or_else(|| ApiError::not_found(messages::student_not_found(student_id)))?;
    Ok(Json(json!(StudentJson::from(&student))))
}

/// Create a student from the JSON body, or with `course_name` enroll it in that course.
#[utoipa::path(
    post,
    path = "/api/v1/students/{student_id}/",
    tag = "students",
    params(
        ("student_id" = i32, Path, description = "Student id"),
        StudentQuery
    ),
    request_body(content = crate::schemas::StudentBody, description = "Required unless `course_name` is given"),
    responses(
        (status = 200, description = "Created or enrolled", body = MessageJson),
        (status = 400, description = "Student exists, body invalid or course unknown"),
        (status = 404, description = "Unknown student or group", body = MessageJson)
    )
)]
pub async fn post_student(
    State(state): State<ServerState>,
    Path(student_id): Path<i32>,
    ApiQuery(query): ApiQuery<StudentQuery>,
    body: Bytes,
) -> Result<Json<MessageJson>, ApiError> {
    if let Some(course_name) = query.course_name() {
        ensure_student(&state, student_id).await?;
        return match state.students.add_student_to_course(student_id, course_name).await {
            Ok(_) => Ok(Json(MessageJson::new(messages::added_to_course(student_id, course_name)))),
            Err(ServiceError::InvalidCourse(_)) => Err(ApiError::bad_request(messages::course_name_not_found(course_name))),
            Err(ServiceError::InvalidStudent(_)) => Err(ApiError::not_found(messages::student_not_found(student_id))),
            Err(e) => Err(e.into()),
        };
    }

    if state.students.check_if_student_exists(student_id).await? {
        return Err(ApiError::bad_request(messages::student_exists(student_id)));
    }
    let raw: Value = serde_json::from_slice(&body).map_err(|e| {
        warn!(student_id, error = %e, "unreadable student body");
        ApiError::bad_request("Failed to decode JSON object")
    })?;
    let new = parse_student_body(&raw).map_err(|errors| ApiError::bad_request(json!(errors)))?;
    if !state.groups.check_if_group_exists(new.group_id).await? {
        return Err(ApiError::not_found(messages::group_not_found(new.group_id)));
    }

    match state
        .students
        .add_new_student(student_id, Some(new.group_id), &new.first_name, &new.last_name)
        .await
    {
        Ok(_) => {
            info!(student_id, group_id = new.group_id, "student created via api");
            Ok(Json(MessageJson::new(messages::student_added(student_id))))
        }
        Err(ServiceError::AlreadyExists(_)) => Err(ApiError::bad_request(messages::student_exists(student_id))),
        Err(ServiceError::ConstraintViolation(_)) => Err(ApiError::not_found(messages::group_not_found(new.group_id))),
        Err(e) => Err(e.into()),
    }
}

/// Delete a student, or with `course_name` only its enrollment in that course.
#[utoipa::path(
    delete,
    path = "/api/v1/students/{student_id}/",
    tag = "students",
    params(
        ("student_id" = i32, Path, description = "Student id"),
        StudentQuery
    ),
    responses(
        (status = 200, description = "Deleted or unenrolled", body = MessageJson),
        (status = 404, description = "Unknown student, or student not in course", body = MessageJson)
    )
)]
pub async fn delete_student(
    State(state): State<ServerState>,
    Path(student_id): Path<i32>,
    ApiQuery(query): ApiQuery<StudentQuery>,
) -> Result<Json<MessageJson>, ApiError> {
    ensure_student(&state, student_id).await?;

    if let Some(course_name) = query.course_name() {
        return match state.students.remove_student_from_course(student_id, course_name).await {
            Ok(()) => Ok(Json(MessageJson::new(messages::removed_from_course(student_id, course_name)))),
            Err(ServiceError::InvalidCourse(_)) | Err(ServiceError::InvalidAssociation { .. }) => {
                Err(ApiError::not_found(messages::not_in_course(student_id, course_name)))
            }
            Err(ServiceError::InvalidStudent(_)) => Err(ApiError::not_found(messages::student_not_found(student_id))),
            Err(e) => Err(e.into()),
        };
    }

    match state.students.delete_student_by_id(student_id).await {
        Ok(()) => Ok(Json(MessageJson::new(messages::student_deleted(student_id)))),
        Err(ServiceError::InvalidStudent(_)) => Err(ApiError::not_found(messages::student_not_found(student_id))),
        Err(e) => Err(e.into()),
    }
}
