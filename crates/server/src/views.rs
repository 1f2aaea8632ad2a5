//! Server-rendered HTML pages over the same data as the REST API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use handlebars::Handlebars;
use serde_json::{json, Value};
use tracing::error;

use service::errors::ServiceError;

use crate::errors::StartupError;
use crate::state::ServerState;

const TEMPLATES: [(&str, &str); 10] = [
    ("header", include_str!("../templates/header.hbs")),
    ("footer", include_str!("../templates/footer.hbs")),
    ("index", include_str!("../templates/index.hbs")),
    ("groups", include_str!("../templates/groups.hbs")),
    ("group_detail", include_str!("../templates/group_detail.hbs")),
    ("students", include_str!("../templates/students.hbs")),
    ("student_detail", include_str!("../templates/student_detail.hbs")),
    ("courses", include_str!("../templates/courses.hbs")),
    ("course_detail", include_str!("../templates/course_detail.hbs")),
    ("not_found", include_str!("../templates/not_found.hbs")),
];

/// Register every embedded template once.
pub fn registry() -> Result<Handlebars<'static>, StartupError> {
    let mut hb = Handlebars::new();
    for (name, source) in TEMPLATES {
        hb.register_template_string(name, source)
            .map_err(|e| StartupError::Templates(format!("{}: {}", name, e)))?;
    }
    Ok(hb)
}

/// Template name and its data; `None` renders the not-found page.
type Page = Option<(&'static str, Value)>;

fn render(state: &ServerState, status: StatusCode, template: &str, data: &Value) -> Response {
    match state.views.render(template, data) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            error!(template, error = %e, "template rendering failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Html("Internal server error".to_string())).into_response()
        }
    }
}

fn respond(state: &ServerState, loaded: Result<Page, ServiceError>) -> Response {
    match loaded {
        Ok(Some((template, data))) => render(state, StatusCode::OK, template, &data),
        Ok(None) => render(state, StatusCode::NOT_FOUND, "not_found", &json!({})),
        Err(e) => {
            error!(error = %e, "loading page data failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Html("Internal server error".to_string())).into_response()
        }
    }
}

async fn groups_page(state: &ServerState) -> Result<Page, ServiceError> {
    let groups = state.groups.get_all_groups().await?;
    Ok((!groups.is_empty()).then(|| ("groups", json!({ "groups": groups }))))
}

async fn group_page(state: &ServerState, id: i32) -> Result<Page, ServiceError> {
    let group = state.groups.get_group_by_id(id).await?;
    Ok(group.map(|g| ("group_detail", json!({ "group": g }))))
}

async fn group_students_page(state: &ServerState, id: i32) -> Result<Page, ServiceError> {
    let students = state.students.get_students_related_to_group(id).await?;
    Ok((!students.is_empty()).then(|| ("students", json!({ "students": students }))))
}

async fn students_page(state: &ServerState) -> Result<Page, ServiceError> {
    let students = state.students.get_all_students().await?;
    Ok((!students.is_empty()).then(|| ("students", json!({ "students": students }))))
}

async fn student_page(state: &ServerState, id: i32) -> Result<Page, ServiceError> {
    let info = state.students.get_student_with_full_info(id).await?;
    Ok(info.map(|i| {
        ("student_detail", json!({ "student": i.student, "group": i.group, "courses": i.courses }))
    }))
}

async fn courses_page(state: &ServerState) -> Result<Page, ServiceError> {
    let courses = state.courses.get_all_courses().await?;
    Ok((!courses.is_empty()).then(|| ("courses", json!({ "courses": courses }))))
}

async fn course_page(state: &ServerState, id: i32) -> Result<Page, ServiceError> {
    let course = state.courses.get_course_by_id(id).await?;
    Ok(course.map(|c| ("course_detail", json!({ "course": c }))))
}

async fn course_students_page(state: &ServerState, id: i32) -> Result<Page, ServiceError> {
    let Some(course) = state.courses.get_course_by_id(id).await? else {
        return Ok(None);
    };
    let students: Vec<_> = state
        .students
        .get_students_related_to_course(&course.name)
        .await?
        .unwrap_or_default()
        .into_iter()
        .map(|s| s.student)
        .collect();
    Ok((!students.is_empty()).then(|| ("students", json!({ "students": students }))))
}

async fn index(State(state): State<ServerState>) -> Response {
    render(&state, StatusCode::OK, "index", &json!({}))
}

async fn show_groups(State(state): State<ServerState>) -> Response {
    respond(&state, groups_page(&state).await)
}

async fn show_group(State(state): State<ServerState>, Path(id): Path<i32>) -> Response {
    respond(&state, group_page(&state, id).await)
}

async fn show_group_students(State(state): State<ServerState>, Path(id): Path<i32>) -> Response {
    respond(&state, group_students_page(&state, id).await)
}

async fn show_students(State(state): State<ServerState>) -> Response {
    respond(&state, students_page(&state).await)
}

async fn show_student(State(state): State<ServerState>, Path(id): Path<i32>) -> Response {
    respond(&state, student_page(&state, id).await)
}

async fn show_courses(State(state): State<ServerState>) -> Response {
    respond(&state, courses_page(&state).await)
}

async fn show_course(State(state): State<ServerState>, Path(id): Path<i32>) -> Response {
    respond(&state, course_page(&state, id).await)
}

async fn show_course_students(State(state): State<ServerState>, Path(id): Path<i32>) -> Response {
    respond(&state, course_students_page(&state, id).await)
}

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/", get(index))
        .route("/groups/", get(show_groups))
        .route("/groups/:group_id", get(show_group))
        .route("/groups/:group_id/students", get(show_group_students))
        .route("/students/", get(show_students))
        .route("/students/:student_id", get(show_student))
        .route("/courses/", get(show_courses))
        .route("/courses/:course_id", get(show_course))
        .route("/courses/:course_id/students", get(show_course_students))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_register_and_render() {
        let hb = registry().unwrap();
        let html = hb
            .render(
                "groups",
                &json!({ "groups": [{ "id": 1, "name": "SD-58" }, { "id": 2, "name": "TU-69" }] }),
            )
            .unwrap();
        assert!(html.contains("<title>Groups | School</title>"));
        assert!(html.contains(r#"<a href="/groups/2">TU-69</a>"#));
    }

    #[test]
    fn student_without_group_renders() {
        let hb = registry().unwrap();
        let html = hb
            .render(
                "student_detail",
                &json!({
                    "student": { "id": 4, "first_name": "Free", "last_name": "Agent", "group_id": null },
                    "group": null,
                    "courses": []
                }),
            )
            .unwrap();
        assert!(html.contains("Group: none"));
        assert!(html.contains("Not enrolled in any course."));
    }
}
