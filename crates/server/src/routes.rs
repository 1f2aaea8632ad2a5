use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::openapi::ApiDoc;
use crate::state::ServerState;
use crate::views;

pub mod courses;
pub mod groups;
pub mod students;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Build the full application router: REST API, HTML views and API docs.
pub fn build_router(state: ServerState) -> Router {
    let api = Router::new()
        .route("/api/v1/groups/", get(groups::list_groups))
        .route("/api/v1/groups/:group_id/", get(groups::get_group))
        .route("/api/v1/courses/", get(courses::list_courses))
        .route("/api/v1/courses/:course_id/", get(courses::get_course))
        .route("/api/v1/students/", get(students::list_students))
        .route(
            "/api/v1/students/:student_id/",
            get(students::get_student).post(students::post_student).delete(students::delete_student),
        );

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .merge(views::router())
        .merge(SwaggerUi::new("/apidocs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(CorsLayer::very_permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx and other failures
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
