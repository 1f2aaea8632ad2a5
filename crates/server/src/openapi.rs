use utoipa::OpenApi;
use utoipa::ToSchema;

use crate::schemas::{
    CourseJson, CoursesJson, GroupJson, GroupsJson, MessageJson, StudentBody, StudentCoursesJson, StudentJson,
    StudentsJson,
};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::groups::list_groups,
        crate::routes::groups::get_group,
        crate::routes::courses::list_courses,
        crate::routes::courses::get_course,
        crate::routes::students::list_students,
        crate::routes::students::get_student,
        crate::routes::students::post_student,
        crate::routes::students::delete_student,
    ),
    components(
        schemas(
            HealthResponse,
            GroupJson,
            GroupsJson,
            StudentJson,
            StudentsJson,
            StudentCoursesJson,
            CourseJson,
            CoursesJson,
            StudentBody,
            MessageJson,
        )
    ),
    tags(
        (name = "health"),
        (name = "groups"),
        (name = "students"),
        (name = "courses")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_rest_path() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();
        for p in [
            "/health",
            "/api/v1/groups/",
            "/api/v1/groups/{group_id}/",
            "/api/v1/courses/",
            "/api/v1/courses/{course_id}/",
            "/api/v1/students/",
            "/api/v1/students/{student_id}/",
        ] {
            assert!(paths.iter().any(|k| k == p), "missing {p}");
        }
    }
}
