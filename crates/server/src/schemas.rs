//! JSON shapes exchanged over `/api/v1` and the student body schema.

use std::collections::BTreeMap;

use axum::{
    async_trait,
    extract::{rejection::QueryRejection, FromRequestParts, Query},
    http::{request::Parts, Uri},
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use models::{course, group, student};

use crate::errors::ApiError;

#[derive(Debug, Serialize, ToSchema)]
pub struct GroupJson {
    pub group_id: i32,
    pub group_name: String,
}

impl From<&group::Model> for GroupJson {
    fn from(g: &group::Model) -> Self {
        Self { group_id: g.id, group_name: g.name.clone() }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentJson {
    pub student_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub group_id: Option<i32>,
}

impl From<&student::Model> for StudentJson {
    fn from(s: &student::Model) -> Self {
        Self {
            student_id: s.id,
            first_name: s.first_name.clone(),
            last_name: s.last_name.clone(),
            group_id: s.group_id,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseJson {
    pub course_id: i32,
    pub course_name: String,
    pub course_description: Option<String>,
}

impl From<&course::Model> for CourseJson {
    fn from(c: &course::Model) -> Self {
        Self { course_id: c.id, course_name: c.name.clone(), course_description: c.description.clone() }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GroupsJson {
    pub groups: Vec<GroupJson>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentsJson {
    pub students: Vec<StudentJson>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CoursesJson {
    pub courses: Vec<CourseJson>,
}

/// Keyed by the student id in the response: `{"<id>": {"courses": [...]}}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct StudentCoursesJson {
    pub courses: Vec<CourseJson>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageJson {
    pub message: String,
}

impl MessageJson {
    pub fn new(message: impl Into<String>) -> Self { Self { message: message.into() } }
}

/// Body of `POST /api/v1/students/{id}/`.
#[derive(Debug, Clone, ToSchema, Validate)]
pub struct StudentBody {
    #[validate(length(min = 1, max = 30, message = "ensure this value has 1 to 30 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 40, message = "ensure this value has 1 to 40 characters"))]
    pub last_name: String,
    pub group_id: i32,
}

/// One schema violation, located by field name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    fn new(field: &str, msg: &str, kind: &str) -> Self {
        Self { loc: vec![field.to_string()], msg: msg.to_string(), kind: kind.to_string() }
    }

    fn missing(field: &str) -> Self { Self::new(field, "field required", "value_error.missing") }

    fn null(field: &str) -> Self { Self::new(field, "none is not an allowed value", "type_error.none.not_allowed") }
}

fn string_field(obj: &Map<String, Value>, name: &str, errors: &mut Vec<FieldError>) -> Option<String> {
    match obj.get(name) {
        None => { errors.push(FieldError::missing(name)); None }
        Some(Value::Null) => { errors.push(FieldError::null(name)); None }
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => { errors.push(FieldError::new(name, "str type expected", "type_error.str")); None }
    }
}

fn int_field(obj: &Map<String, Value>, name: &str, errors: &mut Vec<FieldError>) -> Option<i32> {
    let parsed = match obj.get(name) {
        None => { errors.push(FieldError::missing(name)); return None }
        Some(Value::Null) => { errors.push(FieldError::null(name)); return None }
        Some(Value::Number(n)) => n.as_i64().and_then(|v| i32::try_from(v).ok()),
        Some(Value::String(s)) => s.trim().parse::<i32>().ok(),
        Some(_) => None,
    };
    if parsed.is_none() {
        errors.push(FieldError::new(name, "value is not a valid integer", "type_error.integer"));
    }
    parsed
}

/// Check a raw JSON body against the student schema.
///
/// Errors are reported in field order `first_name`, `last_name`, `group_id`.
pub fn parse_student_body(raw: &Value) -> Result<StudentBody, Vec<FieldError>> {
    let Some(obj) = raw.as_object() else {
        return Err(vec![FieldError::new("__root__", "value is not a valid dict", "type_error.dict")]);
    };
    let mut errors = Vec::new();
    let first_name = string_field(obj, "first_name", &mut errors);
    let last_name = string_field(obj, "last_name", &mut errors);
    let group_id = int_field(obj, "group_id", &mut errors);

    let (Some(first_name), Some(last_name), Some(group_id)) = (first_name, last_name, group_id) else {
        return Err(errors);
    };
    let body = StudentBody { first_name, last_name, group_id };
    if let Err(invalid) = body.validate() {
        let fields = invalid.field_errors();
        let errors = ["first_name", "last_name"]
            .iter()
            .filter_map(|name| fields.get(*name).and_then(|errs| errs.first()).map(|e| (name, e)))
            .map(|(name, e)| {
                let msg = e.message.as_ref().map(|m| m.to_string()).unwrap_or_else(|| e.code.to_string());
                FieldError::new(name, &msg, "value_error.any_str.length")
            })
            .collect();
        return Err(errors);
    }
    Ok(body)
}

/// Query arguments of `GET /api/v1/groups/`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GroupsQuery {
    /// Keep groups with at most this many students.
    pub students_count: Option<i64>,
}

/// Query arguments of the `/api/v1/students/` routes.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StudentQuery {
    /// Exact course name.
    pub course_name: Option<String>,
    /// `true` to list the student's courses.
    pub show_courses: Option<String>,
}

impl StudentQuery {
    /// Empty values count as absent.
    pub fn course_name(&self) -> Option<&str> {
        self.course_name.as_deref().filter(|s| !s.is_empty())
    }

    pub fn show_courses(&self) -> bool { self.show_courses.as_deref() == Some("true") }
}

/// Query structs name their integer arguments so a malformed one can be reported by name.
pub trait QueryArgs: DeserializeOwned {
    const INTEGER_ARGS: &'static [&'static str] = &[];
}

impl QueryArgs for GroupsQuery {
    const INTEGER_ARGS: &'static [&'static str] = &["students_count"];
}

impl QueryArgs for StudentQuery {}

/// `Query<T>` whose rejection is a JSON 400 in the API's message shape.
#[derive(Debug)]
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: QueryArgs,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::try_from_uri(&parts.uri) {
            Ok(Query(args)) => Ok(Self(args)),
            Err(rejection) => Err(query_error::<T>(&parts.uri, &rejection)),
        }
    }
}

/// `{"message": {"<arg>": "invalid integer value: '<raw>'"}}` for the first bad integer argument.
fn query_error<T: QueryArgs>(uri: &Uri, rejection: &QueryRejection) -> ApiError {
    let pairs = Query::<Vec<(String, String)>>::try_from_uri(uri).map(|Query(p)| p).unwrap_or_default();
    let bad = pairs
        .into_iter()
        .find(|(name, raw)| T::INTEGER_ARGS.contains(&name.as_str()) && raw.parse::<i64>().is_err());
    match bad {
        Some((name, raw)) => {
            let mut reason = BTreeMap::new();
            reason.insert(name, format!("invalid integer value: '{}'", raw));
            ApiError::bad_request(serde_json::json!(reason))
        }
        None => ApiError::bad_request(rejection.body_text()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_valid_body() {
        let body = parse_student_body(&json!({"first_name": "Larry", "last_name": "Bottom", "group_id": 3})).unwrap();
        assert_eq!(body.first_name, "Larry");
        assert_eq!(body.group_id, 3);
    }

    #[test]
    fn accepts_numeric_string_group() {
        let body = parse_student_body(&json!({"first_name": "Larry", "last_name": "Bottom", "group_id": "4"})).unwrap();
        assert_eq!(body.group_id, 4);
    }

    #[test]
    fn missing_fields_in_field_order() {
        let errors = parse_student_body(&json!({"group_id": 1})).unwrap_err();
        assert_eq!(errors, vec![FieldError::missing("first_name"), FieldError::missing("last_name")]);
        let rendered = serde_json::to_value(&errors[0]).unwrap();
        assert_eq!(rendered, json!({"loc": ["first_name"], "msg": "field required", "type": "value_error.missing"}));
    }

    #[test]
    fn wrong_types_are_reported() {
        let errors = parse_student_body(&json!({"first_name": 5, "last_name": "B", "group_id": "three"})).unwrap_err();
        let kinds: Vec<_> = errors.iter().map(|e| e.kind.as_str()).collect();
        assert_eq!(kinds, ["type_error.str", "type_error.integer"]);
        assert_eq!(errors[1].loc, vec!["group_id".to_string()]);
    }

    #[test]
    fn enforces_name_lengths() {
        let long = "x".repeat(31);
        let errors = parse_student_body(&json!({"first_name": long, "last_name": "", "group_id": 1})).unwrap_err();
        let locs: Vec<_> = errors.iter().map(|e| e.loc[0].as_str()).collect();
        assert_eq!(locs, ["first_name", "last_name"]);
    }

    #[test]
    fn rejects_non_object() {
        assert_eq!(parse_student_body(&json!([1, 2])).unwrap_err()[0].kind, "type_error.dict");
    }

    fn parts(uri: &str) -> Parts {
        axum::http::Request::builder().uri(uri).body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn typed_query_args() {
        let ApiQuery(groups) = ApiQuery::<GroupsQuery>::from_request_parts(&mut parts("/api/v1/groups/?students_count=2"), &())
            .await
            .unwrap();
        assert_eq!(groups.students_count, Some(2));

        let ApiQuery(groups) = ApiQuery::<GroupsQuery>::from_request_parts(&mut parts("/api/v1/groups/"), &()).await.unwrap();
        assert_eq!(groups.students_count, None);

        let ApiQuery(students) =
            ApiQuery::<StudentQuery>::from_request_parts(&mut parts("/api/v1/students/?course_name=&show_courses=true"), &())
                .await
                .unwrap();
        assert_eq!(students.course_name(), None);
        assert!(students.show_courses());
    }

    #[tokio::test]
    async fn malformed_integer_arg_is_named() {
        let err = ApiQuery::<GroupsQuery>::from_request_parts(&mut parts("/api/v1/groups/?students_count=abc"), &())
            .await
            .unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
        assert_eq!(err.body, json!({"message": {"students_count": "invalid integer value: 'abc'"}}));
    }
}
