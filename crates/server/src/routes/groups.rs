use axum::{
    extract::{Path, State},
    Json,
};

use crate::errors::{messages, ApiError};
use crate::schemas::{ApiQuery, GroupJson, GroupsJson, GroupsQuery};
use crate::state::ServerState;

/// List groups, optionally only those with at most `students_count` students.
#[utoipa::path(
    get,
    path = "/api/v1/groups/",
    tag = "groups",
    params(GroupsQuery),
    responses(
        (status = 200, description = "Groups found", body = GroupsJson),
        (status = 400, description = "Malformed query argument"),
        (status = 404, description = "No group matches", body = crate::schemas::MessageJson)
    )
)]
pub async fn list_groups(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<GroupsQuery>,
) -> Result<Json<GroupsJson>, ApiError> {
    let groups = match query.students_count {
        Some(n) => state.groups.get_group_with_less_students_count(n).await?,
        None => state.groups.get_all_groups().await?,
    };
    if groups.is_empty() {
        return Err(ApiError::not_found(messages::NO_GROUPS));
    }
    Ok(Json(GroupsJson { groups: groups.iter().map(GroupJson::from).collect() }))
}

#[utoipa::path(
    get,
    path = "/api/v1/groups/{group_id}/",
    tag = "groups",
    params(("group_id" = i32, Path, description = "Group id")),
    responses(
        (status = 200, description = "Group found", body = GroupJson),
        (status = 404, description = "Unknown group", body = crate::schemas::MessageJson)
    )
)]
pub async fn get_group(State(state): State<ServerState>, Path(group_id): Path<i32>) -> Result<Json<GroupJson>, ApiError> {
    let group = state
        .groups
        .get_group_by_id(group_id)
        .await?
        .ok_or_else(|| ApiError::not_found(messages::group_not_found(group_id)))?;
    Ok(Json(GroupJson::from(&group)))
}
