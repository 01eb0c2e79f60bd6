use crate::application::auth::RequiredIdentity;
use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use warden_core::domain::role::entities::role::RoleWithPermissions;
use warden_core::domain::role::ports::RoleService;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RoleResponse {
    pub data: RoleWithPermissions,
}

#[utoipa::path(
    get,
    path = "/{role_id}",
    tag = "role",
    summary = "Get role",
    description = "Returns the role together with its permissions.",
    params(
        ("role_id" = Uuid, Path, description = "Role ID"),
    ),
    responses(
        (status = 200, body = RoleResponse),
        (status = 404, description = "Role not found")
    ),
)]
pub async fn get_role(
    Path(role_id): Path<Uuid>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<RoleResponse>, ApiError> {
    let role = state
        .service
        .get_role(identity, role_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(RoleResponse { data: role }))
}
