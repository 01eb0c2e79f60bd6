use crate::application::auth::RequiredIdentity;
use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use warden_core::domain::role::ports::RoleService;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DeleteRoleResponse {
    pub message: String,
}

#[utoipa::path(
    delete,
    path = "/{role_id}",
    tag = "role",
    summary = "Delete role",
    description = "Deletes the role, detaching it from its permissions and users.",
    params(
        ("role_id" = Uuid, Path, description = "Role ID"),
    ),
    responses(
        (status = 200, body = DeleteRoleResponse),
        (status = 404, description = "Role not found")
    ),
)]
pub async fn delete_role(
    Path(role_id): Path<Uuid>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<DeleteRoleResponse>, ApiError> {
    state
        .service
        .delete_role(identity, role_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(DeleteRoleResponse {
        message: "Role deleted successfully".to_string(),
    }))
}
