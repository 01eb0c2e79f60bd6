use crate::application::auth::RequiredIdentity;
use crate::application::http::role::handlers::get_role::RoleResponse;
use crate::application::http::role::validators::UpdateRoleValidator;
use crate::application::http::server::api_entities::api_error::{ApiError, ValidateJson};
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use axum::extract::{Path, State};
use uuid::Uuid;
use warden_core::domain::role::ports::RoleService;
use warden_core::domain::role::value_objects::UpdateRoleInput;

#[utoipa::path(
    put,
    path = "/{role_id}",
    tag = "role",
    summary = "Update role",
    params(
        ("role_id" = Uuid, Path, description = "Role ID"),
    ),
    request_body = UpdateRoleValidator,
    responses(
        (status = 200, body = RoleResponse),
        (status = 404, description = "Role not found")
    ),
)]
pub async fn update_role(
    Path(role_id): Path<Uuid>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<UpdateRoleValidator>,
) -> Result<Response<RoleResponse>, ApiError> {
    let role = state
        .service
        .update_role(
            identity,
            UpdateRoleInput {
                role_id,
                name: payload.name,
                permissions: payload.permissions,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(RoleResponse { data: role }))
}
