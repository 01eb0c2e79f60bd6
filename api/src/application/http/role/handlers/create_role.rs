use crate::application::auth::RequiredIdentity;
use crate::application::http::role::handlers::get_role::RoleResponse;
use crate::application::http::role::validators::CreateRoleValidator;
use crate::application::http::server::api_entities::api_error::{ApiError, ValidateJson};
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use axum::extract::State;
use warden_core::domain::role::ports::RoleService;
use warden_core::domain::role::value_objects::CreateRoleInput;

#[utoipa::path(
    post,
    path = "",
    tag = "role",
    summary = "Create role",
    request_body = CreateRoleValidator,
    responses(
        (status = 201, body = RoleResponse),
        (status = 400, description = "Unknown permission"),
        (status = 409, description = "Role name already in use"),
        (status = 422, description = "Invalid payload")
    ),
)]
pub async fn create_role(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<CreateRoleValidator>,
) -> Result<Response<RoleResponse>, ApiError> {
    let role = state
        .service
        .create_role(
            identity,
            CreateRoleInput {
                name: payload.name,
                permissions: payload.permissions,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(RoleResponse { data: role }))
}
