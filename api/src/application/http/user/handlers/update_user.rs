use crate::application::auth::RequiredIdentity;
use crate::application::http::server::api_entities::api_error::{ApiError, ValidateJson};
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use crate::application::http::user::handlers::get_user::UserResponse;
use crate::application::http::user::validators::UpdateUserValidator;
use axum::extract::{Path, State};
use uuid::Uuid;
use warden_core::domain::user::ports::UserService;
use warden_core::domain::user::value_objects::UpdateUserInput;

#[utoipa::path(
    put,
    path = "/{user_id}",
    tag = "user",
    summary = "Update user",
    description = "Updates the given fields; `roles`, when present, replaces every role of the user.",
    params(
        ("user_id" = Uuid, Path, description = "User ID"),
    ),
    request_body = UpdateUserValidator,
    responses(
        (status = 200, body = UserResponse),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already in use")
    ),
)]
pub async fn update_user(
    Path(user_id): Path<Uuid>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<UpdateUserValidator>,
) -> Result<Response<UserResponse>, ApiError> {
    let user = state
        .service
        .update_user(
            identity,
            UpdateUserInput {
                user_id,
                name: payload.name,
                email: payload.email,
                password: payload.password,
                roles: payload.roles,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(UserResponse { data: user }))
}
