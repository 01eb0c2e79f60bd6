use crate::application::auth::RequiredIdentity;
use crate::application::http::server::api_entities::api_error::{ApiError, ValidateJson};
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use crate::application::http::user::handlers::get_user::UserResponse;
use crate::application::http::user::validators::CreateUserValidator;
use axum::extract::State;
use warden_core::domain::user::ports::UserService;
use warden_core::domain::user::value_objects::CreateUserInput;

#[utoipa::path(
    post,
    path = "",
    tag = "user",
    summary = "Create user",
    description = "Creates a user and assigns the given roles by name.",
    request_body = CreateUserValidator,
    responses(
        (status = 201, body = UserResponse),
        (status = 400, description = "Unknown role"),
        (status = 409, description = "Email already in use"),
        (status = 422, description = "Invalid payload")
    ),
)]
pub async fn create_user(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<CreateUserValidator>,
) -> Result<Response<UserResponse>, ApiError> {
    let user = state
        .service
        .create_user(
            identity,
            CreateUserInput {
                name: payload.name,
                email: payload.email,
                password: payload.password,
                roles: payload.roles,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(UserResponse { data: user }))
}
