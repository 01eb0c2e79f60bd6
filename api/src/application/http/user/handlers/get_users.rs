use crate::application::auth::RequiredIdentity;
use crate::application::http::query_extractor::QueryParamsExtractor;
use crate::application::http::query_params::ListingQuery;
use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use warden_core::domain::user::entities::user::User;
use warden_core::domain::user::ports::UserService;
use warden_core::domain::user::value_objects::GetUsersInput;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetUsersResponse {
    pub data: Vec<User>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub last_page: u64,
}

#[utoipa::path(
    get,
    path = "",
    tag = "user",
    summary = "List users",
    description = "Lists users, optionally searched by name, email or role name and sorted by any user column.",
    params(ListingQuery),
    responses(
        (status = 200, body = GetUsersResponse),
        (status = 400, description = "Unknown sort column"),
        (status = 403, description = "Missing permission")
    ),
)]
pub async fn get_users(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    QueryParamsExtractor(query): QueryParamsExtractor,
) -> Result<Response<GetUsersResponse>, ApiError> {
    let users = state
        .service
        .get_users(
            identity,
            GetUsersInput {
                params: query.params,
                page: query.page,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetUsersResponse {
        data: users.items,
        page: users.page,
        per_page: users.per_page,
        total: users.total,
        last_page: users.last_page,
    }))
}
