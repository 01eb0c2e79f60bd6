use crate::application::auth::RequiredIdentity;
use crate::application::http::query_extractor::QueryParamsExtractor;
use crate::application::http::query_params::ListingQuery;
use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use warden_core::domain::role::entities::role::Role;
use warden_core::domain::role::ports::RoleService;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetRolesResponse {
    pub data: Vec<Role>,
}

#[utoipa::path(
    get,
    path = "",
    tag = "role",
    summary = "List roles",
    description = "Lists roles sorted by name, optionally searched by role or permission name.",
    params(ListingQuery),
    responses(
        (status = 200, body = GetRolesResponse),
        (status = 403, description = "Missing permission")
    ),
)]
pub async fn get_roles(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    QueryParamsExtractor(query): QueryParamsExtractor,
) -> Result<Response<GetRolesResponse>, ApiError> {
    let roles = state
        .service
        .get_roles(identity, query.params)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetRolesResponse { data: roles }))
}
