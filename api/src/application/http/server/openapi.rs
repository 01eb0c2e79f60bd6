use utoipa::OpenApi;

use crate::application::http::{role::router::RoleApiDoc, user::router::UserApiDoc};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Warden API"
    ),
    nest(
        (path = "/users", api = UserApiDoc),
        (path = "/roles", api = RoleApiDoc),
    )
)]
pub struct ApiDoc;
