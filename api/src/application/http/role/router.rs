use super::handlers::create_role::{__path_create_role, create_role};
use super::handlers::delete_role::{__path_delete_role, delete_role};
use super::handlers::get_role::{__path_get_role, get_role};
use super::handlers::get_roles::{__path_get_roles, get_roles};
use super::handlers::update_role::{__path_update_role, update_role};
use crate::application::http::server::app_state::AppState;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(get_roles, get_role, create_role, update_role, delete_role))]
pub struct RoleApiDoc;

pub fn role_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/roles", state.args.server.root_path),
            get(get_roles),
        )
        .route(
            &format!("{}/roles/{{role_id}}", state.args.server.root_path),
            get(get_role),
        )
        .route(
            &format!("{}/roles", state.args.server.root_path),
            post(create_role),
        )
        .route(
            &format!("{}/roles/{{role_id}}", state.args.server.root_path),
            put(update_role),
        )
        .route(
            &format!("{}/roles/{{role_id}}", state.args.server.root_path),
            delete(delete_role),
        )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{Extension, http::StatusCode};
    use axum_test::TestServer;
    use clap::Parser;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::json;
    use uuid::Uuid;
    use warden_core::{
        domain::{authentication::value_objects::Identity, common::services::Service},
        infrastructure::{
            crypto::argon2_hasher::Argon2HasherRepository,
            role::repository::PostgresRoleRepository,
            user::repository::PostgresUserRepository,
        },
    };

    use super::*;
    use crate::args::Args;

    fn server(identity: Option<Identity>) -> TestServer {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = Service::new(
            PostgresUserRepository::new(db.clone()),
            PostgresRoleRepository::new(db),
            Argon2HasherRepository::new(),
        );
        let args = Args::parse_from(["warden", "--server-root-path", "/api"]);
        let state = AppState::new(Arc::new(args), service);

        let mut router = role_routes(state.clone()).with_state(state);
        if let Some(identity) = identity {
            router = router.layer(Extension(identity));
        }

        TestServer::new(router).unwrap()
    }

    #[tokio::test]
    async fn test_routes_live_under_root_path() {
        let server = server(None);

        assert_eq!(
            server.get("/api/roles").await.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            server.get("/roles").await.status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_create_role_validates_payload() {
        let response = server(Some(Identity::new(Uuid::new_v4())))
            .post("/api/roles")
            .json(&json!({ "name": "ed", "permissions": [] }))
            .await;

        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
