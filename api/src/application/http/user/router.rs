use super::handlers::create_user::{__path_create_user, create_user};
use super::handlers::delete_user::{__path_delete_user, delete_user};
use super::handlers::get_user::{__path_get_user, get_user};
use super::handlers::get_users::{__path_get_users, get_users};
use super::handlers::update_user::{__path_update_user, update_user};
use crate::application::http::server::app_state::AppState;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(get_users, get_user, create_user, update_user, delete_user))]
pub struct UserApiDoc;

pub fn user_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/users", state.args.server.root_path),
            get(get_users),
        )
        .route(
            &format!("{}/users/{{user_id}}", state.args.server.root_path),
            get(get_user),
        )
        .route(
            &format!("{}/users", state.args.server.root_path),
            post(create_user),
        )
        .route(
            &format!("{}/users/{{user_id}}", state.args.server.root_path),
            put(update_user),
        )
        .route(
            &format!("{}/users/{{user_id}}", state.args.server.root_path),
            delete(delete_user),
        )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{Extension, http::StatusCode};
    use axum_test::TestServer;
    use clap::Parser;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
    use serde_json::json;
    use uuid::Uuid;
    use warden_core::{
        domain::{authentication::value_objects::Identity, common::services::Service},
        entity::permissions,
        infrastructure::{
            crypto::argon2_hasher::Argon2HasherRepository,
            role::repository::PostgresRoleRepository,
            user::repository::PostgresUserRepository,
        },
    };

    use super::*;
    use crate::application::http::server::api_entities::api_error::ApiErrorResponse;
    use crate::args::Args;

    fn server(db: DatabaseConnection, identity: Option<Identity>) -> TestServer {
        let db = Arc::new(db);
        let service = Service::new(
            PostgresUserRepository::new(db.clone()),
            PostgresRoleRepository::new(db),
            Argon2HasherRepository::new(),
        );
        let state = AppState::new(Arc::new(Args::parse_from(["warden"])), service);

        let mut router = user_routes(state.clone()).with_state(state);
        if let Some(identity) = identity {
            router = router.layer(Extension(identity));
        }

        TestServer::new(router).unwrap()
    }

    fn granted(names: &[&str]) -> Vec<permissions::Model> {
        names
            .iter()
            .map(|name| permissions::Model {
                id: Uuid::new_v4(),
                name: name.to_string(),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_listing_requires_identity() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let response = server(db, None).get("/users").await;

        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_listing_without_permission_is_forbidden() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([granted(&[])])
            .into_connection();

        let response = server(db, Some(Identity::new(Uuid::new_v4())))
            .get("/users")
            .await;

        assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_unknown_sort_column_is_bad_request() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([granted(&["view users"])])
            .into_connection();

        let response = server(db, Some(Identity::new(Uuid::new_v4())))
            .get("/users")
            .add_query_param("sort", "nickname")
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body = response.json::<ApiErrorResponse>();
        assert_eq!(body.code, "E_BAD_REQUEST");
        assert!(body.message.contains("nickname"), "{}", body.message);
    }

    #[tokio::test]
    async fn test_create_user_validates_payload() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let response = server(db, Some(Identity::new(Uuid::new_v4())))
            .post("/users")
            .json(&json!({ "name": "Bob", "email": "bob", "password": "short" }))
            .await;

        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = response.json::<ApiErrorResponse>();
        let fields: Vec<&str> = body.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["email", "password"]);
    }
}
