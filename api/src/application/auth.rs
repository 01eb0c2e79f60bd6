use axum::{extract::FromRequestParts, http::request::Parts};
use warden_core::domain::authentication::value_objects::Identity;

use super::http::server::api_entities::api_error::ApiError;

/// The caller's [`Identity`], as placed in the request extensions by the
/// authentication layer in front of this API.
#[derive(Debug, Clone)]
pub struct RequiredIdentity(pub Identity);

impl<S> FromRequestParts<S> for RequiredIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(RequiredIdentity)
            .ok_or_else(|| ApiError::Unauthorized("authentication required".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::Request;
    use uuid::Uuid;

    use super::*;

    #[tokio::test]
    async fn test_identity_from_extensions() {
        let identity = Identity::new(Uuid::new_v4());
        let (mut parts, _) = Request::builder()
            .extension(identity.clone())
            .body(())
            .unwrap()
            .into_parts();

        let RequiredIdentity(found) = RequiredIdentity::from_request_parts(&mut parts, &())
            .await
            .unwrap();

        assert_eq!(found, identity);
    }

    #[tokio::test]
    async fn test_missing_identity_is_unauthorized() {
        let (mut parts, _) = Request::builder().body(()).unwrap().into_parts();

        let result = RequiredIdentity::from_request_parts(&mut parts, &()).await;

        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }
}
