use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::warn;
use utoipa::ToSchema;
use validator::Validate;
use warden_core::domain::common::entities::app_errors::CoreError;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ApiErrorResponse {
    pub code: String,
    pub message: String,
    pub status: u16,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ValidationError>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("validation failed")]
    UnProcessableEntity(Vec<ValidationError>),
    #[error("{0}")]
    InternalServerError(String),
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "E_BAD_REQUEST"),
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "E_UNAUTHORIZED"),
            ApiError::Forbidden(_) => (StatusCode::FORBIDDEN, "E_FORBIDDEN"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "E_NOT_FOUND"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "E_CONFLICT"),
            ApiError::UnProcessableEntity(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "E_UNPROCESSABLE_ENTITY")
            }
            ApiError::InternalServerError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "E_INTERNAL_SERVER_ERROR")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = self.to_string();
        let errors = match self {
            ApiError::UnProcessableEntity(errors) => errors,
            _ => Vec::new(),
        };

        let body = ApiErrorResponse {
            code: code.to_string(),
            message,
            status: status.as_u16(),
            errors,
        };

        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::NotFound => ApiError::NotFound("resource not found".to_string()),
            CoreError::Forbidden(message) => ApiError::Forbidden(message),
            CoreError::AlreadyExists(value) => ApiError::Conflict(format!("{value} already exists")),
            CoreError::UnknownRole(name) => ApiError::BadRequest(format!("unknown role: {name}")),
            CoreError::UnknownPermission(name) => {
                ApiError::BadRequest(format!("unknown permission: {name}"))
            }
            CoreError::Invalid(message) => ApiError::BadRequest(message),
            CoreError::InvalidFilter(error) => {
                warn!(%error, "rejected listing filter");
                ApiError::BadRequest(error.to_string())
            }
            CoreError::HashPasswordError | CoreError::InternalServerError => {
                ApiError::InternalServerError("internal server error".to_string())
            }
        }
    }
}

fn validation_errors(errors: &validator::ValidationErrors) -> Vec<ValidationError> {
    let mut flattened = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| ValidationError {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| error.code.to_string()),
            })
        })
        .collect::<Vec<ValidationError>>();

    flattened.sort_by(|a, b| a.field.cmp(&b.field));
    flattened
}

/// JSON body extractor that also runs the payload's `validator` rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| ApiError::UnProcessableEntity(validation_errors(&errors)))?;

        Ok(ValidateJson(value))
    }
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use warden_core::domain::filter::errors::FilterError;

    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    struct Payload {
        #[validate(length(min = 3, message = "name is too short"))]
        name: String,
    }

    async fn body_of(error: ApiError) -> (StatusCode, ApiErrorResponse) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_core_error_mapping() {
        assert_eq!(
            ApiError::from(CoreError::NotFound),
            ApiError::NotFound("resource not found".to_string())
        );
        assert_eq!(
            ApiError::from(CoreError::AlreadyExists("a@example.org".to_string())),
            ApiError::Conflict("a@example.org already exists".to_string())
        );
        assert_eq!(
            ApiError::from(CoreError::InvalidFilter(FilterError::UnresolvedRelation(
                "posts".to_string()
            ))),
            ApiError::BadRequest(
                FilterError::UnresolvedRelation("posts".to_string()).to_string()
            )
        );
        assert!(matches!(
            ApiError::from(CoreError::HashPasswordError),
            ApiError::InternalServerError(_)
        ));
    }

    #[tokio::test]
    async fn test_error_body() {
        let (status, body) = body_of(ApiError::Forbidden("insufficient permissions".to_string())).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body.code, "E_FORBIDDEN");
        assert_eq!(body.message, "insufficient permissions");
        assert_eq!(body.status, 403);
        assert!(body.errors.is_empty());
    }

    #[tokio::test]
    async fn test_validate_json_rejects_invalid_payload() {
        let request = Request::builder()
            .header("content-type", "application/json")
            .body(Body::from(r#"{"name":"ab"}"#))
            .unwrap();

        let error = ValidateJson::<Payload>::from_request(request, &())
            .await
            .unwrap_err();

        let (status, body) = body_of(error).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body.errors,
            vec![ValidationError {
                field: "name".to_string(),
                message: "name is too short".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_validate_json_rejects_malformed_body() {
        let request = Request::builder()
            .header("content-type", "application/json")
            .body(Body::from("{"))
            .unwrap();

        let result = ValidateJson::<Payload>::from_request(request, &()).await;

        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }
}
