use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateRoleValidator {
    #[validate(length(min = 3, message = "name must be at least 3 characters"))]
    pub name: String,

    #[validate(length(min = 1, message = "at least one permission is required"))]
    pub permissions: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateRoleValidator {
    #[serde(default)]
    #[validate(length(min = 3, message = "name must be at least 3 characters"))]
    pub name: Option<String>,

    /// Replaces the whole permission set when present.
    #[serde(default)]
    pub permissions: Option<Vec<String>>,
}
