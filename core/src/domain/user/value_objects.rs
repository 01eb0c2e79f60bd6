use uuid::Uuid;

use crate::domain::{common::value_objects::PageRequest, filter::value_objects::RequestParams};

#[derive(Debug, Clone, Default)]
pub struct GetUsersInput {
    pub params: RequestParams,
    pub page: PageRequest,
}

#[derive(Debug, Clone)]
pub struct CreateUserInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateUserInput {
    pub user_id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub roles: Option<Vec<String>>,
}

/// A user ready to be persisted, password already hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub roles: Option<Vec<String>>,
}
