use uuid::Uuid;

use crate::domain::{
    authentication::value_objects::Identity,
    common::{
        entities::app_errors::CoreError,
        value_objects::{PageRequest, Paginated},
    },
    filter::{entities::FilterSpec, value_objects::RequestParams},
    user::{
        entities::user::User,
        value_objects::{
            CreateUserInput, CreateUserRequest, GetUsersInput, UpdateUserInput, UpdateUserRequest,
        },
    },
};

#[cfg_attr(test, mockall::automock)]
pub trait UserService: Send + Sync {
    fn get_users(
        &self,
        identity: Identity,
        input: GetUsersInput,
    ) -> impl Future<Output = Result<Paginated<User>, CoreError>> + Send;

    fn get_user(
        &self,
        identity: Identity,
        user_id: Uuid,
    ) -> impl Future<Output = Result<User, CoreError>> + Send;

    fn create_user(
        &self,
        identity: Identity,
        input: CreateUserInput,
    ) -> impl Future<Output = Result<User, CoreError>> + Send;

    fn update_user(
        &self,
        identity: Identity,
        input: UpdateUserInput,
    ) -> impl Future<Output = Result<User, CoreError>> + Send;

    fn delete_user(
        &self,
        identity: Identity,
        user_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait UserRepository: Send + Sync {
    /// Runs `filters` over the users query, then returns the requested page
    /// with each user's roles loaded.
    fn fetch_users(
        &self,
        filters: Vec<FilterSpec>,
        params: RequestParams,
        page: PageRequest,
    ) -> impl Future<Output = Result<Paginated<User>, CoreError>> + Send;

    fn get_by_id(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Option<User>, CoreError>> + Send;

    fn create_user(
        &self,
        request: CreateUserRequest,
    ) -> impl Future<Output = Result<User, CoreError>> + Send;

    fn update_user(
        &self,
        user_id: Uuid,
        request: UpdateUserRequest,
    ) -> impl Future<Output = Result<User, CoreError>> + Send;

    fn delete_user(&self, user_id: Uuid) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Names of every permission granted to the user through its roles.
    fn get_permission_names(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Vec<String>, CoreError>> + Send;
}

pub trait UserPolicy: Send + Sync {
    fn can_view_users(
        &self,
        identity: Identity,
    ) -> impl Future<Output = Result<bool, CoreError>> + Send;

    fn can_view_user(
        &self,
        identity: Identity,
        target_user_id: Uuid,
    ) -> impl Future<Output = Result<bool, CoreError>> + Send;

    fn can_create_user(
        &self,
        identity: Identity,
    ) -> impl Future<Output = Result<bool, CoreError>> + Send;

    fn can_update_user(
        &self,
        identity: Identity,
        target_user_id: Uuid,
    ) -> impl Future<Output = Result<bool, CoreError>> + Send;

    fn can_delete_user(
        &self,
        identity: Identity,
        target_user_id: Uuid,
    ) -> impl Future<Output = Result<bool, CoreError>> + Send;
}
