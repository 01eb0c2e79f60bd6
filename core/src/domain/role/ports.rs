use uuid::Uuid;

use crate::domain::{
    authentication::value_objects::Identity,
    common::entities::app_errors::CoreError,
    filter::{entities::FilterSpec, value_objects::RequestParams},
    role::{
        entities::role::{Role, RoleWithPermissions},
        value_objects::{CreateRoleInput, UpdateRoleInput},
    },
};

#[cfg_attr(test, mockall::automock)]
pub trait RoleService: Send + Sync {
    fn get_roles(
        &self,
        identity: Identity,
        params: RequestParams,
    ) -> impl Future<Output = Result<Vec<Role>, CoreError>> + Send;

    fn get_role(
        &self,
        identity: Identity,
        role_id: Uuid,
    ) -> impl Future<Output = Result<RoleWithPermissions, CoreError>> + Send;

    fn create_role(
        &self,
        identity: Identity,
        input: CreateRoleInput,
    ) -> impl Future<Output = Result<RoleWithPermissions, CoreError>> + Send;

    fn update_role(
        &self,
        identity: Identity,
        input: UpdateRoleInput,
    ) -> impl Future<Output = Result<RoleWithPermissions, CoreError>> + Send;

    fn delete_role(
        &self,
        identity: Identity,
        role_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait RoleRepository: Send + Sync {
    fn fetch_roles(
        &self,
        filters: Vec<FilterSpec>,
        params: RequestParams,
    ) -> impl Future<Output = Result<Vec<Role>, CoreError>> + Send;

    fn get_by_id(
        &self,
        role_id: Uuid,
    ) -> impl Future<Output = Result<Option<RoleWithPermissions>, CoreError>> + Send;

    /// Inserts the role and attaches `permissions` (by name) atomically.
    fn create_role(
        &self,
        name: String,
        permissions: Vec<String>,
    ) -> impl Future<Output = Result<RoleWithPermissions, CoreError>> + Send;

    /// Renames the role and, when given, replaces its permission set atomically.
    fn update_role(
        &self,
        role_id: Uuid,
        name: Option<String>,
        permissions: Option<Vec<String>>,
    ) -> impl Future<Output = Result<RoleWithPermissions, CoreError>> + Send;

    fn delete_role(&self, role_id: Uuid) -> impl Future<Output = Result<(), CoreError>> + Send;
}

pub trait RolePolicy: Send + Sync {
    fn can_view_roles(
        &self,
        identity: Identity,
    ) -> impl Future<Output = Result<bool, CoreError>> + Send;

    fn can_create_role(
        &self,
        identity: Identity,
    ) -> impl Future<Output = Result<bool, CoreError>> + Send;

    fn can_update_role(
        &self,
        identity: Identity,
    ) -> impl Future<Output = Result<bool, CoreError>> + Send;

    fn can_delete_role(
        &self,
        identity: Identity,
    ) -> impl Future<Output = Result<bool, CoreError>> + Send;
}
