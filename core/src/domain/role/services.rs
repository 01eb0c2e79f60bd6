use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::{
    authentication::value_objects::Identity,
    common::{entities::app_errors::CoreError, policies::ensure_policy, services::Service},
    crypto::ports::HasherRepository,
    filter::{
        entities::{FilterSpec, OrderSpec, SortDirection},
        errors::FilterError,
        value_objects::RequestParams,
    },
    role::{
        entities::role::{Role, RoleWithPermissions},
        ports::{RolePolicy, RoleRepository, RoleService},
        value_objects::{CreateRoleInput, UpdateRoleInput},
    },
    user::ports::UserRepository,
};

const MIN_ROLE_NAME_LENGTH: usize = 3;

/// Filters offered on the role listing.
pub fn role_filters() -> Result<Vec<FilterSpec>, FilterError> {
    Ok(vec![
        FilterSpec::search(["name", "permissions.name"])?,
        FilterSpec::Order(
            OrderSpec::new("name", SortDirection::Asc)?.sortable([
                "id",
                "created_at",
                "updated_at",
                "permissions.name",
            ])?,
        ),
    ])
}

fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().chars().count() < MIN_ROLE_NAME_LENGTH {
        return Err(CoreError::Invalid(format!(
            "name must be at least {MIN_ROLE_NAME_LENGTH} characters"
        )));
    }

    Ok(())
}

fn validate_permissions(permissions: &[String]) -> Result<(), CoreError> {
    if permissions.is_empty() {
        return Err(CoreError::Invalid(
            "at least one permission is required".to_string(),
        ));
    }

    Ok(())
}

impl<U, RO, H> RoleService for Service<U, RO, H>
where
    U: UserRepository,
    RO: RoleRepository,
    H: HasherRepository,
{
    #[instrument(skip_all, fields(user_id = %identity.id()))]
    async fn get_roles(
        &self,
        identity: Identity,
        params: RequestParams,
    ) -> Result<Vec<Role>, CoreError> {
        ensure_policy(
            self.policy.can_view_roles(identity).await,
            "insufficient permissions",
        )?;

        self.role_repository
            .fetch_roles(role_filters()?, params)
            .await
    }

    #[instrument(skip_all, fields(user_id = %identity.id(), role_id = %role_id))]
    async fn get_role(
        &self,
        identity: Identity,
        role_id: Uuid,
    ) -> Result<RoleWithPermissions, CoreError> {
        ensure_policy(
            self.policy.can_view_roles(identity).await,
            "insufficient permissions",
        )?;

        self.role_repository
            .get_by_id(role_id)
            .await?
            .ok_or(CoreError::NotFound)
    }

    #[instrument(skip_all, fields(user_id = %identity.id(), name = %input.name))]
    async fn create_role(
        &self,
        identity: Identity,
        input: CreateRoleInput,
    ) -> Result<RoleWithPermissions, CoreError> {
        ensure_policy(
            self.policy.can_create_role(identity).await,
            "insufficient permissions",
        )?;

        validate_name(&input.name)?;
        validate_permissions(&input.permissions)?;

        let role = self
            .role_repository
            .create_role(input.name.trim().to_string(), input.permissions)
            .await?;

        info!(role_id = %role.role.id, "role created");

        Ok(role)
    }

    #[instrument(skip_all, fields(user_id = %identity.id(), role_id = %input.role_id))]
    async fn update_role(
        &self,
        identity: Identity,
        input: UpdateRoleInput,
    ) -> Result<RoleWithPermissions, CoreError> {
        ensure_policy(
            self.policy.can_update_role(identity).await,
            "insufficient permissions",
        )?;

        if input.name.is_none() && input.permissions.is_none() {
            return Err(CoreError::Invalid(
                "either name or permissions must be provided".to_string(),
            ));
        }

        if let Some(name) = &input.name {
            validate_name(name)?;
        }

        if let Some(permissions) = &input.permissions {
            validate_permissions(permissions)?;
        }

        self.role_repository
            .update_role(
                input.role_id,
                input.name.map(|name| name.trim().to_string()),
                input.permissions,
            )
            .await
    }

    #[instrument(skip_all, fields(user_id = %identity.id(), role_id = %role_id))]
    async fn delete_role(&self, identity: Identity, role_id: Uuid) -> Result<(), CoreError> {
        ensure_policy(
            self.policy.can_delete_role(identity).await,
            "insufficient permissions",
        )?;

        self.role_repository.delete_role(role_id).await?;

        info!(role_id = %role_id, "role deleted");

        Ok(())
    }
}
