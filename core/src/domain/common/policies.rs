use tracing::debug;

use crate::domain::{
    authentication::value_objects::Identity,
    common::entities::app_errors::CoreError,
    role::entities::permission::Permissions,
    user::ports::UserRepository,
};

/// Turns a policy decision into a `Forbidden` error when it denies access.
pub fn ensure_policy(result: Result<bool, CoreError>, message: &str) -> Result<(), CoreError> {
    match result {
        Ok(true) => Ok(()),
        Ok(false) => Err(CoreError::Forbidden(message.to_string())),
        Err(e) => Err(e),
    }
}

/// Permission-based policy shared by the user and role resources.
#[derive(Debug, Clone)]
pub struct WardenPolicy<U>
where
    U: UserRepository,
{
    user_repository: U,
}

impl<U> WardenPolicy<U>
where
    U: UserRepository,
{
    pub fn new(user_repository: U) -> Self {
        Self { user_repository }
    }

    pub async fn get_permissions(&self, identity: &Identity) -> Result<Vec<Permissions>, CoreError> {
        let names = self
            .user_repository
            .get_permission_names(identity.id())
            .await?;

        Ok(names
            .iter()
            .filter_map(|name| Permissions::from_name(name))
            .collect())
    }

    pub async fn has_one_of(
        &self,
        identity: &Identity,
        required: &[Permissions],
    ) -> Result<bool, CoreError> {
        let permissions = self.get_permissions(identity).await?;
        let allowed = Permissions::has_one_of_permissions(&permissions, required);

        debug!(user_id = %identity.id(), ?required, allowed, "policy check");

        Ok(allowed)
    }
}
