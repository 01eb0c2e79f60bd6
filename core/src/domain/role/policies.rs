use crate::domain::{
    authentication::value_objects::Identity,
    common::{entities::app_errors::CoreError, policies::WardenPolicy},
    role::{entities::permission::Permissions, ports::RolePolicy},
    user::ports::UserRepository,
};

impl<U> RolePolicy for WardenPolicy<U>
where
    U: UserRepository,
{
    async fn can_view_roles(&self, identity: Identity) -> Result<bool, CoreError> {
        self.has_one_of(
            &identity,
            &[Permissions::ViewRoles, Permissions::ManageRoles],
        )
        .await
    }

    async fn can_create_role(&self, identity: Identity) -> Result<bool, CoreError> {
        self.has_one_of(&identity, &[Permissions::ManageRoles]).await
    }

    async fn can_update_role(&self, identity: Identity) -> Result<bool, CoreError> {
        self.has_one_of(&identity, &[Permissions::ManageRoles]).await
    }

    async fn can_delete_role(&self, identity: Identity) -> Result<bool, CoreError> {
        self.has_one_of(&identity, &[Permissions::ManageRoles]).await
    }
}
