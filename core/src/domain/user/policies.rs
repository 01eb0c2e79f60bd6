use uuid::Uuid;

use crate::domain::{
    authentication::value_objects::Identity,
    common::{entities::app_errors::CoreError, policies::WardenPolicy},
    role::entities::permission::Permissions,
    user::ports::{UserPolicy, UserRepository},
};

impl<U> UserPolicy for WardenPolicy<U>
where
    U: UserRepository,
{
    async fn can_view_users(&self, identity: Identity) -> Result<bool, CoreError> {
        self.has_one_of(
            &identity,
            &[Permissions::ViewUsers, Permissions::ManageUsers],
        )
        .await
    }

    async fn can_view_user(
        &self,
        identity: Identity,
        target_user_id: Uuid,
    ) -> Result<bool, CoreError> {
        if identity.id() == target_user_id {
            return Ok(true);
        }

        self.has_one_of(
            &identity,
            &[Permissions::ViewUsers, Permissions::ManageUsers],
        )
        .await
    }

    async fn can_create_user(&self, identity: Identity) -> Result<bool, CoreError> {
        self.has_one_of(&identity, &[Permissions::ManageUsers]).await
    }

    async fn can_update_user(
        &self,
        identity: Identity,
        target_user_id: Uuid,
    ) -> Result<bool, CoreError> {
        if identity.id() == target_user_id {
            return Ok(true);
        }

        self.has_one_of(&identity, &[Permissions::ManageUsers]).await
    }

    async fn can_delete_user(
        &self,
        identity: Identity,
        _target_user_id: Uuid,
    ) -> Result<bool, CoreError> {
        self.has_one_of(&identity, &[Permissions::ManageUsers]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::ports::MockUserRepository;

    fn policy(granted: &'static [&'static str]) -> WardenPolicy<MockUserRepository> {
        let mut users = MockUserRepository::new();
        users.expect_get_permission_names().returning(move |_| {
            let names: Vec<String> = granted.iter().map(|name| name.to_string()).collect();
            Box::pin(async move { Ok(names) })
        });
        WardenPolicy::new(users)
    }

    #[tokio::test]
    async fn test_users_can_always_see_and_edit_themselves() {
        let policy = policy(&[]);
        let identity = Identity::new(Uuid::new_v4());

        assert_eq!(policy.can_view_user(identity.clone(), identity.id()).await, Ok(true));
        assert_eq!(policy.can_update_user(identity.clone(), identity.id()).await, Ok(true));
        assert_eq!(policy.can_delete_user(identity.clone(), identity.id()).await, Ok(false));
        assert_eq!(policy.can_view_user(identity, Uuid::new_v4()).await, Ok(false));
    }

    #[tokio::test]
    async fn test_view_permission_is_not_manage_permission() {
        let policy = policy(&["view users", "launch rockets"]);
        let identity = Identity::new(Uuid::new_v4());

        assert_eq!(policy.can_view_users(identity.clone()).await, Ok(true));
        assert_eq!(policy.can_create_user(identity.clone()).await, Ok(false));
        assert_eq!(
            policy.get_permissions(&identity).await,
            Ok(vec![Permissions::ViewUsers])
        );
    }
}
