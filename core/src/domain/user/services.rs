use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::{
    authentication::value_objects::Identity,
    common::{
        entities::app_errors::CoreError, policies::ensure_policy, services::Service,
        value_objects::Paginated,
    },
    crypto::ports::HasherRepository,
    filter::{
        entities::{FilterSpec, OrderSpec},
        errors::FilterError,
    },
    role::{entities::permission::Permissions, ports::RoleRepository},
    user::{
        entities::user::User,
        ports::{UserPolicy, UserRepository, UserService},
        value_objects::{
            CreateUserInput, CreateUserRequest, GetUsersInput, UpdateUserInput, UpdateUserRequest,
        },
    },
};

/// Filters offered on the user listing: free-text search over name, email
/// and role names, newest first unless the request asks for another order.
pub fn user_filters() -> Result<Vec<FilterSpec>, FilterError> {
    Ok(vec![
        FilterSpec::search(["name", "email", "roles.name"])?,
        FilterSpec::Order(OrderSpec::default().sortable([
            "name",
            "email",
            "created_at",
            "updated_at",
            "roles.name",
        ])?),
    ])
}

impl<U, RO, H> UserService for Service<U, RO, H>
where
    U: UserRepository,
    RO: RoleRepository,
    H: HasherRepository,
{
    #[instrument(skip_all, fields(user_id = %identity.id(), page = input.page.page))]
    async fn get_users(
        &self,
        identity: Identity,
        input: GetUsersInput,
    ) -> Result<Paginated<User>, CoreError> {
        ensure_policy(
            self.policy.can_view_users(identity).await,
            "insufficient permissions",
        )?;

        self.user_repository
            .fetch_users(user_filters()?, input.params, input.page)
            .await
    }

    #[instrument(skip_all, fields(user_id = %identity.id(), target = %user_id))]
    async fn get_user(&self, identity: Identity, user_id: Uuid) -> Result<User, CoreError> {
        ensure_policy(
            self.policy.can_view_user(identity, user_id).await,
            "insufficient permissions",
        )?;

        self.user_repository
            .get_by_id(user_id)
            .await?
            .ok_or(CoreError::NotFound)
    }

    #[instrument(skip_all, fields(user_id = %identity.id()))]
    async fn create_user(
        &self,
        identity: Identity,
        input: CreateUserInput,
    ) -> Result<User, CoreError> {
        ensure_policy(
            self.policy.can_create_user(identity).await,
            "insufficient permissions",
        )?;

        let password_hash = self
            .hasher_repository
            .hash_password(&input.password)
            .await?;

        let user = self
            .user_repository
            .create_user(CreateUserRequest {
                name: input.name,
                email: input.email,
                password_hash,
                roles: input.roles,
            })
            .await?;

        info!(created = %user.id, "user created");

        Ok(user)
    }

    #[instrument(skip_all, fields(user_id = %identity.id(), target = %input.user_id))]
    async fn update_user(
        &self,
        identity: Identity,
        input: UpdateUserInput,
    ) -> Result<User, CoreError> {
        ensure_policy(
            self.policy
                .can_update_user(identity.clone(), input.user_id)
                .await,
            "insufficient permissions",
        )?;

        // Updating oneself is allowed, reassigning roles is not.
        if input.roles.is_some() {
            ensure_policy(
                self.policy
                    .has_one_of(&identity, &[Permissions::ManageUsers])
                    .await,
                "insufficient permissions to assign roles",
            )?;
        }

        let password_hash = match input.password {
            Some(password) => Some(self.hasher_repository.hash_password(&password).await?),
            None => None,
        };

        self.user_repository
            .update_user(
                input.user_id,
                UpdateUserRequest {
                    name: input.name,
                    email: input.email,
                    password_hash,
                    roles: input.roles,
                },
            )
            .await
    }

    #[instrument(skip_all, fields(user_id = %identity.id(), target = %user_id))]
    async fn delete_user(&self, identity: Identity, user_id: Uuid) -> Result<(), CoreError> {
        ensure_policy(
            self.policy.can_delete_user(identity, user_id).await,
            "insufficient permissions",
        )?;

        self.user_repository.delete_user(user_id).await?;

        info!(deleted = %user_id, "user deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        common::{services::mocks::mock_service, value_objects::PageRequest},
        crypto::ports::MockHasherRepository,
        filter::{
            entities::{ColumnRef, SortDirection},
            value_objects::RequestParams,
        },
        role::ports::MockRoleRepository,
        user::ports::MockUserRepository,
    };

    fn hasher() -> MockHasherRepository {
        let mut hasher = MockHasherRepository::new();
        hasher.expect_hash_password().returning(|password| {
            let hash = format!("hashed:{password}");
            Box::pin(async move { Ok(hash) })
        });
        hasher
    }

    #[test]
    fn test_user_filters() {
        let filters = user_filters().unwrap();

        match &filters[0] {
            FilterSpec::Search(search) => {
                assert_eq!(search.name(), "query");
                assert_eq!(
                    search.columns()[2],
                    ColumnRef::Related {
                        relation: "roles".to_string(),
                        field: "name".to_string(),
                    }
                );
            }
            other => panic!("expected search, got {other:?}"),
        }

        match &filters[1] {
            FilterSpec::Order(order) => {
                assert_eq!(order.column(), &ColumnRef::Field("id".to_string()));
                assert_eq!(order.direction(), SortDirection::Desc);
                let sortable = order.sortable_columns().unwrap();
                assert!(sortable.contains(&ColumnRef::Field("email".to_string())));
                assert!(!sortable.contains(&ColumnRef::Field("password".to_string())));
            }
            other => panic!("expected order, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_users_passes_filters_and_params() {
        let params = RequestParams::new().with("query", "ali");
        let page = PageRequest::new(Some(1), Some(5));

        let mut users = MockUserRepository::new();
        let expected_params = params.clone();
        users
            .expect_fetch_users()
            .withf(move |filters, params, requested| {
                *filters == user_filters().unwrap()
                    && *params == expected_params
                    && *requested == page
            })
            .times(1)
            .returning(|_, _, page| {
                let users = vec![
                    User::new("Admin".to_string(), "admin@example.org".to_string()),
                    User::new("Alice".to_string(), "alice@example.org".to_string()),
                ];
                Box::pin(async move { Ok(Paginated::new(users, page, 2)) })
            });

        let service = mock_service(
            users,
            MockRoleRepository::new(),
            MockHasherRepository::new(),
            &["view users"],
        );

        let result = service
            .get_users(Identity::new(Uuid::new_v4()), GetUsersInput { params, page })
            .await
            .unwrap();

        assert_eq!(result.total, 2);
        assert_eq!(result.per_page, 5);
    }

    #[tokio::test]
    async fn test_get_users_requires_permission() {
        let mut users = MockUserRepository::new();
        users.expect_fetch_users().never();

        let service = mock_service(
            users,
            MockRoleRepository::new(),
            MockHasherRepository::new(),
            &[],
        );

        let result = service
            .get_users(Identity::new(Uuid::new_v4()), GetUsersInput::default())
            .await;

        assert!(matches!(result, Err(CoreError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_get_user_self_and_missing() {
        let guest = User::new("Guest".to_string(), "guest@example.org".to_string());
        let guest_id = guest.id;

        let mut users = MockUserRepository::new();
        users.expect_get_by_id().returning(move |user_id| {
            let found = (user_id == guest.id).then(|| guest.clone());
            Box::pin(async move { Ok(found) })
        });

        let service = mock_service(
            users,
            MockRoleRepository::new(),
            MockHasherRepository::new(),
            &[],
        );

        let found = service
            .get_user(Identity::new(guest_id), guest_id)
            .await
            .unwrap();
        assert_eq!(found.name, "Guest");

        let other = service
            .get_user(Identity::new(guest_id), Uuid::new_v4())
            .await;
        assert!(matches!(other, Err(CoreError::Forbidden(_))));

        let mut users = MockUserRepository::new();
        users
            .expect_get_by_id()
            .returning(|_| Box::pin(async { Ok(None) }));
        let service = mock_service(
            users,
            MockRoleRepository::new(),
            MockHasherRepository::new(),
            &["manage users"],
        );

        let missing = service
            .get_user(Identity::new(Uuid::new_v4()), Uuid::new_v4())
            .await;
        assert_eq!(missing, Err(CoreError::NotFound));
    }

    #[tokio::test]
    async fn test_create_user_hashes_password() {
        let mut users = MockUserRepository::new();
        users
            .expect_create_user()
            .withf(|request| {
                request.password_hash == "hashed:hunter2" && request.roles == ["editor"]
            })
            .times(1)
            .returning(|request| {
                let user = User::new(request.name, request.email);
                Box::pin(async move { Ok(user) })
            });

        let service = mock_service(users, MockRoleRepository::new(), hasher(), &["manage users"]);

        let created = service
            .create_user(
                Identity::new(Uuid::new_v4()),
                CreateUserInput {
                    name: "Bob".to_string(),
                    email: "bob@example.org".to_string(),
                    password: "hunter2".to_string(),
                    roles: vec!["editor".to_string()],
                },
            )
            .await
            .unwrap();

        assert_eq!(created.name, "Bob");
    }

    #[tokio::test]
    async fn test_create_user_propagates_duplicate_email() {
        let mut users = MockUserRepository::new();
        users.expect_create_user().returning(|request| {
            Box::pin(async move { Err(CoreError::AlreadyExists(request.email)) })
        });

        let service = mock_service(users, MockRoleRepository::new(), hasher(), &["manage users"]);

        let result = service
            .create_user(
                Identity::new(Uuid::new_v4()),
                CreateUserInput {
                    name: "Bob".to_string(),
                    email: "bob@example.org".to_string(),
                    password: "hunter2".to_string(),
                    roles: vec![],
                },
            )
            .await;

        assert_eq!(
            result,
            Err(CoreError::AlreadyExists("bob@example.org".to_string()))
        );
    }

    #[tokio::test]
    async fn test_update_self_without_roles() {
        let guest = User::new("Guest".to_string(), "guest@example.org".to_string());
        let guest_id = guest.id;

        let mut users = MockUserRepository::new();
        users
            .expect_update_user()
            .withf(move |user_id, request| {
                *user_id == guest_id
                    && *request
                        == UpdateUserRequest {
                            name: Some("Renamed".to_string()),
                            password_hash: Some("hashed:new-secret".to_string()),
                            ..Default::default()
                        }
            })
            .times(1)
            .returning(move |_, request| {
                let mut user = guest.clone();
                if let Some(name) = request.name {
                    user.name = name;
                }
                Box::pin(async move { Ok(user) })
            });

        let service = mock_service(users, MockRoleRepository::new(), hasher(), &[]);

        let updated = service
            .update_user(
                Identity::new(guest_id),
                UpdateUserInput {
                    user_id: guest_id,
                    name: Some("Renamed".to_string()),
                    password: Some("new-secret".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Renamed");
    }

    #[tokio::test]
    async fn test_update_self_roles_is_forbidden() {
        let mut users = MockUserRepository::new();
        users.expect_update_user().never();

        let service = mock_service(
            users,
            MockRoleRepository::new(),
            MockHasherRepository::new(),
            &[],
        );

        let guest_id = Uuid::new_v4();
        let result = service
            .update_user(
                Identity::new(guest_id),
                UpdateUserInput {
                    user_id: guest_id,
                    roles: Some(vec!["admin".to_string()]),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(CoreError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_delete_user() {
        let target = Uuid::new_v4();

        let mut users = MockUserRepository::new();
        users
            .expect_delete_user()
            .withf(move |user_id| *user_id == target)
            .times(1)
            .returning(|_| Box::pin(async { Ok(()) }));

        let service = mock_service(
            users,
            MockRoleRepository::new(),
            MockHasherRepository::new(),
            &["manage users"],
        );

        let result = service
            .delete_user(Identity::new(Uuid::new_v4()), target)
            .await;
        assert_eq!(result, Ok(()));
    }

    #[tokio::test]
    async fn test_delete_missing_user() {
        let mut users = MockUserRepository::new();
        users
            .expect_delete_user()
            .returning(|_| Box::pin(async { Err(CoreError::NotFound) }));

        let service = mock_service(
            users,
            MockRoleRepository::new(),
            MockHasherRepository::new(),
            &["manage users"],
        );

        let result = service
            .delete_user(Identity::new(Uuid::new_v4()), Uuid::new_v4())
            .await;
        assert_eq!(result, Err(CoreError::NotFound));
    }

    #[tokio::test]
    async fn test_guest_cannot_delete_others() {
        let mut users = MockUserRepository::new();
        users.expect_delete_user().never();

        let service = mock_service(
            users,
            MockRoleRepository::new(),
            MockHasherRepository::new(),
            &[],
        );

        let result = service
            .delete_user(Identity::new(Uuid::new_v4()), Uuid::new_v4())
            .await;

        assert!(matches!(result, Err(CoreError::Forbidden(_))));
    }
}
