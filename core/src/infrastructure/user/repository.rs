use std::sync::Arc;

use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, LoaderTrait,
    ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
    sea_query::{Expr, Query},
};
use tracing::error;
use uuid::Uuid;

use crate::domain::{
    common::{
        entities::app_errors::CoreError,
        value_objects::{PageRequest, Paginated},
    },
    filter::{entities::FilterSpec, services::QueryFilterEngine, value_objects::RequestParams},
    user::{
        entities::user::User,
        ports::UserRepository,
        value_objects::{CreateUserRequest, UpdateUserRequest},
    },
};
use crate::entity::{
    permissions, role_permissions, roles,
    user_roles::{self, ActiveModel as UserRoleActiveModel},
    users::{ActiveModel as UserActiveModel, Column as UserColumn, Entity as UserEntity},
};

#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pub db: Arc<DatabaseConnection>,
}

impl PostgresUserRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

/// Looks up roles by name; every requested name must exist.
async fn find_roles<C: ConnectionTrait>(
    db: &C,
    names: &[String],
) -> Result<Vec<roles::Model>, CoreError> {
    if names.is_empty() {
        return Ok(Vec::new());
    }

    let found = roles::Entity::find()
        .filter(roles::Column::Name.is_in(names.iter().cloned()))
        .order_by_asc(roles::Column::Name)
        .all(db)
        .await
        .map_err(|e| {
            error!("Failed to fetch roles by name: {}", e);
            CoreError::InternalServerError
        })?;

    if let Some(missing) = names
        .iter()
        .find(|name| !found.iter().any(|role| &role.name == *name))
    {
        return Err(CoreError::UnknownRole(missing.clone()));
    }

    Ok(found)
}

/// Replaces the user's role assignments with `roles`.
async fn sync_roles<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    roles: &[roles::Model],
) -> Result<(), CoreError> {
    user_roles::Entity::delete_many()
        .filter(user_roles::Column::UserId.eq(user_id))
        .exec(db)
        .await
        .map_err(|e| {
            error!("Failed to detach user roles: {}", e);
            CoreError::InternalServerError
        })?;

    if roles.is_empty() {
        return Ok(());
    }

    user_roles::Entity::insert_many(roles.iter().map(|role| UserRoleActiveModel {
        user_id: Set(user_id),
        role_id: Set(role.id),
    }))
    .exec(db)
    .await
    .map_err(|e| {
        error!("Failed to attach user roles: {}", e);
        CoreError::InternalServerError
    })?;

    Ok(())
}

async fn email_taken<C: ConnectionTrait>(
    db: &C,
    email: &str,
    except: Option<Uuid>,
) -> Result<bool, CoreError> {
    let mut query = UserEntity::find().filter(UserColumn::Email.eq(email));
    if let Some(user_id) = except {
        query = query.filter(UserColumn::Id.ne(user_id));
    }

    let count = query.count(db).await.map_err(|e| {
        error!("Failed to check email uniqueness: {}", e);
        CoreError::InternalServerError
    })?;

    Ok(count > 0)
}

impl UserRepository for PostgresUserRepository {
    async fn fetch_users(
        &self,
        filters: Vec<FilterSpec>,
        params: RequestParams,
        page: PageRequest,
    ) -> Result<Paginated<User>, CoreError> {
        let query = QueryFilterEngine::run(UserEntity::find(), &filters, &params)?;
        let paginator = query.paginate(self.db.as_ref(), page.per_page);

        let total = paginator.num_items().await.map_err(|e| {
            error!("Failed to count users: {}", e);
            CoreError::InternalServerError
        })?;

        let models = paginator.fetch_page(page.index()).await.map_err(|e| {
            error!("Failed to fetch users: {}", e);
            CoreError::InternalServerError
        })?;

        let roles = models
            .load_many_to_many(roles::Entity, user_roles::Entity, self.db.as_ref())
            .await
            .map_err(|e| {
                error!("Failed to load user roles: {}", e);
                CoreError::InternalServerError
            })?;

        let users = models
            .into_iter()
            .zip(roles)
            .map(User::from)
            .collect::<Vec<User>>();

        Ok(Paginated::new(users, page, total))
    }

    async fn get_by_id(&self, user_id: Uuid) -> Result<Option<User>, CoreError> {
        let Some(model) = UserEntity::find_by_id(user_id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| {
                error!("Failed to get user by id: {}", e);
                CoreError::InternalServerError
            })?
        else {
            return Ok(None);
        };

        let roles = model
            .find_related(roles::Entity)
            .order_by_asc(roles::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(|e| {
                error!("Failed to get user roles: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(Some(User::from((model, roles))))
    }

    async fn create_user(&self, request: CreateUserRequest) -> Result<User, CoreError> {
        let txn = self.db.begin().await.map_err(|e| {
            error!("Failed to begin transaction: {}", e);
            CoreError::InternalServerError
        })?;

        if email_taken(&txn, &request.email, None).await? {
            return Err(CoreError::AlreadyExists(request.email));
        }

        let roles = find_roles(&txn, &request.roles).await?;
        let user = User::new(request.name, request.email);

        let model = UserActiveModel {
            id: Set(user.id),
            name: Set(user.name),
            email: Set(user.email),
            password: Set(request.password_hash),
            created_at: Set(user.created_at.naive_utc()),
            updated_at: Set(user.updated_at.naive_utc()),
        }
        .insert(&txn)
        .await
        .map_err(|e| {
            error!("Failed to create user: {}", e);
            CoreError::InternalServerError
        })?;

        sync_roles(&txn, model.id, &roles).await?;

        txn.commit().await.map_err(|e| {
            error!("Failed to commit user creation: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(User::from((model, roles)))
    }

    async fn update_user(
        &self,
        user_id: Uuid,
        request: UpdateUserRequest,
    ) -> Result<User, CoreError> {
        let txn = self.db.begin().await.map_err(|e| {
            error!("Failed to begin transaction: {}", e);
            CoreError::InternalServerError
        })?;

        let model = UserEntity::find_by_id(user_id)
            .one(&txn)
            .await
            .map_err(|e| {
                error!("Failed to get user by id: {}", e);
                CoreError::InternalServerError
            })?
            .ok_or(CoreError::NotFound)?;

        if let Some(email) = &request.email
            && email_taken(&txn, email, Some(user_id)).await?
        {
            return Err(CoreError::AlreadyExists(email.clone()));
        }

        let mut active: UserActiveModel = model.into();
        if let Some(name) = request.name {
            active.name = Set(name);
        }
        if let Some(email) = request.email {
            active.email = Set(email);
        }
        if let Some(password_hash) = request.password_hash {
            active.password = Set(password_hash);
        }
        active.updated_at = Set(Utc::now().naive_utc());

        let model = active.update(&txn).await.map_err(|e| {
            error!("Failed to update user: {}", e);
            CoreError::InternalServerError
        })?;

        let roles = match request.roles {
            Some(names) => {
                let roles = find_roles(&txn, &names).await?;
                sync_roles(&txn, user_id, &roles).await?;
                roles
            }
            None => model
                .find_related(roles::Entity)
                .order_by_asc(roles::Column::Name)
                .all(&txn)
                .await
                .map_err(|e| {
                    error!("Failed to get user roles: {}", e);
                    CoreError::InternalServerError
                })?,
        };

        txn.commit().await.map_err(|e| {
            error!("Failed to commit user update: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(User::from((model, roles)))
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<(), CoreError> {
        let txn = self.db.begin().await.map_err(|e| {
            error!("Failed to begin transaction: {}", e);
            CoreError::InternalServerError
        })?;

        user_roles::Entity::delete_many()
            .filter(user_roles::Column::UserId.eq(user_id))
            .exec(&txn)
            .await
            .map_err(|e| {
                error!("Failed to detach user roles: {}", e);
                CoreError::InternalServerError
            })?;

        let result = UserEntity::delete_by_id(user_id)
            .exec(&txn)
            .await
            .map_err(|e| {
                error!("Failed to delete user: {}", e);
                CoreError::InternalServerError
            })?;

        if result.rows_affected == 0 {
            return Err(CoreError::NotFound);
        }

        txn.commit().await.map_err(|e| {
            error!("Failed to commit user deletion: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(())
    }

    async fn get_permission_names(&self, user_id: Uuid) -> Result<Vec<String>, CoreError> {
        let granted = Query::select()
            .column((role_permissions::Entity, role_permissions::Column::PermissionId))
            .from(role_permissions::Entity)
            .inner_join(
                user_roles::Entity,
                Expr::col((user_roles::Entity, user_roles::Column::RoleId))
                    .equals((role_permissions::Entity, role_permissions::Column::RoleId)),
            )
            .and_where(Expr::col((user_roles::Entity, user_roles::Column::UserId)).eq(user_id))
            .to_owned();

        let permissions = permissions::Entity::find()
            .filter(permissions::Column::Id.in_subquery(granted))
            .order_by_asc(permissions::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(|e| {
                error!("Failed to get user permissions: {}", e);
                CoreError::InternalServerError
            })?
            .into_iter()
            .map(|permission| permission.name)
            .collect::<Vec<String>>();

        Ok(permissions)
    }
}
