use std::sync::Arc;

use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use tracing::error;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    filter::{entities::FilterSpec, services::QueryFilterEngine, value_objects::RequestParams},
    role::{
        entities::role::{Role, RoleWithPermissions},
        ports::RoleRepository,
    },
};
use crate::entity::{
    permissions,
    role_permissions::{self, ActiveModel as RolePermissionActiveModel},
    roles::{ActiveModel as RoleActiveModel, Column as RoleColumn, Entity as RoleEntity},
    user_roles,
};

#[derive(Debug, Clone)]
pub struct PostgresRoleRepository {
    pub db: Arc<DatabaseConnection>,
}

impl PostgresRoleRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

/// Looks up permissions by name; every requested name must exist.
async fn find_permissions<C: ConnectionTrait>(
    db: &C,
    names: &[String],
) -> Result<Vec<permissions::Model>, CoreError> {
    if names.is_empty() {
        return Ok(Vec::new());
    }

    let found = permissions::Entity::find()
        .filter(permissions::Column::Name.is_in(names.iter().cloned()))
        .order_by_asc(permissions::Column::Name)
        .all(db)
        .await
        .map_err(|e| {
            error!("Failed to fetch permissions by name: {}", e);
            CoreError::InternalServerError
        })?;

    if let Some(missing) = names
        .iter()
        .find(|name| !found.iter().any(|permission| &permission.name == *name))
    {
        return Err(CoreError::UnknownPermission(missing.clone()));
    }

    Ok(found)
}

/// Replaces the role's permission set with `permissions`.
async fn sync_permissions<C: ConnectionTrait>(
    db: &C,
    role_id: Uuid,
    permissions: &[permissions::Model],
) -> Result<(), CoreError> {
    role_permissions::Entity::delete_many()
        .filter(role_permissions::Column::RoleId.eq(role_id))
        .exec(db)
        .await
        .map_err(|e| {
            error!("Failed to detach role permissions: {}", e);
            CoreError::InternalServerError
        })?;

    if permissions.is_empty() {
        return Ok(());
    }

    role_permissions::Entity::insert_many(permissions.iter().map(|permission| {
        RolePermissionActiveModel {
            role_id: Set(role_id),
            permission_id: Set(permission.id),
        }
    }))
    .exec(db)
    .await
    .map_err(|e| {
        error!("Failed to attach role permissions: {}", e);
        CoreError::InternalServerError
    })?;

    Ok(())
}

async fn name_taken<C: ConnectionTrait>(
    db: &C,
    name: &str,
    except: Option<Uuid>,
) -> Result<bool, CoreError> {
    let mut query = RoleEntity::find().filter(RoleColumn::Name.eq(name));
    if let Some(role_id) = except {
        query = query.filter(RoleColumn::Id.ne(role_id));
    }

    let count = query.count(db).await.map_err(|e| {
        error!("Failed to check role name uniqueness: {}", e);
        CoreError::InternalServerError
    })?;

    Ok(count > 0)
}

impl RoleRepository for PostgresRoleRepository {
    async fn fetch_roles(
        &self,
        filters: Vec<FilterSpec>,
        params: RequestParams,
    ) -> Result<Vec<Role>, CoreError> {
        let roles = QueryFilterEngine::run(RoleEntity::find(), &filters, &params)?
            .all(self.db.as_ref())
            .await
            .map_err(|e| {
                error!("Failed to fetch roles: {}", e);
                CoreError::InternalServerError
            })?
            .into_iter()
            .map(Role::from)
            .collect::<Vec<Role>>();

        Ok(roles)
    }

    async fn get_by_id(&self, role_id: Uuid) -> Result<Option<RoleWithPermissions>, CoreError> {
        let Some(model) = RoleEntity::find_by_id(role_id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| {
                error!("Failed to get role by id: {}", e);
                CoreError::InternalServerError
            })?
        else {
            return Ok(None);
        };

        let permissions = model
            .find_related(permissions::Entity)
            .order_by_asc(permissions::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(|e| {
                error!("Failed to get role permissions: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(Some(RoleWithPermissions::from((model, permissions))))
    }

    async fn create_role(
        &self,
        name: String,
        permissions: Vec<String>,
    ) -> Result<RoleWithPermissions, CoreError> {
        let txn = self.db.begin().await.map_err(|e| {
            error!("Failed to begin transaction: {}", e);
            CoreError::InternalServerError
        })?;

        if name_taken(&txn, &name, None).await? {
            return Err(CoreError::AlreadyExists(name));
        }

        let permissions = find_permissions(&txn, &permissions).await?;
        let role = Role::new(name);

        let model = RoleActiveModel {
            id: Set(role.id),
            name: Set(role.name),
            created_at: Set(role.created_at.naive_utc()),
            updated_at: Set(role.updated_at.naive_utc()),
        }
        .insert(&txn)
        .await
        .map_err(|e| {
            error!("Failed to create role: {}", e);
            CoreError::InternalServerError
        })?;

        sync_permissions(&txn, model.id, &permissions).await?;

        txn.commit().await.map_err(|e| {
            error!("Failed to commit role creation: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(RoleWithPermissions::from((model, permissions)))
    }

    async fn update_role(
        &self,
        role_id: Uuid,
        name: Option<String>,
        permissions: Option<Vec<String>>,
    ) -> Result<RoleWithPermissions, CoreError> {
        let txn = self.db.begin().await.map_err(|e| {
            error!("Failed to begin transaction: {}", e);
            CoreError::InternalServerError
        })?;

        let model = RoleEntity::find_by_id(role_id)
            .one(&txn)
            .await
            .map_err(|e| {
                error!("Failed to get role by id: {}", e);
                CoreError::InternalServerError
            })?
            .ok_or(CoreError::NotFound)?;

        if let Some(name) = &name
            && name_taken(&txn, name, Some(role_id)).await?
        {
            return Err(CoreError::AlreadyExists(name.clone()));
        }

        let mut active: RoleActiveModel = model.into();
        if let Some(name) = name {
            active.name = Set(name);
        }
        active.updated_at = Set(Utc::now().naive_utc());

        let model = active.update(&txn).await.map_err(|e| {
            error!("Failed to update role: {}", e);
            CoreError::InternalServerError
        })?;

        let permissions = match permissions {
            Some(names) => {
                let permissions = find_permissions(&txn, &names).await?;
                sync_permissions(&txn, role_id, &permissions).await?;
                permissions
            }
            None => model
                .find_related(permissions::Entity)
                .order_by_asc(permissions::Column::Name)
                .all(&txn)
                .await
                .map_err(|e| {
                    error!("Failed to get role permissions: {}", e);
                    CoreError::InternalServerError
                })?,
        };

        txn.commit().await.map_err(|e| {
            error!("Failed to commit role update: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(RoleWithPermissions::from((model, permissions)))
    }

    async fn delete_role(&self, role_id: Uuid) -> Result<(), CoreError> {
        let txn = self.db.begin().await.map_err(|e| {
            error!("Failed to begin transaction: {}", e);
            CoreError::InternalServerError
        })?;

        role_permissions::Entity::delete_many()
            .filter(role_permissions::Column::RoleId.eq(role_id))
            .exec(&txn)
            .await
            .map_err(|e| {
                error!("Failed to detach role permissions: {}", e);
                CoreError::InternalServerError
            })?;

        user_roles::Entity::delete_many()
            .filter(user_roles::Column::RoleId.eq(role_id))
            .exec(&txn)
            .await
            .map_err(|e| {
                error!("Failed to detach role from users: {}", e);
                CoreError::InternalServerError
            })?;

        let result = RoleEntity::delete_by_id(role_id)
            .exec(&txn)
            .await
            .map_err(|e| {
                error!("Failed to delete role: {}", e);
                CoreError::InternalServerError
            })?;

        if result.rows_affected == 0 {
            return Err(CoreError::NotFound);
        }

        txn.commit().await.map_err(|e| {
            error!("Failed to commit role deletion: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(())
    }
}
