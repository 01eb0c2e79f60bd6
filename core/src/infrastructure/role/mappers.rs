use chrono::{TimeZone, Utc};

use crate::domain::role::entities::role::{Permission, Role, RoleWithPermissions};
use crate::entity::{permissions::Model as PermissionModel, roles::Model as RoleModel};

impl From<RoleModel> for Role {
    fn from(model: RoleModel) -> Self {
        Role {
            id: model.id,
            name: model.name,
            created_at: Utc.from_utc_datetime(&model.created_at),
            updated_at: Utc.from_utc_datetime(&model.updated_at),
        }
    }
}

impl From<&RoleModel> for Role {
    fn from(model: &RoleModel) -> Self {
        Role::from(model.clone())
    }
}

impl From<PermissionModel> for Permission {
    fn from(model: PermissionModel) -> Self {
        Permission {
            id: model.id,
            name: model.name,
        }
    }
}

impl From<(RoleModel, Vec<PermissionModel>)> for RoleWithPermissions {
    fn from((role, permissions): (RoleModel, Vec<PermissionModel>)) -> Self {
        RoleWithPermissions {
            role: Role::from(role),
            permissions: permissions.into_iter().map(Permission::from).collect(),
        }
    }
}
