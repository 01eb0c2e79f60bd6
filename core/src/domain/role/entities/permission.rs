use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Permissions the built-in policies understand, stored by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Permissions {
    ViewUsers,
    ManageUsers,
    ViewRoles,
    ManageRoles,
}

impl Permissions {
    pub const ALL: [Permissions; 4] = [
        Permissions::ViewUsers,
        Permissions::ManageUsers,
        Permissions::ViewRoles,
        Permissions::ManageRoles,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Permissions::ViewUsers => "view users",
            Permissions::ManageUsers => "manage users",
            Permissions::ViewRoles => "view roles",
            Permissions::ManageRoles => "manage roles",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|permission| permission.name() == name)
    }

    pub fn has_one_of_permissions(
        permissions: &[Permissions],
        required: &[Permissions],
    ) -> bool {
        required
            .iter()
            .any(|permission| permissions.contains(permission))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for permission in Permissions::ALL {
            assert_eq!(Permissions::from_name(permission.name()), Some(permission));
        }
        assert_eq!(Permissions::from_name("edit articles"), None);
    }

    #[test]
    fn test_has_one_of_permissions() {
        let granted = [Permissions::ViewUsers];
        assert!(Permissions::has_one_of_permissions(
            &granted,
            &[Permissions::ViewUsers, Permissions::ManageUsers]
        ));
        assert!(!Permissions::has_one_of_permissions(
            &granted,
            &[Permissions::ManageRoles]
        ));
    }
}
