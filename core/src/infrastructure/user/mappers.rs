use chrono::{TimeZone, Utc};

use crate::domain::{role::entities::role::Role, user::entities::user::User};
use crate::entity::{roles::Model as RoleModel, users::Model as UserModel};

impl From<(UserModel, Vec<RoleModel>)> for User {
    fn from((model, roles): (UserModel, Vec<RoleModel>)) -> Self {
        User {
            id: model.id,
            name: model.name,
            email: model.email,
            roles: roles.into_iter().map(Role::from).collect(),
            created_at: Utc.from_utc_datetime(&model.created_at),
            updated_at: Utc.from_utc_datetime(&model.updated_at),
        }
    }
}

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User::from((model, Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_user_from_model_drops_password() {
        let at = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let model = UserModel {
            id: Uuid::new_v4(),
            name: "Alice".to_string(),
            email: "alice@example.org".to_string(),
            password: "$argon2id$...".to_string(),
            created_at: at,
            updated_at: at,
        };
        let role = RoleModel {
            id: Uuid::new_v4(),
            name: "editor".to_string(),
            created_at: at,
            updated_at: at,
        };

        let user = User::from((model.clone(), vec![role]));

        assert_eq!(user.id, model.id);
        assert_eq!(user.role_names(), vec!["editor"]);
        assert_eq!(user.created_at, Utc.from_utc_datetime(&at));
        assert!(!serde_json::to_string(&user).unwrap().contains("argon2"));
    }
}
