pub mod create_role;
pub mod delete_role;
pub mod get_role;
pub mod get_roles;
pub mod update_role;
