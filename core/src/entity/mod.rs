//! sea-orm mappings of the tables the repositories read and write.

pub mod permissions;
pub mod role_permissions;
pub mod roles;
pub mod user_roles;
pub mod users;
