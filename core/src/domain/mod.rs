pub mod authentication;
pub mod common;
pub mod crypto;
pub mod filter;
pub mod role;
pub mod user;
