pub mod crypto;
pub mod db;
pub mod filter;
pub mod role;
pub mod user;
