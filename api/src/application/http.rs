pub mod query_extractor;
pub mod query_params;
pub mod role;
pub mod server;
pub mod user;
