//! Request-driven query filtering.
//!
//! Services describe how a listing can be narrowed and sorted as an ordered
//! list of [`entities::FilterSpec`]s; [`services::QueryFilterEngine`] threads
//! a base query through them using the parameters of the current request.

pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;
