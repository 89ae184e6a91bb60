//! Domain layer for the user cache
//!
//! Models, error types, and the port traits collaborators implement.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{HttpError, ServiceError, ServiceResult, StorageError};
