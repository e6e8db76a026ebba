//! Utility module — error types, logging, timestamps, validators

pub mod error;
pub mod logger;
pub mod time;
pub mod validate;

pub use error::{AppError, AppResponse, AppResult};
