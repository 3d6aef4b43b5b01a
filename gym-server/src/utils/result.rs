//! Application result alias

use crate::utils::AppError;

/// Result type used by handlers and services
pub type AppResult<T> = Result<T, AppError>;
