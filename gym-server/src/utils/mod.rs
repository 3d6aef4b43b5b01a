//! Utility modules - error handling, logging, validation

pub mod error;
pub mod logger;
pub mod result;
pub mod validation;

pub use error::{AppError, ok, ok_with_message};
pub use result::AppResult;
