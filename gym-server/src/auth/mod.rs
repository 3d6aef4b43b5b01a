//! Authentication module
//!
//! JWT issuing and validation, request middleware, password hashing and
//! the one-time code store.

pub mod jwt;
pub mod middleware;
pub mod otp;
pub mod password;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_admin, require_auth};
pub use otp::OtpStore;
