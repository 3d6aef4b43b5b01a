//! Gym Server - membership commerce backend
//!
//! # Architecture overview
//!
//! This crate is the backend for the gym membership site:
//!
//! - **Storage** (`storage`): embedded redb database for accounts, orders
//!   and the catalog
//! - **Auth** (`auth`): JWT + Argon2 authentication with email OTP
//! - **Services** (`services`): payment gateway and mail delivery
//! - **HTTP API** (`api`): RESTful API endpoints
//!
//! # Module structure
//!
//! ```text
//! gym-server/src/
//! ├── core/          # config, state, server assembly
//! ├── auth/          # JWT auth, passwords, OTP
//! ├── services/      # payment gateway, mail
//! ├── api/           # HTTP routes and handlers
//! ├── utils/         # errors, logging, validation
//! └── storage.rs     # redb storage layer
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState, build_app, build_service};
pub use storage::GymStorage;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Set up the process environment: .env file and logging.
///
/// `LOG_LEVEL` and `LOG_DIR` control the subscriber; both are optional.
pub fn setup_environment() -> anyhow::Result<()> {
    // Load .env if present; a missing file is not an error
    let _ = dotenv::dotenv();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   ______
  / ____/_  ______ ___
 / / __/ / / / __ `__ \
/ /_/ / /_/ / / / / / /
\____/\__, /_/ /_/ /_/
     /____/
    "#
    );
}
