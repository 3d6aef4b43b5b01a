//! Gym Client - HTTP client for the gym membership platform
//!
//! Provides typed API calls to the backend plus the client-side order
//! aggregation layer: an insertion-ordered, deduplicated order registry,
//! status classification at fetch time, and synchronous change
//! notification for display surfaces.

pub mod config;
pub mod error;
pub mod feed;
pub mod http;
pub mod registry;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use feed::OrderFeed;
pub use http::HttpClient;
pub use registry::{ListenerId, OrderRegistry, RegistryError};

// Re-export shared types for convenience
pub use shared::{ApiResponse, Order, OrderRecord, OrderStatus, classify};
