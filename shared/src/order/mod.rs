//! Order domain: records and the time-based status classifier.

pub mod status;
pub mod types;

pub use status::{SERVICE_WINDOW_DAYS, classify};
pub use types::{Order, OrderRecord, OrderStatus};
