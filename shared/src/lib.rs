//! Shared types for the gym membership platform
//!
//! Domain records, the order status classifier, catalog types, and the
//! request/response structures exchanged between the server and its clients.

pub mod catalog;
pub mod client;
pub mod order;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use catalog::{Plan, PlanCreate, PlanUpdate, Testimonial, TestimonialCreate, TestimonialUpdate};
pub use order::{Order, OrderRecord, OrderStatus, classify};
pub use response::ApiResponse;
