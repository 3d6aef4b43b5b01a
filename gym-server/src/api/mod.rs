//! API route modules
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`auth`] - registration, login, OTP and admin check
//! - [`plans`] - membership plan management
//! - [`testimonials`] - testimonial management
//! - [`orders`] - order recording and listings
//! - [`payments`] - payment gateway checkout, verification and receipts

pub mod auth;
pub mod health;

// Data model APIs
pub mod orders;
pub mod payments;
pub mod plans;
pub mod testimonials;

// Re-export common types for handlers
pub use crate::utils::AppResult;
