//! External-facing services - mail delivery and the payment gateway

pub mod mail;
pub mod payment;

pub use mail::MailService;
pub use payment::PaymentService;
