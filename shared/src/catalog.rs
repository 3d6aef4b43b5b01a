//! Membership catalog types: plans and testimonials.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Plans
// ============================================================================

/// A purchasable membership plan.
///
/// Amounts cross the wire as plain JSON numbers (`rust_decimal`'s float
/// representation); internally they stay exact decimals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Plan ID
    pub id: String,
    /// Display title
    pub title: String,
    /// Price in whole currency units
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Billing period label, e.g. "/month"
    pub duration: String,
    /// Promotional discount percentage (0-100)
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub discount_rate: Option<Decimal>,
    /// Short description
    pub description: String,
    /// Included features
    pub features: Vec<String>,
    /// Features shown as excluded
    #[serde(default)]
    pub unavailable_features: Vec<String>,
    /// Checkout button label
    pub action_label: String,
}

/// Payload for creating a plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanCreate {
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub duration: String,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub discount_rate: Option<Decimal>,
    pub description: String,
    pub features: Vec<String>,
    #[serde(default)]
    pub unavailable_features: Vec<String>,
    pub action_label: String,
}

/// Partial update payload for a plan.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlanUpdate {
    pub title: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    pub duration: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub discount_rate: Option<Decimal>,
    pub description: Option<String>,
    pub features: Option<Vec<String>>,
    pub unavailable_features: Option<Vec<String>>,
    pub action_label: Option<String>,
}

impl Plan {
    /// Build a plan from a create payload, assigning a fresh ID.
    pub fn create(input: PlanCreate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: input.title,
            price: input.price,
            duration: input.duration,
            discount_rate: input.discount_rate,
            description: input.description,
            features: input.features,
            unavailable_features: input.unavailable_features,
            action_label: input.action_label,
        }
    }

    /// Apply a partial update in place.
    pub fn apply(&mut self, update: PlanUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(duration) = update.duration {
            self.duration = duration;
        }
        if update.discount_rate.is_some() {
            self.discount_rate = update.discount_rate;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(features) = update.features {
            self.features = features;
        }
        if let Some(unavailable) = update.unavailable_features {
            self.unavailable_features = unavailable;
        }
        if let Some(label) = update.action_label {
            self.action_label = label;
        }
    }
}

// ============================================================================
// Testimonials
// ============================================================================

/// A member testimonial shown on the landing page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Testimonial {
    /// Testimonial ID
    pub id: String,
    /// Member name
    pub name: String,
    /// Feedback text
    pub feedback: String,
    /// Optional portrait URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Payload for creating a testimonial. Name and feedback are required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestimonialCreate {
    pub name: String,
    pub feedback: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Partial update payload for a testimonial.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TestimonialUpdate {
    pub name: Option<String>,
    pub feedback: Option<String>,
    pub image: Option<String>,
}

impl Testimonial {
    /// Build a testimonial from a create payload, assigning a fresh ID.
    pub fn create(input: TestimonialCreate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            feedback: input.feedback,
            image: input.image,
        }
    }

    /// Apply a partial update in place.
    pub fn apply(&mut self, update: TestimonialUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(feedback) = update.feedback {
            self.feedback = feedback;
        }
        if update.image.is_some() {
            self.image = update.image;
        }
    }
}
