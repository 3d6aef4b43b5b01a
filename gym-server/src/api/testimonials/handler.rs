//! Testimonial API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_TEXT_LEN, MAX_URL_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::{Testimonial, TestimonialCreate, TestimonialUpdate};

fn validate_create(payload: &TestimonialCreate) -> AppResult<()> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.feedback, "feedback", MAX_TEXT_LEN)?;
    validate_optional_text(&payload.image, "image", MAX_URL_LEN)?;
    Ok(())
}

fn validate_update(payload: &TestimonialUpdate) -> AppResult<()> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(feedback) = &payload.feedback {
        validate_required_text(feedback, "feedback", MAX_TEXT_LEN)?;
    }
    validate_optional_text(&payload.image, "image", MAX_URL_LEN)?;
    Ok(())
}

/// GET /api/testimonials - all testimonials
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Testimonial>>> {
    let testimonials = state.storage.list_testimonials()?;
    Ok(Json(testimonials))
}

/// GET /api/testimonials/:id - single testimonial
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Testimonial>> {
    let testimonial = state
        .storage
        .get_testimonial(&id)?
        .ok_or_else(|| AppError::not_found(format!("Testimonial {} not found", id)))?;
    Ok(Json(testimonial))
}

/// POST /api/testimonials - create testimonial (admin)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<TestimonialCreate>,
) -> AppResult<Json<Testimonial>> {
    validate_create(&payload)?;

    let testimonial = Testimonial::create(payload);
    state.storage.put_testimonial(&testimonial)?;

    tracing::info!(testimonial_id = %testimonial.id, name = %testimonial.name, "Testimonial created");

    Ok(Json(testimonial))
}

/// PUT /api/testimonials/:id - update testimonial (admin)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<TestimonialUpdate>,
) -> AppResult<Json<Testimonial>> {
    validate_update(&payload)?;

    let mut testimonial = state
        .storage
        .get_testimonial(&id)?
        .ok_or_else(|| AppError::not_found(format!("Testimonial {} not found", id)))?;

    testimonial.apply(payload);
    state.storage.put_testimonial(&testimonial)?;

    tracing::info!(testimonial_id = %testimonial.id, "Testimonial updated");

    Ok(Json(testimonial))
}

/// DELETE /api/testimonials/:id - delete testimonial (admin)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let removed = state.storage.delete_testimonial(&id)?;
    if !removed {
        return Err(AppError::not_found(format!("Testimonial {} not found", id)));
    }

    tracing::info!(testimonial_id = %id, "Testimonial deleted");

    Ok(Json(true))
}
