//! Membership plan API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;

use crate::core::ServerState;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, MAX_TEXT_LEN, validate_positive_amount,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::{Plan, PlanCreate, PlanUpdate};

fn validate_discount_rate(rate: Option<Decimal>) -> AppResult<()> {
    if let Some(rate) = rate
        && (rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED)
    {
        return Err(AppError::validation(
            "discount_rate must be between 0 and 100",
        ));
    }
    Ok(())
}

fn validate_features(features: &[String]) -> AppResult<()> {
    for feature in features {
        validate_required_text(feature, "features", MAX_SHORT_TEXT_LEN)?;
    }
    Ok(())
}

fn validate_create(payload: &PlanCreate) -> AppResult<()> {
    validate_required_text(&payload.title, "title", MAX_NAME_LEN)?;
    validate_positive_amount(payload.price, "price")?;
    validate_required_text(&payload.duration, "duration", MAX_SHORT_TEXT_LEN)?;
    validate_discount_rate(payload.discount_rate)?;
    validate_required_text(&payload.description, "description", MAX_TEXT_LEN)?;
    validate_features(&payload.features)?;
    validate_features(&payload.unavailable_features)?;
    validate_required_text(&payload.action_label, "action_label", MAX_SHORT_TEXT_LEN)?;
    Ok(())
}

fn validate_update(payload: &PlanUpdate) -> AppResult<()> {
    if let Some(title) = &payload.title {
        validate_required_text(title, "title", MAX_NAME_LEN)?;
    }
    if let Some(price) = payload.price {
        validate_positive_amount(price, "price")?;
    }
    if let Some(duration) = &payload.duration {
        validate_required_text(duration, "duration", MAX_SHORT_TEXT_LEN)?;
    }
    validate_discount_rate(payload.discount_rate)?;
    if let Some(description) = &payload.description {
        validate_required_text(description, "description", MAX_TEXT_LEN)?;
    }
    if let Some(features) = &payload.features {
        validate_features(features)?;
    }
    if let Some(unavailable) = &payload.unavailable_features {
        validate_features(unavailable)?;
    }
    if let Some(label) = &payload.action_label {
        validate_required_text(label, "action_label", MAX_SHORT_TEXT_LEN)?;
    }
    Ok(())
}

/// GET /api/plans - all plans, cheapest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Plan>>> {
    let plans = state.storage.list_plans()?;
    Ok(Json(plans))
}

/// GET /api/plans/:id - single plan
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Plan>> {
    let plan = state
        .storage
        .get_plan(&id)?
        .ok_or_else(|| AppError::not_found(format!("Plan {} not found", id)))?;
    Ok(Json(plan))
}

/// POST /api/plans - create plan (admin)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PlanCreate>,
) -> AppResult<Json<Plan>> {
    validate_create(&payload)?;

    let plan = Plan::create(payload);
    state.storage.put_plan(&plan)?;

    tracing::info!(plan_id = %plan.id, title = %plan.title, "Plan created");

    Ok(Json(plan))
}

/// PUT /api/plans/:id - update plan (admin)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<PlanUpdate>,
) -> AppResult<Json<Plan>> {
    validate_update(&payload)?;

    let mut plan = state
        .storage
        .get_plan(&id)?
        .ok_or_else(|| AppError::not_found(format!("Plan {} not found", id)))?;

    plan.apply(payload);
    state.storage.put_plan(&plan)?;

    tracing::info!(plan_id = %plan.id, "Plan updated");

    Ok(Json(plan))
}

/// DELETE /api/plans/:id - delete plan (admin)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let removed = state.storage.delete_plan(&id)?;
    if !removed {
        return Err(AppError::not_found(format!("Plan {} not found", id)));
    }

    tracing::info!(plan_id = %id, "Plan deleted");

    Ok(Json(true))
}
