//! Discount endpoints.
//!
//! `GET /discounts/active` is the only place the start/end window is
//! checked. Orders accept a discount outside its window.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use tracing::info;

use store_core::validation::validate_new_discount;
use store_core::{Discount, NewDiscount};

use crate::error::{ApiError, ApiResponse, ApiResult};
use crate::extract::ApiJson;
use crate::state::AppState;

/// GET /discounts
pub async fn list_discounts(State(state): State<AppState>) -> ApiResult<Vec<Discount>> {
    Ok(Json(state.db.discounts().list().await?))
}

/// GET /discounts/active
pub async fn list_active_discounts(State(state): State<AppState>) -> ApiResult<Vec<Discount>> {
    Ok(Json(state.db.discounts().list_active(Utc::now()).await?))
}

/// GET /discounts/{id}
pub async fn get_discount(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Discount> {
    Ok(Json(state.db.discounts().get(&id).await?))
}

/// POST /discounts
pub async fn create_discount(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewDiscount>,
) -> Result<(StatusCode, Json<Discount>), ApiError> {
    validate_new_discount(&input)?;

    let discount = state.db.discounts().insert(&input.into_discount()).await?;

    info!(discount_id = %discount.id, value_bps = discount.value_bps, "Discount created");
    Ok((StatusCode::CREATED, Json(discount)))
}

/// PUT /discounts/{id}
pub async fn update_discount(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(changes): ApiJson<NewDiscount>,
) -> ApiResult<Discount> {
    validate_new_discount(&changes)?;

    let mut discount = state.db.discounts().get(&id).await?;
    discount.apply(changes);
    state.db.discounts().update(&discount).await?;

    Ok(Json(discount))
}

/// DELETE /discounts/{id}
pub async fn delete_discount(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<()>> {
    state.db.discounts().delete(&id).await?;

    info!(discount_id = %id, "Discount deleted");
    Ok(Json(ApiResponse::success("Discount deleted", None)))
}
