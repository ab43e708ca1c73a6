//! Backorder endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;

use store_core::{Backorder, NewBackorder};

use crate::error::{ApiError, ApiResponse, ApiResult};
use crate::extract::ApiJson;
use crate::state::AppState;

/// GET /backorders
pub async fn list_backorders(State(state): State<AppState>) -> ApiResult<Vec<Backorder>> {
    Ok(Json(state.backorders.list().await?))
}

/// GET /backorders/{id}
pub async fn get_backorder(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Backorder> {
    Ok(Json(state.backorders.get(&id).await?))
}

/// POST /backorders
pub async fn create_backorder(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<NewBackorder>,
) -> Result<(StatusCode, Json<Backorder>), ApiError> {
    let backorder = state.backorders.enqueue(request, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(backorder)))
}

/// PUT /backorders/{id}
pub async fn update_backorder(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(changes): ApiJson<NewBackorder>,
) -> ApiResult<Backorder> {
    Ok(Json(state.backorders.update(&id, changes).await?))
}

/// DELETE /backorders/{id}
pub async fn delete_backorder(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<()>> {
    state.backorders.dequeue(&id).await?;
    Ok(Json(ApiResponse::success("Backorder deleted", None)))
}
