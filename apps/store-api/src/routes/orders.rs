//! Order endpoints. Creation has two success shapes:
//!
//! ```text
//! POST /orders ──► Created(order)       ──► 201 {order}
//!             └──► Deferred(backorder)  ──► 202 {message, status: true, body: backorder}
//! ```

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;

use store_core::{DrainReport, Order, OrderOutcome, OrderRequest};

use crate::error::{ApiError, ApiResponse, ApiResult};
use crate::extract::ApiJson;
use crate::state::AppState;

pub const BACKORDER_CREATED: &str =
    "Ordered quantity is more then quantity left in stock : Backorder created";

/// GET /orders
pub async fn list_orders(State(state): State<AppState>) -> ApiResult<Vec<Order>> {
    Ok(Json(state.orders.list().await?))
}

/// GET /orders/{id}
pub async fn get_order(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Order> {
    Ok(Json(state.orders.get(&id).await?))
}

/// POST /orders
pub async fn create_order(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<OrderRequest>,
) -> Result<Response, ApiError> {
    let response = match state.orders.create_order(request, Utc::now()).await? {
        OrderOutcome::Created(order) => (StatusCode::CREATED, Json(order)).into_response(),
        OrderOutcome::Deferred(backorder) => (
            StatusCode::ACCEPTED,
            Json(ApiResponse::success(BACKORDER_CREATED, Some(backorder))),
        )
            .into_response(),
    };
    Ok(response)
}

/// PUT /orders/{id}
pub async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<OrderRequest>,
) -> ApiResult<Order> {
    Ok(Json(state.orders.update_order(&id, request).await?))
}

/// DELETE /orders/{id}
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<DrainReport>> {
    let report = state.orders.delete_order(&id).await?;
    Ok(Json(ApiResponse::success("Order deleted", Some(report))))
}
