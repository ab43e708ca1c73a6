//! Product endpoints, backed by the stock ledger.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use store_core::{DrainReport, NewProduct, Product};

use crate::error::{ApiError, ApiResponse, ApiResult};
use crate::extract::ApiJson;
use crate::state::AppState;

/// A product update and the backorders it released.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdated {
    pub product: Product,
    pub drain: DrainReport,
}

/// GET /products
pub async fn list_products(State(state): State<AppState>) -> ApiResult<Vec<Product>> {
    Ok(Json(state.ledger.list().await?))
}

/// GET /products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Product> {
    Ok(Json(state.ledger.get(&id).await?))
}

/// POST /products
pub async fn create_product(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewProduct>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = state.ledger.create(input, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(changes): ApiJson<NewProduct>,
) -> ApiResult<ProductUpdated> {
    let (product, drain) = state.ledger.update(&id, changes, Utc::now()).await?;
    Ok(Json(ProductUpdated { product, drain }))
}

/// DELETE /products/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<()>> {
    state.ledger.delete(&id).await?;
    Ok(Json(ApiResponse::success("Product deleted", None)))
}
