//! Customer endpoints. Plain CRUD on the repository.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use tracing::info;

use store_core::validation::validate_new_customer;
use store_core::{Customer, NewCustomer};

use crate::error::{ApiError, ApiResponse, ApiResult};
use crate::extract::ApiJson;
use crate::state::AppState;

/// GET /customers
pub async fn list_customers(State(state): State<AppState>) -> ApiResult<Vec<Customer>> {
    Ok(Json(state.db.customers().list().await?))
}

/// GET /customers/{id}
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Customer> {
    Ok(Json(state.db.customers().get(&id).await?))
}

/// POST /customers
pub async fn create_customer(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewCustomer>,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
    validate_new_customer(&input)?;

    let customer = state
        .db
        .customers()
        .insert(&input.into_customer(Utc::now()))
        .await?;

    info!(customer_id = %customer.id, "Customer created");
    Ok((StatusCode::CREATED, Json(customer)))
}

/// PUT /customers/{id}
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(changes): ApiJson<NewCustomer>,
) -> ApiResult<Customer> {
    validate_new_customer(&changes)?;

    let mut customer = state.db.customers().get(&id).await?;
    customer.apply(changes);
    state.db.customers().update(&customer).await?;

    Ok(Json(customer))
}

/// DELETE /customers/{id}
///
/// Orders and backorders that reference the customer are left in place.
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<()>> {
    state.db.customers().delete(&id).await?;

    info!(customer_id = %id, "Customer deleted");
    Ok(Json(ApiResponse::success("Customer deleted", None)))
}
