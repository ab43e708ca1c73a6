//! Error types for the Store API.
//!
//! Every failure leaves the server as the same JSON envelope:
//!
//! ```text
//! { "message": "Product not found with Id : p-1", "status": false, "body": null }
//! ```
//!
//! | Source                                           | HTTP |
//! |--------------------------------------------------|------|
//! | NotFound (core or db)                            | 404  |
//! | IdentityChanged, NoQuantityChange, Validation    | 400  |
//! | DiscountNotApplicable (body = the discount)      | 400  |
//! | InsufficientStock                                | 409  |
//! | anything else from the database                  | 500  |

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use tracing::error;

use store_core::CoreError;
use store_db::{DbError, FulfillmentError};

/// Response envelope shared by errors and the non-entity success replies.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub message: String,
    pub status: bool,
    pub body: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, body: Option<T>) -> Self {
        ApiResponse {
            message: message.into(),
            status: true,
            body,
        }
    }
}

/// Store API error.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub body: Option<Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        ApiError {
            status,
            message: message.into(),
            body: None,
        }
    }

    fn internal() -> Self {
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::NotFound { .. } => ApiError::new(StatusCode::NOT_FOUND, message),
            CoreError::IdentityChanged
            | CoreError::NoQuantityChange
            | CoreError::Validation(_) => ApiError::new(StatusCode::BAD_REQUEST, message),
            CoreError::DiscountNotApplicable { discount, .. } => ApiError {
                status: StatusCode::BAD_REQUEST,
                message,
                body: serde_json::to_value(&*discount).ok(),
            },
            CoreError::InsufficientStock { .. } => ApiError::new(StatusCode::CONFLICT, message),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { .. } => ApiError::new(StatusCode::NOT_FOUND, err.to_string()),
            DbError::UniqueViolation { .. } => ApiError::new(StatusCode::CONFLICT, err.to_string()),
            other => {
                error!(error = %other, "Database error");
                ApiError::internal()
            }
        }
    }
}

impl From<FulfillmentError> for ApiError {
    fn from(err: FulfillmentError) -> Self {
        match err {
            FulfillmentError::Core(e) => e.into(),
            FulfillmentError::Db(e) => e.into(),
        }
    }
}

impl From<store_core::ValidationError> for ApiError {
    fn from(err: store_core::ValidationError) -> Self {
        CoreError::from(err).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let envelope = ApiResponse {
            message: self.message,
            status: false,
            body: self.body,
        };
        (self.status, Json(envelope)).into_response()
    }
}

pub type ApiResult<T> = Result<Json<T>, ApiError>;
