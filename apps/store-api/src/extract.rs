//! JSON body extractor
//!
//! `axum::Json` rejects a bad body with 415/422 and a plain-text message.
//! `ApiJson` turns every rejection into the usual 400 envelope:
//!
//! ```text
//! { "message": "Failed to deserialize ... missing field `customerId` ...",
//!   "status": false, "body": null }
//! ```

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::Json;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ApiError;

/// Request body parsed as JSON, rejected with [`ApiError`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(ApiJson(value))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!(status = %rejection.status(), "Rejected request body");
        ApiError::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}
