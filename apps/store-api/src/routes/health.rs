//! Health check endpoint

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use crate::state::AppState;

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let database = state.db.health_check().await;
    let migrations = match store_db::migrations::migration_status(state.db.pool()).await {
        Ok((embedded, applied)) => json!({ "embedded": embedded, "applied": applied }),
        Err(_) => Value::Null,
    };

    let status = if database {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "status": if database { "ok" } else { "degraded" },
            "service": "store-api",
            "version": env!("CARGO_PKG_VERSION"),
            "database": database,
            "migrations": migrations,
        })),
    )
}
