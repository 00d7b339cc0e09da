use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;

use crate::database::DatabaseManager;

pub fn routes(db: DatabaseManager) -> Router {
    Router::new().route("/health", get(health)).with_state(db)
}

async fn health(State(db): State<DatabaseManager>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match db.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": { "status": "ok", "timestamp": now, "database": "ok" }
            })),
        ),
        Err(e) => {
            tracing::error!("health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": { "code": "INTERNAL", "message": "database unavailable" },
                    "data": { "status": "degraded", "timestamp": now }
                })),
            )
        }
    }
}
