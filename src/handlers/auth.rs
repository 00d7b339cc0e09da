use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    routing::post,
    Json, Router,
};
use std::sync::Arc;

use crate::error::AppError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{AuthService, LoginDashboardBody, LoginDashboardOrigin, LoginDashboardResponse};

pub fn routes(auth: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/loginDashboard", post(login_dashboard))
        .with_state(auth)
}

/// POST /api/loginDashboard
///
/// Body `{email, password, secret}`; the client position comes from the
/// `lat` and `long` headers.
async fn login_dashboard(
    State(auth): State<Arc<AuthService>>,
    headers: HeaderMap,
    body: Result<Json<LoginDashboardBody>, JsonRejection>,
) -> ApiResult<LoginDashboardResponse> {
    let Json(body) = body.map_err(|e| AppError::invalid_value(e.body_text()))?;
    let origin = LoginDashboardOrigin {
        lat: header(&headers, "lat"),
        long: header(&headers, "long"),
    };

    let response = auth.login_dashboard(body, origin).await?;
    Ok(ApiResponse::success(response))
}

fn header(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
