use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;

/// Wrapper for API responses that automatically adds success envelope
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub status_code: Option<StatusCode>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful API response with default 200 status
    pub fn success(data: T) -> Self {
        Self {
            data,
            status_code: None,
        }
    }

    /// Create a 201 Created response
    pub fn created(data: T) -> Self {
        Self {
            data,
            status_code: Some(StatusCode::CREATED),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status_code.unwrap_or(StatusCode::OK);

        let data_value = match serde_json::to_value(&self.data) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "success": false,
                        "error": { "code": "INTERNAL", "message": "Failed to serialize response data" }
                    })),
                )
                    .into_response();
            }
        };

        let envelope = json!({
            "success": true,
            "data": data_value
        });

        (status, Json(envelope)).into_response()
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::AppError>;
