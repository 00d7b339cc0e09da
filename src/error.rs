// Coded application errors
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use thiserror::Error;

use crate::filter::error::FilterError;

/// Every failure the repository, auth and usecase layers can report.
///
/// Each variant maps to one stable code so callers (and the usecase layer)
/// can re-code specific kinds while passing the rest through unchanged.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("query builder: {0}")]
    Builder(String),

    #[error("read failed: {0}")]
    Read(String),

    #[error("row scan failed: {0}")]
    RowScan(String),

    #[error("begin transaction failed: {0}")]
    TxBegin(String),

    #[error("execute failed: {0}")]
    TxExec(String),

    #[error("commit failed: {0}")]
    TxCommit(String),

    #[error("{0}")]
    NoRowsAffected(String),

    #[error("{0}")]
    Unauthenticated(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    InvalidValue(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Discriminant of [`AppError`], used where only the kind matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    SqlBuilder,
    SqlRead,
    SqlRowScan,
    SqlTxBegin,
    SqlTxExec,
    SqlTxCommit,
    SqlNoRowsAffected,
    Unauthenticated,
    Unauthorized,
    InvalidValue,
    Internal,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::SqlBuilder => "SQL_BUILDER",
            ErrorCode::SqlRead => "SQL_READ",
            ErrorCode::SqlRowScan => "SQL_ROW_SCAN",
            ErrorCode::SqlTxBegin => "SQL_TX_BEGIN",
            ErrorCode::SqlTxExec => "SQL_TX_EXEC",
            ErrorCode::SqlTxCommit => "SQL_TX_COMMIT",
            ErrorCode::SqlNoRowsAffected => "SQL_NO_ROWS_AFFECTED",
            ErrorCode::Unauthenticated => "UNAUTHENTICATED",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::InvalidValue => "INVALID_VALUE",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Builder(_) => ErrorCode::SqlBuilder,
            AppError::Read(_) => ErrorCode::SqlRead,
            AppError::RowScan(_) => ErrorCode::SqlRowScan,
            AppError::TxBegin(_) => ErrorCode::SqlTxBegin,
            AppError::TxExec(_) => ErrorCode::SqlTxExec,
            AppError::TxCommit(_) => ErrorCode::SqlTxCommit,
            AppError::NoRowsAffected(_) => ErrorCode::SqlNoRowsAffected,
            AppError::Unauthenticated(_) => ErrorCode::Unauthenticated,
            AppError::Unauthorized(_) => ErrorCode::Unauthorized,
            AppError::InvalidValue(_) => ErrorCode::InvalidValue,
            AppError::Internal(_) => ErrorCode::Internal,
        }
    }

    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self.code() {
            ErrorCode::Unauthenticated => 401,
            ErrorCode::Unauthorized => 403,
            ErrorCode::InvalidValue | ErrorCode::SqlBuilder => 400,
            ErrorCode::SqlRead => 404,
            ErrorCode::SqlNoRowsAffected => 404,
            ErrorCode::SqlRowScan
            | ErrorCode::SqlTxBegin
            | ErrorCode::SqlTxExec
            | ErrorCode::SqlTxCommit
            | ErrorCode::Internal => 500,
        }
    }

    /// Client-safe message. Storage and signing details stay in the logs.
    pub fn message(&self) -> String {
        match self {
            AppError::Read(_) => "Record not found or unavailable".to_string(),
            AppError::RowScan(_)
            | AppError::TxBegin(_)
            | AppError::TxExec(_)
            | AppError::TxCommit(_) => "A database error occurred".to_string(),
            AppError::Internal(_) => "An internal error occurred".to_string(),
            AppError::Builder(msg)
            | AppError::NoRowsAffected(msg)
            | AppError::Unauthenticated(msg)
            | AppError::Unauthorized(msg)
            | AppError::InvalidValue(msg) => msg.clone(),
        }
    }

    /// Whether [`AppError::message`] replaces the detail with a generic text.
    pub fn hides_detail(&self) -> bool {
        matches!(
            self,
            AppError::Read(_)
                | AppError::RowScan(_)
                | AppError::TxBegin(_)
                | AppError::TxExec(_)
                | AppError::TxCommit(_)
                | AppError::Internal(_)
        )
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "success": false,
            "error": {
                "code": self.code().as_str(),
                "message": self.message(),
            }
        })
    }
}

impl AppError {
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        AppError::Unauthenticated(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        AppError::Unauthorized(message.into())
    }

    pub fn invalid_value(message: impl Into<String>) -> Self {
        AppError::InvalidValue(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::Internal(message.into())
    }
}

impl From<FilterError> for AppError {
    fn from(err: FilterError) -> Self {
        AppError::Builder(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        if self.hides_detail() {
            tracing::error!(code = self.code().as_str(), "{}", self);
        }
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
