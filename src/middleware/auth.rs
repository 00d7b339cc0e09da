use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use crate::error::AppError;

/// Raw token from the `Authorization` header. Verification happens in the
/// usecase layer, which owns the signing key.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        extract_jwt_from_headers(&parts.headers).map(BearerToken)
    }
}

/// Accepts `Bearer <token>` or a bare token value.
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, AppError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::unauthenticated("Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AppError::unauthenticated("Invalid Authorization header format"))?;

    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str).trim();
    if token.is_empty() {
        return Err(AppError::unauthenticated("Empty JWT token"));
    }
    Ok(token.to_string())
}
