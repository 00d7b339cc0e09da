pub mod geofence;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Longest dashboard session a token can carry: one year.
pub const MAX_EXPIRY_MINUTES: i64 = 60 * 24 * 365;

/// Dashboard session claims. Ids travel as decimal strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub uid: String,
    pub email: String,
    pub role_id: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: i64, email: impl Into<String>, role_id: i64, expiry_minutes: i64) -> Self {
        let now = Utc::now();
        let minutes = expiry_minutes.clamp(-MAX_EXPIRY_MINUTES, MAX_EXPIRY_MINUTES);
        let exp = (now + Duration::minutes(minutes)).timestamp();

        Self {
            uid: user_id.to_string(),
            email: email.into(),
            role_id: role_id.to_string(),
            exp,
            iat: now.timestamp(),
        }
    }
}

/// Sign `claims` with HS256.
pub fn generate_jwt(claims: &Claims, secret: &str) -> AppResult<String> {
    if secret.is_empty() {
        return Err(AppError::internal("JWT token key not configured"));
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key)
        .map_err(|e| AppError::internal(format!("JWT generation error: {}", e)))
}

/// Verify signature and expiry. Any failure is Unauthenticated.
pub fn validate_jwt(token: &str, secret: &str) -> AppResult<Claims> {
    if secret.is_empty() {
        return Err(AppError::internal("JWT token key not configured"));
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::default();
    validation.leeway = 0;

    decode::<Claims>(token, &decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(|e| AppError::unauthenticated(format!("Invalid token: {}", e)))
}
