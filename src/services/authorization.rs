use std::sync::Arc;

use crate::auth::{validate_jwt, Claims};
use crate::database::models::Role;
use crate::database::Repository;
use crate::error::{AppError, AppResult};
use crate::filter::{not_deleted, prefix, Condition};

pub const ADMIN_ROLE: &str = "admin";

/// Token verification plus the admin role check the dashboard list views
/// require. Capabilities are looked up on every call; nothing is cached.
pub struct AuthorizationGate {
    token_key: String,
    roles: Arc<dyn Repository<Role>>,
}

impl AuthorizationGate {
    pub fn new(token_key: impl Into<String>, roles: Arc<dyn Repository<Role>>) -> Self {
        Self {
            token_key: token_key.into(),
            roles,
        }
    }

    pub fn authenticate(&self, token: &str) -> AppResult<Claims> {
        validate_jwt(token, &self.token_key)
    }

    /// Verify the token, then require the caller's role to be `admin`.
    /// Role lookup failures pass through with their own code.
    pub async fn require_admin(&self, token: &str) -> AppResult<Claims> {
        let claims = self.authenticate(token)?;

        let role_id: i64 = claims
            .role_id
            .parse()
            .map_err(|_| AppError::invalid_value(format!("role_id is not a number: {:?}", claims.role_id)))?;

        let role = self
            .roles
            .get_detail(Role::default(), vec![prefix(Condition::eq("id", role_id)), not_deleted()])
            .await?;

        if role.name != ADMIN_ROLE {
            tracing::warn!(uid = %claims.uid, role = %role.name, "admin access denied");
            return Err(AppError::unauthorized("Only admin can access this resource"));
        }

        Ok(claims)
    }
}
