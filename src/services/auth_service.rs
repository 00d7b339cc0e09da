use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::auth::geofence::{self, Coordinate};
use crate::auth::{generate_jwt, Claims};
use crate::config::JwtConfig;
use crate::database::models::{Location, Role, User};
use crate::database::Repository;
use crate::error::{AppError, AppResult, ErrorCode};
use crate::filter::{not_deleted, prefix, Condition};

const WRONG_CREDENTIALS: &str = "Email Or Password Is Wrong";
const WRONG_SECRET: &str = "Secret Is Wrong";
const TOO_FAR: &str = "Your location is too far from the specified point";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginDashboardBody {
    pub email: String,
    pub password: String,
    pub secret: String,
}

/// Where the client says it is, as decimal-degree strings.
#[derive(Debug, Clone, Default)]
pub struct LoginDashboardOrigin {
    pub lat: String,
    pub long: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginDashboardResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: String,
    pub token: String,
}

pub struct AuthService {
    jwt: JwtConfig,
    users: Arc<dyn Repository<User>>,
    locations: Arc<dyn Repository<Location>>,
    roles: Arc<dyn Repository<Role>>,
}

impl AuthService {
    pub fn new(
        jwt: JwtConfig,
        users: Arc<dyn Repository<User>>,
        locations: Arc<dyn Repository<Location>>,
        roles: Arc<dyn Repository<Role>>,
    ) -> Self {
        Self { jwt, users, locations, roles }
    }

    /// Credentials, then the location secret, then the geofence, then the
    /// token. The role name is resolved last for the response.
    pub async fn login_dashboard(
        &self,
        body: LoginDashboardBody,
        origin: LoginDashboardOrigin,
    ) -> AppResult<LoginDashboardResponse> {
        // Blank fields would drop out of the filter record and match any row.
        if body.email.is_empty() || body.password.is_empty() {
            return Err(AppError::unauthorized(WRONG_CREDENTIALS));
        }
        if body.secret.is_empty() {
            return Err(AppError::unauthorized(WRONG_SECRET));
        }

        let user = self
            .users
            .get_detail(
                User {
                    email: body.email.clone(),
                    password: body.password,
                    ..Default::default()
                },
                vec![not_deleted()],
            )
            .await
            .map_err(|err| recode_read(err, WRONG_CREDENTIALS))
            .map_err(|err| {
                warn!(email = %body.email, "dashboard login rejected: {}", err);
                err
            })?;

        let location = self
            .locations
            .get_detail(
                Location {
                    secret: body.secret,
                    ..Default::default()
                },
                vec![not_deleted()],
            )
            .await
            .map_err(|err| recode_read(err, WRONG_SECRET))
            .map_err(|err| {
                warn!(email = %body.email, "dashboard login rejected: {}", err);
                err
            })?;

        let anchor = Coordinate::parse(&location.lat, &location.long)?;
        let client = Coordinate::parse(&origin.lat, &origin.long)?;
        let distance = anchor.distance_to(&client);
        if !geofence::within(distance, location.distance) {
            warn!(
                email = %body.email,
                distance,
                allowed = location.distance,
                "dashboard login outside geofence"
            );
            return Err(AppError::unauthorized(TOO_FAR));
        }

        let claims = Claims::new(user.id, &user.email, user.role_id, self.jwt.dashboard_expiry_minutes);
        let token = generate_jwt(&claims, &self.jwt.token_key)?;

        let role = self
            .roles
            .get_detail(Role::default(), vec![prefix(Condition::eq("id", user.role_id)), not_deleted()])
            .await?;

        info!(uid = user.id, role = %role.name, "dashboard login");

        Ok(LoginDashboardResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            role: role.name,
            token,
        })
    }
}

fn recode_read(err: AppError, message: &str) -> AppError {
    if err.code() == ErrorCode::SqlRead {
        AppError::unauthorized(message)
    } else {
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::validate_jwt;
    use crate::testing::{fixtures, MemoryRepository, TEST_KEY};

    struct Harness {
        service: AuthService,
        users: Arc<MemoryRepository<User>>,
        locations: Arc<MemoryRepository<Location>>,
    }

    async fn harness() -> Harness {
        let users = Arc::new(MemoryRepository::<User>::new());
        let locations = Arc::new(MemoryRepository::<Location>::new());
        let roles = Arc::new(MemoryRepository::<Role>::new());
        fixtures::seed_roles(&roles).await;
        fixtures::seed_users(&users).await;
        fixtures::seed_location(&locations).await;

        let service = AuthService::new(
            fixtures::jwt_config(),
            users.clone(),
            locations.clone(),
            roles,
        );
        Harness { service, users, locations }
    }

    fn body(email: &str, password: &str, secret: &str) -> LoginDashboardBody {
        LoginDashboardBody {
            email: email.into(),
            password: password.into(),
            secret: secret.into(),
        }
    }

    fn at(lat: &str, long: &str) -> LoginDashboardOrigin {
        LoginDashboardOrigin { lat: lat.into(), long: long.into() }
    }

    #[tokio::test]
    async fn admin_at_the_anchor_logs_in() {
        let h = harness().await;
        let response = h
            .service
            .login_dashboard(body("a@x", "pw", "s1"), at("-6.2", "106.8"))
            .await
            .unwrap();

        assert_eq!(response.role, "admin");
        assert_eq!(response.email, "a@x");
        assert_eq!(response.username, "alice");
        let claims = validate_jwt(&response.token, TEST_KEY).unwrap();
        assert_eq!(claims.role_id, "1");
        assert_eq!(claims.uid, response.id.to_string());
    }

    #[tokio::test]
    async fn non_admin_gets_a_token_with_their_role() {
        let h = harness().await;
        let response = h
            .service
            .login_dashboard(body("b@x", "pw2", "s1"), at("-6.2", "106.8"))
            .await
            .unwrap();
        assert_eq!(response.role, "staff");
        assert_eq!(validate_jwt(&response.token, TEST_KEY).unwrap().role_id, "2");
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let h = harness().await;
        let err = h
            .service
            .login_dashboard(body("a@x", "nope", "s1"), at("-6.2", "106.8"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), WRONG_CREDENTIALS);
    }

    #[tokio::test]
    async fn blank_credentials_never_match_a_row() {
        let h = harness().await;
        let err = h
            .service
            .login_dashboard(body("", "", "s1"), at("-6.2", "106.8"))
            .await
            .unwrap_err();
        assert_eq!(err.message(), WRONG_CREDENTIALS);

        let err = h
            .service
            .login_dashboard(body("a@x", "pw", ""), at("-6.2", "106.8"))
            .await
            .unwrap_err();
        assert_eq!(err.message(), WRONG_SECRET);
    }

    #[tokio::test]
    async fn wrong_secret_is_unauthorized() {
        let h = harness().await;
        let err = h
            .service
            .login_dashboard(body("a@x", "pw", "s2"), at("-6.2", "106.8"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), WRONG_SECRET);
    }

    #[tokio::test]
    async fn geofence_is_inclusive() {
        let h = harness().await;
        // 0.0004 degrees of latitude is roughly 44.5 m; 0.0005 is roughly 55.6 m.
        h.service
            .login_dashboard(body("a@x", "pw", "s1"), at("-6.2004", "106.8"))
            .await
            .unwrap();

        let err = h
            .service
            .login_dashboard(body("a@x", "pw", "s1"), at("-6.2005", "106.8"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), TOO_FAR);
    }

    #[tokio::test]
    async fn non_numeric_coordinates_are_invalid() {
        let h = harness().await;
        let err = h
            .service
            .login_dashboard(body("a@x", "pw", "s1"), at("north", "106.8"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidValue);
    }

    #[tokio::test]
    async fn retired_accounts_and_locations_cannot_log_in() {
        let h = harness().await;
        let mut alice = h
            .users
            .get_detail(User { email: "a@x".into(), ..Default::default() }, vec![])
            .await
            .unwrap();
        alice.audit.stamp_deleted("0", chrono::Utc::now());
        h.users.delete(alice).await.unwrap();

        let err = h
            .service
            .login_dashboard(body("a@x", "pw", "s1"), at("-6.2", "106.8"))
            .await
            .unwrap_err();
        assert_eq!(err.message(), WRONG_CREDENTIALS);

        let mut anchor = h
            .locations
            .get_detail(Location { secret: "s1".into(), ..Default::default() }, vec![])
            .await
            .unwrap();
        anchor.audit.stamp_deleted("0", chrono::Utc::now());
        h.locations.delete(anchor).await.unwrap();

        let err = h
            .service
            .login_dashboard(body("b@x", "pw2", "s1"), at("-6.2", "106.8"))
            .await
            .unwrap_err();
        assert_eq!(err.message(), WRONG_SECRET);
    }
}
