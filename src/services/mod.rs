pub mod auth_service;
pub mod authorization;
pub mod dashboard;

use std::sync::Arc;

use crate::config::JwtConfig;
use crate::database::models::{Category, Location, Role};
use crate::database::Domains;

pub use auth_service::{AuthService, LoginDashboardBody, LoginDashboardOrigin, LoginDashboardResponse};
pub use authorization::{AuthorizationGate, ADMIN_ROLE};
pub use dashboard::DashboardUsecase;

/// Every usecase the REST layer calls, wired from one set of repositories.
#[derive(Clone)]
pub struct Usecases {
    pub auth: Arc<AuthService>,
    pub gate: Arc<AuthorizationGate>,
    pub categories: Arc<DashboardUsecase<Category>>,
    pub location: Arc<DashboardUsecase<Location>>,
    pub role: Arc<DashboardUsecase<Role>>,
}

impl Usecases {
    pub fn new(domains: &Domains, jwt: &JwtConfig) -> Self {
        let gate = Arc::new(AuthorizationGate::new(jwt.token_key.clone(), domains.role.clone()));
        let auth = Arc::new(AuthService::new(
            jwt.clone(),
            domains.users.clone(),
            domains.location.clone(),
            domains.role.clone(),
        ));

        Self {
            auth,
            categories: Arc::new(DashboardUsecase::new(gate.clone(), domains.categories.clone())),
            location: Arc::new(DashboardUsecase::new(gate.clone(), domains.location.clone())),
            role: Arc::new(DashboardUsecase::new(gate.clone(), domains.role.clone())),
            gate,
        }
    }
}
