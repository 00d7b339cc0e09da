// REST surface: login, dashboard CRUD for categories/location/role, ping.
pub mod auth;
pub mod dashboard;
pub mod health;

use axum::{routing::get, Router};

use crate::config::ApiConfig;
use crate::services::Usecases;

pub fn router(usecases: &Usecases, api: &ApiConfig) -> Router {
    let page_size = api.default_page_size;
    Router::new()
        .route("/ping", get(ping))
        .merge(auth::routes(usecases.auth.clone()))
        .merge(dashboard::routes(usecases.categories.clone(), page_size))
        .merge(dashboard::routes(usecases.location.clone(), page_size))
        .merge(dashboard::routes(usecases.role.clone(), page_size))
}

async fn ping() -> &'static str {
    "pong"
}
