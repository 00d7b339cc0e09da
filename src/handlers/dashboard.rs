use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::database::models::{Category, Location, Role};
use crate::database::Entity;
use crate::error::{AppError, AppResult};
use crate::middleware::{ApiResponse, ApiResult, BearerToken};
use crate::services::DashboardUsecase;
use crate::types::{Paginated, PaginationParams};

/// A table exposed through the dashboard CRUD routes.
pub trait DashboardResource: Entity {
    /// Path segment under `/api/`.
    const PATH: &'static str;

    /// Filter record built from the list query string.
    fn list_filter(_query: &ListQuery) -> Self {
        Self::default()
    }
}

impl DashboardResource for Category {
    const PATH: &'static str = "categories";

    fn list_filter(query: &ListQuery) -> Self {
        Category {
            name: query.name.clone().unwrap_or_default(),
            ..Default::default()
        }
    }
}

impl DashboardResource for Location {
    const PATH: &'static str = "location";
}

impl DashboardResource for Role {
    const PATH: &'static str = "role";

    fn list_filter(query: &ListQuery) -> Self {
        Role {
            name: query.name.clone().unwrap_or_default(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub name: Option<String>,
}

impl ListQuery {
    /// `page_size` fills in a missing `limit`.
    fn pagination(&self, page_size: i64) -> PaginationParams {
        PaginationParams::new(
            self.page.unwrap_or(PaginationParams::default().page),
            self.limit.unwrap_or(page_size),
        )
    }
}

/// Route state: the usecase plus the configured default page size.
pub struct DashboardState<E: Entity> {
    usecase: Arc<DashboardUsecase<E>>,
    page_size: i64,
}

impl<E: Entity> Clone for DashboardState<E> {
    fn clone(&self) -> Self {
        Self {
            usecase: self.usecase.clone(),
            page_size: self.page_size,
        }
    }
}

pub fn routes<E: DashboardResource>(usecase: Arc<DashboardUsecase<E>>, page_size: i64) -> Router {
    Router::new()
        .route(&format!("/api/pagination/{}", E::PATH), get(list::<E>))
        .route(&format!("/api/{}", E::PATH), post(create::<E>))
        .route(
            &format!("/api/{}/:id", E::PATH),
            get(detail::<E>).put(update::<E>).delete(remove::<E>),
        )
        .with_state(DashboardState { usecase, page_size })
}

async fn list<E: DashboardResource>(
    State(state): State<DashboardState<E>>,
    BearerToken(token): BearerToken,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Paginated<E>> {
    let Query(query) = query.map_err(|e| AppError::invalid_value(e.body_text()))?;
    let page = state
        .usecase
        .get_list_dashboard(E::list_filter(&query), query.pagination(state.page_size), &token)
        .await?;
    Ok(ApiResponse::success(page))
}

async fn detail<E: DashboardResource>(
    State(DashboardState { usecase, .. }): State<DashboardState<E>>,
    BearerToken(token): BearerToken,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<E> {
    let filter = with_id::<E>(E::default(), id)?;
    Ok(ApiResponse::success(usecase.get_detail(filter, &token).await?))
}

async fn create<E: DashboardResource>(
    State(DashboardState { usecase, .. }): State<DashboardState<E>>,
    BearerToken(token): BearerToken,
    body: Result<Json<E>, JsonRejection>,
) -> ApiResult<E> {
    let Json(mut entity) = body.map_err(|e| AppError::invalid_value(e.body_text()))?;
    entity.set_id(0);
    Ok(ApiResponse::created(usecase.create(entity, &token).await?))
}

async fn update<E: DashboardResource>(
    State(DashboardState { usecase, .. }): State<DashboardState<E>>,
    BearerToken(token): BearerToken,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<E>, JsonRejection>,
) -> ApiResult<E> {
    let Json(entity) = body.map_err(|e| AppError::invalid_value(e.body_text()))?;
    let entity = with_id::<E>(entity, id)?;
    Ok(ApiResponse::success(usecase.update(entity, &token).await?))
}

async fn remove<E: DashboardResource>(
    State(DashboardState { usecase, .. }): State<DashboardState<E>>,
    BearerToken(token): BearerToken,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<E> {
    let entity = with_id::<E>(E::default(), id)?;
    Ok(ApiResponse::success(usecase.delete(entity, &token).await?))
}

// Path ids must be positive; a zero id would drop out of the filter record.
fn with_id<E: Entity>(mut entity: E, id: Result<Path<i64>, PathRejection>) -> AppResult<E> {
    let Path(id) = id.map_err(|e| AppError::invalid_value(e.body_text()))?;
    if id <= 0 {
        return Err(AppError::invalid_value(format!("invalid id: {}", id)));
    }
    entity.set_id(id);
    Ok(entity)
}
