use chrono::Utc;
use std::sync::Arc;
use tracing::debug;

use crate::database::{Entity, Repository};
use crate::error::AppResult;
use crate::filter::not_deleted;
use crate::services::authorization::AuthorizationGate;
use crate::types::{Paginated, PaginationParams};

/// Token-gated CRUD over one table for the admin dashboard.
///
/// Listing requires the admin role and hides retired rows. Detail and
/// writes only require a valid token; writes stamp the audit columns with
/// the caller's uid.
pub struct DashboardUsecase<E: Entity> {
    gate: Arc<AuthorizationGate>,
    repo: Arc<dyn Repository<E>>,
}

impl<E: Entity> DashboardUsecase<E> {
    pub fn new(gate: Arc<AuthorizationGate>, repo: Arc<dyn Repository<E>>) -> Self {
        Self { gate, repo }
    }

    pub async fn get_list_dashboard(
        &self,
        filter: E,
        paginate: PaginationParams,
        token: &str,
    ) -> AppResult<Paginated<E>> {
        let claims = self.gate.require_admin(token).await?;
        debug!("get list {} dashboard by {}", E::TABLE, claims.uid);

        let rows = self.repo.get_list(filter, vec![not_deleted()]).await?;
        Ok(Paginated::from_rows(rows, paginate))
    }

    pub async fn get_detail(&self, filter: E, token: &str) -> AppResult<E> {
        let claims = self.gate.authenticate(token)?;
        debug!("get detail {} by {}", E::TABLE, claims.uid);

        self.repo.get_detail(filter, vec![]).await
    }

    pub async fn create(&self, mut entity: E, token: &str) -> AppResult<E> {
        let claims = self.gate.authenticate(token)?;
        debug!("create {} by {}", E::TABLE, claims.uid);

        entity.audit_mut().stamp_created(claims.uid, Utc::now());
        self.repo.create(entity).await
    }

    pub async fn update(&self, mut entity: E, token: &str) -> AppResult<E> {
        let claims = self.gate.authenticate(token)?;
        debug!("update {} by {}", E::TABLE, claims.uid);

        entity.audit_mut().stamp_updated(claims.uid, Utc::now());
        self.repo.update(entity).await
    }

    pub async fn delete(&self, mut entity: E, token: &str) -> AppResult<E> {
        let claims = self.gate.authenticate(token)?;
        debug!("delete {} by {}", E::TABLE, claims.uid);

        entity.audit_mut().stamp_deleted(claims.uid, Utc::now());
        self.repo.delete(entity).await
    }
}
