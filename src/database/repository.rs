use async_trait::async_trait;
use tracing::debug;

use crate::database::entity::Entity;
use crate::database::manager::DatabaseManager;
use crate::database::query_builder::QueryBuilder;
use crate::database::statement;
use crate::database::writer::TxWriter;
use crate::error::AppResult;
use crate::filter::QueryOption;

/// The five operations every table supports.
///
/// `filter` is a record of the same entity: each non-zero field becomes an
/// equality predicate. Options add structured prefix/suffix conditions,
/// ordering and limits.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    async fn get_list(&self, filter: E, options: Vec<QueryOption>) -> AppResult<Vec<E>>;

    /// First matching row; none is a read error.
    async fn get_detail(&self, filter: E, options: Vec<QueryOption>) -> AppResult<E>;

    /// Inserts and returns the entity with its storage-assigned id.
    async fn create(&self, entity: E) -> AppResult<E>;

    /// Rewrites business fields plus `updated_at`/`updated_by` of a live row.
    async fn update(&self, entity: E) -> AppResult<E>;

    /// Soft delete: sets `is_deleted`, `deleted_at`, `deleted_by` on a live row.
    async fn delete(&self, entity: E) -> AppResult<E>;
}

/// Postgres implementation. Reads use the follower, writes the leader.
pub struct SqlRepository<E> {
    db: DatabaseManager,
    writer: TxWriter,
    _phantom: std::marker::PhantomData<E>,
}

impl<E: Entity> SqlRepository<E> {
    pub fn new(db: DatabaseManager) -> Self {
        let writer = TxWriter::new(db.leader().clone());
        Self {
            db,
            writer,
            _phantom: std::marker::PhantomData,
        }
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for SqlRepository<E> {
    async fn get_list(&self, filter: E, options: Vec<QueryOption>) -> AppResult<Vec<E>> {
        debug!(table = E::TABLE, "get list");
        QueryBuilder::<E>::new(options)?
            .select_all(self.db.follower(), &filter)
            .await
    }

    async fn get_detail(&self, filter: E, options: Vec<QueryOption>) -> AppResult<E> {
        debug!(table = E::TABLE, "get detail");
        QueryBuilder::<E>::new(options)?
            .select_one(self.db.follower(), &filter)
            .await
    }

    async fn create(&self, mut entity: E) -> AppResult<E> {
        let label = format!("{} created", E::TABLE);
        let outcome = self
            .writer
            .execute(&label, &statement::insert(&entity), true)
            .await?;
        if let Some(id) = outcome.inserted_id {
            entity.set_id(id);
        }
        Ok(entity)
    }

    async fn update(&self, entity: E) -> AppResult<E> {
        let label = format!("{} updated", E::TABLE);
        self.writer
            .execute(&label, &statement::update(&entity), false)
            .await?;
        Ok(entity)
    }

    async fn delete(&self, mut entity: E) -> AppResult<E> {
        let label = format!("{} deleted", E::TABLE);
        self.writer
            .execute(&label, &statement::soft_delete(&entity), false)
            .await?;
        entity.audit_mut().is_deleted = 1;
        Ok(entity)
    }
}
