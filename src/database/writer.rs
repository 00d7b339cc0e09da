use sqlx::{PgPool, Postgres, Row, Transaction};
use tracing::{debug, error};

use crate::database::query_builder::bind_all;
use crate::error::{AppError, AppResult};
use crate::filter::SqlResult;

/// What a single write did inside its transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOutcome {
    pub rows_affected: u64,
    /// Set for inserts, read through `RETURNING "id"` before commit.
    pub inserted_id: Option<i64>,
}

/// Runs one statement as its own transaction on the leader:
/// begin, execute, require at least one affected row, commit.
/// Any failure after begin rolls back explicitly.
#[derive(Clone)]
pub struct TxWriter {
    pool: PgPool,
}

impl TxWriter {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// `label` names the write in logs and in the no-rows error,
    /// e.g. `"categories created"`.
    pub async fn execute(
        &self,
        label: &str,
        statement: &SqlResult,
        returning_id: bool,
    ) -> AppResult<WriteOutcome> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::TxBegin(format!("{}: {}", label, e)))?;

        let outcome = match Self::run(&mut tx, label, statement, returning_id).await {
            Ok(outcome) if outcome.rows_affected >= 1 => outcome,
            Ok(_) => {
                rollback(tx, label).await;
                return Err(AppError::NoRowsAffected(format!("no {}", label)));
            }
            Err(err) => {
                rollback(tx, label).await;
                return Err(err);
            }
        };

        tx.commit()
            .await
            .map_err(|e| AppError::TxCommit(format!("{}: {}", label, e)))?;

        debug!(label, rows = outcome.rows_affected, "write committed");
        Ok(outcome)
    }

    async fn run(
        tx: &mut Transaction<'_, Postgres>,
        label: &str,
        statement: &SqlResult,
        returning_id: bool,
    ) -> AppResult<WriteOutcome> {
        let query = bind_all(sqlx::query(&statement.query), &statement.params);

        if returning_id {
            let row = query
                .fetch_optional(&mut **tx)
                .await
                .map_err(|e| AppError::TxExec(format!("{}: {}", label, e)))?;
            return match row {
                Some(row) => {
                    let id: i64 = row
                        .try_get("id")
                        .map_err(|e| AppError::TxExec(format!("{}: {}", label, e)))?;
                    Ok(WriteOutcome { rows_affected: 1, inserted_id: Some(id) })
                }
                None => Ok(WriteOutcome { rows_affected: 0, inserted_id: None }),
            };
        }

        let done = query
            .execute(&mut **tx)
            .await
            .map_err(|e| AppError::TxExec(format!("{}: {}", label, e)))?;
        Ok(WriteOutcome { rows_affected: done.rows_affected(), inserted_id: None })
    }
}

// A failed rollback is logged; the caller still sees the original error.
async fn rollback(tx: Transaction<'_, Postgres>, label: &str) {
    match tx.rollback().await {
        Ok(()) => debug!(label, "write rolled back"),
        Err(e) => error!(label, "transaction rollback failed: {}", e),
    }
}
