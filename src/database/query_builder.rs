use sqlx::{
    self,
    postgres::{PgArguments, PgRow},
    query::Query,
    FromRow, PgPool, Postgres,
};
use tracing::debug;

use crate::database::entity::Entity;
use crate::error::{AppError, AppResult};
use crate::filter::{Filter, QueryOption, SqlResult, SqlValue};
use crate::filter::filter_where::quote;

/// Read side of the generic repository: one filtered SELECT per call.
pub struct QueryBuilder<E> {
    filter: Filter,
    _phantom: std::marker::PhantomData<E>,
}

impl<E: Entity> QueryBuilder<E> {
    pub fn new(options: Vec<QueryOption>) -> AppResult<Self> {
        let mut filter = Filter::new(E::TABLE, &E::columns())?;
        filter.apply(options)?;
        Ok(Self {
            filter,
            _phantom: std::marker::PhantomData,
        })
    }

    /// Base SELECT over the descriptor's columns plus the filter clause.
    pub fn sql_result(&self, record: &E) -> AppResult<SqlResult> {
        let clause = self.filter.build(&record.values())?;
        let mut query = select_sql::<E>();
        if !clause.query.is_empty() {
            query.push(' ');
            query.push_str(&clause.query);
        }
        Ok(SqlResult { query, params: clause.params })
    }

    pub async fn select_all(self, pool: &PgPool, record: &E) -> AppResult<Vec<E>> {
        let sql_result = self.sql_result(record)?;
        debug!(table = E::TABLE, sql = %sql_result.query, "select list");

        let rows = bind_all(sqlx::query(&sql_result.query), &sql_result.params)
            .fetch_all(pool)
            .await
            .map_err(|e| AppError::Read(format!("{}: {}", E::TABLE, e)))?;

        rows.iter().map(scan::<E>).collect()
    }

    /// Exactly the first matching row; no match is a read error.
    pub async fn select_one(self, pool: &PgPool, record: &E) -> AppResult<E> {
        let sql_result = self.sql_result(record)?;
        debug!(table = E::TABLE, sql = %sql_result.query, "select detail");

        let row = bind_all(sqlx::query(&sql_result.query), &sql_result.params)
            .fetch_one(pool)
            .await
            .map_err(|e| AppError::Read(format!("{}: {}", E::TABLE, e)))?;

        scan::<E>(&row)
    }
}

pub fn select_sql<E: Entity>() -> String {
    let columns: Vec<String> = E::columns().into_iter().map(quote).collect();
    format!("SELECT {} FROM {}", columns.join(", "), quote(E::TABLE))
}

fn scan<E: Entity>(row: &PgRow) -> AppResult<E> {
    E::from_row(row).map_err(|e| AppError::RowScan(format!("{}: {}", E::TABLE, e)))
}

pub(crate) fn bind_all<'q>(
    mut q: Query<'q, Postgres, PgArguments>,
    params: &'q [SqlValue],
) -> Query<'q, Postgres, PgArguments> {
    for p in params {
        q = bind_param_query(q, p);
    }
    q
}

fn bind_param_query<'q>(
    q: Query<'q, Postgres, PgArguments>,
    v: &'q SqlValue,
) -> Query<'q, Postgres, PgArguments> {
    match v {
        SqlValue::Int(i) => q.bind(*i),
        SqlValue::Float(f) => q.bind(*f),
        SqlValue::Text(s) => q.bind(s.as_deref()),
        SqlValue::Timestamp(t) => q.bind(*t),
    }
}
