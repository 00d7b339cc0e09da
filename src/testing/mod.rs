//! Test doubles. `MemoryRepository` runs the same filter pipeline as the SQL
//! path (descriptor-checked columns, options, non-zero equalities) and then
//! evaluates the resulting `Condition` against stored rows.

pub mod fixtures;

use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::database::{Entity, Repository};
use crate::error::{AppError, AppResult};
use crate::filter::{Condition, Filter, FilterOp, QueryOption, SortDirection, SqlValue};

pub const TEST_KEY: &str = "test-token-key";

pub struct MemoryRepository<E> {
    rows: Mutex<Vec<E>>,
}

impl<E: Entity> MemoryRepository<E> {
    pub fn new() -> Self {
        Self { rows: Mutex::new(Vec::new()) }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<E>> {
        self.rows.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn select(&self, filter: &E, options: Vec<QueryOption>) -> AppResult<Vec<E>> {
        let mut builder = Filter::new(E::TABLE, &E::columns())?;
        builder.apply(options)?;
        // Same validation as the SQL path, including ordering and limits.
        builder.build(&filter.values())?;
        let condition = builder.condition(&filter.values())?;
        let data = builder.data().clone();

        let mut rows: Vec<E> = self
            .lock()
            .iter()
            .filter(|row| {
                let values: HashMap<&str, SqlValue> = row.values().into_iter().collect();
                condition.as_ref().map_or(true, |c| matches(c, &values))
            })
            .cloned()
            .collect();

        if !data.order.is_empty() {
            rows.sort_by(|a, b| {
                let a: HashMap<&str, SqlValue> = a.values().into_iter().collect();
                let b: HashMap<&str, SqlValue> = b.values().into_iter().collect();
                for order in &data.order {
                    let ord = compare(&a[order.column.as_str()], &b[order.column.as_str()])
                        .unwrap_or(Ordering::Equal);
                    let ord = match order.sort {
                        SortDirection::Asc => ord,
                        SortDirection::Desc => ord.reverse(),
                    };
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                Ordering::Equal
            });
        }

        let offset = data.offset.unwrap_or(0).max(0) as usize;
        let limit = data.limit.map(|l| l.max(0) as usize).unwrap_or(usize::MAX);
        Ok(rows.into_iter().skip(offset).take(limit).collect())
    }
}

impl<E: Entity> Default for MemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for MemoryRepository<E> {
    async fn get_list(&self, filter: E, options: Vec<QueryOption>) -> AppResult<Vec<E>> {
        self.select(&filter, options)
    }

    async fn get_detail(&self, filter: E, options: Vec<QueryOption>) -> AppResult<E> {
        self.select(&filter, options)?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Read(format!("{}: no rows returned", E::TABLE)))
    }

    async fn create(&self, mut entity: E) -> AppResult<E> {
        let mut rows = self.lock();
        let id = rows.iter().map(|r| r.id()).max().unwrap_or(0) + 1;
        entity.set_id(id);
        let mut stored = entity.clone();
        let audit = stored.audit_mut();
        audit.updated_at = None;
        audit.updated_by = None;
        audit.deleted_at = None;
        audit.deleted_by = None;
        rows.push(stored);
        Ok(entity)
    }

    async fn update(&self, entity: E) -> AppResult<E> {
        let mut rows = self.lock();
        let stored = rows
            .iter_mut()
            .find(|r| r.id() == entity.id() && r.audit().is_live())
            .ok_or_else(|| AppError::NoRowsAffected(format!("no {} updated", E::TABLE)))?;

        let mut next = entity.clone();
        let kept = stored.audit().clone();
        let audit = next.audit_mut();
        audit.created_at = kept.created_at;
        audit.created_by = kept.created_by;
        audit.deleted_at = kept.deleted_at;
        audit.deleted_by = kept.deleted_by;
        audit.is_deleted = kept.is_deleted;
        *stored = next;
        Ok(entity)
    }

    async fn delete(&self, mut entity: E) -> AppResult<E> {
        let mut rows = self.lock();
        let stored = rows
            .iter_mut()
            .find(|r| r.id() == entity.id() && r.audit().is_live())
            .ok_or_else(|| AppError::NoRowsAffected(format!("no {} deleted", E::TABLE)))?;

        let audit = stored.audit_mut();
        audit.is_deleted = 1;
        audit.deleted_at = entity.audit().deleted_at;
        audit.deleted_by = entity.audit().deleted_by.clone();
        entity.audit_mut().is_deleted = 1;
        Ok(entity)
    }
}

fn matches(condition: &Condition, row: &HashMap<&str, SqlValue>) -> bool {
    match condition {
        Condition::Compare { column, op, value } => {
            let Some(actual) = row.get(column.as_str()) else {
                return false;
            };
            match op {
                FilterOp::Like => like(actual, value),
                _ => compare(actual, value).map_or(false, |ord| match op {
                    FilterOp::Eq => ord == Ordering::Equal,
                    FilterOp::Neq => ord != Ordering::Equal,
                    FilterOp::Gt => ord == Ordering::Greater,
                    FilterOp::Gte => ord != Ordering::Less,
                    FilterOp::Lt => ord == Ordering::Less,
                    FilterOp::Lte => ord != Ordering::Greater,
                    FilterOp::Like => false,
                }),
            }
        }
        Condition::In { column, values } => row.get(column.as_str()).map_or(false, |actual| {
            values.iter().any(|v| compare(actual, v) == Some(Ordering::Equal))
        }),
        Condition::Null { column, negated } => {
            let is_null = matches!(
                row.get(column.as_str()),
                None | Some(SqlValue::Text(None)) | Some(SqlValue::Timestamp(None))
            );
            is_null != *negated
        }
        Condition::And(list) => list.iter().all(|c| matches(c, row)),
        Condition::Or(list) => list.iter().any(|c| matches(c, row)),
        Condition::Not(inner) => !matches(inner, row),
    }
}

/// SQL-style comparison: anything involving NULL is unknown.
fn compare(a: &SqlValue, b: &SqlValue) -> Option<Ordering> {
    match (a, b) {
        (SqlValue::Int(x), SqlValue::Int(y)) => Some(x.cmp(y)),
        (SqlValue::Float(x), SqlValue::Float(y)) => x.partial_cmp(y),
        (SqlValue::Int(x), SqlValue::Float(y)) => (*x as f64).partial_cmp(y),
        (SqlValue::Float(x), SqlValue::Int(y)) => x.partial_cmp(&(*y as f64)),
        (SqlValue::Text(Some(x)), SqlValue::Text(Some(y))) => Some(x.cmp(y)),
        (SqlValue::Timestamp(Some(x)), SqlValue::Timestamp(Some(y))) => Some(x.cmp(y)),
        _ => None,
    }
}

fn like(actual: &SqlValue, pattern: &SqlValue) -> bool {
    match (actual, pattern) {
        (SqlValue::Text(Some(text)), SqlValue::Text(Some(pattern))) => {
            let text: Vec<char> = text.chars().collect();
            let pattern: Vec<char> = pattern.chars().collect();
            like_at(&text, &pattern)
        }
        _ => false,
    }
}

fn like_at(text: &[char], pattern: &[char]) -> bool {
    match pattern.split_first() {
        None => text.is_empty(),
        Some(('%', rest)) => (0..=text.len()).any(|i| like_at(&text[i..], rest)),
        Some(('_', rest)) => !text.is_empty() && like_at(&text[1..], rest),
        Some((c, rest)) => text.first() == Some(c) && like_at(&text[1..], rest),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::Product;
    use crate::filter::{not_deleted, order_by, prefix, options::limit};

    fn product(name: &str, stock: i64) -> Product {
        Product { name: name.into(), stock, price: 10.0, ..Default::default() }
    }

    async fn seeded() -> MemoryRepository<Product> {
        let repo = MemoryRepository::new();
        for (name, stock) in [("boots", 5), ("sandals", 0), ("sneakers", 12)] {
            repo.create(product(name, stock)).await.unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn ids_are_assigned_in_order() {
        let repo = seeded().await;
        let all = repo.get_list(Product::default(), vec![]).await.unwrap();
        assert_eq!(all.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(repo.len(), 3);
    }

    #[tokio::test]
    async fn structured_conditions_are_evaluated() {
        let repo = seeded().await;
        let found = repo
            .get_list(
                Product::default(),
                vec![
                    prefix(Condition::or(vec![
                        Condition::like("name", "s%"),
                        Condition::gt("stock", 3),
                    ])),
                    order_by("stock", SortDirection::Desc),
                    limit(2, None),
                    not_deleted(),
                ],
            )
            .await
            .unwrap();
        let names: Vec<_> = found.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["sneakers", "boots"]);
    }

    #[tokio::test]
    async fn unknown_columns_fail_like_the_sql_path() {
        let repo = seeded().await;
        let err = repo
            .get_list(Product::default(), vec![prefix(Condition::eq("password", "x"))])
            .await
            .unwrap_err();
        assert_eq!(err.code(), crate::error::ErrorCode::SqlBuilder);
    }

    #[tokio::test]
    async fn detail_without_match_is_a_read_error() {
        let repo = seeded().await;
        let err = repo
            .get_detail(Product { name: "clogs".into(), ..Default::default() }, vec![])
            .await
            .unwrap_err();
        assert_eq!(err.code(), crate::error::ErrorCode::SqlRead);
    }
}
