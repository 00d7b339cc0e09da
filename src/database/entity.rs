use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use sqlx::{postgres::PgRow, FromRow};
use std::fmt::Debug;

use crate::filter::SqlValue;

/// Audit columns shared by every table.
pub const AUDIT_COLUMNS: [&str; 7] = [
    "created_at",
    "created_by",
    "updated_at",
    "updated_by",
    "deleted_at",
    "deleted_by",
    "is_deleted",
];

/// Who touched a row and when. `is_deleted` is 0 while the row is live
/// and 1 once it has been soft-deleted; it never goes back to 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(default)]
pub struct Audit {
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_by: Option<String>,
    pub is_deleted: i64,
}

impl Audit {
    /// Values in [`AUDIT_COLUMNS`] order.
    pub fn values(&self) -> Vec<SqlValue> {
        vec![
            self.created_at.into(),
            self.created_by.clone().into(),
            self.updated_at.into(),
            self.updated_by.clone().into(),
            self.deleted_at.into(),
            self.deleted_by.clone().into(),
            self.is_deleted.into(),
        ]
    }

    pub fn is_live(&self) -> bool {
        self.is_deleted == 0
    }

    pub fn stamp_created(&mut self, by: impl Into<String>, at: DateTime<Utc>) {
        self.created_at = at;
        self.created_by = by.into();
        self.is_deleted = 0;
    }

    pub fn stamp_updated(&mut self, by: impl Into<String>, at: DateTime<Utc>) {
        self.updated_at = Some(at);
        self.updated_by = Some(by.into());
    }

    pub fn stamp_deleted(&mut self, by: impl Into<String>, at: DateTime<Utc>) {
        self.deleted_at = Some(at);
        self.deleted_by = Some(by.into());
        self.is_deleted = 1;
    }
}

/// A table-backed record: an `id`, business fields and the audit block.
///
/// `FIELDS` and `field_values` describe the business columns in the same
/// order; they drive the INSERT/UPDATE column lists and the filter record.
pub trait Entity:
    Debug
    + Clone
    + Default
    + Send
    + Sync
    + Unpin
    + Serialize
    + DeserializeOwned
    + for<'r> FromRow<'r, PgRow>
    + 'static
{
    const TABLE: &'static str;
    const FIELDS: &'static [&'static str];

    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
    fn audit(&self) -> &Audit;
    fn audit_mut(&mut self) -> &mut Audit;
    fn field_values(&self) -> Vec<SqlValue>;

    /// Every selectable column: `id`, business fields, then audit columns.
    fn columns() -> Vec<&'static str> {
        let mut columns = Vec::with_capacity(1 + Self::FIELDS.len() + AUDIT_COLUMNS.len());
        columns.push("id");
        columns.extend_from_slice(Self::FIELDS);
        columns.extend_from_slice(&AUDIT_COLUMNS);
        columns
    }

    /// Column/value pairs in [`Entity::columns`] order. Used as the filter record.
    fn values(&self) -> Vec<(&'static str, SqlValue)> {
        let mut values = vec![SqlValue::Int(self.id())];
        values.extend(self.field_values());
        values.extend(self.audit().values());
        Self::columns().into_iter().zip(values).collect()
    }
}
