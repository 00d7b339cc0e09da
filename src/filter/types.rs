use chrono::{DateTime, Utc};
use serde::Serialize;

/// A typed, bindable SQL value.
///
/// Nulls stay typed (`Text(None)`, `Timestamp(None)`) so Postgres sees the
/// column's parameter type even when nothing is stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SqlValue {
    Int(i64),
    Float(f64),
    Text(Option<String>),
    Timestamp(Option<DateTime<Utc>>),
}

impl SqlValue {
    /// Zero values carry no filtering intent in a filter record.
    pub fn is_zero(&self) -> bool {
        match self {
            SqlValue::Int(i) => *i == 0,
            SqlValue::Float(f) => *f == 0.0,
            SqlValue::Text(s) => s.as_deref().map_or(true, str::is_empty),
            SqlValue::Timestamp(t) => t.map_or(true, |t| t.timestamp() == 0),
        }
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Int(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Int(v.into())
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Float(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(Some(v.to_string()))
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(Some(v))
    }
}

impl From<Option<String>> for SqlValue {
    fn from(v: Option<String>) -> Self {
        SqlValue::Text(v)
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(v: DateTime<Utc>) -> Self {
        SqlValue::Timestamp(Some(v))
    }
}

impl From<Option<DateTime<Utc>>> for SqlValue {
    fn from(v: Option<DateTime<Utc>>) -> Self {
        SqlValue::Timestamp(v)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
}

impl FilterOp {
    pub fn to_sql(&self) -> &'static str {
        match self {
            FilterOp::Eq => "=",
            FilterOp::Neq => "<>",
            FilterOp::Gt => ">",
            FilterOp::Gte => ">=",
            FilterOp::Lt => "<",
            FilterOp::Lte => "<=",
            FilterOp::Like => "LIKE",
        }
    }
}

/// Structured predicate. Values are always bound, columns are checked
/// against the entity's descriptor before anything is rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Compare {
        column: String,
        op: FilterOp,
        value: SqlValue,
    },
    In {
        column: String,
        values: Vec<SqlValue>,
    },
    Null {
        column: String,
        negated: bool,
    },
    And(Vec<Condition>),
    Or(Vec<Condition>),
    Not(Box<Condition>),
}

impl Condition {
    pub fn compare(column: impl Into<String>, op: FilterOp, value: impl Into<SqlValue>) -> Self {
        Condition::Compare { column: column.into(), op, value: value.into() }
    }

    pub fn eq(column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::compare(column, FilterOp::Eq, value)
    }

    pub fn neq(column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::compare(column, FilterOp::Neq, value)
    }

    pub fn gt(column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::compare(column, FilterOp::Gt, value)
    }

    pub fn gte(column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::compare(column, FilterOp::Gte, value)
    }

    pub fn lt(column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::compare(column, FilterOp::Lt, value)
    }

    pub fn lte(column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::compare(column, FilterOp::Lte, value)
    }

    pub fn like(column: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::compare(column, FilterOp::Like, pattern.into())
    }

    pub fn in_list<V: Into<SqlValue>>(column: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        Condition::In {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_null(column: impl Into<String>) -> Self {
        Condition::Null { column: column.into(), negated: false }
    }

    pub fn is_not_null(column: impl Into<String>) -> Self {
        Condition::Null { column: column.into(), negated: true }
    }

    pub fn and(conditions: Vec<Condition>) -> Self {
        Condition::And(conditions)
    }

    pub fn or(conditions: Vec<Condition>) -> Self {
        Condition::Or(conditions)
    }

    pub fn not(condition: Condition) -> Self {
        Condition::Not(Box::new(condition))
    }

    /// Every column referenced anywhere in the tree.
    pub fn columns(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_columns(&mut out);
        out
    }

    fn collect_columns<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Condition::Compare { column, .. }
            | Condition::In { column, .. }
            | Condition::Null { column, .. } => out.push(column),
            Condition::And(list) | Condition::Or(list) => {
                for c in list {
                    c.collect_columns(out);
                }
            }
            Condition::Not(inner) => inner.collect_columns(out),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterOrderInfo {
    pub column: String,
    pub sort: SortDirection,
}

/// Mutable slots a query option writes into before the query is built.
#[derive(Debug, Clone, Default)]
pub struct FilterData {
    pub prefix: Vec<Condition>,
    pub suffix: Vec<Condition>,
    pub order: Vec<FilterOrderInfo>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<SqlValue>,
}
