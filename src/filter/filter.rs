use super::error::FilterError;
use super::filter_order::FilterOrder;
use super::filter_where::FilterWhere;
use super::options::QueryOption;
use super::types::{Condition, FilterData, SqlResult, SqlValue};

/// Predicate builder for one table.
///
/// A filter record (the entity's column/value pairs) contributes one bound
/// equality per non-zero value. Query options contribute structured prefix
/// and suffix conditions, ordering and paging. Every referenced column must
/// be one of the table's known columns.
pub struct Filter {
    table_name: String,
    columns: Vec<&'static str>,
    data: FilterData,
}

impl Filter {
    pub fn new(table_name: impl Into<String>, columns: &[&'static str]) -> Result<Self, FilterError> {
        let table_name = table_name.into();
        if !is_identifier(&table_name) {
            return Err(FilterError::InvalidTableName(table_name));
        }
        if let Some(bad) = columns.iter().find(|c| !is_identifier(c)) {
            return Err(FilterError::InvalidColumn(bad.to_string()));
        }
        Ok(Self {
            table_name,
            columns: columns.to_vec(),
            data: FilterData::default(),
        })
    }

    /// Run each option against the mutable prefix/suffix/order/limit slots.
    /// The first failing option aborts the build.
    pub fn apply(&mut self, options: Vec<QueryOption>) -> Result<&mut Self, FilterError> {
        for option in options {
            option(&mut self.data)?;
        }
        Ok(self)
    }

    pub fn data(&self) -> &FilterData {
        &self.data
    }

    /// `prefix AND <equalities> AND suffix`, or `None` when nothing filters.
    pub fn condition(&self, record: &[(&'static str, SqlValue)]) -> Result<Option<Condition>, FilterError> {
        let mut parts: Vec<Condition> = self.data.prefix.clone();
        for (column, value) in record {
            if !value.is_zero() {
                parts.push(Condition::eq(*column, value.clone()));
            }
        }
        parts.extend(self.data.suffix.iter().cloned());

        for part in &parts {
            for column in part.columns() {
                self.check_column(column)?;
            }
        }

        Ok(match parts.len() {
            0 => None,
            1 => parts.pop(),
            _ => Some(Condition::And(parts)),
        })
    }

    /// Build the clause appended to a table's base SELECT:
    /// `WHERE ... ORDER BY ... LIMIT $n OFFSET $m`, each part optional.
    pub fn build(&self, record: &[(&'static str, SqlValue)]) -> Result<SqlResult, FilterError> {
        let mut clauses = Vec::new();
        let mut params = Vec::new();

        if let Some(condition) = self.condition(record)? {
            let (where_clause, where_params) = FilterWhere::generate(&condition, 0);
            clauses.push(format!("WHERE {}", where_clause));
            params.extend(where_params);
        }

        for order in &self.data.order {
            self.check_column(&order.column)?;
        }
        let order_clause = FilterOrder::generate(&self.data.order);
        if !order_clause.is_empty() {
            clauses.push(order_clause);
        }

        if let Some(limit) = self.data.limit {
            if limit < 0 {
                return Err(FilterError::InvalidLimit("Limit must be non-negative".to_string()));
            }
            params.push(SqlValue::Int(limit));
            clauses.push(format!("LIMIT ${}", params.len()));
        }
        if let Some(offset) = self.data.offset {
            if offset < 0 {
                return Err(FilterError::InvalidOffset("Offset must be non-negative".to_string()));
            }
            params.push(SqlValue::Int(offset));
            clauses.push(format!("OFFSET ${}", params.len()));
        }

        Ok(SqlResult { query: clauses.join(" "), params })
    }

    fn check_column(&self, column: &str) -> Result<(), FilterError> {
        if self.columns.iter().any(|c| *c == column) {
            Ok(())
        } else {
            Err(FilterError::UnknownColumn {
                table: self.table_name.clone(),
                column: column.to_string(),
            })
        }
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
