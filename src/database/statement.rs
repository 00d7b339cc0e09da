//! Write statements for the generic repository.
//!
//! Update and soft delete only ever match live rows (`is_deleted = 0`), so a
//! retired row can neither be rewritten nor brought back.

use crate::database::entity::Entity;
use crate::filter::filter_where::quote;
use crate::filter::{SqlResult, SqlValue};

pub fn insert<E: Entity>(entity: &E) -> SqlResult {
    let audit = entity.audit();
    let mut columns: Vec<&str> = E::FIELDS.to_vec();
    columns.extend(["created_at", "created_by", "is_deleted"]);

    let mut params = entity.field_values();
    params.push(audit.created_at.into());
    params.push(audit.created_by.clone().into());
    params.push(audit.is_deleted.into());

    let quoted: Vec<String> = columns.into_iter().map(quote).collect();
    let placeholders: Vec<String> = (1..=params.len()).map(|i| format!("${}", i)).collect();

    SqlResult {
        query: format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING \"id\"",
            quote(E::TABLE),
            quoted.join(", "),
            placeholders.join(", ")
        ),
        params,
    }
}

pub fn update<E: Entity>(entity: &E) -> SqlResult {
    let audit = entity.audit();
    let mut columns: Vec<&str> = E::FIELDS.to_vec();
    columns.extend(["updated_at", "updated_by"]);

    let mut params = entity.field_values();
    params.push(audit.updated_at.into());
    params.push(audit.updated_by.clone().into());

    let assignments = assignments(&columns);
    params.push(SqlValue::Int(entity.id()));

    SqlResult {
        query: format!(
            "UPDATE {} SET {} WHERE \"id\" = ${} AND \"is_deleted\" = 0",
            quote(E::TABLE),
            assignments,
            params.len()
        ),
        params,
    }
}

pub fn soft_delete<E: Entity>(entity: &E) -> SqlResult {
    let audit = entity.audit();
    let params = vec![
        SqlValue::from(audit.deleted_at),
        SqlValue::from(audit.deleted_by.clone()),
        SqlValue::Int(entity.id()),
    ];

    SqlResult {
        query: format!(
            "UPDATE {} SET \"is_deleted\" = 1, \"deleted_at\" = $1, \"deleted_by\" = $2 WHERE \"id\" = $3 AND \"is_deleted\" = 0",
            quote(E::TABLE)
        ),
        params,
    }
}

fn assignments(columns: &[&str]) -> String {
    columns
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{} = ${}", quote(c), i + 1))
        .collect::<Vec<_>>()
        .join(", ")
}
