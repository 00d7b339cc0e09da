use super::types::{Condition, SqlValue};

/// Renders a [`Condition`] tree into a Postgres WHERE fragment with `$n`
/// placeholders, collecting the bound values in placeholder order.
pub struct FilterWhere {
    param_values: Vec<SqlValue>,
    param_index: usize,
}

impl FilterWhere {
    pub fn new(starting_param_index: usize) -> Self {
        Self {
            param_values: vec![],
            param_index: starting_param_index,
        }
    }

    pub fn generate(condition: &Condition, starting_param_index: usize) -> (String, Vec<SqlValue>) {
        let mut filter_where = Self::new(starting_param_index);
        let sql = filter_where.build_sql_condition(condition);
        (sql, filter_where.param_values)
    }

    fn build_sql_condition(&mut self, condition: &Condition) -> String {
        match condition {
            Condition::Compare { column, op, value } => {
                format!("{} {} {}", quote(column), op.to_sql(), self.param(value.clone()))
            }
            Condition::In { column, values } => {
                if values.is_empty() {
                    return "1=0".to_string();
                }
                let params: Vec<String> = values.iter().map(|v| self.param(v.clone())).collect();
                format!("{} IN ({})", quote(column), params.join(", "))
            }
            Condition::Null { column, negated: false } => format!("{} IS NULL", quote(column)),
            Condition::Null { column, negated: true } => format!("{} IS NOT NULL", quote(column)),
            Condition::And(list) => self.join(list, " AND ", "1=1"),
            Condition::Or(list) => self.join(list, " OR ", "1=0"),
            Condition::Not(inner) => format!("NOT ({})", self.build_sql_condition(inner)),
        }
    }

    fn join(&mut self, list: &[Condition], joiner: &str, empty: &str) -> String {
        if list.is_empty() {
            return empty.to_string();
        }
        let parts: Vec<String> = list
            .iter()
            .map(|c| match c {
                Condition::And(_) | Condition::Or(_) => format!("({})", self.build_sql_condition(c)),
                _ => self.build_sql_condition(c),
            })
            .collect();
        parts.join(joiner)
    }

    fn param(&mut self, value: SqlValue) -> String {
        self.param_values.push(value);
        self.param_index += 1;
        format!("${}", self.param_index)
    }
}

pub(crate) fn quote(column: &str) -> String {
    format!("\"{}\"", column)
}
