use super::filter_where::quote;
use super::types::FilterOrderInfo;

pub struct FilterOrder;

impl FilterOrder {
    pub fn generate(infos: &[FilterOrderInfo]) -> String {
        if infos.is_empty() {
            return String::new();
        }
        let parts: Vec<String> = infos
            .iter()
            .map(|i| format!("{} {}", quote(&i.column), i.sort.to_sql()))
            .collect();
        format!("ORDER BY {}", parts.join(", "))
    }
}
