//! Query options: caller-supplied functions that fill the prefix/suffix,
//! ordering and paging slots of a [`FilterData`] before the query is built.

use super::error::FilterError;
use super::types::{Condition, FilterData, FilterOrderInfo, SortDirection};

pub type QueryOption = Box<dyn FnOnce(&mut FilterData) -> Result<(), FilterError> + Send>;

/// Wrap an arbitrary closure as a query option.
pub fn option<F>(f: F) -> QueryOption
where
    F: FnOnce(&mut FilterData) -> Result<(), FilterError> + Send + 'static,
{
    Box::new(f)
}

/// The suffix every list view uses: `is_deleted = 0`.
pub fn not_deleted() -> QueryOption {
    suffix(Condition::eq("is_deleted", 0))
}

pub fn prefix(condition: Condition) -> QueryOption {
    option(move |data| {
        data.prefix.push(condition);
        Ok(())
    })
}

pub fn suffix(condition: Condition) -> QueryOption {
    option(move |data| {
        data.suffix.push(condition);
        Ok(())
    })
}

pub fn order_by(column: impl Into<String>, sort: SortDirection) -> QueryOption {
    let column = column.into();
    option(move |data| {
        data.order.push(FilterOrderInfo { column, sort });
        Ok(())
    })
}

pub fn limit(limit: i64, offset: Option<i64>) -> QueryOption {
    option(move |data| {
        data.limit = Some(limit);
        data.offset = offset;
        Ok(())
    })
}
