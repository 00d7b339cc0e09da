pub mod error;
pub mod filter;
pub mod filter_order;
pub mod filter_where;
pub mod options;
pub mod types;

pub use error::FilterError;
pub use filter::Filter;
pub use options::{not_deleted, order_by, prefix, suffix, QueryOption};
pub use types::*;
