pub mod pagination;

pub use pagination::{paginate, Paginated, PaginationParams};
