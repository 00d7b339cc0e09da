pub mod auth;
pub mod response;

pub use auth::BearerToken;
pub use response::{ApiResponse, ApiResult};
