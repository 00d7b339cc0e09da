pub mod domains;
pub mod entity;
pub mod manager;
pub mod models;
pub mod query_builder;
pub mod repository;
pub mod statement;
pub mod writer;

pub use domains::Domains;
pub use entity::{Audit, Entity};
pub use manager::{DatabaseError, DatabaseManager};
pub use repository::{Repository, SqlRepository};
