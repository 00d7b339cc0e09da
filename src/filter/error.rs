use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Invalid table name: {0}")]
    InvalidTableName(String),

    #[error("Invalid column name: {0}")]
    InvalidColumn(String),

    #[error("Unknown column '{column}' for {table}")]
    UnknownColumn { table: String, column: String },

    #[error("Invalid limit: {0}")]
    InvalidLimit(String),

    #[error("Invalid offset: {0}")]
    InvalidOffset(String),

    #[error("Query option failed: {0}")]
    Option(String),
}
