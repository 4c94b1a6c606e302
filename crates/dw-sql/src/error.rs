//! Error types for dw-sql

use thiserror::Error;

/// Errors raised while turning statement text or parser output into features
#[derive(Error, Debug)]
pub enum SqlError {
    /// Parser output has a shape the tree model cannot represent (S001)
    #[error("[S001] Invalid syntax tree: {0}")]
    InvalidTree(String),

    /// Empty SQL (S002)
    #[error("[S002] SQL is empty")]
    EmptySql,

    /// Parser output holds no statement (S003)
    #[error("[S003] No statement found in parser output")]
    NoStatement,

    /// Parser output is not valid JSON (S004)
    #[error("[S004] Failed to read parser output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for SqlError
pub type SqlResult<T> = Result<T, SqlError>;
