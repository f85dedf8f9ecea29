//! Error types for schema validation

use thiserror::Error;

use crate::validate::ValidationReport;

/// Result type for validation operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Schema validation errors
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("unrecognized type descriptor: '{descriptor}'")]
    UnrecognizedType { descriptor: String },

    #[error("table not found: {table}")]
    TableNotFound { table: String },

    #[error("{0}")]
    Validation(ValidationReport),

    #[error("reflection failed for '{table}': {message}")]
    Reflection { table: String, message: String },

    #[error("materialization failed for '{table}': {message}")]
    Materialization { table: String, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SchemaError {
    /// The validation report, when this error carries one
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            SchemaError::Validation(report) => Some(report),
            _ => None,
        }
    }
}
