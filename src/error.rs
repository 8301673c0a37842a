//! Error types for the optimization engine

use thiserror::Error;

/// Errors raised by ingestion, configuration loading and the calling edges.
///
/// Numerical guards (zero balances, zero salary) are not errors; the
/// components degrade those cases to defined values instead.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid input: {field} - {reason}")]
    Validation { field: String, reason: String },

    #[error("Invalid configuration: {reason}")]
    Configuration { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EngineError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        EngineError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn configuration(reason: impl Into<String>) -> Self {
        EngineError::Configuration {
            reason: reason.into(),
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
