//! Error types for the Lavish pipeline.
//!
//! All three variants are caught by the interception layer and turned
//! into a logged warning plus a silent fallback to the native
//! operator. Arithmetic never fails outright because the model had a
//! bad day.

use thiserror::Error;

use crate::op::Operation;

/// Top-level error type for the calculation pipeline.
#[derive(Error, Debug)]
pub enum LavishError {
    /// Missing credential, invalid configuration file, or a dry run
    /// invoked without a native fallback callback.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The operator has no entry in the prompt table.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(Operation),

    /// Network or parsing failure after retries were exhausted. Wraps
    /// the underlying cause's message.
    #[error("LLM calculation failed: {0}")]
    CalculationFailed(String),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, LavishError>;
