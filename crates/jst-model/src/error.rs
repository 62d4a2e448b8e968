//! Model error types.

use thiserror::Error;

/// Errors that can occur while building or running the model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// All joint weights collapsed to zero during resampling
    #[error("Degenerate sampling distribution at token {position} of document {doc}")]
    DegenerateDistribution {
        /// Document index of the offending token
        doc: usize,
        /// Position of the offending token within its document
        position: usize,
    },
}
