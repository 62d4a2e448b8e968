//! Coherence error types.

use thiserror::Error;

/// Errors that can occur while scoring topic coherence.
#[derive(Debug, Error)]
pub enum CoherenceError {
    /// Required input missing or empty
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Vocabulary length does not match phi's word axis
    #[error("Vocabulary has {vocabulary} words but phi covers {phi}")]
    VocabularyMismatch {
        /// Number of words in the supplied vocabulary
        vocabulary: usize,
        /// Size of phi's word axis
        phi: usize,
    },
}
