//! Model data types.

use serde::{Deserialize, Serialize};

use crate::distributions::{Phi, Pi, Theta};

/// The latent (sentiment, topic) labels of a single token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Sentiment label in `[0, S)`
    pub sentiment: usize,
    /// Topic label in `[0, K)`
    pub topic: usize,
}

/// Result of a completed sampling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelOutput {
    /// Word distribution per (sentiment, topic)
    pub phi: Phi,
    /// Sentiment-topic distribution per document
    pub theta: Theta,
    /// Sentiment distribution per document
    pub pi: Pi,
    /// Words ordered by the ids used on phi's word axis
    pub vocabulary: Vec<String>,
}
