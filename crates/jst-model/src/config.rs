//! Model configuration.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Configuration for a joint sentiment/topic model.
///
/// The Dirichlet hyperparameters control distribution concentration: larger
/// values spread probability mass more evenly across topics and sentiments,
/// smaller values (0.1 and below) concentrate it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JstConfig {
    /// Number of latent topics (K)
    #[serde(default = "default_num_topics")]
    pub num_topics: usize,

    /// Number of sentiment labels (S), e.g. positive/negative
    #[serde(default = "default_num_sentiments")]
    pub num_sentiments: usize,

    /// Dirichlet prior on the per-document sentiment-topic distribution
    #[serde(default = "default_alpha")]
    pub alpha: f64,

    /// Dirichlet prior on the per-sentiment-topic word distribution
    #[serde(default = "default_beta")]
    pub beta: f64,

    /// Dirichlet prior on the per-document sentiment distribution
    #[serde(default = "default_gamma")]
    pub gamma: f64,

    /// Number of full Gibbs sweeps over the corpus
    #[serde(default = "default_iterations")]
    pub iterations: usize,

    /// RNG seed; `None` seeds from the operating system
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for JstConfig {
    fn default() -> Self {
        Self {
            num_topics: default_num_topics(),
            num_sentiments: default_num_sentiments(),
            alpha: default_alpha(),
            beta: default_beta(),
            gamma: default_gamma(),
            iterations: default_iterations(),
            seed: None,
        }
    }
}

impl JstConfig {
    /// Check that every field is usable before any counts are allocated.
    ///
    /// Zero hyperparameters are rejected here because they can produce an
    /// all-zero sampling distribution once supporting counts drop to zero.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.num_topics == 0 {
            return Err(ModelError::InvalidConfig(
                "num_topics must be at least 1".to_string(),
            ));
        }
        if self.num_sentiments == 0 {
            return Err(ModelError::InvalidConfig(
                "num_sentiments must be at least 1".to_string(),
            ));
        }
        for (name, value) in [
            ("alpha", self.alpha),
            ("beta", self.beta),
            ("gamma", self.gamma),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ModelError::InvalidConfig(format!(
                    "{name} must be a positive finite number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

fn default_num_topics() -> usize {
    6
}
fn default_num_sentiments() -> usize {
    2
}
fn default_alpha() -> f64 {
    0.5
}
fn default_beta() -> f64 {
    0.5
}
fn default_gamma() -> f64 {
    0.5
}
fn default_iterations() -> usize {
    50
}
