//! # jst-coherence
//!
//! Topic coherence scoring for fitted joint sentiment/topic models.
//!
//! Consumes a model's word distribution (phi), its vocabulary, and the
//! original documents, and produces a single pointwise-mutual-information
//! style quality score: topics whose top words tend to appear in the same
//! documents score higher.
//!
//! ## Features
//! - Document-level word and co-occurrence statistics
//! - Epsilon-smoothed PMI averaged per topic, then across all
//!   sentiment-topic cells
//! - Configurable top-word cutoff and smoothing constant

pub mod error;
pub mod scorer;

pub use error::CoherenceError;
pub use scorer::{coherence, CoherenceConfig, CoherenceScorer};
