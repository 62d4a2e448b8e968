//! # jst-model
//!
//! Joint sentiment/topic discovery over tokenized documents via collapsed
//! Gibbs sampling.
//!
//! The model jointly infers latent topics and sentiment labels: every token
//! carries a (sentiment, topic) assignment, and four sufficient-statistics
//! tables let each token be resampled conditioned on all others with the
//! model parameters marginalized out. Seed lexicons bias the initial
//! sentiment assignments; Dirichlet hyperparameters smooth the final
//! distributions.
//!
//! ## Features
//! - Lexicon-seeded initialization (positive/negative seed word lists)
//! - Sequential collapsed Gibbs sweeps with in-place count bookkeeping
//! - Smoothed phi (word), theta (sentiment-topic), and pi (sentiment)
//!   posterior estimates
//! - Top-word ranking and per-topic polarity summaries
//! - Deterministic runs under a fixed RNG seed

pub mod config;
pub mod counts;
pub mod distributions;
pub mod error;
pub mod lexicon;
pub mod model;
pub mod types;
pub mod vocabulary;

pub use config::JstConfig;
pub use counts::CountStore;
pub use distributions::{estimate, topic_polarity, Phi, Pi, Theta};
pub use error::ModelError;
pub use lexicon::SentimentLexicon;
pub use model::SentimentTopicModel;
pub use types::{Assignment, ModelOutput};
pub use vocabulary::Vocabulary;
