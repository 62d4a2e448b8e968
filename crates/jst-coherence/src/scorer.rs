//! PMI-based topic coherence scoring.
//!
//! Estimates how semantically consistent each (sentiment, topic)'s top words
//! are, using document-level statistics: a word's document frequency and the
//! number of documents in which a word pair co-occurs. Topics whose top words
//! never co-occur contribute a score of zero.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;

use jst_model::Phi;

use crate::error::CoherenceError;

/// Coherence scoring configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoherenceConfig {
    /// Number of top words per topic to score
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Smoothing constant added to every probability numerator
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
}

impl Default for CoherenceConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            epsilon: default_epsilon(),
        }
    }
}

fn default_top_n() -> usize {
    10
}
fn default_epsilon() -> f64 {
    1e-10
}

/// Scores topic coherence from a fitted word distribution and the corpus.
///
/// For each (sentiment, topic) the scorer takes the `top_n` heaviest words,
/// deduplicates them, and averages
/// `ln(P(w1, w2) / (P(w1) * P(w2)))` over every unordered pair that co-occurs
/// in at least one document, with all probabilities smoothed by `epsilon` and
/// measured at the document level. The overall score is the mean across all
/// sentiment-topic cells.
pub struct CoherenceScorer {
    config: CoherenceConfig,
}

impl CoherenceScorer {
    /// Create a scorer with the given configuration.
    pub fn new(config: CoherenceConfig) -> Self {
        Self { config }
    }

    /// The scorer's configuration.
    pub fn config(&self) -> &CoherenceConfig {
        &self.config
    }

    /// Score the corpus-wide average topic coherence.
    ///
    /// `vocabulary` interprets the word axis of `phi`; `docs` supplies the
    /// document-level co-occurrence statistics. All three inputs must be
    /// non-empty and `vocabulary` must match phi's word axis.
    pub fn score(
        &self,
        phi: &Phi,
        vocabulary: &[String],
        docs: &[Vec<String>],
    ) -> Result<f64, CoherenceError> {
        if phi.is_empty() {
            return Err(CoherenceError::InvalidInput(
                "phi must be provided".to_string(),
            ));
        }
        if vocabulary.is_empty() {
            return Err(CoherenceError::InvalidInput(
                "vocabulary must be provided".to_string(),
            ));
        }
        if docs.is_empty() {
            return Err(CoherenceError::InvalidInput(
                "docs must be provided".to_string(),
            ));
        }
        if vocabulary.len() != phi.vocab_size() {
            return Err(CoherenceError::VocabularyMismatch {
                vocabulary: vocabulary.len(),
                phi: phi.vocab_size(),
            });
        }

        let total_docs = docs.len() as f64;
        let mut doc_frequency: HashMap<&str, usize> = HashMap::new();
        let mut pair_frequency: HashMap<(&str, &str), usize> = HashMap::new();
        for doc in docs {
            // Each word and pair counts once per document; pair keys are
            // lexicographically ordered.
            let unique: Vec<&str> = doc
                .iter()
                .map(String::as_str)
                .collect::<BTreeSet<&str>>()
                .into_iter()
                .collect();
            for &word in &unique {
                *doc_frequency.entry(word).or_insert(0) += 1;
            }
            for a in 0..unique.len() {
                for b in (a + 1)..unique.len() {
                    *pair_frequency.entry((unique[a], unique[b])).or_insert(0) += 1;
                }
            }
        }

        let epsilon = self.config.epsilon;
        let mut total = 0.0;
        for s in 0..phi.num_sentiments() {
            for k in 0..phi.num_topics() {
                let words: Vec<&str> = phi
                    .top_words(s, k, self.config.top_n)
                    .iter()
                    .map(|&(id, _)| vocabulary[id].as_str())
                    .collect::<BTreeSet<&str>>()
                    .into_iter()
                    .collect();

                let mut score = 0.0;
                let mut pairs = 0usize;
                for a in 0..words.len() {
                    for b in (a + 1)..words.len() {
                        let df_a = doc_frequency.get(words[a]).copied().unwrap_or(0);
                        let df_b = doc_frequency.get(words[b]).copied().unwrap_or(0);
                        let co = pair_frequency
                            .get(&(words[a], words[b]))
                            .copied()
                            .unwrap_or(0);
                        if co > 0 && df_a > 0 && df_b > 0 {
                            let p_a = (df_a as f64 + epsilon) / total_docs;
                            let p_b = (df_b as f64 + epsilon) / total_docs;
                            let p_ab = (co as f64 + epsilon) / total_docs;
                            score += (p_ab / (p_a * p_b)).ln();
                            pairs += 1;
                        }
                    }
                }

                let topic_score = if pairs > 0 { score / pairs as f64 } else { 0.0 };
                debug!(
                    sentiment = s,
                    topic = k,
                    pairs,
                    score = topic_score,
                    "topic coherence"
                );
                total += topic_score;
            }
        }

        Ok(total / (phi.num_sentiments() * phi.num_topics()) as f64)
    }
}

impl Default for CoherenceScorer {
    fn default() -> Self {
        Self::new(CoherenceConfig::default())
    }
}

/// Score coherence with the default settings (top 10 words, epsilon 1e-10).
pub fn coherence(
    phi: &Phi,
    vocabulary: &[String],
    docs: &[Vec<String>],
) -> Result<f64, CoherenceError> {
    CoherenceScorer::default().score(phi, vocabulary, docs)
}
