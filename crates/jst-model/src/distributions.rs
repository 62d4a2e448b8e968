//! Smoothed posterior distributions derived from final counts.
//!
//! Estimation is a pure function of the count tables; it never resamples and
//! never renormalizes beyond the Dirichlet-smoothed ratios:
//!
//! - `phi[s][k][w]   = (n_skw + beta)  / (n_sk + V*beta)`
//! - `theta[d][s][k] = (n_dsk + alpha) / (n_ds + K*alpha)`
//! - `pi[d][s]       = (n_ds + gamma)  / (N_d + S*gamma)`

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::counts::CountStore;

/// Word distribution per (sentiment, topic): an S x K x V dense table.
///
/// Each (s, k) row is a probability simplex over word ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phi {
    num_sentiments: usize,
    num_topics: usize,
    vocab_size: usize,
    values: Vec<f64>,
}

impl Phi {
    /// Wrap a row-major S x K x V value buffer.
    ///
    /// # Panics
    /// Panics if `values.len() != num_sentiments * num_topics * vocab_size`.
    pub fn new(
        num_sentiments: usize,
        num_topics: usize,
        vocab_size: usize,
        values: Vec<f64>,
    ) -> Self {
        assert_eq!(
            values.len(),
            num_sentiments * num_topics * vocab_size,
            "Phi buffer must match its dimensions"
        );
        Self {
            num_sentiments,
            num_topics,
            vocab_size,
            values,
        }
    }

    /// Probability of word `w` under (sentiment `s`, topic `k`).
    #[inline]
    pub fn get(&self, s: usize, k: usize, w: usize) -> f64 {
        self.values[(s * self.num_topics + k) * self.vocab_size + w]
    }

    /// The full word simplex for (sentiment `s`, topic `k`).
    pub fn row(&self, s: usize, k: usize) -> &[f64] {
        let start = (s * self.num_topics + k) * self.vocab_size;
        &self.values[start..start + self.vocab_size]
    }

    /// Top `n` word ids for (sentiment `s`, topic `k`), heaviest first.
    ///
    /// Ties keep ascending id order.
    pub fn top_words(&self, s: usize, k: usize, n: usize) -> Vec<(usize, f64)> {
        let mut ranked: Vec<(usize, f64)> = self
            .row(s, k)
            .iter()
            .copied()
            .enumerate()
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        ranked.truncate(n);
        ranked
    }

    /// Number of sentiment labels.
    pub fn num_sentiments(&self) -> usize {
        self.num_sentiments
    }

    /// Number of topics.
    pub fn num_topics(&self) -> usize {
        self.num_topics
    }

    /// Vocabulary size.
    pub fn vocab_size(&self) -> usize {
        self.vocab_size
    }

    /// Whether the table holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Sentiment-topic distribution per document: a D x S x K dense table.
///
/// Each (d, s) slice is the smoothed joint-conditional ratio
/// `(n_dsk + alpha) / (n_ds + K*alpha)` exactly as sampled, not a
/// renormalized variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theta {
    num_docs: usize,
    num_sentiments: usize,
    num_topics: usize,
    values: Vec<f64>,
}

impl Theta {
    /// Wrap a row-major D x S x K value buffer.
    ///
    /// # Panics
    /// Panics if the buffer does not match its dimensions.
    pub fn new(
        num_docs: usize,
        num_sentiments: usize,
        num_topics: usize,
        values: Vec<f64>,
    ) -> Self {
        assert_eq!(
            values.len(),
            num_docs * num_sentiments * num_topics,
            "Theta buffer must match its dimensions"
        );
        Self {
            num_docs,
            num_sentiments,
            num_topics,
            values,
        }
    }

    /// Probability of (sentiment `s`, topic `k`) in document `d`.
    #[inline]
    pub fn get(&self, d: usize, s: usize, k: usize) -> f64 {
        self.values[(d * self.num_sentiments + s) * self.num_topics + k]
    }

    /// Per-(sentiment, topic) means over all documents, as a flat S x K table.
    pub fn sentiment_topic_means(&self) -> Vec<f64> {
        let mut means = vec![0.0; self.num_sentiments * self.num_topics];
        if self.num_docs == 0 {
            return means;
        }
        for d in 0..self.num_docs {
            for s in 0..self.num_sentiments {
                for k in 0..self.num_topics {
                    means[s * self.num_topics + k] += self.get(d, s, k);
                }
            }
        }
        for mean in means.iter_mut() {
            *mean /= self.num_docs as f64;
        }
        means
    }

    /// Number of documents.
    pub fn num_docs(&self) -> usize {
        self.num_docs
    }

    /// Number of sentiment labels.
    pub fn num_sentiments(&self) -> usize {
        self.num_sentiments
    }

    /// Number of topics.
    pub fn num_topics(&self) -> usize {
        self.num_topics
    }
}

/// Sentiment distribution per document: a D x S dense table.
///
/// Each document row is a probability simplex over sentiments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pi {
    num_docs: usize,
    num_sentiments: usize,
    values: Vec<f64>,
}

impl Pi {
    /// Wrap a row-major D x S value buffer.
    ///
    /// # Panics
    /// Panics if the buffer does not match its dimensions.
    pub fn new(num_docs: usize, num_sentiments: usize, values: Vec<f64>) -> Self {
        assert_eq!(
            values.len(),
            num_docs * num_sentiments,
            "Pi buffer must match its dimensions"
        );
        Self {
            num_docs,
            num_sentiments,
            values,
        }
    }

    /// Probability of sentiment `s` in document `d`.
    #[inline]
    pub fn get(&self, d: usize, s: usize) -> f64 {
        self.values[d * self.num_sentiments + s]
    }

    /// The sentiment simplex for document `d`.
    pub fn row(&self, d: usize) -> &[f64] {
        let start = d * self.num_sentiments;
        &self.values[start..start + self.num_sentiments]
    }

    /// Number of documents.
    pub fn num_docs(&self) -> usize {
        self.num_docs
    }

    /// Number of sentiment labels.
    pub fn num_sentiments(&self) -> usize {
        self.num_sentiments
    }
}

/// Compute (phi, theta, pi) from the current count tables.
pub fn estimate(counts: &CountStore, alpha: f64, beta: f64, gamma: f64) -> (Phi, Theta, Pi) {
    let num_docs = counts.num_docs();
    let num_sentiments = counts.num_sentiments();
    let num_topics = counts.num_topics();
    let vocab_size = counts.vocab_size();

    let mut phi = Vec::with_capacity(num_sentiments * num_topics * vocab_size);
    for s in 0..num_sentiments {
        for k in 0..num_topics {
            let denom = f64::from(counts.sentiment_topic(s, k)) + vocab_size as f64 * beta;
            for w in 0..vocab_size {
                phi.push((f64::from(counts.sentiment_topic_word(s, k, w)) + beta) / denom);
            }
        }
    }

    let mut theta = Vec::with_capacity(num_docs * num_sentiments * num_topics);
    for d in 0..num_docs {
        for s in 0..num_sentiments {
            let denom = f64::from(counts.doc_sentiment(d, s)) + num_topics as f64 * alpha;
            for k in 0..num_topics {
                theta.push((f64::from(counts.doc_sentiment_topic(d, s, k)) + alpha) / denom);
            }
        }
    }

    let mut pi = Vec::with_capacity(num_docs * num_sentiments);
    for d in 0..num_docs {
        let denom = f64::from(counts.doc_total(d)) + num_sentiments as f64 * gamma;
        for s in 0..num_sentiments {
            pi.push((f64::from(counts.doc_sentiment(d, s)) + gamma) / denom);
        }
    }

    (
        Phi::new(num_sentiments, num_topics, vocab_size, phi),
        Theta::new(num_docs, num_sentiments, num_topics, theta),
        Pi::new(num_docs, num_sentiments, pi),
    )
}

/// Dominant sentiment per topic, from theta averaged over all documents.
///
/// Returns one sentiment label per topic. Ties resolve to the highest
/// sentiment index.
pub fn topic_polarity(theta: &Theta) -> Vec<usize> {
    let means = theta.sentiment_topic_means();
    let num_topics = theta.num_topics();
    (0..num_topics)
        .map(|k| {
            (0..theta.num_sentiments())
                .max_by(|&a, &b| {
                    means[a * num_topics + k]
                        .partial_cmp(&means[b * num_topics + k])
                        .unwrap_or(Ordering::Equal)
                })
                .unwrap_or(0)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_exact_values() {
        // One document ["x", "y"], S=1, K=2, x assigned topic 0 and y topic 1.
        let mut counts = CountStore::new(&[2], 1, 2, 2);
        counts.increment(0, 0, 0, 0);
        counts.increment(0, 0, 1, 1);

        let (phi, theta, pi) = estimate(&counts, 0.5, 0.5, 0.5);

        assert!((phi.get(0, 0, 0) - 0.75).abs() < 1e-12);
        assert!((phi.get(0, 0, 1) - 0.25).abs() < 1e-12);
        assert!((theta.get(0, 0, 0) - 0.5).abs() < 1e-12);
        assert!((theta.get(0, 0, 1) - 0.5).abs() < 1e-12);
        assert!((pi.get(0, 0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_phi_rows_are_simplexes() {
        let mut counts = CountStore::new(&[3], 2, 2, 3);
        counts.increment(0, 0, 0, 0);
        counts.increment(0, 1, 1, 1);
        counts.increment(0, 0, 1, 2);

        let (phi, _, _) = estimate(&counts, 0.5, 0.5, 0.5);
        for s in 0..2 {
            for k in 0..2 {
                let sum: f64 = phi.row(s, k).iter().sum();
                assert!((sum - 1.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_pi_rows_are_simplexes() {
        let mut counts = CountStore::new(&[2, 1], 3, 2, 2);
        counts.increment(0, 0, 0, 0);
        counts.increment(0, 2, 1, 1);
        counts.increment(1, 1, 0, 0);

        let (_, _, pi) = estimate(&counts, 0.5, 0.5, 0.5);
        for d in 0..2 {
            let sum: f64 = pi.row(d).iter().sum();
            assert!((sum - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_pi_empty_document_is_uniform() {
        let counts = CountStore::new(&[0], 2, 2, 1);
        let (_, _, pi) = estimate(&counts, 0.5, 0.5, 0.5);
        assert!((pi.get(0, 0) - 0.5).abs() < 1e-12);
        assert!((pi.get(0, 1) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_top_words_ordering() {
        let phi = Phi::new(1, 1, 4, vec![0.1, 0.4, 0.2, 0.3]);
        let top = phi.top_words(0, 0, 3);
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].0, 1);
        assert_eq!(top[1].0, 3);
        assert_eq!(top[2].0, 2);
        for pair in top.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
    }

    #[test]
    fn test_top_words_truncates_to_vocab() {
        let phi = Phi::new(1, 1, 2, vec![0.6, 0.4]);
        let top = phi.top_words(0, 0, 10);
        assert_eq!(top.len(), 2);
    }

    #[test]
    fn test_sentiment_topic_means() {
        let theta = Theta::new(2, 2, 1, vec![0.2, 0.8, 0.4, 0.6]);
        let means = theta.sentiment_topic_means();
        assert!((means[0] - 0.3).abs() < 1e-12);
        assert!((means[1] - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_topic_polarity() {
        // Topic 0 leans sentiment 0, topic 1 leans sentiment 1.
        let theta = Theta::new(1, 2, 2, vec![0.6, 0.1, 0.2, 0.7]);
        assert_eq!(topic_polarity(&theta), vec![0, 1]);
    }

    #[test]
    fn test_topic_polarity_tie_resolves_high() {
        let theta = Theta::new(1, 2, 1, vec![0.5, 0.5]);
        assert_eq!(topic_polarity(&theta), vec![1]);
    }

    #[test]
    #[should_panic(expected = "Phi buffer must match its dimensions")]
    fn test_phi_rejects_bad_buffer() {
        Phi::new(1, 2, 2, vec![0.0; 3]);
    }
}
