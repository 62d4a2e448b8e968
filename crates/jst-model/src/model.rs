//! The joint sentiment/topic model and its collapsed Gibbs sampler.
//!
//! One token is resampled at a time, conditioned on every other token's
//! current assignment with the model parameters marginalized out. Each step
//! retracts the token from the count tables, scores the full S x K grid of
//! (sentiment, topic) outcomes, draws one, and commits it. Later tokens in a
//! sweep deliberately observe the updates of earlier ones; the sweep order is
//! fixed (document order, then position order) and must stay sequential.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::config::JstConfig;
use crate::counts::CountStore;
use crate::distributions;
use crate::error::ModelError;
use crate::lexicon::SentimentLexicon;
use crate::types::{Assignment, ModelOutput};
use crate::vocabulary::Vocabulary;

/// Collapsed Gibbs sampler for joint sentiment/topic discovery.
///
/// Construction builds the vocabulary, encodes every document as word ids,
/// and seeds the initial assignments: lexicon words start on their seed
/// sentiment, everything else uniform random, and topics are always uniform
/// random. [`SentimentTopicModel::run`] then performs the configured number of
/// sweeps and returns the smoothed distributions.
///
/// # Example
/// ```
/// use jst_model::{JstConfig, SentimentLexicon, SentimentTopicModel};
///
/// let docs = vec![
///     vec!["good".to_string(), "product".to_string()],
///     vec!["bad".to_string(), "service".to_string()],
/// ];
/// let lexicon = SentimentLexicon::new(["good"], ["bad"]);
/// let config = JstConfig {
///     num_topics: 2,
///     iterations: 10,
///     seed: Some(7),
///     ..Default::default()
/// };
///
/// let mut model = SentimentTopicModel::new(&docs, &lexicon, config).unwrap();
/// let output = model.run().unwrap();
/// assert_eq!(output.vocabulary.len(), 4);
/// ```
#[derive(Debug)]
pub struct SentimentTopicModel {
    config: JstConfig,
    /// Documents encoded as vocabulary ids
    documents: Vec<Vec<usize>>,
    vocabulary: Vocabulary,
    counts: CountStore,
    rng: StdRng,
    /// Scratch buffer for the S x K joint weights, reused across resamples
    weights: Vec<f64>,
}

impl SentimentTopicModel {
    /// Build a model over `docs` and initialize all assignments.
    ///
    /// Returns `InvalidConfig` for unusable hyperparameters and
    /// `InvalidInput` if the corpus contains no tokens at all (the word
    /// distributions would be undefined over an empty vocabulary).
    pub fn new(
        docs: &[Vec<String>],
        lexicon: &SentimentLexicon,
        config: JstConfig,
    ) -> Result<Self, ModelError> {
        config.validate()?;

        let mut vocabulary = Vocabulary::new();
        let documents: Vec<Vec<usize>> = docs
            .iter()
            .map(|doc| doc.iter().map(|word| vocabulary.intern(word)).collect())
            .collect();
        if vocabulary.is_empty() {
            return Err(ModelError::InvalidInput(
                "corpus contains no tokens".to_string(),
            ));
        }

        // Seed sentiments are a property of the word, so resolve them once
        // per vocabulary entry instead of once per token. Seeds outside the
        // configured sentiment range fall back to the random path.
        let seed_sentiments: Vec<Option<usize>> = vocabulary
            .words()
            .iter()
            .map(|word| {
                lexicon
                    .seed_sentiment(word)
                    .filter(|&s| s < config.num_sentiments)
            })
            .collect();

        let doc_lengths: Vec<usize> = documents.iter().map(Vec::len).collect();
        let mut counts = CountStore::new(
            &doc_lengths,
            config.num_sentiments,
            config.num_topics,
            vocabulary.len(),
        );
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        for (d, doc) in documents.iter().enumerate() {
            for (i, &w) in doc.iter().enumerate() {
                let sentiment = match seed_sentiments[w] {
                    Some(seeded) => seeded,
                    None => rng.random_range(0..config.num_sentiments),
                };
                let topic = rng.random_range(0..config.num_topics);
                counts.increment(d, sentiment, topic, w);
                counts.set_assignment(d, i, Assignment { sentiment, topic });
            }
        }

        debug!(
            documents = documents.len(),
            vocabulary = vocabulary.len(),
            positive_seeds = lexicon.positive_len(),
            negative_seeds = lexicon.negative_len(),
            "initialized assignments"
        );

        let weights = Vec::with_capacity(config.num_sentiments * config.num_topics);
        Ok(Self {
            config,
            documents,
            vocabulary,
            counts,
            rng,
            weights,
        })
    }

    /// Resample the assignment of token `i` in document `d`.
    ///
    /// Retracts the token's current assignment, scores every (s, k) outcome
    /// from the post-retraction counts as
    ///
    /// ```text
    /// weight(s, k) = (n_skw + beta)  / (n_sk + V*beta)
    ///              * (n_dsk + alpha) / (n_ds + K*alpha)
    ///              * (n_ds + gamma)  / (N_d + S*gamma)
    /// ```
    ///
    /// then draws one outcome by cumulative sum and commits it. The only side
    /// effects are the count-table updates and the stored assignment.
    ///
    /// An all-zero weight grid means a precondition was violated upstream;
    /// the token's previous assignment is restored and
    /// `DegenerateDistribution` is returned rather than silently picking an
    /// outcome.
    pub fn resample(&mut self, d: usize, i: usize) -> Result<Assignment, ModelError> {
        if d >= self.documents.len() || i >= self.documents[d].len() {
            return Err(ModelError::InvalidInput(format!(
                "token ({d}, {i}) is out of range"
            )));
        }
        let w = self.documents[d][i];
        let current = self.counts.assignment(d, i);
        self.counts.decrement(d, current.sentiment, current.topic, w);

        let num_sentiments = self.config.num_sentiments;
        let num_topics = self.config.num_topics;
        let vocab_size = self.vocabulary.len() as f64;
        let doc_len = self.documents[d].len() as f64;
        let alpha = self.config.alpha;
        let beta = self.config.beta;
        let gamma = self.config.gamma;

        self.weights.clear();
        let mut total = 0.0;
        for s in 0..num_sentiments {
            let n_ds = f64::from(self.counts.doc_sentiment(d, s));
            let sentiment_term = (n_ds + gamma) / (doc_len + num_sentiments as f64 * gamma);
            for k in 0..num_topics {
                let word_term = (f64::from(self.counts.sentiment_topic_word(s, k, w)) + beta)
                    / (f64::from(self.counts.sentiment_topic(s, k)) + vocab_size * beta);
                let topic_term = (f64::from(self.counts.doc_sentiment_topic(d, s, k)) + alpha)
                    / (n_ds + num_topics as f64 * alpha);
                let weight = word_term * topic_term * sentiment_term;
                total += weight;
                self.weights.push(weight);
            }
        }

        if !total.is_finite() || total <= 0.0 {
            self.counts.increment(d, current.sentiment, current.topic, w);
            return Err(ModelError::DegenerateDistribution { doc: d, position: i });
        }

        let threshold = self.rng.random::<f64>() * total;
        let mut cumulative = 0.0;
        let mut chosen = self.weights.len() - 1;
        for (index, &weight) in self.weights.iter().enumerate() {
            cumulative += weight;
            if cumulative > threshold {
                chosen = index;
                break;
            }
        }

        let next = Assignment {
            sentiment: chosen / num_topics,
            topic: chosen % num_topics,
        };
        self.counts.increment(d, next.sentiment, next.topic, w);
        self.counts.set_assignment(d, i, next);
        Ok(next)
    }

    /// One full sweep: every token of every document, in corpus order.
    fn sweep(&mut self) -> Result<(), ModelError> {
        for d in 0..self.documents.len() {
            for i in 0..self.documents[d].len() {
                self.resample(d, i)?;
            }
        }
        Ok(())
    }

    /// Run the configured number of sweeps and return the distributions.
    ///
    /// `iterations = 0` is valid and estimates straight from the
    /// initialization counts.
    pub fn run(&mut self) -> Result<ModelOutput, ModelError> {
        info!(
            iterations = self.config.iterations,
            documents = self.documents.len(),
            vocabulary = self.vocabulary.len(),
            "starting Gibbs sampling"
        );
        for iteration in 0..self.config.iterations {
            self.sweep()?;
            debug!(iteration = iteration + 1, "sweep complete");
        }
        info!("sampling complete");
        Ok(self.distributions())
    }

    /// Smoothed (phi, theta, pi) from the current counts, plus the vocabulary.
    pub fn distributions(&self) -> ModelOutput {
        let (phi, theta, pi) = distributions::estimate(
            &self.counts,
            self.config.alpha,
            self.config.beta,
            self.config.gamma,
        );
        ModelOutput {
            phi,
            theta,
            pi,
            vocabulary: self.vocabulary.words().to_vec(),
        }
    }

    /// The vocabulary built from the corpus.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// The current count tables and assignments.
    pub fn counts(&self) -> &CountStore {
        &self.counts
    }

    /// The model configuration.
    pub fn config(&self) -> &JstConfig {
        &self.config
    }

    /// Number of documents in the corpus.
    pub fn num_documents(&self) -> usize {
        self.documents.len()
    }
}
