//! Corpus vocabulary index.

use std::collections::HashMap;

/// Bijection between distinct corpus words and dense integer ids.
///
/// Ids are assigned in first-occurrence order and are stable for the lifetime
/// of the index. Lookup is O(1) amortized in both directions.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    index: HashMap<String, usize>,
    words: Vec<String>,
}

impl Vocabulary {
    /// Create an empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a vocabulary from tokenized documents.
    pub fn from_documents(docs: &[Vec<String>]) -> Self {
        let mut vocabulary = Self::new();
        for doc in docs {
            for word in doc {
                vocabulary.intern(word);
            }
        }
        vocabulary
    }

    /// Return the id for `word`, inserting it if unseen.
    pub fn intern(&mut self, word: &str) -> usize {
        if let Some(&id) = self.index.get(word) {
            return id;
        }
        let id = self.words.len();
        self.index.insert(word.to_string(), id);
        self.words.push(word.to_string());
        id
    }

    /// Look up the id of a known word.
    pub fn id(&self, word: &str) -> Option<usize> {
        self.index.get(word).copied()
    }

    /// Look up the word for a known id.
    pub fn word(&self, id: usize) -> Option<&str> {
        self.words.get(id).map(String::as_str)
    }

    /// All words, ordered by id.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the vocabulary contains no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| (*w).to_string()).collect()
    }

    #[test]
    fn test_from_documents_dedupes() {
        let docs = vec![doc(&["good", "product", "good"]), doc(&["bad", "product"])];
        let vocabulary = Vocabulary::from_documents(&docs);
        assert_eq!(vocabulary.len(), 3);
    }

    #[test]
    fn test_first_occurrence_order() {
        let docs = vec![doc(&["good", "product"]), doc(&["bad", "service"])];
        let vocabulary = Vocabulary::from_documents(&docs);
        assert_eq!(vocabulary.words(), ["good", "product", "bad", "service"]);
    }

    #[test]
    fn test_bidirectional_lookup() {
        let docs = vec![doc(&["alpha", "beta"])];
        let vocabulary = Vocabulary::from_documents(&docs);
        for (id, word) in vocabulary.words().iter().enumerate() {
            assert_eq!(vocabulary.id(word), Some(id));
            assert_eq!(vocabulary.word(id), Some(word.as_str()));
        }
    }

    #[test]
    fn test_unknown_lookups() {
        let vocabulary = Vocabulary::from_documents(&[doc(&["alpha"])]);
        assert_eq!(vocabulary.id("missing"), None);
        assert_eq!(vocabulary.word(99), None);
    }

    #[test]
    fn test_intern_is_idempotent() {
        let mut vocabulary = Vocabulary::new();
        let first = vocabulary.intern("word");
        let second = vocabulary.intern("word");
        assert_eq!(first, second);
        assert_eq!(vocabulary.len(), 1);
    }

    #[test]
    fn test_empty() {
        let vocabulary = Vocabulary::new();
        assert!(vocabulary.is_empty());
        assert_eq!(vocabulary.len(), 0);
    }
}
