//! Offline lexical backend.
//!
//! Token-overlap cosine over lower-cased, stop-word-filtered unigrams and bigrams. Fully
//! deterministic and dependency-free, but it only sees shared vocabulary: synonyms score 0.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::similarity::{ModelError, SimilarityModel};

const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "have", "i", "in",
    "is", "it", "of", "on", "or", "our", "that", "the", "this", "to", "we", "with", "you",
    "your",
];

const BIGRAM_WEIGHT: f32 = 0.5;

#[derive(Debug, Clone, Default)]
pub struct LexicalModel;

impl LexicalModel {
    pub fn new() -> Self {
        Self
    }

    /// Cosine similarity of the two texts' sparse term vectors.
    pub fn compare(&self, text_a: &str, text_b: &str) -> f32 {
        let a = term_vector(text_a);
        let b = term_vector(text_b);
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }

        let dot: f32 = a
            .iter()
            .filter_map(|(term, wa)| b.get(term).map(|wb| wa * wb))
            .sum();
        let norm_a = a.values().map(|w| w * w).sum::<f32>().sqrt();
        let norm_b = b.values().map(|w| w * w).sum::<f32>().sqrt();

        (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
    }
}

#[async_trait]
impl SimilarityModel for LexicalModel {
    async fn embed_and_compare(&self, text_a: &str, text_b: &str) -> Result<f32, ModelError> {
        Ok(self.compare(text_a, text_b))
    }

    fn backend(&self) -> &str {
        "lexical"
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#'))
        .filter(|token| !token.is_empty() && !STOP_WORDS.contains(token))
        .map(str::to_string)
        .collect()
}

fn term_vector(text: &str) -> HashMap<String, f32> {
    let tokens = tokenize(text);
    let mut vector = HashMap::new();

    for token in &tokens {
        *vector.entry(token.clone()).or_insert(0.0) += 1.0;
    }
    for window in tokens.windows(2) {
        *vector
            .entry(format!("{} {}", window[0], window[1]))
            .or_insert(0.0) += BIGRAM_WEIGHT;
    }

    vector
}
