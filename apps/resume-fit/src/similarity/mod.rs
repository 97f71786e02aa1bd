//! Semantic similarity: a narrow wrapper over an external embedding/comparison model.
//!
//! The model is always passed in explicitly (`&dyn SimilarityModel`), so callers decide
//! whether it is a remote embeddings API, the offline lexical fallback, or a test stub.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{Config, SimilarityBackend};
use crate::errors::ResumeError;

pub mod http;
pub mod lexical;
pub mod serialized;

pub use http::HttpEmbeddingModel;
pub use lexical::LexicalModel;
pub use serialized::SerializedModel;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("Model returned no embeddings")]
    EmptyResponse,

    #[error("Embedding dimensions differ: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("Model returned a non-finite score")]
    NonFiniteScore,

    #[error("Model not configured: {0}")]
    NotConfigured(String),
}

/// The external comparison model: two texts in, a cosine-like score out.
///
/// Implementations must be shareable across tasks (`Arc<dyn SimilarityModel>`). Providers
/// that cannot take concurrent calls should be wrapped in [`SerializedModel`].
#[async_trait]
pub trait SimilarityModel: Send + Sync {
    async fn embed_and_compare(&self, text_a: &str, text_b: &str) -> Result<f32, ModelError>;

    /// Short backend label ("http", "lexical", …), reported in score reports.
    fn backend(&self) -> &str;
}

/// Semantic similarity of two texts in [0.0, 1.0].
///
/// Blank input on either side scores 0.0 without consulting the model. Negative model
/// scores clamp to 0.0; model failures surface as `ResumeError::ModelUnavailable`.
pub async fn semantic_similarity(
    model: &dyn SimilarityModel,
    text_a: &str,
    text_b: &str,
) -> Result<f64, ResumeError> {
    if text_a.trim().is_empty() || text_b.trim().is_empty() {
        debug!("semantic_similarity: blank input, scoring 0.0");
        return Ok(0.0);
    }

    let raw = model.embed_and_compare(text_a, text_b).await?;
    let score = normalize_score(raw)?;

    debug!(
        backend = model.backend(),
        raw_score = raw,
        score,
        "semantic similarity computed"
    );

    Ok(score)
}

pub use self::semantic_similarity as semantic_search;

/// Clamps a raw model score into [0.0, 1.0]. NaN and infinities are model faults.
pub fn normalize_score(raw: f32) -> Result<f64, ModelError> {
    if !raw.is_finite() {
        return Err(ModelError::NonFiniteScore);
    }
    Ok(f64::from(raw).clamp(0.0, 1.0))
}

/// Cosine similarity of two embeddings. Zero vectors score 0.0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, ModelError> {
    if a.len() != b.len() {
        return Err(ModelError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        Ok(0.0)
    } else {
        Ok(dot / (norm_a * norm_b))
    }
}

/// Builds the configured backend, loaded once and shared by every scoring call.
pub fn build_model(config: &Config) -> Result<Arc<dyn SimilarityModel>, ResumeError> {
    let model: Arc<dyn SimilarityModel> = match config.similarity_backend {
        SimilarityBackend::Http => Arc::new(HttpEmbeddingModel::from_config(config)?),
        SimilarityBackend::Lexical => Arc::new(LexicalModel::new()),
    };

    info!("Similarity model initialized (backend: {})", model.backend());
    Ok(model)
}
