//! Resume-to-job scoring: keyword overlap and semantic similarity, combined.
//!
//! composite = (w_k × keyword_ratio + w_s × semantic) / (w_k + w_s), in [0.0, 1.0].
//! keyword_ratio = matched job keywords / distinct job keywords. With no job keywords the
//! keyword term is dropped and the composite is the semantic score alone.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::errors::{ResumeError, Result};
use crate::extract::keywords::{distinct_keyword_count, match_keywords, missing_keywords};
use crate::models::resume::ResumeRecord;
use crate::similarity::{build_model, semantic_similarity, SimilarityModel};

const STRONG_FIT: f64 = 0.75;
const MODERATE_FIT: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub keyword: f64,
    pub semantic: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            keyword: 0.5,
            semantic: 0.5,
        }
    }
}

impl ScoringWeights {
    pub fn new(keyword: f64, semantic: f64) -> Result<Self> {
        let weights = Self { keyword, semantic };
        weights.validate()?;
        Ok(weights)
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.keyword_weight, config.semantic_weight)
    }

    pub fn validate(&self) -> Result<()> {
        let valid = |w: f64| w.is_finite() && w >= 0.0;
        if !valid(self.keyword) || !valid(self.semantic) {
            return Err(ResumeError::InvalidConfig(format!(
                "scoring weights must be finite and non-negative (keyword={}, semantic={})",
                self.keyword, self.semantic
            )));
        }
        let total = self.keyword + self.semantic;
        if total == 0.0 {
            return Err(ResumeError::InvalidConfig(
                "at least one scoring weight must be positive".to_string(),
            ));
        }
        if !total.is_finite() {
            return Err(ResumeError::InvalidConfig(format!(
                "scoring weights must have a finite sum (keyword={}, semantic={})",
                self.keyword, self.semantic
            )));
        }
        Ok(())
    }
}

/// Full score breakdown returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    pub overall_score: f64, // 0.0 – 1.0
    /// `None` when the job listed no keywords.
    pub keyword_score: Option<f64>,
    pub semantic_score: f64,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub weights: ScoringWeights,
    pub recommendation: String,
    pub scorer_backend: String,
}

/// Holds one shared similarity model and the weights, for scoring many resumes.
#[derive(Clone)]
pub struct ResumeScorer {
    model: Arc<dyn SimilarityModel>,
    weights: ScoringWeights,
}

impl ResumeScorer {
    pub fn new(model: Arc<dyn SimilarityModel>, weights: ScoringWeights) -> Result<Self> {
        weights.validate()?;
        Ok(Self { model, weights })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(build_model(config)?, ScoringWeights::from_config(config)?)
    }

    pub fn weights(&self) -> ScoringWeights {
        self.weights
    }

    pub async fn score(
        &self,
        record: &ResumeRecord,
        job_description: &str,
        job_keywords: &[String],
    ) -> Result<ScoreReport> {
        score_resume_detailed(
            self.model.as_ref(),
            record,
            job_description,
            job_keywords,
            &self.weights,
        )
        .await
    }
}

/// Composite resume-to-job score in [0.0, 1.0] with the default 0.5 / 0.5 weighting.
pub async fn score_resume<S: AsRef<str>>(
    model: &dyn SimilarityModel,
    record: &ResumeRecord,
    job_description: &str,
    job_keywords: &[S],
) -> Result<f64> {
    let report = score_resume_detailed(
        model,
        record,
        job_description,
        job_keywords,
        &ScoringWeights::default(),
    )
    .await?;
    Ok(report.overall_score)
}

pub async fn score_resume_detailed<S: AsRef<str>>(
    model: &dyn SimilarityModel,
    record: &ResumeRecord,
    job_description: &str,
    job_keywords: &[S],
    weights: &ScoringWeights,
) -> Result<ScoreReport> {
    weights.validate()?;
    if record.source_text().trim().is_empty() {
        return Err(ResumeError::MalformedInput(
            "resume record carries no source text; score a record built by extract_resume"
                .to_string(),
        ));
    }

    let matched_keywords = match_keywords(&record.keywords, job_keywords, true);
    let missing = missing_keywords(&record.keywords, job_keywords);
    let keyword_score = keyword_ratio(matched_keywords.len(), distinct_keyword_count(job_keywords));

    let semantic_score =
        semantic_similarity(model, record.source_text(), job_description).await?;

    let overall_score = compute_composite(keyword_score, semantic_score, weights);

    debug!(
        overall_score,
        ?keyword_score,
        semantic_score,
        matched = matched_keywords.len(),
        missing = missing.len(),
        "resume scored"
    );

    Ok(ScoreReport {
        overall_score,
        keyword_score,
        semantic_score,
        recommendation: build_recommendation(overall_score, &missing),
        matched_keywords,
        missing_keywords: missing,
        weights: *weights,
        scorer_backend: model.backend().to_string(),
    })
}

/// Matched / required, or `None` when nothing was required.
pub fn keyword_ratio(matched: usize, required: usize) -> Option<f64> {
    if required == 0 {
        None
    } else {
        Some((matched as f64 / required as f64).clamp(0.0, 1.0))
    }
}

/// Weighted average of the available components, clamped to [0.0, 1.0].
pub fn compute_composite(keyword: Option<f64>, semantic: f64, weights: &ScoringWeights) -> f64 {
    let score = match keyword {
        Some(keyword) => {
            let total = weights.keyword + weights.semantic;
            (weights.keyword / total) * keyword + (weights.semantic / total) * semantic
        }
        None => semantic,
    };
    score.clamp(0.0, 1.0)
}

/// Builds a human-readable recommendation string from score and missing keywords.
fn build_recommendation(score: f64, missing: &[String]) -> String {
    let percent = (score * 100.0).round() as u32;
    let top_gaps: Vec<&str> = missing.iter().take(3).map(String::as_str).collect();

    if score >= STRONG_FIT {
        "Strong fit. The resume directly covers the key job requirements.".to_string()
    } else if top_gaps.is_empty() {
        format!("Partial fit ({percent}/100). Keywords are covered; strengthen how the experience is described.")
    } else if score >= MODERATE_FIT {
        format!(
            "Moderate fit ({percent}/100). Consider adding: {}.",
            top_gaps.join(", ")
        )
    } else {
        format!(
            "Low fit ({percent}/100). Significant gaps: {}.",
            top_gaps.join(", ")
        )
    }
}
