//! resume-fit: structured fact extraction from free-text resumes and resume-to-job scoring.
//!
//! Extractors (`extract`, `parser`) are pure synchronous functions. Semantic similarity and
//! scoring are `async` because they consult an external embedding model, which callers pass
//! in explicitly as a `SimilarityModel`.

pub mod config;
pub mod errors;
pub mod extract;
pub mod models;
pub mod parser;
pub mod scoring;
pub mod similarity;
pub mod telemetry;

pub use config::{Config, SimilarityBackend};
pub use errors::{ResumeError, Result};
pub use extract::action_verbs::{count_action_verbs, count_action_verbs_with, ActionVerbCounts};
pub use extract::companies::get_company_names;
pub use extract::contact::{get_email, get_name, get_phone};
pub use extract::experience::{extract_date_ranges, get_experience_years, YearRange};
pub use extract::keywords::{get_keywords, match_keywords, match_keywords_default};
pub use models::resume::ResumeRecord;
pub use parser::{extract_resume, parse_resume};
pub use scoring::{score_resume, score_resume_detailed, ResumeScorer, ScoreReport, ScoringWeights};
pub use similarity::{
    build_model, semantic_search, semantic_similarity, HttpEmbeddingModel, LexicalModel,
    ModelError, SerializedModel, SimilarityModel,
};
