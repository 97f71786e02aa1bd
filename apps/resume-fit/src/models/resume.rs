use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::extract::action_verbs::ActionVerbCounts;

/// Structured facts extracted from one resume. Built once per parse call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Human-readable total, e.g. "5 years".
    pub experience: String,
    pub experience_years: u32,
    pub companies: BTreeSet<String>,
    pub keywords: Vec<String>,
    pub action_verbs: ActionVerbCounts,
    /// The text the record was parsed from. Used for semantic scoring; never serialized.
    #[serde(skip)]
    pub source_text: String,
}

impl ResumeRecord {
    pub fn source_text(&self) -> &str {
        &self.source_text
    }
}
