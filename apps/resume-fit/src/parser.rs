//! Resume Parser: runs every extractor over one raw resume and assembles a `ResumeRecord`.
//!
//! Flow: validate text → split sections → name/contact → experience (years + companies)
//!       over the experience section → skills keywords → action verbs over the full text.
//!
//! A missing section never fails the parse; only unusable input does.

use tracing::debug;

use crate::errors::{ResumeError, Result};
use crate::extract::action_verbs::count_action_verbs;
use crate::extract::companies::get_company_names;
use crate::extract::contact::{get_email, get_name, get_phone};
use crate::extract::experience::{format_years, total_experience_years};
use crate::extract::keywords::get_keywords;
use crate::extract::sections::{section_text, SectionKind};
use crate::models::resume::ResumeRecord;

/// Above this share of control characters the input is treated as binary, not text.
const MAX_CONTROL_CHAR_RATIO: f64 = 0.1;

/// Parses a raw resume into a `ResumeRecord`.
pub fn extract_resume(text: &str) -> Result<ResumeRecord> {
    validate_text(text)?;

    // Stints are usually listed under an "Experience" heading; loosely formatted resumes
    // without one fall back to the whole text.
    let experience_text = section_text(text, SectionKind::Experience)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| text.to_string());

    let experience_years = total_experience_years(&experience_text);

    let record = ResumeRecord {
        name: get_name(text),
        email: get_email(text),
        phone: get_phone(text),
        experience: format_years(experience_years),
        experience_years,
        companies: get_company_names(&experience_text),
        keywords: get_keywords(text),
        action_verbs: count_action_verbs(text),
        source_text: text.to_string(),
    };

    debug!(
        has_name = record.name.is_some(),
        experience_years = record.experience_years,
        companies = record.companies.len(),
        keywords = record.keywords.len(),
        action_verbs = record.action_verbs.len(),
        "resume parsed"
    );

    Ok(record)
}

pub use self::extract_resume as parse_resume;

fn validate_text(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(ResumeError::MalformedInput(
            "resume text is empty".to_string(),
        ));
    }

    if text.contains('\0') {
        return Err(ResumeError::MalformedInput(
            "resume text contains NUL bytes; extract text before parsing".to_string(),
        ));
    }

    let total = text.chars().count();
    let control = text
        .chars()
        .filter(|c| c.is_control() && !c.is_whitespace())
        .count();
    if control as f64 / total as f64 > MAX_CONTROL_CHAR_RATIO {
        return Err(ResumeError::MalformedInput(format!(
            "resume text is not text-like ({control} of {total} characters are control characters)"
        )));
    }

    Ok(())
}
