//! Keyword extraction and matching.

use std::collections::HashSet;

use crate::extract::sections::{section_text, SectionKind};

/// Returns the keywords present in both lists, in `list1` order, duplicates collapsed.
///
/// With `ignore_case` both lists are case-folded first and the output is lower-case.
/// Without it, matching is exact and the original casing is kept.
pub fn match_keywords<S1, S2>(list1: &[S1], list2: &[S2], ignore_case: bool) -> Vec<String>
where
    S1: AsRef<str>,
    S2: AsRef<str>,
{
    let fold = |s: &str| {
        let s = s.trim();
        if ignore_case {
            s.to_lowercase()
        } else {
            s.to_string()
        }
    };

    let other: HashSet<String> = list2
        .iter()
        .map(|s| fold(s.as_ref()))
        .filter(|s| !s.is_empty())
        .collect();

    let mut seen = HashSet::new();
    list1
        .iter()
        .map(|s| fold(s.as_ref()))
        .filter(|s| !s.is_empty() && other.contains(s))
        .filter(|s| seen.insert(s.clone()))
        .collect()
}

/// `match_keywords` with case-insensitive matching.
pub fn match_keywords_default<S1, S2>(list1: &[S1], list2: &[S2]) -> Vec<String>
where
    S1: AsRef<str>,
    S2: AsRef<str>,
{
    match_keywords(list1, list2, true)
}

/// Required keywords the resume does not cover (case-insensitive), in `required` order.
pub fn missing_keywords<S1, S2>(resume_keywords: &[S1], required: &[S2]) -> Vec<String>
where
    S1: AsRef<str>,
    S2: AsRef<str>,
{
    let have: HashSet<String> = resume_keywords
        .iter()
        .map(|k| k.as_ref().trim().to_lowercase())
        .collect();

    let mut seen = HashSet::new();
    required
        .iter()
        .map(|k| k.as_ref().trim())
        .filter(|k| !k.is_empty())
        .filter(|k| {
            let lower = k.to_lowercase();
            !have.contains(&lower) && seen.insert(lower)
        })
        .map(str::to_string)
        .collect()
}

/// Number of distinct non-blank keywords after case-folding.
pub fn distinct_keyword_count<S: AsRef<str>>(keywords: &[S]) -> usize {
    keywords
        .iter()
        .map(|k| k.as_ref().trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect::<HashSet<_>>()
        .len()
}

/// Keywords listed in the resume's skills section(s).
///
/// Entries are split on commas, semicolons, pipes, bullets and newlines. Duplicates are
/// dropped case-insensitively; the first spelling wins.
pub fn get_keywords(text: &str) -> Vec<String> {
    let Some(skills) = section_text(text, SectionKind::Skills) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    skills
        .split(|c: char| matches!(c, ',' | ';' | '|' | '•' | '\n'))
        .map(|item| item.trim().trim_start_matches(['-', '*']).trim())
        .map(|item| item.trim_end_matches('.'))
        .filter(|item| !item.is_empty())
        .filter(|item| seen.insert(item.to_lowercase()))
        .map(str::to_string)
        .collect()
}
