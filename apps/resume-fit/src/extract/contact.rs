//! Candidate identity: name, email, phone.

use std::sync::LazyLock;

use regex::Regex;

static NAME_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t]*(?:full[ \t]+)?name[ \t]*:[ \t]*(?P<name>[^\n|]+)").expect("valid name regex")
});

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}")
        .expect("valid email regex")
});

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+?\(?\d[\d ().-]{5,}\d").expect("valid phone regex"));

static PHONE_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:phone|tel|telephone|mobile|cell)\s*[:.]?\s*(?P<number>\+?\(?\d[\d ().-]{5,}\d)")
        .expect("valid phone label regex")
});

static YEAR_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}\s*[-–]\s*\d{4}$").expect("valid year span regex"));

/// Lines that open a document rather than name its author.
const TITLE_LINES: &[&str] = &["resume", "résumé", "curriculum vitae", "cv"];

const MAX_NAME_WORDS: usize = 5;
const NAME_SCAN_LINES: usize = 3;
const MIN_PHONE_DIGITS: usize = 7;

/// Candidate name: a labeled `Name:` field, else the first leading line that reads like one.
pub fn get_name(text: &str) -> Option<String> {
    if let Some(caps) = NAME_LABEL.captures(text) {
        let name = caps["name"].trim();
        if !name.is_empty() {
            return Some(name.to_string());
        }
    }

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !TITLE_LINES.contains(&line.to_lowercase().as_str()))
        .take(NAME_SCAN_LINES)
        .find(|line| looks_like_name(line))
        .map(str::to_string)
}

pub fn get_email(text: &str) -> Option<String> {
    EMAIL.find(text).map(|m| m.as_str().to_string())
}

/// First phone number, preferring a labeled one. Year spans ("2015-2018", "(2015-2018)")
/// are skipped.
pub fn get_phone(text: &str) -> Option<String> {
    if let Some(caps) = PHONE_LABEL.captures(text) {
        return Some(caps["number"].trim().to_string());
    }

    PHONE
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .find(|candidate| {
            !YEAR_SPAN.is_match(candidate.trim_matches(['(', ')']))
                && candidate.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
        })
        .map(str::to_string)
}

fn looks_like_name(line: &str) -> bool {
    let words = line.split_whitespace().count();
    words > 0
        && words <= MAX_NAME_WORDS
        && !line.contains(['@', ':', '|', ','])
        && !line.chars().any(|c| c.is_ascii_digit())
        && line.chars().any(char::is_alphabetic)
}
