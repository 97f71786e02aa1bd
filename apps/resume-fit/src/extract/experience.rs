//! Date-range experience calculator.
//!
//! Recognizes "from 2018 to 2023", "2018 to 2023", "2018 - 2023" and open-ended ranges
//! ("from 2021 to present"). Durations of all ranges are summed; overlapping stints are
//! counted twice.

use std::sync::LazyLock;

use chrono::{Datelike, Utc};
use regex::Regex;

const EARLIEST_YEAR: i32 = 1900;
const LATEST_YEAR: i32 = 2100;

static YEAR_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?xi)
        (?:
            (?:\bfrom\s+)?\b(?P<start>\d{4})\s+(?:to|until|till|through)\s+
                (?P<end>\d{4}|present|current|now|today)\b
        |
            \b(?P<dash_start>\d{4})\s*[-–—]\s*
                (?P<dash_end>\d{4}|present|current|now|today)\b
        )",
    )
    .expect("valid year range regex")
});

/// One employment stint's year range. `end` is already resolved for open-ended ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
    pub ongoing: bool,
}

impl YearRange {
    /// Whole years covered. Reversed ranges count as zero.
    pub fn years(&self) -> u32 {
        u32::try_from(self.end - self.start).unwrap_or(0)
    }
}

/// Every plausible year range in `text`, open-ended ranges ending this calendar year.
pub fn extract_date_ranges(text: &str) -> Vec<YearRange> {
    extract_date_ranges_as_of(text, Utc::now().year())
}

/// `extract_date_ranges` with an explicit value for "present".
pub fn extract_date_ranges_as_of(text: &str, current_year: i32) -> Vec<YearRange> {
    YEAR_RANGE
        .captures_iter(text)
        .filter_map(|caps| {
            let start = caps.name("start").or_else(|| caps.name("dash_start"))?;
            let end = caps.name("end").or_else(|| caps.name("dash_end"))?;

            let start = parse_year(start.as_str())?;
            let (end, ongoing) = match parse_year(end.as_str()) {
                Some(year) => (year, false),
                None if end.as_str().chars().all(|c| c.is_ascii_digit()) => return None,
                None => (current_year, true),
            };

            Some(YearRange { start, end, ongoing })
        })
        .collect()
}

/// Sum of all range durations in `text`; 0 when no range is found.
pub fn total_experience_years(text: &str) -> u32 {
    extract_date_ranges(text).iter().map(YearRange::years).sum()
}

/// Human-readable experience total, e.g. "5 years". Never fails: no range yields "0 years".
pub fn get_experience_years(text: &str) -> String {
    format_years(total_experience_years(text))
}

pub fn format_years(years: u32) -> String {
    if years == 1 {
        "1 year".to_string()
    } else {
        format!("{years} years")
    }
}

fn parse_year(raw: &str) -> Option<i32> {
    raw.parse::<i32>()
        .ok()
        .filter(|y| (EARLIEST_YEAR..=LATEST_YEAR).contains(y))
}
