//! Company name extraction: the capitalized phrase after "at" in an experience line.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::extract::action_verbs::ACTION_VERBS;

/// "at" followed by capitalized words. Lower-case words ("as", "from", "to", …) end the
/// capture; "&", "and", "of" may join capitalized words ("Procter & Gamble").
static AT_COMPANY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?i:at)\s+(?P<name>[A-Z0-9][\w.&'-]*(?:[ \t]+(?:&|and|of|[A-Z0-9][\w.&'-]*))*)",
    )
    .expect("valid company regex")
});

const CONNECTORS: &[&str] = &["&", "and", "of"];

/// Employer names found in `text`, casing preserved, duplicates collapsed.
pub fn get_company_names(text: &str) -> BTreeSet<String> {
    AT_COMPANY
        .captures_iter(text)
        .filter_map(|caps| caps.name("name"))
        .filter_map(|m| clean_name(m.as_str()))
        .collect()
}

/// A word that cannot continue a company name: a year, the pronoun "I", or an action
/// verb opening the next clause ("At Google I Led ...", "at Google 2018 - 2023").
fn ends_name(word: &str) -> bool {
    let year_like = word.len() == 4 && word.chars().all(|c| c.is_ascii_digit());
    year_like || word == "I" || ACTION_VERBS.contains(&word.to_lowercase().as_str())
}

fn clean_name(raw: &str) -> Option<String> {
    let mut words: Vec<&str> = raw.split_whitespace().collect();
    if let Some(stop) = words.iter().skip(1).position(|w| ends_name(w)) {
        words.truncate(stop + 1);
    }

    while let Some(last) = words.last() {
        if CONNECTORS.contains(last) {
            words.pop();
        } else {
            break;
        }
    }

    let name = words
        .join(" ")
        .trim_end_matches(|c: char| matches!(c, '.' | ',' | '\'' | '-'))
        .to_string();

    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_company() {
        let companies =
            get_company_names("Worked at Google as a Software Engineer from 2018 to 2023");
        assert!(companies.contains("Google"));
        assert_eq!(companies.len(), 1);
    }

    #[test]
    fn test_multiple_companies() {
        let text = "- Worked at Google as a Software Engineer from 2018 to 2023\n\
                    - Previously at Microsoft as a Data Analyst from 2015 to 2018";
        let companies = get_company_names(text);
        assert_eq!(
            companies.into_iter().collect::<Vec<_>>(),
            vec!["Google".to_string(), "Microsoft".to_string()]
        );
    }

    #[test]
    fn test_multi_word_names_and_connectors() {
        let companies = get_company_names(
            "Analyst at Goldman Sachs from 2015 to 2017, then at Procter & Gamble as a PM",
        );
        assert!(companies.contains("Goldman Sachs"));
        assert!(companies.contains("Procter & Gamble"));
    }

    #[test]
    fn test_stops_at_punctuation() {
        let companies = get_company_names("Interned at Netflix, then joined a startup.");
        assert!(companies.contains("Netflix"));
    }

    #[test]
    fn test_trailing_connector_is_dropped() {
        let companies = get_company_names("Consultant at Deloitte and later a founder");
        assert!(companies.contains("Deloitte"), "got {companies:?}");
    }

    #[test]
    fn test_duplicates_collapse() {
        let text = "Engineer at Amazon from 2015 to 2017. Senior Engineer at Amazon from 2017 to 2020.";
        assert_eq!(get_company_names(text).len(), 1);
    }

    #[test]
    fn test_lowercase_phrase_is_not_a_company() {
        assert!(get_company_names("Worked at a startup as a developer").is_empty());
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(get_company_names("Skills: Python, Rust").is_empty());
        assert!(get_company_names("").is_empty());
    }

    #[test]
    fn test_trailing_year_range_is_not_part_of_name() {
        let companies = get_company_names("Engineer at Google 2018 - 2023");
        assert_eq!(companies.into_iter().collect::<Vec<_>>(), vec!["Google".to_string()]);
    }

    #[test]
    fn test_next_clause_is_not_part_of_name() {
        let companies = get_company_names("At Google I Led a team of five engineers");
        assert_eq!(companies.into_iter().collect::<Vec<_>>(), vec!["Google".to_string()]);

        let companies = get_company_names("At Stripe Built the billing pipeline");
        assert!(companies.contains("Stripe"), "got {companies:?}");
    }

    #[test]
    fn test_capture_is_case_sensitive_for_names() {
        let companies = get_company_names("AT OpenAI as researcher");
        assert!(companies.contains("OpenAI"));
    }
}
