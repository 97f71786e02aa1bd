//! Action-verb counting: tallies accomplishment verbs ("Developed", "Led", …) in free text.

use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

/// Verb → occurrence count. Keys are lower-case; verbs that never occur are absent.
pub type ActionVerbCounts = BTreeMap<String, u32>;

/// Built-in vocabulary of accomplishment-oriented verbs, lower-case, past tense.
pub const ACTION_VERBS: &[&str] = &[
    "accelerated",
    "achieved",
    "analyzed",
    "architected",
    "automated",
    "built",
    "coached",
    "collaborated",
    "contributed",
    "coordinated",
    "created",
    "delivered",
    "deployed",
    "designed",
    "developed",
    "directed",
    "drove",
    "engineered",
    "established",
    "evaluated",
    "executed",
    "expanded",
    "facilitated",
    "founded",
    "generated",
    "grew",
    "improved",
    "increased",
    "initiated",
    "implemented",
    "integrated",
    "investigated",
    "launched",
    "led",
    "managed",
    "mentored",
    "migrated",
    "modernized",
    "negotiated",
    "optimized",
    "orchestrated",
    "organized",
    "owned",
    "pioneered",
    "produced",
    "programmed",
    "published",
    "redesigned",
    "reduced",
    "refactored",
    "resolved",
    "scaled",
    "shipped",
    "spearheaded",
    "streamlined",
    "supervised",
    "trained",
    "transformed",
    "wrote",
];

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]+(?:['-][A-Za-z]+)*").expect("valid word regex"));

/// Counts built-in action verbs in `text`, case-insensitively, whole words only.
pub fn count_action_verbs(text: &str) -> ActionVerbCounts {
    count_action_verbs_with(text, ACTION_VERBS)
}

/// Counts occurrences of a caller-supplied vocabulary. Vocabulary entries are case-folded.
pub fn count_action_verbs_with<S: AsRef<str>>(text: &str, vocabulary: &[S]) -> ActionVerbCounts {
    let vocabulary: HashSet<String> = vocabulary
        .iter()
        .map(|v| v.as_ref().trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect();

    let mut counts = ActionVerbCounts::new();
    if vocabulary.is_empty() {
        return counts;
    }

    for word in WORD.find_iter(text) {
        let word = word.as_str().to_lowercase();
        if vocabulary.contains(&word) {
            *counts.entry(word).or_insert(0) += 1;
        }
    }

    counts
}
