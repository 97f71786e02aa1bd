//! Text-extraction heuristics. Every function here is pure and deterministic.

pub mod action_verbs;
pub mod companies;
pub mod contact;
pub mod experience;
pub mod keywords;
pub mod sections;
