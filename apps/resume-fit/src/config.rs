use anyhow::{bail, Context, Result};

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/embeddings";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Which similarity backend `build_model` constructs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimilarityBackend {
    Http,
    Lexical,
}

/// Library configuration loaded from environment variables.
/// Every variable has a default; only malformed values are rejected.
#[derive(Debug, Clone)]
pub struct Config {
    pub similarity_backend: SimilarityBackend,
    pub similarity_api_url: String,
    pub similarity_api_key: Option<String>,
    pub similarity_model: String,
    pub similarity_timeout_secs: u64,
    pub keyword_weight: f64,
    pub semantic_weight: f64,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            similarity_backend: SimilarityBackend::Http,
            similarity_api_url: DEFAULT_API_URL.to_string(),
            similarity_api_key: None,
            similarity_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            similarity_timeout_secs: 30,
            keyword_weight: 0.5,
            semantic_weight: 0.5,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. `from_env` passes the process environment.
    pub fn from_source<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let similarity_backend = match lookup("SIMILARITY_BACKEND") {
            Some(raw) => parse_backend(&raw)?,
            None => defaults.similarity_backend,
        };

        Ok(Config {
            similarity_backend,
            similarity_api_url: lookup("SIMILARITY_API_URL")
                .unwrap_or(defaults.similarity_api_url),
            similarity_api_key: lookup("SIMILARITY_API_KEY").filter(|k| !k.trim().is_empty()),
            similarity_model: lookup("SIMILARITY_MODEL").unwrap_or(defaults.similarity_model),
            similarity_timeout_secs: parse_or(
                &lookup,
                "SIMILARITY_TIMEOUT_SECS",
                defaults.similarity_timeout_secs,
            )?,
            keyword_weight: parse_or(&lookup, "KEYWORD_WEIGHT", defaults.keyword_weight)?,
            semantic_weight: parse_or(&lookup, "SEMANTIC_WEIGHT", defaults.semantic_weight)?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }
}

fn parse_backend(raw: &str) -> Result<SimilarityBackend> {
    match raw.trim().to_lowercase().as_str() {
        "" | "http" => Ok(SimilarityBackend::Http),
        "lexical" => Ok(SimilarityBackend::Lexical),
        other => bail!("Unknown SIMILARITY_BACKEND '{other}' (expected 'http' or 'lexical')"),
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: '{raw}'")),
        None => Ok(default),
    }
}
