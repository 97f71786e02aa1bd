//! HTTP embeddings backend: OpenAI-compatible `/v1/embeddings` endpoints.
//!
//! Both texts go out in one batch request; the score is the cosine similarity of the two
//! returned vectors.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::similarity::{cosine_similarity, ModelError, SimilarityModel};

const MAX_RETRIES: u32 = 3;

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [&'a str],
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    #[serde(default)]
    index: usize,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    total_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Embeddings client with retry on 429 and 5xx responses.
#[derive(Clone)]
pub struct HttpEmbeddingModel {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl HttpEmbeddingModel {
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ModelError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ModelError::NotConfigured(
                "embeddings API key must not be empty".to_string(),
            ));
        }

        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_url: api_url.into(),
            api_key,
            model: model.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ModelError> {
        let api_key = config.similarity_api_key.clone().ok_or_else(|| {
            ModelError::NotConfigured("SIMILARITY_API_KEY is not set".to_string())
        })?;

        Self::new(
            config.similarity_api_url.clone(),
            api_key,
            config.similarity_model.clone(),
            Duration::from_secs(config.similarity_timeout_secs),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Embeds a batch of texts, returning vectors in input order.
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff.
    pub async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, ModelError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let request_body = EmbeddingRequest {
            model: &self.model,
            input: texts,
        };

        let mut last_error: Option<ModelError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Embedding call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&self.api_url)
                .bearer_auth(&self.api_key)
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(ModelError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Embeddings API returned {}: {}", status, body);
                last_error = Some(ModelError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(ModelError::Api {
                    status: status.as_u16(),
                    message: api_error_message(body),
                });
            }

            let body = response.text().await?;
            let parsed: EmbeddingResponse = serde_json::from_str(&body)?;

            if let Some(usage) = &parsed.usage {
                debug!(
                    "Embedding call succeeded: prompt_tokens={}, total_tokens={}",
                    usage.prompt_tokens, usage.total_tokens
                );
            }

            return ordered_embeddings(parsed, texts.len());
        }

        Err(last_error.unwrap_or(ModelError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

#[async_trait]
impl SimilarityModel for HttpEmbeddingModel {
    async fn embed_and_compare(&self, text_a: &str, text_b: &str) -> Result<f32, ModelError> {
        let embeddings = self.embed_batch(&[text_a, text_b]).await?;
        match embeddings.as_slice() {
            [a, b] => cosine_similarity(a, b),
            _ => Err(ModelError::EmptyResponse),
        }
    }

    fn backend(&self) -> &str {
        "http"
    }
}

/// Puts embeddings back in request order; the API may return them shuffled.
fn ordered_embeddings(
    response: EmbeddingResponse,
    expected: usize,
) -> Result<Vec<Vec<f32>>, ModelError> {
    let mut data = response.data;
    if data.len() != expected {
        return Err(ModelError::EmptyResponse);
    }
    data.sort_by_key(|d| d.index);
    Ok(data.into_iter().map(|d| d.embedding).collect())
}

/// Pulls `error.message` out of an API error body, falling back to the raw body.
fn api_error_message(body: String) -> String {
    serde_json::from_str::<ApiError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// One-shot HTTP server answering every request with `status` and `body`.
    async fn serve(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                tokio::spawn(async move {
                    read_request(&mut socket).await;
                    let response = format!(
                        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        format!("http://{addr}/v1/embeddings")
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap_or(0);
            if n == 0 {
                return;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    return;
                }
            }
        }
    }

    fn model(url: String) -> HttpEmbeddingModel {
        HttpEmbeddingModel::new(url, "test-key", "test-model", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_empty_api_key_is_not_configured() {
        let err = HttpEmbeddingModel::new("http://localhost", " ", "m", Duration::from_secs(1))
            .err()
            .unwrap();
        assert!(matches!(err, ModelError::NotConfigured(_)));
    }

    #[test]
    fn test_from_config_uses_configured_model() {
        let config = Config {
            similarity_api_key: Some("sk-test".to_string()),
            similarity_model: "text-embedding-3-large".to_string(),
            ..Config::default()
        };
        let model = HttpEmbeddingModel::from_config(&config).unwrap();
        assert_eq!(model.model(), "text-embedding-3-large");
        assert_eq!(model.backend(), "http");
    }

    #[test]
    fn test_ordered_embeddings_restores_input_order() {
        let response: EmbeddingResponse = serde_json::from_str(
            r#"{"data": [
                {"embedding": [0.0, 1.0], "index": 1},
                {"embedding": [1.0, 0.0], "index": 0}
            ]}"#,
        )
        .unwrap();
        let ordered = ordered_embeddings(response, 2).unwrap();
        assert_eq!(ordered, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    }

    #[test]
    fn test_ordered_embeddings_rejects_short_response() {
        let response: EmbeddingResponse =
            serde_json::from_str(r#"{"data": [{"embedding": [1.0], "index": 0}]}"#).unwrap();
        assert!(matches!(
            ordered_embeddings(response, 2),
            Err(ModelError::EmptyResponse)
        ));
    }

    #[test]
    fn test_api_error_message_extraction() {
        let body = r#"{"error": {"message": "Invalid API key"}}"#.to_string();
        assert_eq!(api_error_message(body), "Invalid API key");
        assert_eq!(api_error_message("plain text".to_string()), "plain text");
    }

    #[tokio::test]
    async fn test_embed_and_compare_against_live_endpoint() {
        let url = serve(
            "200 OK",
            r#"{"data": [
                {"embedding": [0.6, 0.8], "index": 0},
                {"embedding": [0.6, 0.8], "index": 1}
            ], "usage": {"prompt_tokens": 12, "total_tokens": 12}}"#,
        )
        .await;

        let score = model(url)
            .embed_and_compare("Rust engineer", "Looking for a Rust engineer")
            .await
            .unwrap();
        assert!((score - 1.0).abs() < 1e-6, "score was {score}");
    }

    #[tokio::test]
    async fn test_client_error_fails_fast_with_api_message() {
        let url = serve(
            "401 Unauthorized",
            r#"{"error": {"message": "Incorrect API key provided"}}"#,
        )
        .await;

        let err = model(url).embed_batch(&["a", "b"]).await.unwrap_err();
        match err {
            ModelError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Incorrect API key provided");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_batch_makes_no_request() {
        let model = model("http://127.0.0.1:9/unused".to_string());
        assert!(model.embed_batch(&[]).await.unwrap().is_empty());
    }
}
