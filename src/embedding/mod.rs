//! Embedding client abstraction and the Ollama-backed adapter.
//!
//! An embedding backend is optional: the provider is selected once at startup from
//! configuration and never re-probed per request. Every call carries an explicit
//! timeout so an unreachable runtime degrades to the keyword fallback instead of
//! hanging the request.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::config::{get_config, EmbeddingProvider};

const DEFAULT_OLLAMA_URL: &str = "http://127.0.0.1:11434";

/// Errors raised by embedding providers.
#[derive(Debug, Error)]
pub enum EmbeddingClientError {
    /// Provider did not respond within the configured timeout.
    #[error("Embedding backend unavailable: {0}")]
    BackendUnavailable(String),
    /// Provider was unable to produce embeddings for the supplied input.
    #[error("Failed to generate embeddings: {0}")]
    GenerationFailed(String),
    /// Provider response could not be parsed.
    #[error("Malformed embedding response: {0}")]
    InvalidResponse(String),
}

/// Interface implemented by embedding backends.
#[async_trait]
pub trait EmbeddingClient: Send + Sync {
    /// Produce an embedding vector for each supplied text.
    async fn generate_embeddings(
        &self,
        texts: &[String],
    ) -> Result<Vec<Vec<f32>>, EmbeddingClientError>;
}

/// Embedding adapter for a local Ollama runtime.
pub struct OllamaEmbeddingClient {
    client: Client,
    base_url: String,
    model: String,
    timeout: Duration,
}

#[derive(Deserialize)]
struct OllamaEmbeddingResponse {
    embedding: Vec<f32>,
}

impl OllamaEmbeddingClient {
    /// Construct a client against the given runtime URL and model.
    pub fn new(base_url: String, model: String, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            timeout,
        }
    }

    async fn embed_one(&self, text: &str) -> Result<Vec<f32>, EmbeddingClientError> {
        let url = format!("{}/api/embeddings", self.base_url);
        let request = self
            .client
            .post(&url)
            .json(&json!({ "model": self.model, "prompt": text }))
            .timeout(self.timeout)
            .send();

        let response = match tokio::time::timeout(self.timeout, request).await {
            Err(_) => {
                return Err(EmbeddingClientError::BackendUnavailable(format!(
                    "no response from {url} within {:?}",
                    self.timeout
                )))
            }
            Ok(Err(err)) => return Err(EmbeddingClientError::BackendUnavailable(err.to_string())),
            Ok(Ok(response)) => response,
        };

        if !response.status().is_success() {
            return Err(EmbeddingClientError::GenerationFailed(format!(
                "status {} from {url}",
                response.status()
            )));
        }

        let body: OllamaEmbeddingResponse = response
            .json()
            .await
            .map_err(|err| EmbeddingClientError::InvalidResponse(err.to_string()))?;
        Ok(body.embedding)
    }
}

#[async_trait]
impl EmbeddingClient for OllamaEmbeddingClient {
    async fn generate_embeddings(
        &self,
        texts: &[String],
    ) -> Result<Vec<Vec<f32>>, EmbeddingClientError> {
        tracing::debug!(model = %self.model, count = texts.len(), "Generating embeddings");
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed_one(text).await?);
        }
        Ok(vectors)
    }
}

/// Build an embedding client based on configuration, or `None` in fallback mode.
pub fn get_embedding_client() -> Option<Box<dyn EmbeddingClient + Send + Sync>> {
    let config = get_config();
    match config.embedding_provider {
        EmbeddingProvider::None => None,
        EmbeddingProvider::Ollama => {
            let base_url = config
                .ollama_url
                .clone()
                .unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string());
            Some(Box::new(OllamaEmbeddingClient::new(
                base_url,
                config.embedding_model.clone(),
                Duration::from_secs(config.backend_timeout_secs),
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method::POST, MockServer};

    #[tokio::test]
    async fn embeds_each_text_in_order() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/embeddings");
                then.status(200)
                    .json_body(serde_json::json!({ "embedding": [0.1, 0.2] }));
            })
            .await;

        let client = OllamaEmbeddingClient::new(
            server.base_url(),
            "nomic-embed-text".into(),
            Duration::from_secs(2),
        );
        let vectors = client
            .generate_embeddings(&["one".into(), "two".into()])
            .await
            .unwrap();

        assert_eq!(vectors.len(), 2);
        assert_eq!(vectors[0], vec![0.1, 0.2]);
        mock.assert_hits_async(2).await;
    }

    #[tokio::test]
    async fn error_status_is_generation_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/embeddings");
                then.status(500);
            })
            .await;

        let client = OllamaEmbeddingClient::new(
            server.base_url(),
            "nomic-embed-text".into(),
            Duration::from_secs(2),
        );
        let error = client
            .generate_embeddings(&["one".into()])
            .await
            .unwrap_err();
        assert!(matches!(error, EmbeddingClientError::GenerationFailed(_)));
    }

    #[tokio::test]
    async fn unreachable_backend_is_unavailable() {
        // Port 9 (discard) is never serving Ollama.
        let client = OllamaEmbeddingClient::new(
            "http://127.0.0.1:9".into(),
            "nomic-embed-text".into(),
            Duration::from_millis(200),
        );
        let error = client
            .generate_embeddings(&["one".into()])
            .await
            .unwrap_err();
        assert!(matches!(error, EmbeddingClientError::BackendUnavailable(_)));
    }
}
