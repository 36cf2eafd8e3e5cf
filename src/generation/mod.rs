//! Generative text client abstraction and the Ollama-backed adapter.
//!
//! Mirrors the embedding adapter: the provider is chosen once at startup, every call
//! is bounded by a timeout, and any failure is recovered by the caller through the
//! extractive heuristics rather than failing the request.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::config::{get_config, GenerationProvider};
use crate::processing::summarize::SummaryStyle;
use crate::processing::types::Segment;

const DEFAULT_OLLAMA_URL: &str = "http://127.0.0.1:11434";

/// Errors surfaced by generative backends.
#[derive(Debug, Error)]
pub enum GenerationClientError {
    /// Provider did not respond within the configured timeout.
    #[error("Generation backend unavailable: {0}")]
    BackendUnavailable(String),
    /// Provider returned an error response.
    #[error("Failed to generate text: {0}")]
    GenerationFailed(String),
    /// Provider response could not be parsed.
    #[error("Malformed generation response: {0}")]
    InvalidResponse(String),
}

/// Interface implemented by generative backends.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Generate free text for the assembled prompt.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationClientError>;
}

/// Generation adapter for a local Ollama runtime.
pub struct OllamaGenerationClient {
    client: Client,
    base_url: String,
    model: String,
    timeout: Duration,
}

#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

impl OllamaGenerationClient {
    /// Construct a client against the given runtime URL and model.
    pub fn new(base_url: String, model: String, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            timeout,
        }
    }
}

#[async_trait]
impl GenerationClient for OllamaGenerationClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationClientError> {
        let url = format!("{}/api/generate", self.base_url);
        let request = self
            .client
            .post(&url)
            .json(&json!({
                "model": self.model,
                "prompt": prompt,
                "stream": false,
                "options": { "temperature": 0.1 }
            }))
            .timeout(self.timeout)
            .send();

        let response = match tokio::time::timeout(self.timeout, request).await {
            Err(_) => {
                return Err(GenerationClientError::BackendUnavailable(format!(
                    "no response from {url} within {:?}",
                    self.timeout
                )))
            }
            Ok(Err(err)) => return Err(GenerationClientError::BackendUnavailable(err.to_string())),
            Ok(Ok(response)) => response,
        };

        if !response.status().is_success() {
            return Err(GenerationClientError::GenerationFailed(format!(
                "status {} from {url}",
                response.status()
            )));
        }

        let body: OllamaGenerateResponse = response
            .json()
            .await
            .map_err(|err| GenerationClientError::InvalidResponse(err.to_string()))?;
        Ok(body.response.trim().to_string())
    }
}

/// Build a generation client based on configuration, or `None` in fallback mode.
pub fn get_generation_client() -> Option<Box<dyn GenerationClient + Send + Sync>> {
    let config = get_config();
    match config.generation_provider {
        GenerationProvider::None => None,
        GenerationProvider::Ollama => {
            let base_url = config
                .ollama_url
                .clone()
                .unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string());
            Some(Box::new(OllamaGenerationClient::new(
                base_url,
                config.generation_model.clone(),
                Duration::from_secs(config.backend_timeout_secs),
            )))
        }
    }
}

/// Assemble the question-answering prompt from retrieved segments.
pub fn answer_prompt(question: &str, segments: &[Segment]) -> String {
    let context = segments
        .iter()
        .map(|segment| segment.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");
    format!(
        "Answer the question using only the context below.\n\nContext:\n{context}\n\nQuestion: {question}\n\nAnswer:"
    )
}

/// Assemble the summarization prompt for the requested style.
pub fn summary_prompt(text: &str, style: SummaryStyle) -> String {
    let instruction = match style {
        SummaryStyle::Concise => "Write a concise summary of the following text.",
        SummaryStyle::Detailed => "Write a detailed summary of the following text.",
        SummaryStyle::BulletPoints => {
            "Summarize the following text as a short list of bullet points."
        }
    };
    format!("{instruction}\n\n{text}\n\nSummary:")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::types::SegmentSource;
    use httpmock::{Method::POST, MockServer};

    #[tokio::test]
    async fn generates_text_from_prompt() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/generate");
                then.status(200)
                    .json_body(serde_json::json!({ "response": " The answer. " }));
            })
            .await;

        let client = OllamaGenerationClient::new(
            server.base_url(),
            "llama2".into(),
            Duration::from_secs(2),
        );
        let text = client.generate("prompt").await.unwrap();
        assert_eq!(text, "The answer.");
    }

    #[tokio::test]
    async fn unreachable_backend_is_unavailable() {
        let client = OllamaGenerationClient::new(
            "http://127.0.0.1:9".into(),
            "llama2".into(),
            Duration::from_millis(200),
        );
        let error = client.generate("prompt").await.unwrap_err();
        assert!(matches!(error, GenerationClientError::BackendUnavailable(_)));
    }

    #[test]
    fn answer_prompt_includes_context_and_question() {
        let segments = vec![Segment {
            text: "context text".into(),
            source: SegmentSource::PlainText,
            position: 1,
        }];
        let prompt = answer_prompt("what is it?", &segments);
        assert!(prompt.contains("context text"));
        assert!(prompt.contains("what is it?"));
    }
}
