use serde::Deserialize;
use std::env;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Runtime configuration for the docbrain server.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Optional override for the HTTP server port.
    pub server_port: Option<u16>,
    /// Character window used when chunking extracted text.
    pub chunk_size: usize,
    /// Character overlap carried between consecutive chunks.
    pub chunk_overlap: usize,
    /// Embedding backend selected at startup.
    pub embedding_provider: EmbeddingProvider,
    /// Embedding model identifier passed to the provider.
    pub embedding_model: String,
    /// Generative backend selected at startup.
    pub generation_provider: GenerationProvider,
    /// Generation model identifier passed to the provider.
    pub generation_model: String,
    /// Base URL of the local Ollama runtime, when one is used.
    pub ollama_url: Option<String>,
    /// Timeout in seconds applied to every optional backend call.
    pub backend_timeout_secs: u64,
    /// Default number of segments returned by `/qa/ask` when unspecified.
    pub qa_default_max_results: usize,
}

/// Supported embedding backends.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProvider {
    /// No embedding backend; retrieval uses keyword overlap.
    None,
    /// Local Ollama runtime.
    Ollama,
}

/// Supported generative backends.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GenerationProvider {
    /// No generative backend; answers and summaries use the extractive heuristics.
    None,
    /// Local Ollama runtime.
    Ollama,
}

const DEFAULT_CHUNK_SIZE: usize = 1000;
const DEFAULT_CHUNK_OVERLAP: usize = 200;
const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_RESULTS: usize = 3;

impl Config {
    /// Load configuration from environment variables, performing validation along the way.
    ///
    /// Every variable is optional; an empty environment yields a pure-fallback
    /// configuration with no external backends.
    pub fn from_env() -> Result<Self, ConfigError> {
        let chunk_size = parse_optional("CHUNK_SIZE")?.unwrap_or(DEFAULT_CHUNK_SIZE);
        let chunk_overlap = parse_optional("CHUNK_OVERLAP")?.unwrap_or(DEFAULT_CHUNK_OVERLAP);
        if chunk_size == 0 || chunk_overlap >= chunk_size {
            return Err(ConfigError::InvalidValue(
                "CHUNK_OVERLAP must be smaller than CHUNK_SIZE".into(),
            ));
        }

        Ok(Self {
            server_port: parse_optional("SERVER_PORT")?,
            chunk_size,
            chunk_overlap,
            embedding_provider: load_env_optional("EMBEDDING_PROVIDER")
                .map(|value| {
                    value
                        .parse()
                        .map_err(|()| ConfigError::InvalidValue("EMBEDDING_PROVIDER".into()))
                })
                .transpose()?
                .unwrap_or(EmbeddingProvider::None),
            embedding_model: load_env_optional("EMBEDDING_MODEL")
                .unwrap_or_else(|| "nomic-embed-text".to_string()),
            generation_provider: load_env_optional("GENERATION_PROVIDER")
                .map(|value| {
                    value
                        .parse()
                        .map_err(|()| ConfigError::InvalidValue("GENERATION_PROVIDER".into()))
                })
                .transpose()?
                .unwrap_or(GenerationProvider::None),
            generation_model: load_env_optional("GENERATION_MODEL")
                .unwrap_or_else(|| "llama2".to_string()),
            ollama_url: load_env_optional("OLLAMA_URL"),
            backend_timeout_secs: parse_optional("BACKEND_TIMEOUT_SECS")?
                .unwrap_or(DEFAULT_BACKEND_TIMEOUT_SECS),
            qa_default_max_results: parse_optional("QA_DEFAULT_MAX_RESULTS")?
                .unwrap_or(DEFAULT_MAX_RESULTS),
        })
    }
}

fn load_env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_optional<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    load_env_optional(key)
        .map(|value| {
            value
                .parse()
                .map_err(|_| ConfigError::InvalidValue(key.to_string()))
        })
        .transpose()
}

impl std::str::FromStr for EmbeddingProvider {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "ollama" => Ok(Self::Ollama),
            _ => Err(()),
        }
    }
}

impl std::str::FromStr for GenerationProvider {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "ollama" => Ok(Self::Ollama),
            _ => Err(()),
        }
    }
}

/// Global configuration cache populated during process start.
pub static CONFIG: OnceLock<Config> = OnceLock::new();

/// Retrieve the loaded configuration, panicking if initialization has not occurred.
pub fn get_config() -> &'static Config {
    CONFIG.get().expect("Config not initialized")
}

/// Load configuration from the environment and install it in the global cache.
pub fn init_config() {
    dotenvy::dotenv().ok();
    let config = Config::from_env().expect("Failed to load config from environment");
    tracing::debug!(
        server_port = ?config.server_port,
        chunk_size = config.chunk_size,
        chunk_overlap = config.chunk_overlap,
        embedding_provider = ?config.embedding_provider,
        generation_provider = ?config.generation_provider,
        "Loaded configuration"
    );
    CONFIG.set(config).expect("Failed to set config");
}
