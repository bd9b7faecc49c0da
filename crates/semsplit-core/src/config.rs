//! Configuration types for the semantic splitter.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, SplitterError};

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Splitter configuration.
    #[serde(default)]
    pub splitter: SplitterConfig,

    /// Embedding provider configuration.
    #[serde(default)]
    pub embedding: EmbeddingConfig,
}

/// Semantic splitter configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitterConfig {
    /// Split where adjacent-sentence similarity drops below this value (0.0 to 1.0).
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,

    /// Semantic splits wait until the chunk holds at least this many characters.
    #[serde(default = "default_min_chunk_chars")]
    pub min_chunk_chars: usize,

    /// Chunks never grow past this many characters, except a lone oversized sentence.
    #[serde(default = "default_max_chunk_chars")]
    pub max_chunk_chars: usize,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.75,
            min_chunk_chars: 100,
            max_chunk_chars: 300,
        }
    }
}

impl SplitterConfig {
    /// Create a config from explicit values. Call [`validate`](Self::validate) before use.
    pub fn new(similarity_threshold: f64, min_chunk_chars: usize, max_chunk_chars: usize) -> Self {
        Self {
            similarity_threshold,
            min_chunk_chars,
            max_chunk_chars,
        }
    }

    /// Check the threshold range and the min/max ordering.
    pub fn validate(&self) -> Result<()> {
        // NaN fails the range check.
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(SplitterError::invalid_configuration(format!(
                "similarity_threshold must be between 0.0 and 1.0, got {}",
                self.similarity_threshold
            )));
        }
        if self.max_chunk_chars <= self.min_chunk_chars {
            return Err(SplitterError::invalid_configuration(format!(
                "max_chunk_chars ({}) must be > min_chunk_chars ({})",
                self.max_chunk_chars, self.min_chunk_chars
            )));
        }
        Ok(())
    }
}

/// Embedding provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Ollama server base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Embedding model name.
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: 60,
        }
    }
}

// Default value functions

fn default_similarity_threshold() -> f64 {
    0.75
}

fn default_min_chunk_chars() -> usize {
    100
}

fn default_max_chunk_chars() -> usize {
    300
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "nomic-embed-text".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl AppConfig {
    /// Load configuration from file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| SplitterError::config(format!("Failed to parse config: {}", e)))
    }

    /// Render configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| SplitterError::config(format!("Failed to render config: {}", e)))
    }

    /// Load configuration from default paths.
    pub fn load_default() -> Result<Self> {
        // Try user config first
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("semsplit").join("config.toml");
            if user_config.exists() {
                return Self::load(&user_config);
            }
        }

        // Try local config
        let local_config = PathBuf::from("semsplit.toml");
        if local_config.exists() {
            return Self::load(&local_config);
        }

        Ok(Self::default())
    }
}
