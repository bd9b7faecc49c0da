//! Ollama HTTP embedding provider.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use semsplit_core::{Embedder, EmbeddingConfig, Result, SplitterError};

/// Embedder backed by an Ollama server's `/api/embed` endpoint.
pub struct OllamaEmbedder {
    client: Client,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [&'a str],
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

impl OllamaEmbedder {
    /// Create an embedder for the given server and model.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SplitterError::embedding(format!("Failed to build HTTP client: {}", e)))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        let model = model.into();

        info!("Ollama embedder: url={}, model={}", base_url, model);

        Ok(Self {
            client,
            base_url,
            model,
        })
    }

    /// Create an embedder from configuration.
    pub fn from_config(config: &EmbeddingConfig) -> Result<Self> {
        Self::new(
            config.base_url.clone(),
            config.model.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn endpoint(&self) -> String {
        format!("{}/api/embed", self.base_url)
    }
}

/// Check the response against the request: same count, uniform dimension.
fn check_response(requested: usize, embeddings: &[Vec<f32>]) -> Result<()> {
    if embeddings.len() != requested {
        return Err(SplitterError::embedding(format!(
            "Expected {} embeddings, got {}",
            requested,
            embeddings.len()
        )));
    }
    if let Some(first) = embeddings.first() {
        if first.is_empty() {
            return Err(SplitterError::embedding("Empty embedding vector"));
        }
        if let Some(bad) = embeddings.iter().find(|e| e.len() != first.len()) {
            return Err(SplitterError::embedding(format!(
                "Inconsistent embedding dimensions: {} vs {}",
                first.len(),
                bad.len()
            )));
        }
    }
    Ok(())
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    async fn embed_all(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!("Embedding batch: size={}, model={}", texts.len(), self.model);

        let request = EmbedRequest {
            model: &self.model,
            input: texts,
        };

        let response = self
            .client
            .post(self.endpoint())
            .json(&request)
            .send()
            .await
            .map_err(|e| SplitterError::embedding(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SplitterError::embedding(format!("{}: {}", status, body)));
        }

        let parsed: EmbedResponse = response
            .json()
            .await
            .map_err(|e| SplitterError::embedding(format!("Malformed response: {}", e)))?;

        check_response(texts.len(), &parsed.embeddings)?;

        Ok(parsed.embeddings)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
