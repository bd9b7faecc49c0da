//! Embedders that need no model: hash-derived and replayed vectors.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use semsplit_core::{Embedder, Result, SplitterError};

/// A mock embedder for testing that doesn't require actual models.
pub struct MockEmbedder {
    dimension: usize,
}

impl MockEmbedder {
    /// Create a new mock embedder with default settings.
    pub fn new() -> Self {
        Self { dimension: 768 }
    }

    /// Create a mock embedder with a custom dimension.
    pub fn with_dimension(dimension: usize) -> Self {
        Self { dimension }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let hash = text.bytes().fold(0u64, |acc, b| acc.wrapping_add(b as u64));
        let mut embedding = vec![0.0f32; self.dimension];
        for (i, v) in embedding.iter_mut().enumerate() {
            *v = ((hash.wrapping_mul(i as u64 + 1)) as f32 % 1000.0) / 1000.0 - 0.5;
        }
        // L2 normalize
        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut embedding {
                *x /= norm;
            }
        }
        embedding
    }
}

impl Default for MockEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed_all(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|text| self.embed_one(text)).collect())
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

/// Replays a fixed list of vectors, one per requested text, in order.
///
/// Each batch call starts again from the first vector. Asking for more
/// texts than there are vectors is an embedding error, as is any call
/// after [`failing`](Self::failing).
pub struct StaticEmbedder {
    vectors: Vec<Vec<f32>>,
    failure: Option<String>,
    calls: AtomicUsize,
    requests: Mutex<Vec<Vec<String>>>,
}

impl StaticEmbedder {
    /// Create an embedder that returns `vectors`.
    pub fn new(vectors: Vec<Vec<f32>>) -> Self {
        Self {
            vectors,
            failure: None,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create an embedder whose every call fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new(Vec::new())
        }
    }

    /// Number of batch calls served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Texts received by each batch call, in call order.
    pub fn requests(&self) -> Vec<Vec<String>> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Embedder for StaticEmbedder {
    async fn embed_all(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(texts.iter().map(|t| t.to_string()).collect());
        }

        if let Some(message) = &self.failure {
            return Err(SplitterError::embedding(message.clone()));
        }
        if texts.len() > self.vectors.len() {
            return Err(SplitterError::embedding(format!(
                "Requested {} embeddings but only {} available",
                texts.len(),
                self.vectors.len()
            )));
        }

        Ok(self.vectors[..texts.len()].to_vec())
    }

    fn model_name(&self) -> &str {
        "static"
    }
}
