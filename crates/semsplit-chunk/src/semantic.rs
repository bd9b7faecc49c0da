//! Semantic splitter: tokenizes, embeds once per document, assembles chunks.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use semsplit_core::{
    Document, DocumentSplitter, Embedder, Result, SplitterConfig, SplitterError, TextSegment,
};

use crate::assembler::assemble;
use crate::sentence::split_sentences;

/// Splits documents where neighbouring sentences stop being similar.
///
/// The configuration is validated on construction and never changes
/// afterwards. Each call to [`split`](DocumentSplitter::split) issues at
/// most one batch request to the embedder.
pub struct SemanticSplitter<E: ?Sized> {
    /// Embedding provider.
    embedder: Arc<E>,

    /// Validated configuration.
    config: SplitterConfig,
}

impl<E: Embedder + ?Sized> SemanticSplitter<E> {
    /// Create a splitter, rejecting an invalid configuration.
    pub fn new(embedder: Arc<E>, config: SplitterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { embedder, config })
    }

    /// Create a splitter with the default configuration (0.75, 100, 300).
    pub fn with_defaults(embedder: Arc<E>) -> Self {
        Self {
            embedder,
            config: SplitterConfig::default(),
        }
    }

    /// Start building a splitter.
    pub fn builder() -> SemanticSplitterBuilder<E> {
        SemanticSplitterBuilder::new()
    }

    pub fn config(&self) -> &SplitterConfig {
        &self.config
    }
}

#[async_trait]
impl<E: Embedder + ?Sized> DocumentSplitter for SemanticSplitter<E> {
    async fn split(&self, document: &Document) -> Result<Vec<TextSegment>> {
        let sentences = split_sentences(&document.text);

        // Nothing to compare: skip the embedder.
        match sentences.len() {
            0 => return Ok(Vec::new()),
            1 => {
                return Ok(vec![TextSegment::new(
                    document.text.trim(),
                    document.metadata.clone(),
                )])
            }
            _ => {}
        }

        let texts: Vec<&str> = sentences.iter().map(|s| s.text.as_str()).collect();
        let embeddings = self.embedder.embed_all(&texts).await?;

        debug!(
            "Embedded {} sentences with {} (dim={})",
            embeddings.len(),
            self.embedder.model_name(),
            embeddings.first().map(Vec::len).unwrap_or(0)
        );

        let segments = assemble(&sentences, &embeddings, &self.config, &document.metadata)?;

        debug!(
            "Split {} sentences into {} chunks",
            sentences.len(),
            segments.len()
        );

        Ok(segments)
    }
}

/// Builder for [`SemanticSplitter`].
pub struct SemanticSplitterBuilder<E: ?Sized> {
    embedder: Option<Arc<E>>,
    config: SplitterConfig,
}

impl<E: Embedder + ?Sized> SemanticSplitterBuilder<E> {
    fn new() -> Self {
        Self {
            embedder: None,
            config: SplitterConfig::default(),
        }
    }

    /// Set the embedding provider (required).
    pub fn embedder(mut self, embedder: Arc<E>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: SplitterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn similarity_threshold(mut self, threshold: f64) -> Self {
        self.config.similarity_threshold = threshold;
        self
    }

    pub fn min_chunk_chars(mut self, min: usize) -> Self {
        self.config.min_chunk_chars = min;
        self
    }

    pub fn max_chunk_chars(mut self, max: usize) -> Self {
        self.config.max_chunk_chars = max;
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<SemanticSplitter<E>> {
        let embedder = self
            .embedder
            .ok_or_else(|| SplitterError::invalid_configuration("embedder must be set"))?;
        SemanticSplitter::new(embedder, self.config)
    }
}
