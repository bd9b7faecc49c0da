//! Core traits defining the interfaces between components.

use async_trait::async_trait;

use crate::error::{Result, SplitterError};
use crate::types::{Document, TextSegment};

/// Embedding provider trait.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a batch of texts.
    ///
    /// Returns one vector per input, in input order, all of the same dimension.
    async fn embed_all(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;

    /// Embed a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.embed_all(&[text])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| SplitterError::embedding("No embedding returned"))
    }

    /// Name of the model backing this provider.
    fn model_name(&self) -> &str;
}

/// Document splitting strategy trait.
#[async_trait]
pub trait DocumentSplitter: Send + Sync {
    /// Split one document into ordered chunks.
    async fn split(&self, document: &Document) -> Result<Vec<TextSegment>>;

    /// Split several documents, concatenating their chunks in order.
    ///
    /// Stops at the first failing document.
    async fn split_all(&self, documents: &[Document]) -> Result<Vec<TextSegment>> {
        let mut segments = Vec::new();
        for document in documents {
            segments.extend(self.split(document).await?);
        }
        Ok(segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Metadata;

    struct FixedEmbedder;

    #[async_trait]
    impl Embedder for FixedEmbedder {
        async fn embed_all(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|t| vec![t.len() as f32, 1.0]).collect())
        }

        fn model_name(&self) -> &str {
            "fixed"
        }
    }

    /// Splits on newlines; fails on documents containing "boom".
    struct LineSplitter;

    #[async_trait]
    impl DocumentSplitter for LineSplitter {
        async fn split(&self, document: &Document) -> Result<Vec<TextSegment>> {
            if document.text.contains("boom") {
                return Err(SplitterError::embedding("boom"));
            }
            Ok(document
                .text
                .lines()
                .map(|l| TextSegment::new(l, document.metadata.clone()))
                .collect())
        }
    }

    #[tokio::test]
    async fn test_embed_default_uses_batch() {
        let embedding = FixedEmbedder.embed("abc").await.unwrap();
        assert_eq!(embedding, vec![3.0, 1.0]);
    }

    #[tokio::test]
    async fn test_split_all_concatenates_in_order() {
        let docs = vec![
            Document::with_metadata("a\nb", Metadata::new().with("n", "1")),
            Document::with_metadata("c", Metadata::new().with("n", "2")),
        ];
        let segments = LineSplitter.split_all(&docs).await.unwrap();

        let texts: Vec<_> = segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
        assert_eq!(segments[2].metadata.get("n"), Some("2"));
    }

    #[tokio::test]
    async fn test_split_all_stops_on_failure() {
        let docs = vec![Document::new("ok"), Document::new("boom"), Document::new("never")];
        let err = LineSplitter.split_all(&docs).await.unwrap_err();
        assert_eq!(err.error_code(), "EMBEDDING_ERROR");
    }
}
