//! semsplit-embed - Embedding providers
//!
//! This crate provides implementations of the [`Embedder`] trait used by
//! the semantic splitter.
//!
//! # Providers
//!
//! - [`OllamaEmbedder`]: batch embeddings from a local Ollama server.
//! - [`MockEmbedder`]: deterministic vectors derived from the text, no model needed.
//! - [`StaticEmbedder`]: replays caller-supplied vectors, for exact test scenarios.

mod mock;
mod ollama;

pub use mock::{MockEmbedder, StaticEmbedder};
pub use ollama::OllamaEmbedder;

// Re-export the Embedder trait for convenience
pub use semsplit_core::Embedder;
