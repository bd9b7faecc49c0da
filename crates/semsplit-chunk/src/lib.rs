//! semsplit-chunk - Semantic document splitting
//!
//! Groups a document's sentences into contiguous chunks, starting a new
//! chunk where the embedding similarity of neighbouring sentences drops
//! below a threshold or where the chunk would outgrow its size limit.
//!
//! # Pipeline
//!
//! text → [`split_sentences`] → one [`Embedder::embed_all`] batch →
//! [`cosine_similarity`] per neighbour pair → [`assemble`] → chunks.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use semsplit_chunk::{DocumentSplitter, SemanticSplitter, SplitterConfig};
//! use semsplit_core::Document;
//!
//! let splitter = SemanticSplitter::new(Arc::new(embedder), SplitterConfig::new(0.75, 100, 300))?;
//! let chunks = splitter.split(&Document::new("Hello world. This is great!")).await?;
//! ```

mod assembler;
mod semantic;
mod sentence;
mod similarity;

pub use assembler::{assemble, SplitReason};
pub use semantic::{SemanticSplitter, SemanticSplitterBuilder};
pub use sentence::{is_terminator, split_sentences};
pub use similarity::{adjacent_similarities, cosine_similarity};

// Re-export types for convenience
pub use semsplit_core::{Document, DocumentSplitter, Embedder, SplitterConfig, TextSegment};
