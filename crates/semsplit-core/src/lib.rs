//! semsplit-core - Core types and traits for the semantic splitter
//!
//! This crate provides the document model, the collaborator traits,
//! configuration and error handling shared by the other semsplit crates.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::*;
pub use error::{Result, SplitterError};
pub use traits::*;
pub use types::*;
