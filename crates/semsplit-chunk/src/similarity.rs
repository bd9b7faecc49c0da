//! Cosine similarity between embedding vectors.

use semsplit_core::{Result, SplitterError};

/// Cosine similarity of two equal-length vectors.
///
/// Accumulates in f64. A zero-magnitude vector has similarity 0.0 with
/// anything.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(SplitterError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    Ok(dot / (norm_a.sqrt() * norm_b.sqrt()))
}

/// Similarities between each vector and its successor (`n - 1` values).
pub fn adjacent_similarities(vectors: &[Vec<f32>]) -> Result<Vec<f64>> {
    vectors
        .windows(2)
        .map(|pair| cosine_similarity(&pair[0], &pair[1]))
        .collect()
}
