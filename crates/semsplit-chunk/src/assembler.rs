//! Chunk assembly: one left-to-right pass over sentences and their embeddings.

use tracing::trace;

use semsplit_core::{Metadata, Result, Sentence, SplitterConfig, SplitterError, TextSegment};

use crate::similarity::cosine_similarity;

/// Why a chunk was closed before a sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitReason {
    /// Similarity to the previous sentence fell below the threshold.
    Semantic,
    /// Appending the sentence would exceed the maximum chunk size.
    Overflow,
}

/// Chunk under construction.
#[derive(Default)]
struct Accumulator {
    text: String,
    chars: usize,
}

impl Accumulator {
    fn is_empty(&self) -> bool {
        self.chars == 0
    }

    /// Characters `sentence` would add, including the joining space.
    fn added_len(&self, sentence: &Sentence) -> usize {
        sentence.char_len() + usize::from(!self.is_empty())
    }

    fn push(&mut self, sentence: &Sentence) {
        if !self.is_empty() {
            self.text.push(' ');
            self.chars += 1;
        }
        self.text.push_str(&sentence.text);
        self.chars += sentence.char_len();
    }

    fn take(&mut self, metadata: &Metadata) -> TextSegment {
        let text = std::mem::take(&mut self.text);
        self.chars = 0;
        TextSegment::new(text.trim(), metadata.clone())
    }
}

/// Decide whether to close the current chunk before `sentence`.
///
/// The semantic check runs first; the overflow check runs regardless and
/// takes precedence as the reported reason.
fn split_reason(
    acc: &Accumulator,
    sentence: &Sentence,
    similarity: f64,
    config: &SplitterConfig,
) -> Option<SplitReason> {
    let mut reason = None;

    if similarity < config.similarity_threshold && acc.chars >= config.min_chunk_chars {
        reason = Some(SplitReason::Semantic);
    }

    if !acc.is_empty() && acc.chars + acc.added_len(sentence) > config.max_chunk_chars {
        reason = Some(SplitReason::Overflow);
    }

    reason
}

/// Group sentences into chunks.
///
/// `embeddings[i]` must belong to `sentences[i]`. Every sentence lands in
/// exactly one chunk, in order. A sentence longer than the maximum is kept
/// whole as its own chunk.
pub fn assemble(
    sentences: &[Sentence],
    embeddings: &[Vec<f32>],
    config: &SplitterConfig,
    metadata: &Metadata,
) -> Result<Vec<TextSegment>> {
    if sentences.len() != embeddings.len() {
        return Err(SplitterError::embedding(format!(
            "Expected {} embeddings, got {}",
            sentences.len(),
            embeddings.len()
        )));
    }

    let mut segments = Vec::new();
    let mut acc = Accumulator::default();

    for (i, sentence) in sentences.iter().enumerate() {
        if i > 0 {
            let similarity = cosine_similarity(&embeddings[i - 1], &embeddings[i])?;

            if let Some(reason) = split_reason(&acc, sentence, similarity, config) {
                trace!(
                    "Split before sentence {}: {:?} (similarity={:.4}, chars={})",
                    sentence.index,
                    reason,
                    similarity,
                    acc.chars
                );
                segments.push(acc.take(metadata));
            }
        }

        acc.push(sentence);
    }

    if !acc.is_empty() {
        segments.push(acc.take(metadata));
    }

    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentence::split_sentences;

    /// Unit vectors whose neighbours have exactly the given cosine similarities.
    fn chain(similarities: &[f64]) -> Vec<Vec<f32>> {
        let mut angle = 0.0f64;
        let mut vectors = vec![vec![1.0f32, 0.0]];
        for s in similarities {
            angle += s.acos();
            vectors.push(vec![angle.cos() as f32, angle.sin() as f32]);
        }
        vectors
    }

    fn texts(segments: &[TextSegment]) -> Vec<&str> {
        segments.iter().map(|s| s.text.as_str()).collect()
    }

    fn run(text: &str, sims: &[f64], config: SplitterConfig) -> Vec<TextSegment> {
        let sentences = split_sentences(text);
        assemble(&sentences, &chain(sims), &config, &Metadata::new()).unwrap()
    }

    #[test]
    fn test_similar_sentences_merge() {
        let chunks = run(
            "Hello world. This is great!",
            &[0.9],
            SplitterConfig::new(0.75, 5, 300),
        );
        assert_eq!(texts(&chunks), vec!["Hello world. This is great!"]);
    }

    #[test]
    fn test_dissimilar_sentences_split() {
        let chunks = run(
            "Hello world. This is great!",
            &[0.3],
            SplitterConfig::new(0.75, 5, 300),
        );
        assert_eq!(texts(&chunks), vec!["Hello world.", "This is great!"]);
    }

    #[test]
    fn test_min_size_blocks_semantic_split() {
        // "Hi." is 3 chars, below the minimum of 5.
        let chunks = run("Hi. Unrelated topic.", &[-1.0], SplitterConfig::new(0.75, 5, 300));
        assert_eq!(texts(&chunks), vec!["Hi. Unrelated topic."]);
    }

    #[test]
    fn test_threshold_equality_does_not_split() {
        let sentences = split_sentences("Hello world. This is great!");
        let config = SplitterConfig::new(1.0, 0, 300);
        let same = vec![vec![1.0, 0.0], vec![1.0, 0.0]];
        let chunks = assemble(&sentences, &same, &config, &Metadata::new()).unwrap();
        assert_eq!(chunks.len(), 1);

        let config = SplitterConfig::new(0.0, 0, 300);
        let orthogonal = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let chunks = assemble(&sentences, &orthogonal, &config, &Metadata::new()).unwrap();
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn test_overflow_split_before_semantic() {
        // 10 + 1 + 9 > 16 forces a split at index 1 despite high similarity;
        // at index 2 the low similarity is ignored because "Beta two." (9)
        // is under the minimum, and 9 + 1 + 6 fits exactly.
        let chunks = run(
            "Alpha one. Beta two. Gamma.",
            &[0.9, 0.2],
            SplitterConfig::new(0.5, 10, 16),
        );
        assert_eq!(texts(&chunks), vec!["Alpha one.", "Beta two. Gamma."]);
        assert!(chunks.iter().all(|c| c.char_len() <= 16));
    }

    #[test]
    fn test_both_triggers_split_once() {
        let chunks = run(
            "Alpha one. Beta two. Gamma three.",
            &[0.9, 0.2],
            SplitterConfig::new(0.5, 0, 15),
        );
        assert_eq!(texts(&chunks), vec!["Alpha one.", "Beta two.", "Gamma three."]);
    }

    #[test]
    fn test_split_reason_precedence() {
        let mut acc = Accumulator::default();
        let first = Sentence {
            index: 0,
            text: "Alpha one.".to_string(),
        };
        let next = Sentence {
            index: 1,
            text: "Beta two.".to_string(),
        };
        acc.push(&first);

        let config = SplitterConfig::new(0.5, 0, 15);
        assert_eq!(
            split_reason(&acc, &next, 0.1, &config),
            Some(SplitReason::Overflow)
        );
        let roomy = SplitterConfig::new(0.5, 0, 100);
        assert_eq!(
            split_reason(&acc, &next, 0.1, &roomy),
            Some(SplitReason::Semantic)
        );
        assert_eq!(split_reason(&acc, &next, 0.9, &roomy), None);
    }

    #[test]
    fn test_oversized_sentence_is_own_chunk() {
        let long = format!("{}.", "a".repeat(499));
        let text = format!("Short one. {} Tail.", long);
        let chunks = run(&text, &[1.0, 1.0], SplitterConfig::new(0.5, 0, 300));

        assert_eq!(texts(&chunks), vec!["Short one.", long.as_str(), "Tail."]);
        assert_eq!(chunks[1].char_len(), 500);
    }

    #[test]
    fn test_max_counts_characters_not_bytes() {
        // Each sentence is 4 chars but 12 bytes.
        let chunks = run("你好吗？我很好。", &[1.0], SplitterConfig::new(0.5, 0, 9));
        assert_eq!(texts(&chunks), vec!["你好吗？ 我很好。"]);
    }

    #[test]
    fn test_partition_and_max_size() {
        let text = "The cat sat. It purred loudly. Stocks fell today. Markets were volatile. \
                    Investors worried. Rain is expected. Bring an umbrella.";
        let sentences = split_sentences(text);
        let sims = [0.9, 0.1, 0.8, 0.85, 0.2, 0.95];
        let config = SplitterConfig::new(0.5, 10, 40);
        let chunks = assemble(&sentences, &chain(&sims), &config, &Metadata::new()).unwrap();

        let rejoined: Vec<String> = chunks
            .iter()
            .flat_map(|c| split_sentences(&c.text))
            .map(|s| s.text)
            .collect();
        let original: Vec<String> = sentences.iter().map(|s| s.text.clone()).collect();
        assert_eq!(rejoined, original);

        for chunk in &chunks {
            assert!(chunk.char_len() <= 40, "chunk too long: {:?}", chunk.text);
        }
    }

    #[test]
    fn test_metadata_copied_to_every_chunk() {
        let metadata = Metadata::new().with("file_name", "notes.txt");
        let sentences = split_sentences("One. Two. Three.");
        let config = SplitterConfig::new(0.5, 0, 300);
        let chunks = assemble(&sentences, &chain(&[0.1, 0.1]), &config, &metadata).unwrap();

        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.metadata == metadata));
    }

    #[test]
    fn test_embedding_count_mismatch() {
        let sentences = split_sentences("One. Two.");
        let config = SplitterConfig::default();
        let err = assemble(&sentences, &[vec![1.0]], &config, &Metadata::new()).unwrap_err();
        assert_eq!(err.error_code(), "EMBEDDING_ERROR");
    }

    #[test]
    fn test_dimension_mismatch_propagates() {
        let sentences = split_sentences("One. Two.");
        let config = SplitterConfig::default();
        let vectors = vec![vec![1.0, 0.0], vec![1.0]];
        let err = assemble(&sentences, &vectors, &config, &Metadata::new()).unwrap_err();
        assert_eq!(err.error_code(), "DIMENSION_MISMATCH");
    }
}
