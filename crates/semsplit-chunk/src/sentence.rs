//! Punctuation-based sentence tokenizer.

use semsplit_core::Sentence;

/// Characters that end a sentence (CJK full-width and ASCII).
const TERMINATORS: [char; 6] = ['。', '！', '？', '.', '!', '?'];

/// Whether `c` ends a sentence.
pub fn is_terminator(c: char) -> bool {
    TERMINATORS.contains(&c)
}

/// Split text into trimmed, non-empty sentences in document order.
///
/// A boundary falls right after every terminator; whitespace following it
/// is dropped by trimming. Text without any terminator comes back as a
/// single sentence, and blank text as none.
pub fn split_sentences(text: &str) -> Vec<Sentence> {
    let mut pieces = Vec::new();
    let mut start = 0;

    for (i, c) in text.char_indices() {
        if is_terminator(c) {
            let end = i + c.len_utf8();
            pieces.push(&text[start..end]);
            start = end;
        }
    }
    pieces.push(&text[start..]);

    pieces
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .enumerate()
        .map(|(index, s)| Sentence {
            index,
            text: s.to_string(),
        })
        .collect()
}
