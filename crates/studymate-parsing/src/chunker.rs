use studymate_core::Chunk;

use crate::config::ParsingConfig;
use crate::text_processing::normalize_whitespace;

/// Sentence boundary used for segmentation.
///
/// This is a heuristic, not a sentence detector: abbreviations ("e.g. "),
/// decimals followed by a space, and ellipses all produce extra splits.
pub const SENTENCE_DELIMITER: &str = ". ";

/// Split normalized text into candidate sentences on [`SENTENCE_DELIMITER`].
///
/// The delimiter itself is removed. A sentence at the very end of the text
/// keeps whatever terminal punctuation it had.
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split(SENTENCE_DELIMITER).collect()
}

/// Normalize whitespace in `text` and split it into sentence-aligned chunks
/// of fewer than 500 characters.
///
/// See [`StudyPipeline`](crate::StudyPipeline) for a configurable limit.
pub fn chunk_text(text: &str) -> Vec<Chunk> {
    chunk_text_with_config(text, &ParsingConfig::default())
}

/// Config-aware version of [`chunk_text`].
///
/// Sentences are appended greedily, each followed by `". "`, while the chunk
/// stays under `max_chunk_chars`. When the next sentence would reach the
/// limit, the current chunk is closed and the sentence starts a new one. A
/// sentence that alone reaches the limit becomes its own oversized chunk.
///
/// The final sentence of the document is followed by a single space instead
/// when it already ends in a period, so its period is not doubled.
pub(crate) fn chunk_text_with_config(text: &str, config: &ParsingConfig) -> Vec<Chunk> {
    let normalized = normalize_whitespace(text);
    let body = normalized.trim();
    if body.is_empty() {
        return Vec::new();
    }

    let sentences = split_sentences(body);
    let last = sentences.len() - 1;
    let max = config.max_chunk_chars;

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for (i, sentence) in sentences.iter().enumerate() {
        let terminator = if i == last && sentence.ends_with('.') {
            " "
        } else {
            SENTENCE_DELIMITER
        };
        let piece_len = sentence.chars().count() + terminator.len();

        if current_len + piece_len >= max && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        current.push_str(sentence);
        current.push_str(terminator);
        current_len += piece_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    tracing::debug!(
        input_chars = body.len(),
        sentences = sentences.len(),
        chunks = chunks.len(),
        max_chunk_chars = max,
        "chunked text"
    );

    chunks
}
