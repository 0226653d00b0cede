//! End-to-end checks of the chunk → respond pipeline over document-like text.

use studymate_parsing::{
    ParsingConfigBuilder, SENTENCE_DELIMITER, StudyPipeline, chunk_text, generate_response,
    normalize_whitespace, split_sentences,
};

/// Text shaped like extracted PDF pages: ragged line breaks, blank lines
/// between pages, sentences of uneven length.
fn sample_document() -> String {
    let mut text = String::new();
    for page in 0..6 {
        for i in 0..9 {
            let filler = "word ".repeat((page * 7 + i * 5) % 23 + 1);
            text.push_str(&format!("Page {page} sentence {i} has {filler}in\nit. "));
        }
        text.push_str("\n\n");
    }
    text
}

fn pipeline_with_max(max: usize) -> StudyPipeline {
    let config = ParsingConfigBuilder::new()
        .max_chunk_chars(max)
        .build()
        .unwrap();
    StudyPipeline::with_config(config)
}

/// Normalized text as the chunker sees it, plus the terminator it appends.
fn expected_concatenation(text: &str) -> String {
    let normalized = normalize_whitespace(text);
    let body = normalized.trim();
    if body.ends_with('.') {
        format!("{body} ")
    } else {
        format!("{body}{SENTENCE_DELIMITER}")
    }
}

#[test]
fn chunks_reconstruct_normalized_text() {
    let text = sample_document();
    for max in [40, 120, 500, 2000] {
        let chunks = pipeline_with_max(max).chunk_text(&text);
        assert!(!chunks.is_empty());
        assert_eq!(chunks.concat(), expected_concatenation(&text), "max = {max}");
    }
}

#[test]
fn sentences_are_neither_lost_nor_duplicated() {
    let text = sample_document();
    let normalized = normalize_whitespace(&text);
    let expected = split_sentences(normalized.trim());

    let chunks = chunk_text(&text);
    let joined = chunks.concat();
    let rejoined = split_sentences(joined.trim_end());

    assert_eq!(rejoined, expected);
}

#[test]
fn chunks_stay_under_limit_unless_single_sentence() {
    let text = sample_document();
    let max = 100;
    for chunk in pipeline_with_max(max).chunk_text(&text) {
        let len = chunk.chars().count();
        if len >= max {
            let inner = chunk.trim_end().trim_end_matches('.');
            assert!(
                !inner.contains(SENTENCE_DELIMITER),
                "oversized chunk holds more than one sentence: {chunk:?}"
            );
        }
    }
}

#[test]
fn chunk_order_follows_document_order() {
    let text = sample_document();
    let chunks = chunk_text(&text);
    let positions: Vec<usize> = chunks
        .iter()
        .map(|c| {
            let probe = c.split(SENTENCE_DELIMITER).next().unwrap();
            normalize_whitespace(&text).find(probe).unwrap()
        })
        .collect();
    assert!(positions.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn normalization_is_idempotent_for_chunking() {
    let text = sample_document();
    let normalized = normalize_whitespace(&text);
    assert_eq!(normalize_whitespace(&normalized), normalized);
    assert_eq!(chunk_text(&normalized), chunk_text(&text));
}

#[test]
fn documented_examples() {
    assert_eq!(
        chunk_text("This is one. This is two. This is three."),
        vec!["This is one. This is two. This is three. "]
    );

    let chunks = chunk_text("Some notes. More notes.");
    let quiz = generate_response("Give me a QUIZ please", &chunks, 500);
    assert!(quiz.starts_with("Quiz Question:"));
    let summary = generate_response("summary of this quiz topic", &chunks, 500);
    assert!(summary.starts_with("Summary:"));

    let chunks = chunk_text("Paris is the capital. France is a country.");
    let response = generate_response("keyword extraction", &chunks, 500);
    let terms = response.strip_prefix("Key Terms: ").unwrap();
    let mut terms: Vec<&str> = terms.split(", ").collect();
    terms.sort_unstable();
    assert_eq!(terms, vec!["France", "Paris"]);
}

#[test]
fn responses_are_deterministic_over_a_document() {
    let pipeline = StudyPipeline::new();
    let chunks = pipeline.chunk_text(&sample_document());
    for instruction in ["summary", "flashcard", "quiz", "keywords", "what is on page 2?"] {
        assert_eq!(
            pipeline.respond(instruction, &chunks),
            pipeline.respond(instruction, &chunks)
        );
    }
}

#[test]
fn context_only_reads_first_three_chunks() {
    let pipeline = pipeline_with_max(30);
    let chunks =
        pipeline.chunk_text("Alpha one here. Beta two here. Gamma three here. Delta four here.");
    assert_eq!(chunks.len(), 4);
    assert_eq!(pipeline.key_terms(&chunks), vec!["Alpha", "Beta", "Gamma"]);
}
