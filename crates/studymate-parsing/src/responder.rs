use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use studymate_core::Chunk;

use crate::config::ParsingConfig;
use crate::text_processing::truncate_chars;

/// Which canned template a response uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseKind {
    Summary,
    Flashcard,
    Quiz,
    KeyTerms,
    /// Fallback when no instruction keyword matches.
    Answer,
}

impl ResponseKind {
    /// Keyword-selected kinds, highest priority first.
    pub const PRIORITY: [ResponseKind; 4] = [
        ResponseKind::Summary,
        ResponseKind::Flashcard,
        ResponseKind::Quiz,
        ResponseKind::KeyTerms,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ResponseKind::Summary => "Summary",
            ResponseKind::Flashcard => "Flashcard",
            ResponseKind::Quiz => "Quiz Question",
            ResponseKind::KeyTerms => "Key Terms",
            ResponseKind::Answer => "Answer",
        }
    }
}

/// An instruction substring that routes to a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionKeyword {
    pub kind: ResponseKind,
    /// Matched case-insensitively against the instruction.
    pub keyword: String,
}

impl InstructionKeyword {
    pub fn new(kind: ResponseKind, keyword: &str) -> Self {
        Self {
            kind,
            keyword: keyword.to_lowercase(),
        }
    }
}

fn default_keywords() -> Vec<InstructionKeyword> {
    vec![
        InstructionKeyword::new(ResponseKind::Summary, "summary"),
        InstructionKeyword::new(ResponseKind::Flashcard, "flashcard"),
        InstructionKeyword::new(ResponseKind::Quiz, "quiz"),
        InstructionKeyword::new(ResponseKind::KeyTerms, "keyword"),
    ]
}

/// Pick the template for `instruction`.
///
/// Checks "summary", "flashcard", "quiz", "keyword" in that order,
/// case-insensitively; the first one contained in the instruction wins.
pub fn classify_instruction(instruction: &str) -> ResponseKind {
    classify_instruction_with_config(instruction, &ParsingConfig::default())
}

/// Config-aware version of [`classify_instruction`].
///
/// Priority follows [`ResponseKind::PRIORITY`], not keyword list order, so an
/// extra keyword for a high-priority kind still outranks lower kinds.
pub(crate) fn classify_instruction_with_config(
    instruction: &str,
    config: &ParsingConfig,
) -> ResponseKind {
    let lowered = instruction.to_lowercase();
    let keywords = config.instruction_keywords.resolve(&default_keywords());

    ResponseKind::PRIORITY
        .into_iter()
        .find(|kind| {
            keywords
                .iter()
                .any(|k| k.kind == *kind && lowered.contains(&k.keyword))
        })
        .unwrap_or(ResponseKind::Answer)
}

/// Join the first `count` chunks (or all, if fewer) with newlines.
pub fn build_context(chunks: &[Chunk], count: usize) -> String {
    chunks[..count.min(chunks.len())].join("\n")
}

/// Capitalized words in `context`, deduplicated, in first-appearance order,
/// at most five.
pub fn extract_key_terms(context: &str) -> Vec<String> {
    extract_key_terms_with_config(context, &ParsingConfig::default())
}

/// Config-aware version of [`extract_key_terms`].
pub(crate) fn extract_key_terms_with_config(context: &str, config: &ParsingConfig) -> Vec<String> {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[A-Z][a-z]+\b").unwrap());
    let re = config.key_term_re.as_ref().unwrap_or(&*RE);

    let mut seen = HashSet::new();
    re.find_iter(context)
        .map(|m| m.as_str())
        .filter(|term| seen.insert(*term))
        .take(config.max_key_terms)
        .map(str::to_string)
        .collect()
}

/// Produce the templated response for `instruction` over `chunks`.
///
/// `max_length` bounds the context characters embedded by the summary and
/// answer templates.
pub fn generate_response(instruction: &str, chunks: &[Chunk], max_length: usize) -> String {
    generate_response_with_config(instruction, chunks, max_length, &ParsingConfig::default())
}

/// Config-aware version of [`generate_response`].
pub(crate) fn generate_response_with_config(
    instruction: &str,
    chunks: &[Chunk],
    max_length: usize,
    config: &ParsingConfig,
) -> String {
    let context = build_context(chunks, config.context_chunks);
    let kind = classify_instruction_with_config(instruction, config);
    tracing::debug!(?kind, context_chars = context.len(), "selected response template");

    match kind {
        ResponseKind::Summary => summary_template(&context, max_length),
        ResponseKind::Flashcard => flashcard_template(&context, config.flashcard_answer_chars),
        ResponseKind::Quiz => quiz_template(),
        ResponseKind::KeyTerms => {
            key_terms_template(&extract_key_terms_with_config(&context, config))
        }
        ResponseKind::Answer => answer_template(&context, max_length),
    }
}

fn summary_template(context: &str, max_length: usize) -> String {
    format!(
        "Summary:\n\n{}...\n\n[This is a simulated summary. In production, this would be AI-generated.]",
        truncate_chars(context, max_length)
    )
}

fn flashcard_template(context: &str, answer_chars: usize) -> String {
    format!(
        "Flashcard:\n\nQ: What is the main topic?\nA: {}...\n\n[Simulated flashcard content]",
        truncate_chars(context, answer_chars)
    )
}

fn quiz_template() -> String {
    "Quiz Question:\n\nWhat is the main concept?\nA) Option 1\nB) Option 2\nC) Option 3\nD) Option 4\n\nCorrect answer: B\n\n[Simulated quiz question]"
        .to_string()
}

fn key_terms_template(terms: &[String]) -> String {
    format!("Key Terms: {}", terms.join(", "))
}

fn answer_template(context: &str, max_length: usize) -> String {
    format!(
        "Answer:\n\nBased on the provided materials: {}...\n\n[Simulated AI response]",
        truncate_chars(context, max_length)
    )
}
