use studymate_core::Chunk;

use crate::config::ParsingConfig;
use crate::responder::{self, ResponseKind};
use crate::study::{self, ExplanationLevel, Flashcard, Quiz, QuizKind, SummaryLength};
use crate::chunker;

/// A configurable chunking and response pipeline.
///
/// Holds a [`ParsingConfig`] and exposes each step as a method. The default
/// constructor uses built-in defaults; use [`StudyPipeline::with_config`]
/// to change chunk size, context size or instruction keywords.
#[derive(Debug, Clone, Default)]
pub struct StudyPipeline {
    config: ParsingConfig,
}

impl StudyPipeline {
    /// Create a pipeline with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pipeline with a custom configuration.
    pub fn with_config(config: ParsingConfig) -> Self {
        Self { config }
    }

    /// Get a reference to the current config.
    pub fn config(&self) -> &ParsingConfig {
        &self.config
    }

    /// Normalize and split raw text into sentence-aligned chunks (steps 1-4).
    pub fn chunk_text(&self, text: &str) -> Vec<Chunk> {
        chunker::chunk_text_with_config(text, &self.config)
    }

    /// Which template `instruction` selects.
    pub fn classify(&self, instruction: &str) -> ResponseKind {
        responder::classify_instruction_with_config(instruction, &self.config)
    }

    /// Templated response using the configured context length.
    pub fn respond(&self, instruction: &str, chunks: &[Chunk]) -> String {
        self.respond_with_limit(instruction, chunks, self.config.max_response_chars)
    }

    /// Templated response embedding at most `max_length` context characters.
    pub fn respond_with_limit(
        &self,
        instruction: &str,
        chunks: &[Chunk],
        max_length: usize,
    ) -> String {
        responder::generate_response_with_config(instruction, chunks, max_length, &self.config)
    }

    /// Key terms from the response context of `chunks`.
    pub fn key_terms(&self, chunks: &[Chunk]) -> Vec<String> {
        let context = responder::build_context(chunks, self.config.context_chunks);
        responder::extract_key_terms_with_config(&context, &self.config)
    }

    pub fn answer_question(
        &self,
        question: &str,
        level: ExplanationLevel,
        chunks: &[Chunk],
    ) -> String {
        study::answer_question_with_config(question, level, chunks, &self.config)
    }

    pub fn summarize(&self, length: SummaryLength, chunks: &[Chunk]) -> String {
        study::summarize_with_config(length, chunks, &self.config)
    }

    pub fn flashcards(&self, count: usize, chunks: &[Chunk]) -> Vec<Flashcard> {
        study::generate_flashcards_with_config(count, chunks, &self.config)
    }

    pub fn quiz(&self, kind: QuizKind, count: usize, chunks: &[Chunk]) -> Quiz {
        study::generate_quiz_with_config(kind, count, chunks, &self.config)
    }
}
