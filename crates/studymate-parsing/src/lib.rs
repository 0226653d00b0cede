pub mod chunker;
pub mod config;
pub mod export;
pub mod pipeline;
pub mod responder;
pub mod study;
pub mod text_processing;

pub use chunker::{SENTENCE_DELIMITER, chunk_text, split_sentences};
pub use config::{ListOverride, ParsingConfig, ParsingConfigBuilder};
pub use pipeline::StudyPipeline;
pub use responder::{
    InstructionKeyword, ResponseKind, build_context, classify_instruction, extract_key_terms,
    generate_response,
};
pub use study::{ExplanationLevel, Flashcard, Quiz, QuizKind, SummaryLength};
pub use text_processing::normalize_whitespace;
// Re-export domain types from core (canonical definitions live there)
pub use studymate_core::{Chunk, DEFAULT_MAX_RESPONSE_CHARS};
