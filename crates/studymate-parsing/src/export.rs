use std::path::Path;

use studymate_core::Chunk;

use crate::study::{Flashcard, Quiz};

pub const DEFAULT_SUMMARY_FILE: &str = "document_summary.txt";
pub const DEFAULT_FLASHCARDS_FILE: &str = "flashcards.txt";
pub const DEFAULT_QUIZ_FILE: &str = "quiz.txt";
pub const DEFAULT_CHUNKS_FILE: &str = "chunks.txt";

/// Render flashcards as `Q: ...\nA: ...` blocks separated by blank lines.
pub fn flashcards_to_text(cards: &[Flashcard]) -> String {
    cards
        .iter()
        .map(|card| format!("Q: {}\nA: {}", card.question, card.answer))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Render a quiz as numbered questions separated by rules.
pub fn quiz_to_text(quiz: &Quiz) -> String {
    quiz.questions
        .iter()
        .enumerate()
        .map(|(i, q)| format!("Question {}:\n{}", i + 1, q))
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}

/// Render chunks one per paragraph.
pub fn chunks_to_text(chunks: &[Chunk]) -> String {
    chunks
        .iter()
        .map(|c| c.trim_end())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Write a plain-text export, creating parent directories as needed.
pub fn write_text_file(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)?;
    tracing::info!(path = %path.display(), bytes = contents.len(), "wrote export");
    Ok(())
}
