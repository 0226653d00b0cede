//! Study tools built on the template responder: Q&A, summaries,
//! flashcards and practice quizzes.
//!
//! Each tool phrases a fixed instruction, runs it through
//! [`generate_response`](crate::generate_response) and shapes the result.

use std::fmt;
use std::str::FromStr;

use studymate_core::Chunk;

use crate::config::ParsingConfig;
use crate::responder::generate_response_with_config;

/// Fewest flashcards or quiz questions generated in one batch.
pub const MIN_ITEMS: usize = 3;
/// Most flashcards or quiz questions generated in one batch.
pub const MAX_ITEMS: usize = 10;
/// Flashcards or quiz questions generated when no count is given.
pub const DEFAULT_ITEMS: usize = 5;

/// Context characters embedded in a summary.
pub const SUMMARY_MAX_CHARS: usize = 1000;

/// Error returned when parsing a study option from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOption {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: {:?}", self.kind, self.value)
    }
}

impl std::error::Error for UnknownOption {}

/// Normalize a user-supplied option name: lowercase, `-`/`_` as spaces.
fn option_key(s: &str) -> String {
    s.trim().to_lowercase().replace(['-', '_'], " ")
}

/// Depth of a Q&A explanation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExplanationLevel {
    Simple,
    #[default]
    Intermediate,
    Advanced,
}

impl ExplanationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExplanationLevel::Simple => "simple",
            ExplanationLevel::Intermediate => "intermediate",
            ExplanationLevel::Advanced => "advanced",
        }
    }
}

impl FromStr for ExplanationLevel {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match option_key(s).as_str() {
            "simple" => Ok(ExplanationLevel::Simple),
            "intermediate" => Ok(ExplanationLevel::Intermediate),
            "advanced" => Ok(ExplanationLevel::Advanced),
            _ => Err(UnknownOption {
                kind: "explanation level",
                value: s.to_string(),
            }),
        }
    }
}

/// Requested summary length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryLength {
    VeryShort,
    Short,
    #[default]
    Medium,
    Detailed,
}

impl SummaryLength {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryLength::VeryShort => "very short",
            SummaryLength::Short => "short",
            SummaryLength::Medium => "medium",
            SummaryLength::Detailed => "detailed",
        }
    }
}

impl FromStr for SummaryLength {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match option_key(s).as_str() {
            "very short" => Ok(SummaryLength::VeryShort),
            "short" => Ok(SummaryLength::Short),
            "medium" => Ok(SummaryLength::Medium),
            "detailed" => Ok(SummaryLength::Detailed),
            _ => Err(UnknownOption {
                kind: "summary length",
                value: s.to_string(),
            }),
        }
    }
}

/// Question style for a practice quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuizKind {
    #[default]
    MultipleChoice,
    TrueFalse,
}

impl QuizKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuizKind::MultipleChoice => "multiple choice",
            QuizKind::TrueFalse => "true/false",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            QuizKind::MultipleChoice => "Multiple Choice",
            QuizKind::TrueFalse => "True/False",
        }
    }
}

impl FromStr for QuizKind {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match option_key(s).as_str() {
            "multiple choice" | "mc" => Ok(QuizKind::MultipleChoice),
            "true/false" | "true false" | "tf" => Ok(QuizKind::TrueFalse),
            _ => Err(UnknownOption {
                kind: "quiz kind",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    pub kind: QuizKind,
    pub questions: Vec<String>,
}

/// Clamp a requested flashcard/question count into `MIN_ITEMS..=MAX_ITEMS`.
pub fn clamp_item_count(count: usize) -> usize {
    count.clamp(MIN_ITEMS, MAX_ITEMS)
}

/// Answer a free-text question at the given explanation level.
pub fn answer_question(question: &str, level: ExplanationLevel, chunks: &[Chunk]) -> String {
    answer_question_with_config(question, level, chunks, &ParsingConfig::default())
}

pub(crate) fn answer_question_with_config(
    question: &str,
    level: ExplanationLevel,
    chunks: &[Chunk],
    config: &ParsingConfig,
) -> String {
    let instruction = format!(
        "Provide a {} level explanation: {}",
        level.as_str(),
        question
    );
    generate_response_with_config(&instruction, chunks, config.max_response_chars, config)
}

/// Summarize the material. Summaries embed up to [`SUMMARY_MAX_CHARS`] of context.
pub fn summarize(length: SummaryLength, chunks: &[Chunk]) -> String {
    summarize_with_config(length, chunks, &ParsingConfig::default())
}

pub(crate) fn summarize_with_config(
    length: SummaryLength,
    chunks: &[Chunk],
    config: &ParsingConfig,
) -> String {
    let instruction = format!("Create a {} summary of the key points", length.as_str());
    generate_response_with_config(&instruction, chunks, SUMMARY_MAX_CHARS, config)
}

/// Generate `count` flashcards (clamped to `MIN_ITEMS..=MAX_ITEMS`).
pub fn generate_flashcards(count: usize, chunks: &[Chunk]) -> Vec<Flashcard> {
    generate_flashcards_with_config(count, chunks, &ParsingConfig::default())
}

pub(crate) fn generate_flashcards_with_config(
    count: usize,
    chunks: &[Chunk],
    config: &ParsingConfig,
) -> Vec<Flashcard> {
    let count = clamp_item_count(count);
    (1..=count)
        .map(|i| {
            let instruction = format!("Create flashcard {} with a question and answer", i);
            let content = generate_response_with_config(
                &instruction,
                chunks,
                config.max_response_chars,
                config,
            );
            parse_flashcard(&content, i)
        })
        .collect()
}

/// Split a flashcard response into question and answer.
///
/// The question is everything before the first `"A:"` with every `"Q:"`
/// removed; the answer runs from the first `"A:"` to the next one (or the
/// end). Responses lacking either marker get numbered placeholders.
pub fn parse_flashcard(content: &str, number: usize) -> Flashcard {
    if content.contains("Q:") && content.contains("A:") {
        let mut parts = content.split("A:");
        let question = parts.next().unwrap_or_default().replace("Q:", "");
        let answer = parts.next().unwrap_or_default();
        Flashcard {
            question: question.trim().to_string(),
            answer: answer.trim().to_string(),
        }
    } else {
        Flashcard {
            question: format!("Question {} about the material", number),
            answer: format!("Answer {} based on the content", number),
        }
    }
}

/// Generate a practice quiz of `count` questions (clamped to `MIN_ITEMS..=MAX_ITEMS`).
///
/// Each question is requested as `"Create a {kind} question {i} ..."`. That
/// instruction contains none of the default keywords, so with the default
/// keyword table every question uses the answer template. Route it to the
/// quiz template by adding a keyword such as `"question"` for
/// [`ResponseKind::Quiz`](crate::ResponseKind::Quiz).
pub fn generate_quiz(kind: QuizKind, count: usize, chunks: &[Chunk]) -> Quiz {
    generate_quiz_with_config(kind, count, chunks, &ParsingConfig::default())
}

pub(crate) fn generate_quiz_with_config(
    kind: QuizKind,
    count: usize,
    chunks: &[Chunk],
    config: &ParsingConfig,
) -> Quiz {
    let count = clamp_item_count(count);
    let questions = (1..=count)
        .map(|i| {
            let instruction = format!(
                "Create a {} question {} with options and correct answer",
                kind.as_str(),
                i
            );
            generate_response_with_config(&instruction, chunks, config.max_response_chars, config)
        })
        .collect();
    Quiz { kind, questions }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ParsingConfigBuilder, ResponseKind};

    fn chunks(parts: &[&str]) -> Vec<Chunk> {
        parts.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_answer_question_uses_answer_template() {
        let c = chunks(&["Cells divide. "]);
        let answer = answer_question("How do cells grow?", ExplanationLevel::Simple, &c);
        assert!(answer.starts_with("Answer:\n\nBased on the provided materials: Cells divide. ..."));
    }

    #[test]
    fn test_answer_question_keyword_in_question_switches_template() {
        let c = chunks(&["Cells divide. "]);
        let answer = answer_question("give me a summary", ExplanationLevel::default(), &c);
        assert!(answer.starts_with("Summary:"));
    }

    #[test]
    fn test_summarize_embeds_up_to_1000_chars() {
        let long = "s".repeat(1500);
        let summary = summarize(SummaryLength::Detailed, &[long]);
        assert!(summary.starts_with("Summary:\n\n"));
        assert!(summary.contains(&format!("{}...", "s".repeat(1000))));
        assert!(!summary.contains(&"s".repeat(1001)));
    }

    #[test]
    fn test_flashcards_parse_question_and_answer() {
        let cards = generate_flashcards(3, &chunks(&["Mitochondria make energy. "]));
        assert_eq!(cards.len(), 3);
        for card in &cards {
            assert_eq!(card.question, "Flashcard:\n\n What is the main topic?");
            assert_eq!(
                card.answer,
                "Mitochondria make energy. ...\n\n[Simulated flashcard content]"
            );
        }
    }

    #[test]
    fn test_flashcard_count_is_clamped() {
        assert_eq!(generate_flashcards(0, &[]).len(), MIN_ITEMS);
        assert_eq!(generate_flashcards(50, &[]).len(), MAX_ITEMS);
        assert_eq!(generate_flashcards(DEFAULT_ITEMS, &[]).len(), 5);
    }

    #[test]
    fn test_parse_flashcard_answer_stops_at_second_marker() {
        let card = parse_flashcard("Q: Topic?\nA: first A: second", 1);
        assert_eq!(card.question, "Topic?");
        assert_eq!(card.answer, "first");
    }

    #[test]
    fn test_parse_flashcard_fallback() {
        let card = parse_flashcard("Quiz Question:\n\nWhat is it?", 4);
        assert_eq!(card.question, "Question 4 about the material");
        assert_eq!(card.answer, "Answer 4 based on the content");
    }

    #[test]
    fn test_quiz_questions_fall_through_to_answer_template() {
        let quiz = generate_quiz(QuizKind::TrueFalse, 4, &chunks(&["Water boils. "]));
        assert_eq!(quiz.kind, QuizKind::TrueFalse);
        assert_eq!(quiz.questions.len(), 4);
        assert!(quiz.questions.iter().all(|q| q.starts_with("Answer:")));
        assert!(quiz.questions[0].contains("materials: Water boils. ..."));
    }

    #[test]
    fn test_quiz_keyword_override_selects_quiz_template() {
        let config = ParsingConfigBuilder::new()
            .add_instruction_keyword(ResponseKind::Quiz, "question")
            .build()
            .unwrap();
        let quiz = generate_quiz_with_config(
            QuizKind::MultipleChoice,
            3,
            &chunks(&["Water boils. "]),
            &config,
        );
        assert!(quiz.questions.iter().all(|q| q.starts_with("Quiz Question:")));
    }

    #[test]
    fn test_option_parsing() {
        assert_eq!("Advanced".parse::<ExplanationLevel>(), Ok(ExplanationLevel::Advanced));
        assert_eq!("very-short".parse::<SummaryLength>(), Ok(SummaryLength::VeryShort));
        assert_eq!("Very Short".parse::<SummaryLength>(), Ok(SummaryLength::VeryShort));
        assert_eq!("true/false".parse::<QuizKind>(), Ok(QuizKind::TrueFalse));
        assert_eq!("multiple_choice".parse::<QuizKind>(), Ok(QuizKind::MultipleChoice));
        assert!("expert".parse::<ExplanationLevel>().is_err());
    }

    #[test]
    fn test_unknown_option_message() {
        let err = "huge".parse::<SummaryLength>().unwrap_err();
        assert_eq!(err.to_string(), "unknown summary length: \"huge\"");
    }
}
