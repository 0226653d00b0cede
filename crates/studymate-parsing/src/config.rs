use regex::Regex;

use studymate_core::{DEFAULT_CONTEXT_CHUNKS, DEFAULT_MAX_CHUNK_CHARS, DEFAULT_MAX_RESPONSE_CHARS};

use crate::responder::{InstructionKeyword, ResponseKind};

/// Number of context characters shown as a flashcard answer.
pub const DEFAULT_FLASHCARD_ANSWER_CHARS: usize = 200;

/// Maximum number of key terms listed by the key-terms template.
pub const DEFAULT_MAX_KEY_TERMS: usize = 5;

/// Controls how a list of values is overridden from its defaults.
#[derive(Debug, Clone, Default)]
pub enum ListOverride<T> {
    /// Use the built-in defaults.
    #[default]
    Default,
    /// Completely replace the defaults with these values.
    Replace(Vec<T>),
    /// Append these values to the defaults.
    Extend(Vec<T>),
}

impl<T: Clone> ListOverride<T> {
    /// Resolve this override against the given defaults.
    pub fn resolve(&self, defaults: &[T]) -> Vec<T> {
        match self {
            ListOverride::Default => defaults.to_vec(),
            ListOverride::Replace(v) => v.clone(),
            ListOverride::Extend(v) => {
                let mut result = defaults.to_vec();
                result.extend(v.iter().cloned());
                result
            }
        }
    }
}

/// Configuration for the chunking and response pipeline.
///
/// `key_term_re` is `None` for the built-in pattern. Use
/// [`ParsingConfigBuilder`] to construct with string patterns.
#[derive(Debug, Clone)]
pub struct ParsingConfig {
    // ── chunker.rs ──
    /// Chunks stay under this many characters unless a single sentence is longer.
    pub(crate) max_chunk_chars: usize,

    // ── responder.rs ──
    /// Context characters embedded by the summary and answer templates.
    pub(crate) max_response_chars: usize,
    /// Context characters embedded as the flashcard answer.
    pub(crate) flashcard_answer_chars: usize,
    /// Leading chunks joined into the response context.
    pub(crate) context_chunks: usize,
    /// Instruction substrings routed to each template.
    pub(crate) instruction_keywords: ListOverride<InstructionKeyword>,
    /// Pattern used to pick key terms out of the context.
    pub(crate) key_term_re: Option<Regex>,
    /// Maximum number of key terms listed.
    pub(crate) max_key_terms: usize,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            max_chunk_chars: DEFAULT_MAX_CHUNK_CHARS,
            max_response_chars: DEFAULT_MAX_RESPONSE_CHARS,
            flashcard_answer_chars: DEFAULT_FLASHCARD_ANSWER_CHARS,
            context_chunks: DEFAULT_CONTEXT_CHUNKS,
            instruction_keywords: ListOverride::Default,
            key_term_re: None,
            max_key_terms: DEFAULT_MAX_KEY_TERMS,
        }
    }
}

impl ParsingConfig {
    pub fn max_chunk_chars(&self) -> usize {
        self.max_chunk_chars
    }

    pub fn max_response_chars(&self) -> usize {
        self.max_response_chars
    }

    pub fn context_chunks(&self) -> usize {
        self.context_chunks
    }
}

/// Builder for [`ParsingConfig`].
///
/// Accepts string patterns that are compiled to `Regex` in [`build()`](Self::build).
/// Fails fast with `regex::Error` if any pattern is invalid.
#[derive(Debug, Clone, Default)]
pub struct ParsingConfigBuilder {
    max_chunk_chars: Option<usize>,
    max_response_chars: Option<usize>,
    context_chunks: Option<usize>,
    instruction_keywords: ListOverride<InstructionKeyword>,
    key_term_re: Option<String>,
    max_key_terms: Option<usize>,
}

impl ParsingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Chunking ──

    pub fn max_chunk_chars(mut self, n: usize) -> Self {
        self.max_chunk_chars = Some(n);
        self
    }

    // ── Response templates ──

    pub fn max_response_chars(mut self, n: usize) -> Self {
        self.max_response_chars = Some(n);
        self
    }

    pub fn context_chunks(mut self, n: usize) -> Self {
        self.context_chunks = Some(n);
        self
    }

    pub fn max_key_terms(mut self, n: usize) -> Self {
        self.max_key_terms = Some(n);
        self
    }

    pub fn key_term_regex(mut self, pattern: &str) -> Self {
        self.key_term_re = Some(pattern.to_string());
        self
    }

    // ── Instruction keywords ──

    pub fn set_instruction_keywords(mut self, keywords: Vec<InstructionKeyword>) -> Self {
        self.instruction_keywords = ListOverride::Replace(keywords);
        self
    }

    /// Route an additional instruction substring to `kind`.
    pub fn add_instruction_keyword(mut self, kind: ResponseKind, keyword: &str) -> Self {
        if let ListOverride::Default = self.instruction_keywords {
            self.instruction_keywords = ListOverride::Extend(Vec::new());
        }
        if let ListOverride::Extend(v) | ListOverride::Replace(v) = &mut self.instruction_keywords {
            v.push(InstructionKeyword::new(kind, keyword));
        }
        self
    }

    /// Compile all string patterns into regexes and produce a [`ParsingConfig`].
    pub fn build(self) -> Result<ParsingConfig, regex::Error> {
        let defaults = ParsingConfig::default();
        Ok(ParsingConfig {
            max_chunk_chars: self.max_chunk_chars.unwrap_or(defaults.max_chunk_chars),
            max_response_chars: self
                .max_response_chars
                .unwrap_or(defaults.max_response_chars),
            flashcard_answer_chars: defaults.flashcard_answer_chars,
            context_chunks: self.context_chunks.unwrap_or(defaults.context_chunks),
            instruction_keywords: self.instruction_keywords,
            key_term_re: self.key_term_re.map(|p| Regex::new(&p)).transpose()?,
            max_key_terms: self.max_key_terms.unwrap_or(defaults.max_key_terms),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ParsingConfig::default();
        assert_eq!(config.max_chunk_chars, 500);
        assert_eq!(config.max_response_chars, 500);
        assert_eq!(config.flashcard_answer_chars, 200);
        assert_eq!(config.context_chunks, 3);
        assert_eq!(config.max_key_terms, 5);
        assert!(config.key_term_re.is_none());
    }

    #[test]
    fn test_builder_scalars() {
        let config = ParsingConfigBuilder::new()
            .max_chunk_chars(800)
            .max_response_chars(1000)
            .context_chunks(2)
            .max_key_terms(8)
            .build()
            .unwrap();
        assert_eq!(config.max_chunk_chars(), 800);
        assert_eq!(config.max_response_chars(), 1000);
        assert_eq!(config.context_chunks(), 2);
        assert_eq!(config.max_key_terms, 8);
        assert_eq!(config.flashcard_answer_chars, 200);
    }

    #[test]
    fn test_builder_custom_key_term_regex() {
        let config = ParsingConfigBuilder::new()
            .key_term_regex(r"\b[A-Z]{2,}\b")
            .build()
            .unwrap();
        assert!(config.key_term_re.is_some());
    }

    #[test]
    fn test_builder_invalid_regex() {
        let result = ParsingConfigBuilder::new().key_term_regex(r"[invalid").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_keyword_extend_and_replace() {
        let config = ParsingConfigBuilder::new()
            .add_instruction_keyword(ResponseKind::Summary, "overview")
            .build()
            .unwrap();
        match &config.instruction_keywords {
            ListOverride::Extend(v) => assert_eq!(v.len(), 1),
            other => panic!("expected Extend, got {:?}", other),
        }

        let config = ParsingConfigBuilder::new()
            .set_instruction_keywords(vec![InstructionKeyword::new(ResponseKind::Quiz, "test")])
            .add_instruction_keyword(ResponseKind::Quiz, "exam")
            .build()
            .unwrap();
        match &config.instruction_keywords {
            ListOverride::Replace(v) => assert_eq!(v.len(), 2),
            other => panic!("expected Replace, got {:?}", other),
        }
    }

    #[test]
    fn test_list_override_resolve() {
        let defaults = vec!["a".to_string(), "b".to_string()];

        let d: ListOverride<String> = ListOverride::Default;
        assert_eq!(d.resolve(&defaults), defaults);

        let r: ListOverride<String> = ListOverride::Replace(vec!["x".to_string()]);
        assert_eq!(r.resolve(&defaults), vec!["x".to_string()]);

        let e: ListOverride<String> = ListOverride::Extend(vec!["c".to_string()]);
        assert_eq!(
            e.resolve(&defaults),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
    }
}
