pub mod backend;
pub mod config_file;
pub mod session;

// Re-export for convenience
pub use backend::{BackendError, PdfBackend, PdfText};
pub use session::{SessionAction, SessionRecord, StudySession, StudyStats};

/// Default upper bound, in characters, for a single chunk.
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 500;

/// Default number of context characters embedded in a templated response.
pub const DEFAULT_MAX_RESPONSE_CHARS: usize = 500;

/// Number of leading chunks joined into the response context.
pub const DEFAULT_CONTEXT_CHUNKS: usize = 3;

/// A bounded-length, sentence-aligned segment of normalized document text.
///
/// Chunks keep the `". "` terminator appended during accumulation.
pub type Chunk = String;

/// Output of processing one batch of documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessedBatch {
    /// Chunks in original document order.
    pub chunks: Vec<Chunk>,
    /// Sum of page counts across every file in the batch.
    pub total_pages: usize,
    /// Number of files in the batch.
    pub file_count: usize,
}

impl ProcessedBatch {
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}
