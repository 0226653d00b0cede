use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Page-level text extracted from one PDF.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PdfText {
    pub pages: Vec<String>,
}

impl PdfText {
    pub fn new(pages: Vec<String>) -> Self {
        Self { pages }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Concatenate the pages, each followed by a newline.
    pub fn joined(&self) -> String {
        let mut text = String::with_capacity(self.pages.iter().map(|p| p.len() + 1).sum());
        for page in &self.pages {
            text.push_str(page);
            text.push('\n');
        }
        text
    }
}

/// Trait for PDF text extraction backends.
///
/// Implementors provide the low-level text extraction step; chunking and
/// response templating live in `studymate_parsing`.
pub trait PdfBackend: Send + Sync {
    /// Extract the text of every page in a PDF file, in page order.
    fn extract_pages(&self, path: &Path) -> Result<PdfText, BackendError>;
}
