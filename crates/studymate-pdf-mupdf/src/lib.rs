use std::path::Path;

use mupdf::{Document, TextPageFlags};

use studymate_core::{BackendError, PdfBackend, PdfText};

/// MuPDF-based implementation of [`PdfBackend`].
///
/// This crate isolates the AGPL mupdf dependency so that the chunking and
/// response crates do not transitively depend on it.
#[derive(Debug, Clone, Copy, Default)]
pub struct MupdfBackend;

fn extraction_error(e: mupdf::Error) -> BackendError {
    BackendError::ExtractionError(e.to_string())
}

/// Text of one page: every line of every block, each ending in a newline.
fn page_text(page: &mupdf::Page) -> Result<String, BackendError> {
    let text_page = page
        .to_text_page(TextPageFlags::empty())
        .map_err(extraction_error)?;

    let mut text = String::new();
    for block in text_page.blocks() {
        for line in block.lines() {
            text.extend(line.chars().map(|c| c.char().unwrap_or('\u{FFFD}')));
            text.push('\n');
        }
    }
    Ok(text)
}

impl PdfBackend for MupdfBackend {
    fn extract_pages(&self, path: &Path) -> Result<PdfText, BackendError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| BackendError::OpenError("invalid path encoding".into()))?;
        let document =
            Document::open(path_str).map_err(|e| BackendError::OpenError(e.to_string()))?;

        let pages = document
            .pages()
            .map_err(extraction_error)?
            .map(|page| page.map_err(extraction_error).and_then(|p| page_text(&p)))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(path = %path.display(), pages = pages.len(), "extracted PDF pages");
        Ok(PdfText::new(pages))
    }
}
