use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

use studymate_core::{BackendError, PdfBackend, ProcessedBatch};
use studymate_parsing::StudyPipeline;
use studymate_parsing::text_processing::expand_ligatures;

// Re-export domain types for convenience
pub use studymate_core::{Chunk, StudySession};

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("not a PDF file: {}", .0.display())]
    UnsupportedFile(PathBuf),
    #[error("{}: {source}", .path.display())]
    Backend {
        path: PathBuf,
        #[source]
        source: BackendError,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Progress events emitted while a batch is processed.
#[derive(Debug, Clone)]
pub enum IngestProgress {
    Extracting {
        index: usize,
        total: usize,
        path: PathBuf,
    },
    Extracted {
        index: usize,
        total: usize,
        pages: usize,
    },
    Chunked {
        chunks: usize,
    },
}

/// Returns true if the path has a `.pdf` extension and the file starts with `%PDF-`.
pub fn is_pdf_file(path: &Path) -> Result<bool, std::io::Error> {
    let has_ext = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
    if !has_ext {
        return Ok(false);
    }
    let mut magic = [0u8; 5];
    let mut file = std::fs::File::open(path)?;
    match file.read_exact(&mut magic) {
        Ok(()) => Ok(&magic == b"%PDF-"),
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(e),
    }
}

/// Extract, concatenate and chunk a batch of PDFs.
///
/// Each page's text is followed by a newline and each file's text by a
/// blank line, then the whole batch is chunked as one document.
pub fn process_files(
    paths: &[PathBuf],
    backend: &dyn PdfBackend,
    pipeline: &StudyPipeline,
) -> Result<ProcessedBatch, IngestError> {
    process_files_with_progress(paths, backend, pipeline, |_| {})
}

/// Same as [`process_files`], reporting each step to `on_progress`.
pub fn process_files_with_progress(
    paths: &[PathBuf],
    backend: &dyn PdfBackend,
    pipeline: &StudyPipeline,
    mut on_progress: impl FnMut(IngestProgress),
) -> Result<ProcessedBatch, IngestError> {
    let total = paths.len();
    let mut all_text = String::new();
    let mut total_pages = 0;

    for (index, path) in paths.iter().enumerate() {
        if !path.exists() {
            return Err(IngestError::NotFound(path.clone()));
        }
        if !is_pdf_file(path)? {
            return Err(IngestError::UnsupportedFile(path.clone()));
        }

        on_progress(IngestProgress::Extracting {
            index,
            total,
            path: path.clone(),
        });

        let pdf = backend
            .extract_pages(path)
            .map_err(|source| IngestError::Backend {
                path: path.clone(),
                source,
            })?;
        let text = pdf.joined();
        if text.trim().is_empty() {
            tracing::warn!(path = %path.display(), "no extractable text (scanned PDF?)");
        }
        tracing::info!(path = %path.display(), pages = pdf.page_count(), "extracted text");

        all_text.push_str(&text);
        all_text.push_str("\n\n");
        total_pages += pdf.page_count();

        on_progress(IngestProgress::Extracted {
            index,
            total,
            pages: pdf.page_count(),
        });
    }

    let chunks = pipeline.chunk_text(&expand_ligatures(&all_text));
    on_progress(IngestProgress::Chunked {
        chunks: chunks.len(),
    });

    Ok(ProcessedBatch {
        chunks,
        total_pages,
        file_count: total,
    })
}
