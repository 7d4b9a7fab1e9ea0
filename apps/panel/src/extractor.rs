//! Text Extractor — turns uploaded PDF bytes into plain text, page by page.
//!
//! The PDF parsing itself is delegated to a [`PdfBackend`]. Parsing is
//! CPU-bound and the backend may panic on hostile input, so it always runs
//! inside `tokio::task::spawn_blocking`.

use std::sync::Arc;

use bytes::Bytes;
use tracing::debug;

use crate::errors::PanelError;

/// PDF files must start with this marker within the first kilobyte.
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_MAGIC_WINDOW: usize = 1024;

/// The external PDF library, reduced to the one thing the panel needs.
pub trait PdfBackend: Send + Sync {
    /// For each page in document order, that page's text fragments in
    /// reading order. Fails if `bytes` is not a readable document.
    fn page_fragments(&self, bytes: &[u8]) -> Result<Vec<Vec<String>>, String>;
}

/// `pdf-extract` backend. A page's fragments are its non-blank lines.
pub struct PdfExtractBackend;

impl PdfBackend for PdfExtractBackend {
    fn page_fragments(&self, bytes: &[u8]) -> Result<Vec<Vec<String>>, String> {
        let pages =
            pdf_extract::extract_text_from_mem_by_pages(bytes).map_err(|e| e.to_string())?;
        Ok(pages
            .iter()
            .map(|page| {
                page.lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(String::from)
                    .collect()
            })
            .collect())
    }
}

#[derive(Clone)]
pub struct TextExtractor {
    backend: Arc<dyn PdfBackend>,
}

impl TextExtractor {
    pub fn new(backend: Arc<dyn PdfBackend>) -> Self {
        Self { backend }
    }

    /// Extracts the whole document: fragments joined by single spaces, each
    /// page terminated by `\n`. An N-page document yields N lines.
    pub async fn extract_text(&self, bytes: Bytes) -> Result<String, PanelError> {
        let backend = self.backend.clone();
        let pages = tokio::task::spawn_blocking(move || backend.page_fragments(&bytes))
            .await
            .map_err(|e| PanelError::Extraction(format!("PDF parser aborted: {e}")))?
            .map_err(PanelError::Extraction)?;

        debug!("Extracted {} pages", pages.len());
        Ok(join_pages(&pages))
    }
}

/// Cheap content sniff used to reject non-PDF uploads before any work starts.
pub fn looks_like_pdf(bytes: &[u8]) -> bool {
    let window = &bytes[..bytes.len().min(PDF_MAGIC_WINDOW)];
    window.windows(PDF_MAGIC.len()).any(|w| w == PDF_MAGIC)
}

fn join_pages(pages: &[Vec<String>]) -> String {
    let mut text = String::new();
    for fragments in pages {
        // A fragment must not smuggle a page break into the output.
        let line = fragments
            .iter()
            .map(|f| f.replace(['\r', '\n'], " "))
            .collect::<Vec<_>>()
            .join(" ");
        text.push_str(&line);
        text.push('\n');
    }
    text
}
