use tracing::debug;

use super::{DocumentReader, ExtractError};

/// Whole-document PDF text via `pdf-extract`.
///
/// Text runs are returned as the library decodes them; there is no per-run
/// percent-decoding step, so a malformed run cannot fail extraction on its own.
/// Structural errors (bad xref, encrypted streams, truncated files) surface as
/// `ExtractError::ParseFailure` with the library's message.
pub struct PdfReader;

impl DocumentReader for PdfReader {
    fn read_text(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        let text = pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ExtractError::ParseFailure(format!("Failed to parse PDF: {e}")))?;

        if text.trim().is_empty() {
            debug!("PDF has no extractable text (scanned or image-only?)");
        }
        Ok(text)
    }
}
