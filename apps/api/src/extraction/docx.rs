use std::io::{Read, Write};

use dotext::MsDoc;
use tracing::debug;

use super::{DocumentReader, ExtractError};

/// DOCX raw-text projection via `dotext`.
///
/// `dotext` only opens paths, so the upload is spooled to a temp file that is
/// deleted when it goes out of scope.
pub struct DocxReader;

impl DocumentReader for DocxReader {
    fn read_text(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        let mut spool = tempfile::Builder::new()
            .prefix("upload-")
            .suffix(".docx")
            .tempfile()
            .map_err(|e| ExtractError::ParseFailure(format!("Failed to buffer DOCX: {e}")))?;
        spool
            .write_all(bytes)
            .and_then(|_| spool.flush())
            .map_err(|e| ExtractError::ParseFailure(format!("Failed to buffer DOCX: {e}")))?;

        let mut doc = dotext::Docx::open(spool.path())
            .map_err(|e| ExtractError::ParseFailure(format!("Failed to open DOCX: {e}")))?;

        let mut text = String::new();
        doc.read_to_string(&mut text)
            .map_err(|e| ExtractError::ParseFailure(format!("Failed to read DOCX: {e}")))?;

        if text.trim().is_empty() {
            debug!("DOCX has no extractable text");
        }
        Ok(text)
    }
}
