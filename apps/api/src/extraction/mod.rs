//! Text extraction: turns an uploaded resume (PDF, DOCX or TXT) into plain text.
//!
//! The format is chosen from the file name alone. PDF and DOCX parsing are
//! delegated to `DocumentReader` implementations held by `TextExtractor`, so the
//! dispatch can be exercised with fake readers.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, info};

use crate::errors::AppError;

pub mod docx;
pub mod handlers;
pub mod pdf;

pub use docx::DocxReader;
pub use pdf::PdfReader;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ExtractError {
    #[error("Unsupported file type. Use PDF, DOCX, or TXT.")]
    UnsupportedFormat,

    #[error("{0}")]
    ParseFailure(String),
}

/// Closed set of upload formats. Anything else is rejected before parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Txt,
}

impl DocumentFormat {
    /// Lowercases `filename` and looks at the text after its final `.`.
    /// A name without a `.` has no extension and yields `None`.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let lower = filename.to_lowercase();
        let (_, ext) = lower.rsplit_once('.')?;
        match ext {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "txt" => Some(Self::Txt),
            _ => None,
        }
    }
}

/// A format-specific parser that projects a document onto its raw text.
pub trait DocumentReader: Send + Sync {
    fn read_text(&self, bytes: &[u8]) -> Result<String, ExtractError>;
}

/// Dispatches uploads to the reader for their format.
#[derive(Clone)]
pub struct TextExtractor {
    pdf: Arc<dyn DocumentReader>,
    docx: Arc<dyn DocumentReader>,
}

impl TextExtractor {
    pub fn new(pdf: Arc<dyn DocumentReader>, docx: Arc<dyn DocumentReader>) -> Self {
        Self { pdf, docx }
    }

    /// `pdf-extract` for PDF, `dotext` for DOCX.
    pub fn with_default_readers() -> Self {
        Self::new(Arc::new(PdfReader), Arc::new(DocxReader))
    }

    /// Returns the document's text. Never mutates or retains `bytes`.
    pub fn extract(&self, bytes: &[u8], filename: &str) -> Result<String, ExtractError> {
        let format =
            DocumentFormat::from_filename(filename).ok_or(ExtractError::UnsupportedFormat)?;
        debug!("Extracting {} bytes from {filename} as {format:?}", bytes.len());

        match format {
            DocumentFormat::Txt => Ok(String::from_utf8_lossy(bytes).into_owned()),
            DocumentFormat::Docx => self.docx.read_text(bytes),
            DocumentFormat::Pdf => self.pdf.read_text(bytes),
        }
    }

    /// Runs `extract` on the blocking pool, bounded by `deadline`.
    /// A reader that panics is reported as a parse failure.
    pub async fn extract_in_background(
        &self,
        bytes: Bytes,
        filename: String,
        deadline: Duration,
    ) -> Result<String, AppError> {
        let extractor = self.clone();
        let name = filename.clone();
        let task = tokio::task::spawn_blocking(move || extractor.extract(&bytes, &name));

        let text = match tokio::time::timeout(deadline, task).await {
            Err(_) => return Err(AppError::ExtractionTimeout),
            Ok(Err(join_err)) => {
                return Err(AppError::ParseFailure(format!(
                    "Failed to extract text: {join_err}"
                )))
            }
            Ok(Ok(result)) => result?,
        };

        info!("Extracted {} chars from {filename}", text.chars().count());
        Ok(text)
    }
}
