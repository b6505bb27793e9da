//! Document Reader — turns uploaded resume bytes into plain text.
//!
//! The pipeline only ever sees this trait; the PDF machinery stays behind it
//! so stages can be tested with canned text instead of real documents.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadError {
    /// Extraction succeeded but produced no visible text. Distinguished from
    /// a hard failure so callers can report "empty document" separately.
    #[error("document contains no extractable text")]
    Empty,

    #[error("text extraction failed: {0}")]
    Extract(String),
}

/// Extracts plain text from an uploaded document.
///
/// Carried in `AppState` as `Arc<dyn DocumentReader>`.
#[async_trait]
pub trait DocumentReader: Send + Sync {
    async fn extract_text(&self, source: Bytes) -> Result<String, ReadError>;
}

/// Production reader backed by `pdf-extract`.
///
/// Parsing is CPU-bound, so it runs under `spawn_blocking`; a panic inside the
/// PDF parser surfaces as a `ReadError::Extract` instead of taking down the
/// request task.
pub struct PdfTextReader;

#[async_trait]
impl DocumentReader for PdfTextReader {
    async fn extract_text(&self, source: Bytes) -> Result<String, ReadError> {
        let text =
            tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&source))
                .await
                .map_err(|e| ReadError::Extract(format!("extraction task failed: {e}")))?
                .map_err(|e| ReadError::Extract(e.to_string()))?;

        if text.trim().is_empty() {
            return Err(ReadError::Empty);
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_garbage_bytes_are_an_extract_error() {
        let reader = PdfTextReader;
        let result = reader
            .extract_text(Bytes::from_static(b"this is not a pdf"))
            .await;

        match result {
            Err(ReadError::Extract(_)) => {}
            other => panic!("expected Extract error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_error_message_names_the_condition() {
        let msg = ReadError::Empty.to_string();
        assert!(msg.contains("no extractable text"));
    }
}
