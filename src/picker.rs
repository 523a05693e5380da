//! Local document selection.
//!
//! The picker is the device's file-selection capability, restricted to PDF
//! documents. Dismissing it is [`AcquireError::SelectionCancelled`], which
//! callers keep quiet about.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;
use url::Url;

use crate::encoder::PDF_MEDIA_TYPE;
use crate::error::{AcquireError, Result};

/// Lets the user choose one local PDF.
#[async_trait]
pub trait DocumentPicker: Send + Sync {
    /// Media types the picker offers.
    fn media_types(&self) -> &[&str] {
        &[PDF_MEDIA_TYPE]
    }

    /// Returns a `file://` URI for the chosen document.
    async fn pick_local(&self) -> Result<String>;
}

/// Picker over a choice made up front, e.g. a command-line argument.
///
/// `None` behaves like a dismissed dialog.
#[derive(Debug, Clone, Default)]
pub struct PathPicker {
    choice: Option<PathBuf>,
}

impl PathPicker {
    pub fn new(choice: Option<PathBuf>) -> Self {
        Self { choice }
    }
}

#[async_trait]
impl DocumentPicker for PathPicker {
    async fn pick_local(&self) -> Result<String> {
        match &self.choice {
            Some(path) => local_uri(path).await,
            None => Err(AcquireError::SelectionCancelled),
        }
    }
}

/// Picker that asks for a path on standard input. An empty answer cancels.
#[derive(Debug, Clone, Default)]
pub struct PromptPicker;

#[async_trait]
impl DocumentPicker for PromptPicker {
    async fn pick_local(&self) -> Result<String> {
        eprint!("📄 Path to a PDF (empty to cancel): ");
        let mut line = String::new();
        let read = BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
        let answer = line.trim();
        if read == 0 || answer.is_empty() {
            return Err(AcquireError::SelectionCancelled);
        }
        local_uri(Path::new(answer)).await
    }
}

/// `true` when `path` carries a `.pdf` extension, ignoring case.
pub fn is_pdf_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Validate a chosen path and turn it into a `file://` URI.
async fn local_uri(path: &Path) -> Result<String> {
    if !is_pdf_path(path) {
        return Err(AcquireError::NotPdf(path.to_path_buf()));
    }
    let absolute = tokio::fs::canonicalize(path).await?;
    if !tokio::fs::metadata(&absolute).await?.is_file() {
        return Err(AcquireError::NotPdf(absolute));
    }
    let uri = Url::from_file_path(&absolute)
        .map_err(|()| AcquireError::NotPdf(absolute.clone()))?;
    debug!(uri = %uri, "Picked local document");
    Ok(uri.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_extension_is_case_insensitive() {
        assert!(is_pdf_path(Path::new("a.pdf")));
        assert!(is_pdf_path(Path::new("/x/B.PDF")));
        assert!(!is_pdf_path(Path::new("a.pdf.txt")));
        assert!(!is_pdf_path(Path::new("pdf")));
    }

    #[test]
    fn missing_choice_is_cancellation() {
        let err = tokio_test::block_on(PathPicker::default().pick_local()).unwrap_err();
        assert!(err.is_cancellation());
    }

    #[test]
    fn non_pdf_choice_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();
        let err = tokio_test::block_on(PathPicker::new(Some(path)).pick_local()).unwrap_err();
        assert!(matches!(err, AcquireError::NotPdf(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let picker = PathPicker::new(Some(dir.path().join("gone.pdf")));
        let err = tokio_test::block_on(picker.pick_local()).unwrap_err();
        assert!(matches!(err, AcquireError::Io(_)));
    }

    #[tokio::test]
    async fn chosen_pdf_becomes_file_uri() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan 01.pdf");
        std::fs::write(&path, b"%PDF").unwrap();

        let uri = PathPicker::new(Some(path.clone())).pick_local().await.unwrap();
        assert!(uri.starts_with("file://"), "{uri}");
        assert!(uri.ends_with("scan%2001.pdf"), "{uri}");
        let round_trip = Url::parse(&uri).unwrap().to_file_path().unwrap();
        assert_eq!(round_trip, std::fs::canonicalize(&path).unwrap());
    }

    #[test]
    fn pickers_offer_only_pdf() {
        assert_eq!(PathPicker::default().media_types(), &[PDF_MEDIA_TYPE]);
    }
}
