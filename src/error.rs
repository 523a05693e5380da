//! Error taxonomy for document acquisition.
//!
//! Every failure a fetcher, picker or encoder can produce is an
//! [`AcquireError`]. The controller folds all of them into
//! [`Status::Error`](crate::Status::Error) except
//! [`AcquireError::SelectionCancelled`], which is silent.

use std::path::PathBuf;

use thiserror::Error;

/// Acquisition errors
#[derive(Error, Debug)]
pub enum AcquireError {
    /// Transport failure, timeout or non-2xx status.
    #[error("network error for {url}: {message}")]
    Network { url: String, message: String },

    /// The user dismissed the picker without choosing a file.
    #[error("selection cancelled")]
    SelectionCancelled,

    #[error("encoding error: {0}")]
    Encoding(String),

    /// A picked file outside the PDF media type.
    #[error("not a PDF document: {}", .0.display())]
    NotPdf(PathBuf),

    #[error("invalid cache filename: {0:?}")]
    InvalidFilename(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AcquireError {
    pub(crate) fn network(url: &str, err: impl std::fmt::Display) -> Self {
        Self::Network {
            url: url.to_string(),
            message: err.to_string(),
        }
    }

    /// `true` for the one failure a screen should stay quiet about.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::SelectionCancelled)
    }
}

pub type Result<T> = std::result::Result<T, AcquireError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancellation_is_distinguishable_from_network_errors() {
        assert!(AcquireError::SelectionCancelled.is_cancellation());
        assert!(!AcquireError::network("https://example.com/a.pdf", "timed out").is_cancellation());
    }

    #[test]
    fn network_error_message_names_the_url() {
        let err = AcquireError::network("https://example.com/a.pdf", "HTTP status 404 Not Found");
        assert_eq!(
            err.to_string(),
            "network error for https://example.com/a.pdf: HTTP status 404 Not Found"
        );
    }
}
