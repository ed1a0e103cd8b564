//! Seam between the editing session and whatever performs asset I/O.
//!
//! The session validates files and decides *when* to ingest; an
//! [`AssetIngestor`] implementation decides *how* (the client crate ships an
//! HTTP-backed one, tests ship stubs).

use async_trait::async_trait;
use thiserror::Error;

use crate::page::{AssetKind, FileUpload};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    #[error("{found} is not an accepted file type for {kind} uploads")]
    InvalidFileType { kind: AssetKind, found: String },
    #[error("file is larger than the {limit_mb} MB limit for {kind} uploads")]
    FileTooLarge {
        kind: AssetKind,
        size: u64,
        limit_mb: u64,
    },
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("could not fetch the linked file: {0}")]
    UrlIngestionFailed(String),
}

/// Check a file against the per-kind allow-list and size ceiling. Runs
/// before any network traffic; a rejected file never leaves the machine.
pub fn check_upload(kind: AssetKind, file: &FileUpload) -> Result<(), IngestError> {
    if !kind.accepts_content_type(&file.content_type) {
        return Err(IngestError::InvalidFileType {
            kind,
            found: file.content_type.clone(),
        });
    }
    if file.size() > kind.max_bytes() {
        return Err(IngestError::FileTooLarge {
            kind,
            size: file.size(),
            limit_mb: kind.max_megabytes(),
        });
    }
    Ok(())
}

/// Turns operator-supplied files and URLs into stable backend-hosted paths.
#[async_trait]
pub trait AssetIngestor: Send + Sync {
    /// Upload a (pre-validated) file; returns the hosted path.
    async fn upload(
        &self,
        kind: AssetKind,
        subfolder: &str,
        file: FileUpload,
    ) -> Result<String, IngestError>;

    /// Ask the backend to fetch an external URL and host a local copy;
    /// returns the hosted path.
    async fn localize_url(
        &self,
        kind: AssetKind,
        subfolder: &str,
        url: &str,
    ) -> Result<String, IngestError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversize_pdf_is_rejected() {
        let mut file = FileUpload::new("big.pdf", "application/pdf", vec![0u8; 1024]);
        assert!(check_upload(AssetKind::Pdf, &file).is_ok());

        // 60 MB against the 50 MB ceiling.
        file.bytes = vec![0u8; 60 * 1024 * 1024];
        let err = check_upload(AssetKind::Pdf, &file).unwrap_err();
        assert!(matches!(err, IngestError::FileTooLarge { limit_mb: 50, .. }));
    }

    #[test]
    fn wrong_type_is_rejected_before_size() {
        let file = FileUpload::new("notes.txt", "text/plain", vec![0u8; 10]);
        let err = check_upload(AssetKind::Pdf, &file).unwrap_err();
        assert!(matches!(err, IngestError::InvalidFileType { .. }));
    }
}
