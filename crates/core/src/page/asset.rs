use std::fmt;

use uuid::Uuid;

const MIB: u64 = 1024 * 1024;

/// Resolved-or-pending pointer to a hosted file.
///
/// Only `LocalPath` counts as saved state. `Pending` exists inside an active
/// draft while an ingestion task is in flight and must never reach the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetReference {
    Empty,
    LocalPath(String),
    ExternalUrl(String),
    Pending(Uuid),
}

impl AssetReference {
    /// Classify a wire string: empty, absolute http(s) URL, or a local path.
    pub fn from_wire(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            AssetReference::Empty
        } else if raw.starts_with("http://") || raw.starts_with("https://") {
            AssetReference::ExternalUrl(raw.to_string())
        } else {
            AssetReference::LocalPath(raw.to_string())
        }
    }

    /// The string the backend stores. `Pending` has no wire form; callers
    /// are expected to have resolved it before serializing.
    pub fn as_wire_str(&self) -> &str {
        match self {
            AssetReference::Empty | AssetReference::Pending(_) => "",
            AssetReference::LocalPath(path) => path,
            AssetReference::ExternalUrl(url) => url,
        }
    }

    /// Usable as a saved value: a local path or an external URL.
    pub fn is_resolved(&self) -> bool {
        matches!(
            self,
            AssetReference::LocalPath(_) | AssetReference::ExternalUrl(_)
        )
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, AssetReference::Pending(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, AssetReference::Empty)
    }
}

impl Default for AssetReference {
    fn default() -> Self {
        AssetReference::Empty
    }
}

/// The kinds of files the backend hosts, with their client-side limits and
/// wire naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Pdf,
    Image,
    Audio,
}

impl AssetKind {
    pub fn max_bytes(self) -> u64 {
        match self {
            AssetKind::Pdf | AssetKind::Audio => 50 * MIB,
            AssetKind::Image => 10 * MIB,
        }
    }

    pub fn max_megabytes(self) -> u64 {
        self.max_bytes() / MIB
    }

    pub fn accepts_content_type(self, content_type: &str) -> bool {
        let content_type = content_type.to_ascii_lowercase();
        match self {
            AssetKind::Pdf => content_type == "application/pdf",
            AssetKind::Image => content_type.starts_with("image/"),
            AssetKind::Audio => matches!(
                content_type.as_str(),
                "audio/mpeg"
                    | "audio/mp3"
                    | "audio/wav"
                    | "audio/x-wav"
                    | "audio/mp4"
                    | "audio/aac"
                    | "audio/ogg"
            ),
        }
    }

    /// Multipart form field name on the upload endpoint.
    pub fn field_name(self) -> &'static str {
        match self {
            AssetKind::Pdf => "pdf",
            AssetKind::Image => "image",
            AssetKind::Audio => "audio",
        }
    }

    /// Response key carrying the hosted path, e.g. `pdfUrl`.
    pub fn url_key(self) -> &'static str {
        match self {
            AssetKind::Pdf => "pdfUrl",
            AssetKind::Image => "imageUrl",
            AssetKind::Audio => "audioUrl",
        }
    }

    /// Path segment of the fetch-and-localize endpoint.
    pub fn download_endpoint(self) -> &'static str {
        match self {
            AssetKind::Pdf => "download-pdf-from-url",
            AssetKind::Image => "download-image-from-url",
            AssetKind::Audio => "download-audio-from-url",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AssetKind::Pdf => "pdf",
            AssetKind::Image => "image",
            AssetKind::Audio => "audio",
        };
        write!(f, "{name}")
    }
}

/// An operator-supplied file headed for the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        let file_name = file_name.into();
        let mut content_type = content_type.into();
        if content_type.is_empty() {
            content_type = content_type_for_extension(&file_name)
                .unwrap_or("application/octet-stream")
                .to_string();
        }
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Extension fallback for browsers/tools that hand over files with no type.
fn content_type_for_extension(file_name: &str) -> Option<&'static str> {
    let ext = file_name.rsplit('.').next()?.to_ascii_lowercase();
    match ext.as_str() {
        "pdf" => Some("application/pdf"),
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        "mp3" => Some("audio/mpeg"),
        "wav" => Some("audio/wav"),
        "m4a" => Some("audio/mp4"),
        "aac" => Some("audio/aac"),
        "ogg" => Some("audio/ogg"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_wire_strings() {
        assert_eq!(AssetReference::from_wire(""), AssetReference::Empty);
        assert_eq!(AssetReference::from_wire("   "), AssetReference::Empty);
        assert_eq!(
            AssetReference::from_wire("/uploads/pdfs/report.pdf"),
            AssetReference::LocalPath("/uploads/pdfs/report.pdf".into())
        );
        assert_eq!(
            AssetReference::from_wire("https://example.com/a.pdf"),
            AssetReference::ExternalUrl("https://example.com/a.pdf".into())
        );
    }

    #[test]
    fn pending_has_no_wire_form() {
        let pending = AssetReference::Pending(Uuid::new_v4());
        assert_eq!(pending.as_wire_str(), "");
        assert!(!pending.is_resolved());
        assert!(pending.is_pending());
    }

    #[test]
    fn kind_limits() {
        assert_eq!(AssetKind::Pdf.max_megabytes(), 50);
        assert_eq!(AssetKind::Audio.max_megabytes(), 50);
        assert_eq!(AssetKind::Image.max_megabytes(), 10);
    }

    #[test]
    fn kind_content_types() {
        assert!(AssetKind::Pdf.accepts_content_type("application/pdf"));
        assert!(!AssetKind::Pdf.accepts_content_type("text/html"));
        assert!(AssetKind::Image.accepts_content_type("image/png"));
        assert!(AssetKind::Image.accepts_content_type("image/webp"));
        assert!(!AssetKind::Image.accepts_content_type("application/pdf"));
        assert!(AssetKind::Audio.accepts_content_type("audio/mpeg"));
        assert!(AssetKind::Audio.accepts_content_type("AUDIO/MPEG"));
        assert!(!AssetKind::Audio.accepts_content_type("video/mp4"));
    }

    #[test]
    fn upload_guesses_missing_content_type() {
        let file = FileUpload::new("report.pdf", "", vec![1, 2, 3]);
        assert_eq!(file.content_type, "application/pdf");

        let file = FileUpload::new("episode.mp3", "", vec![]);
        assert_eq!(file.content_type, "audio/mpeg");

        let file = FileUpload::new("mystery.bin", "", vec![]);
        assert_eq!(file.content_type, "application/octet-stream");
    }
}
