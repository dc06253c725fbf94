//! Upload intake: accept a single PDF and hold it until the next selection.
//!
//! The gate is the *declared* content type, as with a browser file input.
//! Anything that is not exactly `application/pdf` is ignored without an
//! error and without touching the file already held. Content is never
//! inspected beyond that; a backend that dislikes the bytes will say so.
//!
//! Path inputs get their declared type from [`sniff_content_type`], which
//! looks at the extension first and the `%PDF` magic bytes second.

use crate::error::StudyError;
use crate::model::{UploadedFile, PDF_MIME};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Content type declared for files we cannot identify.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// A file offered for selection, before the MIME gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FileCandidate {
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk and declare its type by sniffing.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, StudyError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| StudyError::FileRead {
                path: PathBuf::from(path),
                source,
            })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.pdf".to_string());
        let content_type = sniff_content_type(&name, &bytes).to_string();

        debug!("Read {} ({} bytes, {})", path.display(), bytes.len(), content_type);
        Ok(Self {
            name,
            content_type,
            bytes,
        })
    }
}

/// Declare a content type from a file name and its leading bytes.
pub fn sniff_content_type(name: &str, bytes: &[u8]) -> &'static str {
    let has_pdf_extension = Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

    if has_pdf_extension || bytes.starts_with(b"%PDF") {
        PDF_MIME
    } else {
        OCTET_STREAM
    }
}

/// Result of offering a candidate to [`UploadSlot::select_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Candidate is now the held file.
    Accepted,
    /// Candidate was not a PDF; the slot is unchanged.
    Ignored,
}

/// Holds at most one uploaded file.
#[derive(Debug, Default, Clone)]
pub struct UploadSlot {
    file: Option<UploadedFile>,
}

impl UploadSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a candidate. Only an exact `application/pdf` declaration is
    /// accepted, and acceptance replaces whatever was held before.
    pub fn select_file(&mut self, candidate: FileCandidate) -> Selection {
        if candidate.content_type != PDF_MIME {
            debug!(
                "Ignoring '{}': declared type '{}' is not {}",
                candidate.name, candidate.content_type, PDF_MIME
            );
            return Selection::Ignored;
        }

        debug!("File selected: {}", candidate.name);
        self.file = Some(UploadedFile {
            name: candidate.name,
            content_type: candidate.content_type,
            bytes: candidate.bytes,
        });
        Selection::Accepted
    }

    pub fn file(&self) -> Option<&UploadedFile> {
        self.file.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.file.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf(name: &str) -> FileCandidate {
        FileCandidate::new(name, PDF_MIME, b"%PDF-1.7 body".to_vec())
    }

    #[test]
    fn accepts_pdf() {
        let mut slot = UploadSlot::new();
        assert_eq!(slot.select_file(pdf("notes.pdf")), Selection::Accepted);
        assert_eq!(slot.file().unwrap().name, "notes.pdf");
    }

    #[test]
    fn ignores_non_pdf_and_keeps_prior_file() {
        let mut slot = UploadSlot::new();
        slot.select_file(pdf("first.pdf"));

        for ct in ["text/plain", "image/png", "", "application/PDF", "application/pdf; x=1"] {
            let candidate = FileCandidate::new("other.bin", ct, vec![1, 2, 3]);
            assert_eq!(slot.select_file(candidate), Selection::Ignored, "{ct:?}");
            assert_eq!(slot.file().unwrap().name, "first.pdf");
        }
    }

    #[test]
    fn ignored_selection_on_empty_slot_stays_empty() {
        let mut slot = UploadSlot::new();
        slot.select_file(FileCandidate::new("a.docx", "application/msword", vec![]));
        assert!(slot.is_empty());
    }

    #[test]
    fn new_pdf_replaces_old() {
        let mut slot = UploadSlot::new();
        slot.select_file(pdf("first.pdf"));
        slot.select_file(pdf("second.pdf"));
        assert_eq!(slot.file().unwrap().name, "second.pdf");
    }

    #[test]
    fn sniff_by_extension_then_magic() {
        assert_eq!(sniff_content_type("Lecture.PDF", b""), PDF_MIME);
        assert_eq!(sniff_content_type("scan", b"%PDF-1.4"), PDF_MIME);
        assert_eq!(sniff_content_type("notes.txt", b"hello"), OCTET_STREAM);
        assert_eq!(sniff_content_type("", b""), OCTET_STREAM);
    }
}
