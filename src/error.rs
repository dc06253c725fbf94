//! Error types for the study-pdf library.
//!
//! Only one class of failure ever reaches the user as an explicit notice:
//! the backend round trip went wrong (network, HTTP status, unreadable
//! reply). Everything else the session resolves locally:
//!
//! * a non-PDF selection is ignored by [`crate::intake::UploadSlot`];
//! * a missing file or user id turns `invoke` into
//!   [`crate::session::InvokeOutcome::Skipped`];
//! * a reply without usable content is a normal, empty
//!   [`crate::model::OperationResult`].
//!
//! [`StudyError`] therefore covers the transport path plus the handful of
//! local failures (config validation, reading a file from disk) that happen
//! before any request exists.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the study-pdf library.
#[derive(Debug, Error)]
pub enum StudyError {
    // ── Transport errors ──────────────────────────────────────────────────
    /// The request never produced an HTTP response (DNS, refused, reset…).
    #[error("Request to '{url}' failed: {detail}\nCheck that the study backend is running.")]
    Transport { url: String, detail: String },

    /// The configured transport timeout elapsed.
    #[error("Request to '{url}' timed out after {secs}s")]
    Timeout { url: String, secs: u64 },

    /// The backend answered with a non-success status.
    #[error("Backend returned HTTP {status} for '{url}': {body}")]
    BackendStatus {
        url: String,
        status: u16,
        body: String,
    },

    /// The backend answered 2xx but the body is not JSON.
    #[error("Backend reply from '{url}' is not valid JSON: {detail}")]
    MalformedResponse { url: String, detail: String },

    // ── Local errors ──────────────────────────────────────────────────────
    /// A file selected by path could not be read.
    #[error("Failed to read '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl StudyError {
    /// True for errors produced by the backend round trip.
    ///
    /// These are the ones the session reports through
    /// [`crate::observer::SessionObserver::on_alert`].
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            StudyError::Transport { .. }
                | StudyError::Timeout { .. }
                | StudyError::BackendStatus { .. }
                | StudyError::MalformedResponse { .. }
        )
    }
}
