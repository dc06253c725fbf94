//! The study session: intake → dispatch → normalise → view.
//!
//! A [`StudySession`] owns one upload slot, one view state and one in-flight
//! flag. Its methods take `&self` so a UI can hold it in an `Arc` and call
//! it from event handlers; the state behind it is only touched in short
//! synchronous sections, never across the network `.await`.
//!
//! ## One request at a time
//!
//! The in-flight flag is claimed with a compare-and-swap before anything is
//! sent, so overlapping calls are rejected by the session itself and not
//! only by a disabled button. The flag is released by a drop guard, which
//! runs on success, on failure and if the future is dropped mid-flight.

use crate::backend::{HttpBackend, StudyBackend, StudyRequest};
use crate::config::StudyConfig;
use crate::error::StudyError;
use crate::intake::{FileCandidate, Selection, UploadSlot};
use crate::model::{OperationResult, UploadedFile};
use crate::normalize::{normalize, Normalized};
use crate::observer::SessionObserver;
use crate::operation::Operation;
use crate::view::ViewState;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Why an `invoke` call did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No PDF has been selected.
    NoFile,
    /// No (non-empty) user identifier is available.
    NoUser,
    /// Another request is still in flight.
    Busy,
}

/// Result of an `invoke` call that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvokeOutcome {
    /// A precondition was not met; nothing was sent and nothing changed.
    Skipped(SkipReason),
    /// The backend replied and the view was updated. The result may be
    /// empty if the backend produced no content.
    Completed(OperationResult),
}

/// Holds the in-flight flag for the lifetime of one request.
struct ProcessingGuard<'a> {
    flag: &'a AtomicBool,
    observer: &'a dyn SessionObserver,
}

impl<'a> ProcessingGuard<'a> {
    fn acquire(flag: &'a AtomicBool, observer: &'a dyn SessionObserver) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        observer.on_processing_changed(true);
        Some(Self { flag, observer })
    }
}

impl Drop for ProcessingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
        self.observer.on_processing_changed(false);
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One user's upload-and-study session.
pub struct StudySession {
    config: StudyConfig,
    backend: Arc<dyn StudyBackend>,
    user_id: Option<String>,
    upload: Mutex<UploadSlot>,
    view: Mutex<ViewState>,
    processing: AtomicBool,
}

impl StudySession {
    /// Create a session over any backend. `user_id` comes from whatever
    /// login flow the host application already ran.
    pub fn new(
        config: StudyConfig,
        backend: Arc<dyn StudyBackend>,
        user_id: Option<String>,
    ) -> Self {
        Self {
            config,
            backend,
            user_id,
            upload: Mutex::new(UploadSlot::new()),
            view: Mutex::new(ViewState::new()),
            processing: AtomicBool::new(false),
        }
    }

    /// Create a session talking HTTP to `config.base_url`.
    pub fn with_http(config: StudyConfig, user_id: Option<String>) -> Result<Self, StudyError> {
        let backend = HttpBackend::new(&config)?;
        Ok(Self::new(config, Arc::new(backend), user_id))
    }

    pub fn config(&self) -> &StudyConfig {
        &self.config
    }

    // ── Intake ───────────────────────────────────────────────────────────

    /// Offer a file. Non-PDF candidates are ignored without error.
    pub fn select_file(&self, candidate: FileCandidate) -> Selection {
        let name = candidate.name.clone();
        let content_type = candidate.content_type.clone();
        let len = candidate.bytes.len();

        let selection = lock(&self.upload).select_file(candidate);
        match selection {
            Selection::Accepted => {
                info!("File uploaded: {}", name);
                self.config.observer.on_file_selected(&name, len);
            }
            Selection::Ignored => self.config.observer.on_file_ignored(&name, &content_type),
        }
        selection
    }

    /// Read a file from disk, sniff its type and offer it.
    pub async fn select_path(&self, path: impl AsRef<Path>) -> Result<Selection, StudyError> {
        let candidate = FileCandidate::from_path(path).await?;
        Ok(self.select_file(candidate))
    }

    /// A copy of the held file.
    pub fn uploaded_file(&self) -> Option<UploadedFile> {
        lock(&self.upload).file().cloned()
    }

    fn has_file(&self) -> bool {
        !lock(&self.upload).is_empty()
    }

    // ── Dispatch ─────────────────────────────────────────────────────────

    /// True while a request is in flight.
    pub fn is_processing(&self) -> bool {
        self.processing.load(Ordering::Acquire)
    }

    /// Run an operation with its default question setting.
    pub async fn run(&self, operation: Operation) -> Result<InvokeOutcome, StudyError> {
        self.invoke(operation, operation.requests_questions()).await
    }

    /// Send the held file to `operation` and apply the reply.
    ///
    /// Returns `Ok(Skipped(_))` without side effects when there is no file,
    /// no user id, or a request already in flight. Transport and backend
    /// failures are reported to the observer's `on_alert` and returned as
    /// `Err`; the view is left exactly as it was.
    pub async fn invoke(
        &self,
        operation: Operation,
        wants_questions: bool,
    ) -> Result<InvokeOutcome, StudyError> {
        if !self.has_file() {
            debug!("{}: no file selected, skipping", operation);
            return Ok(InvokeOutcome::Skipped(SkipReason::NoFile));
        }
        let Some(user_id) = self.user_id.as_deref().filter(|id| !id.is_empty()) else {
            debug!("{}: no user id, skipping", operation);
            return Ok(InvokeOutcome::Skipped(SkipReason::NoUser));
        };

        let observer = self.config.observer.as_ref();
        let Some(_guard) = ProcessingGuard::acquire(&self.processing, observer) else {
            debug!("{}: request already in flight, skipping", operation);
            return Ok(InvokeOutcome::Skipped(SkipReason::Busy));
        };

        // Re-read under the guard: the slot may have been replaced meanwhile.
        let Some(file) = self.uploaded_file() else {
            return Ok(InvokeOutcome::Skipped(SkipReason::NoFile));
        };

        let request = StudyRequest {
            operation,
            file,
            user_id: user_id.to_string(),
            question_count: wants_questions.then_some(self.config.question_count),
        };

        info!("[{}] sending '{}'", operation, request.file.name);
        observer.on_request_start(operation);
        let start = Instant::now();

        match self.backend.submit(&request).await {
            Ok(payload) => {
                debug!("[{}] response: {}", operation, payload);
                let normalized = normalize(&payload, wants_questions);
                let result = normalized.to_result();
                if result.is_empty() {
                    info!("[{}] backend produced no content", operation);
                }
                self.apply(normalized);
                info!(
                    "[{}] done in {}ms",
                    operation,
                    start.elapsed().as_millis()
                );
                observer.on_request_complete(operation, &result);
                Ok(InvokeOutcome::Completed(result))
            }
            Err(e) => {
                warn!("Error calling {}: {}", operation, e);
                observer.on_alert(&format!("Error: {e}"));
                Err(e)
            }
        }
    }

    // ── View ─────────────────────────────────────────────────────────────

    fn apply(&self, normalized: Normalized) {
        lock(&self.view).apply(normalized);
    }

    /// Snapshot of the current view state.
    pub fn view(&self) -> ViewState {
        lock(&self.view).clone()
    }

    pub fn toggle_summary(&self) {
        lock(&self.view).toggle_summary();
    }

    pub fn toggle_questions(&self) {
        lock(&self.view).toggle_questions();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PDF_MIME;
    use crate::observer::NoopObserver;

    #[test]
    fn guard_is_exclusive_and_releases_on_drop() {
        let flag = AtomicBool::new(false);
        let observer = NoopObserver;

        let first = ProcessingGuard::acquire(&flag, &observer);
        assert!(first.is_some());
        assert!(flag.load(Ordering::SeqCst));
        assert!(ProcessingGuard::acquire(&flag, &observer).is_none());

        drop(first);
        assert!(!flag.load(Ordering::SeqCst));
        assert!(ProcessingGuard::acquire(&flag, &observer).is_some());
    }

    #[test]
    fn select_file_through_session() {
        let session = StudySession::with_http(StudyConfig::default(), Some("u".into())).unwrap();
        assert_eq!(
            session.select_file(FileCandidate::new("a.txt", "text/plain", vec![1])),
            Selection::Ignored
        );
        assert!(session.uploaded_file().is_none());

        assert_eq!(
            session.select_file(FileCandidate::new("notes.pdf", PDF_MIME, vec![1])),
            Selection::Accepted
        );
        assert_eq!(session.uploaded_file().unwrap().name, "notes.pdf");
        assert!(!session.is_processing());
    }
}
