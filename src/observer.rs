//! Callback trait for session events.
//!
//! Inject an [`Arc<dyn SessionObserver>`] via
//! [`crate::config::StudyConfigBuilder::observer`] to drive a UI from the
//! session: disable buttons while a request is in flight, show a blocking
//! alert on failure, expand panels as results arrive.
//!
//! # Example
//!
//! ```rust
//! use study_pdf::{SessionObserver, StudyConfig};
//! use std::sync::{Arc, Mutex};
//!
//! #[derive(Default)]
//! struct AlertLog {
//!     alerts: Mutex<Vec<String>>,
//! }
//!
//! impl SessionObserver for AlertLog {
//!     fn on_alert(&self, message: &str) {
//!         self.alerts.lock().unwrap().push(message.to_string());
//!     }
//! }
//!
//! let config = StudyConfig::builder()
//!     .observer(Arc::new(AlertLog::default()) as Arc<dyn SessionObserver>)
//!     .build()
//!     .unwrap();
//! ```

use crate::model::OperationResult;
use crate::operation::Operation;
use std::sync::Arc;

/// Receives session events. All methods default to no-ops.
///
/// Implementations must be `Send + Sync`; a session may be shared across
/// tasks even though only one request runs at a time.
pub trait SessionObserver: Send + Sync {
    /// A PDF was accepted by intake.
    fn on_file_selected(&self, name: &str, len: usize) {
        let _ = (name, len);
    }

    /// A selection was ignored because its declared type was not PDF.
    fn on_file_ignored(&self, name: &str, content_type: &str) {
        let _ = (name, content_type);
    }

    /// The in-flight flag changed. `true` means controls should be disabled.
    fn on_processing_changed(&self, processing: bool) {
        let _ = processing;
    }

    /// A request is about to be sent.
    fn on_request_start(&self, operation: Operation) {
        let _ = operation;
    }

    /// A request succeeded and its result was applied to the view.
    fn on_request_complete(&self, operation: Operation, result: &OperationResult) {
        let _ = (operation, result);
    }

    /// A request failed. This is the only user-facing failure notice.
    fn on_alert(&self, message: &str) {
        let _ = message;
    }
}

/// An observer that ignores every event. Default in [`crate::StudyConfig`].
pub struct NoopObserver;

impl SessionObserver for NoopObserver {}

/// Convenience alias matching the type stored in [`crate::StudyConfig`].
pub type SharedObserver = Arc<dyn SessionObserver>;
