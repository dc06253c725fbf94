//! # study-pdf
//!
//! Upload a PDF to a study backend and turn its reply into a summary and a
//! set of quiz questions.
//!
//! ## Flow
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Intake     accept exactly application/pdf, hold it in memory
//!  ├─ 2. Dispatch   multipart POST {base}/api/study/{operation}
//!  ├─ 3. Normalise  summary + first matching question shape
//!  └─ 4. View       reveal flags, toggles, render helpers
//! ```
//!
//! Three operations exist: `summarize`, `generate-questions` and
//! `generate-study-material`. Only one request runs at a time per session.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use study_pdf::{Operation, StudyConfig, StudySession};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = StudyConfig::builder()
//!         .base_url("http://localhost:8080")
//!         .build()?;
//!     let session = StudySession::with_http(config, Some("user-123".into()))?;
//!
//!     session.select_path("notes.pdf").await?;
//!     session.run(Operation::GenerateStudyMaterial).await?;
//!
//!     let view = session.view();
//!     if let Some(summary) = view.expanded_summary() {
//!         println!("{summary}");
//!     }
//!     for (i, q) in view.questions().iter().enumerate() {
//!         println!("{}. {}", i + 1, q.question);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `study-pdf` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! study-pdf = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod backend;
pub mod config;
pub mod error;
pub mod intake;
pub mod model;
pub mod normalize;
pub mod observer;
pub mod operation;
pub mod present;
pub mod session;
pub mod view;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use backend::{HttpBackend, StudyBackend, StudyRequest};
pub use config::{StudyConfig, StudyConfigBuilder, DEFAULT_BASE_URL, DEFAULT_QUESTION_COUNT};
pub use error::StudyError;
pub use intake::{FileCandidate, Selection, UploadSlot};
pub use model::{OperationResult, StudyQuestion, UploadedFile, PDF_MIME};
pub use normalize::{normalize, Normalized, QuestionUpdate};
pub use observer::{NoopObserver, SessionObserver, SharedObserver};
pub use operation::Operation;
pub use present::{difficulty_indicator, question_type_symbol, Indicator};
pub use session::{InvokeOutcome, SkipReason, StudySession};
pub use view::{RevealState, ViewState};
