//! Configuration for a study session.
//!
//! Every knob lives in [`StudyConfig`], built via [`StudyConfigBuilder`].
//! The backend base URL is the only value most callers need to set.

use crate::error::StudyError;
use crate::observer::{NoopObserver, SharedObserver};
use std::fmt;
use std::sync::Arc;

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Number of questions asked for by question-generating operations.
pub const DEFAULT_QUESTION_COUNT: u32 = 5;

/// Configuration for a [`crate::session::StudySession`].
///
/// # Example
/// ```rust
/// use study_pdf::StudyConfig;
///
/// let config = StudyConfig::builder()
///     .base_url("https://study.example.com/")
///     .request_timeout_secs(90)
///     .build()
///     .unwrap();
/// assert_eq!(config.base_url, "https://study.example.com");
/// ```
#[derive(Clone)]
pub struct StudyConfig {
    /// Backend root, without trailing slash. Default: [`DEFAULT_BASE_URL`].
    pub base_url: String,

    /// Value sent as `numberOfQuestions`. Default: 5.
    pub question_count: u32,

    /// Optional transport timeout in seconds. Default: none.
    ///
    /// The backend may take a long time on large PDFs; no limit is applied
    /// unless the caller asks for one.
    pub request_timeout_secs: Option<u64>,

    /// `User-Agent` header sent with every request.
    pub user_agent: String,

    /// Receives alerts and state-change events. Default: [`NoopObserver`].
    pub observer: SharedObserver,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            question_count: DEFAULT_QUESTION_COUNT,
            request_timeout_secs: None,
            user_agent: format!("study-pdf/{}", env!("CARGO_PKG_VERSION")),
            observer: Arc::new(NoopObserver),
        }
    }
}

impl fmt::Debug for StudyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StudyConfig")
            .field("base_url", &self.base_url)
            .field("question_count", &self.question_count)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("observer", &"<dyn SessionObserver>")
            .finish()
    }
}

impl StudyConfig {
    /// Create a new builder for `StudyConfig`.
    pub fn builder() -> StudyConfigBuilder {
        StudyConfigBuilder {
            config: Self::default(),
        }
    }

    /// Full endpoint URL for one backend path segment.
    pub fn endpoint(&self, segment: &str) -> String {
        format!("{}/api/study/{}", self.base_url, segment)
    }
}

/// Builder for [`StudyConfig`].
pub struct StudyConfigBuilder {
    config: StudyConfig,
}

impl fmt::Debug for StudyConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StudyConfigBuilder")
            .field("config", &self.config)
            .finish()
    }
}

impl StudyConfigBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into().trim().trim_end_matches('/').to_string();
        self
    }

    pub fn question_count(mut self, n: u32) -> Self {
        self.config.question_count = n;
        self
    }

    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.config.request_timeout_secs = Some(secs);
        self
    }

    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.config.user_agent = ua.into();
        self
    }

    pub fn observer(mut self, observer: SharedObserver) -> Self {
        self.config.observer = observer;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<StudyConfig, StudyError> {
        let c = &self.config;
        if !(c.base_url.starts_with("http://") || c.base_url.starts_with("https://")) {
            return Err(StudyError::InvalidConfig(format!(
                "base URL must start with http:// or https://, got '{}'",
                c.base_url
            )));
        }
        if c.question_count == 0 {
            return Err(StudyError::InvalidConfig(
                "question count must be ≥ 1".into(),
            ));
        }
        if c.request_timeout_secs == Some(0) {
            return Err(StudyError::InvalidConfig(
                "request timeout must be ≥ 1 second".into(),
            ));
        }
        Ok(self.config)
    }
}
