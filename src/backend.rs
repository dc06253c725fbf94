//! Backend seam: one multipart POST per operation.
//!
//! [`StudyBackend`] is the only place the session touches the network.
//! [`HttpBackend`] is the real implementation on top of `reqwest`; tests and
//! embedders can supply their own (a scripted fake, a caching layer…) by
//! putting an `Arc<dyn StudyBackend>` into the session.
//!
//! ## Wire format
//!
//! ```text
//! POST {base}/api/study/{operation}
//! Content-Type: multipart/form-data
//!
//!   file               PDF bytes, original file name, application/pdf
//!   userId             caller's identifier
//!   numberOfQuestions  "5" (question-generating operations only)
//! ```
//!
//! The reply is decoded as untyped JSON; shape decisions belong to
//! [`crate::normalize`].

use crate::config::StudyConfig;
use crate::error::StudyError;
use crate::model::UploadedFile;
use crate::operation::Operation;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Longest backend error body kept in [`StudyError::BackendStatus`].
const MAX_ERROR_BODY_CHARS: usize = 300;

/// Everything needed to send one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyRequest {
    pub operation: Operation,
    pub file: UploadedFile,
    pub user_id: String,
    /// `Some(n)` adds `numberOfQuestions = n` to the form.
    pub question_count: Option<u32>,
}

impl StudyRequest {
    /// Text fields of the multipart form, in send order.
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("userId", self.user_id.clone())];
        if let Some(n) = self.question_count {
            fields.push(("numberOfQuestions", n.to_string()));
        }
        fields
    }
}

/// Sends a [`StudyRequest`] and returns the decoded JSON reply.
#[async_trait]
pub trait StudyBackend: Send + Sync {
    async fn submit(&self, request: &StudyRequest) -> Result<Value, StudyError>;
}

/// `reqwest`-based backend talking to `{base}/api/study/*`.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    config: StudyConfig,
}

impl HttpBackend {
    pub fn new(config: &StudyConfig) -> Result<Self, StudyError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| StudyError::Internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Endpoint URL for an operation.
    pub fn url_for(&self, operation: Operation) -> String {
        self.config.endpoint(operation.path_segment())
    }

    fn build_form(request: &StudyRequest) -> Result<Form, StudyError> {
        let part = Part::bytes(request.file.bytes.clone())
            .file_name(request.file.name.clone())
            .mime_str(&request.file.content_type)
            .map_err(|e| {
                StudyError::Internal(format!(
                    "Invalid content type '{}': {e}",
                    request.file.content_type
                ))
            })?;

        let form = request
            .text_fields()
            .into_iter()
            .fold(Form::new().part("file", part), |form, (name, value)| {
                form.text(name, value)
            });
        Ok(form)
    }

    fn transport_error(&self, url: &str, e: reqwest::Error) -> StudyError {
        if e.is_timeout() {
            StudyError::Timeout {
                url: url.to_string(),
                secs: self.config.request_timeout_secs.unwrap_or_default(),
            }
        } else {
            StudyError::Transport {
                url: url.to_string(),
                detail: e.to_string(),
            }
        }
    }
}

#[async_trait]
impl StudyBackend for HttpBackend {
    async fn submit(&self, request: &StudyRequest) -> Result<Value, StudyError> {
        let url = self.url_for(request.operation);
        let form = Self::build_form(request)?;

        debug!(
            "POST {} ({} bytes, {} text fields)",
            url,
            request.file.len(),
            request.text_fields().len()
        );

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.transport_error(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("{} answered HTTP {}", url, status.as_u16());
            return Err(StudyError::BackendStatus {
                url,
                status: status.as_u16(),
                body: truncate_chars(body.trim(), MAX_ERROR_BODY_CHARS),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(&url, e))?;

        decode_reply(&url, &bytes)
    }
}

/// Decode a 2xx body. An empty body is treated as JSON `null` (no content).
pub fn decode_reply(url: &str, bytes: &[u8]) -> Result<Value, StudyError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(bytes).map_err(|e| StudyError::MalformedResponse {
        url: url.to_string(),
        detail: e.to_string(),
    })
}

fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let head: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{head}\u{2026}")
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PDF_MIME;

    fn request(operation: Operation, question_count: Option<u32>) -> StudyRequest {
        StudyRequest {
            operation,
            file: UploadedFile {
                name: "notes.pdf".into(),
                content_type: PDF_MIME.into(),
                bytes: b"%PDF-1.4".to_vec(),
            },
            user_id: "u-42".into(),
            question_count,
        }
    }

    #[test]
    fn text_fields_without_questions() {
        let r = request(Operation::Summarize, None);
        assert_eq!(r.text_fields(), vec![("userId", "u-42".to_string())]);
    }

    #[test]
    fn text_fields_with_questions() {
        let r = request(Operation::GenerateQuestions, Some(5));
        assert_eq!(
            r.text_fields(),
            vec![
                ("userId", "u-42".to_string()),
                ("numberOfQuestions", "5".to_string())
            ]
        );
    }

    #[test]
    fn url_per_operation() {
        let config = StudyConfig::builder()
            .base_url("https://study.example.com/")
            .build()
            .unwrap();
        let backend = HttpBackend::new(&config).unwrap();
        assert_eq!(
            backend.url_for(Operation::GenerateStudyMaterial),
            "https://study.example.com/api/study/generate-study-material"
        );
    }

    #[test]
    fn decode_empty_body_is_null() {
        assert_eq!(decode_reply("u", b"").unwrap(), Value::Null);
        assert_eq!(decode_reply("u", b"  \n").unwrap(), Value::Null);
    }

    #[test]
    fn decode_rejects_html() {
        let err = decode_reply("u", b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, StudyError::MalformedResponse { .. }));
    }

    #[test]
    fn truncate_long_bodies() {
        let long = "x".repeat(1000);
        let t = truncate_chars(&long, 10);
        assert_eq!(t.chars().count(), 10);
        assert!(t.ends_with('\u{2026}'));
        assert_eq!(truncate_chars("short", 10), "short");
    }
}
