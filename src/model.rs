//! Data types shared by intake, dispatch and the view.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// MIME type accepted by upload intake.
pub const PDF_MIME: &str = "application/pdf";

/// A file accepted by intake and held in memory until replaced.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// File name as shown to the user and sent in the multipart part.
    pub name: String,
    /// Declared MIME type. Always [`PDF_MIME`] once accepted.
    pub content_type: String,
    /// Raw file bytes.
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Bytes are elided: a 20 MB PDF in a debug log helps nobody.
impl fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedFile")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// One generated question, exactly as the backend produced it.
///
/// Every field defaults when absent or `null` so a partially-filled record
/// still renders; the client never rewrites these values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudyQuestion {
    #[serde(deserialize_with = "null_as_default")]
    pub question: String,
    #[serde(deserialize_with = "null_as_default")]
    pub options: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub answer: String,
    #[serde(deserialize_with = "null_as_default")]
    pub difficulty: String,
    #[serde(deserialize_with = "null_as_default")]
    pub question_type: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// What one backend reply carried, after normalisation.
///
/// `questions` is `None` when no question shape matched (or the matched
/// list was empty). Both fields `None` means the backend produced no
/// content, which is not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OperationResult {
    pub summary: Option<String>,
    pub questions: Option<Vec<StudyQuestion>>,
}

impl OperationResult {
    /// True when neither a summary nor any question came back.
    pub fn is_empty(&self) -> bool {
        self.summary.is_none() && self.questions.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_uses_camel_case_wire_names() {
        let q: StudyQuestion = serde_json::from_str(
            r#"{"question":"Q1","options":["A","B"],"answer":"A","difficulty":"easy","questionType":"multiple_choice"}"#,
        )
        .unwrap();
        assert_eq!(q.question_type, "multiple_choice");
        assert_eq!(q.options, vec!["A", "B"]);

        let back = serde_json::to_value(&q).unwrap();
        assert_eq!(back["questionType"], "multiple_choice");
    }

    #[test]
    fn question_tolerates_missing_fields() {
        let q: StudyQuestion = serde_json::from_str(r#"{"question":"Why?"}"#).unwrap();
        assert_eq!(q.question, "Why?");
        assert!(q.options.is_empty());
        assert!(q.answer.is_empty());
        assert!(q.difficulty.is_empty());
    }

    #[test]
    fn question_tolerates_null_fields() {
        let q: StudyQuestion = serde_json::from_str(
            r#"{"question":"Explain X","options":null,"answer":"Because","difficulty":null,"questionType":null}"#,
        )
        .unwrap();
        assert_eq!(q.question, "Explain X");
        assert!(q.options.is_empty());
        assert_eq!(q.answer, "Because");
        assert!(q.difficulty.is_empty());
        assert!(q.question_type.is_empty());
    }

    #[test]
    fn uploaded_file_debug_elides_bytes() {
        let f = UploadedFile {
            name: "notes.pdf".into(),
            content_type: PDF_MIME.into(),
            bytes: vec![0u8; 4096],
        };
        let dbg = format!("{f:?}");
        assert!(dbg.contains("4096"));
        assert!(!dbg.contains("0, 0, 0"));
    }

    #[test]
    fn empty_result() {
        assert!(OperationResult::default().is_empty());
        let r = OperationResult {
            summary: Some("x".into()),
            questions: None,
        };
        assert!(!r.is_empty());
    }
}
