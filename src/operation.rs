//! The three backend actions a session can request.

use std::fmt;
use std::str::FromStr;

/// One of the fixed backend operations.
///
/// The path segment is the wire name used in
/// `POST {base}/api/study/{operation}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Produce a text summary of the document.
    Summarize,
    /// Produce a list of study questions.
    GenerateQuestions,
    /// Produce summary and questions together.
    GenerateStudyMaterial,
}

impl Operation {
    pub const ALL: [Operation; 3] = [
        Operation::Summarize,
        Operation::GenerateQuestions,
        Operation::GenerateStudyMaterial,
    ];

    /// Endpoint path segment.
    pub fn path_segment(self) -> &'static str {
        match self {
            Operation::Summarize => "summarize",
            Operation::GenerateQuestions => "generate-questions",
            Operation::GenerateStudyMaterial => "generate-study-material",
        }
    }

    /// Whether this operation asks the backend for generated questions by
    /// default (and so sends `numberOfQuestions`).
    pub fn requests_questions(self) -> bool {
        !matches!(self, Operation::Summarize)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// Error returned when parsing an unknown operation name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown operation '{0}' (expected summarize, generate-questions or generate-study-material)")]
pub struct UnknownOperation(pub String);

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Operation::ALL
            .into_iter()
            .find(|op| op.path_segment() == needle)
            .ok_or_else(|| UnknownOperation(s.to_string()))
    }
}
