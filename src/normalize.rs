//! Response normalisation: turn whatever the backend sent into a summary
//! and a question-list decision.
//!
//! The backend is inconsistent across operations. The same logical question
//! list can arrive as:
//!
//! ```text
//! (a) [ {question…}, … ]                    bare array
//! (b) { "questions":      [ … ], … }
//! (c) { "studyQuestions": [ … ], … }
//! ```
//!
//! These are tried in that fixed order and the first shape that matches
//! decides; shapes are never merged. The summary is independent of the
//! questions and both may be present in one reply.

use crate::model::{OperationResult, StudyQuestion};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

/// A rule recognising one known layout that carries a question list.
struct ShapeMatcher {
    name: &'static str,
    locate: fn(&Value) -> Option<&Value>,
}

fn bare_array(payload: &Value) -> Option<&Value> {
    payload.is_array().then_some(payload)
}

fn questions_field(payload: &Value) -> Option<&Value> {
    payload.get("questions").filter(|v| v.is_array())
}

fn study_questions_field(payload: &Value) -> Option<&Value> {
    payload.get("studyQuestions").filter(|v| v.is_array())
}

const QUESTION_SHAPES: [ShapeMatcher; 3] = [
    ShapeMatcher {
        name: "bare array",
        locate: bare_array,
    },
    ShapeMatcher {
        name: "questions",
        locate: questions_field,
    },
    ShapeMatcher {
        name: "studyQuestions",
        locate: study_questions_field,
    },
];

/// What the view should do with its question list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionUpdate {
    /// Replace the list wholesale and reveal the panel.
    Replace(Vec<StudyQuestion>),
    /// Questions were requested but none came back: empty the list and hide.
    Clear,
    /// Questions were not requested and none came back: leave as is.
    Untouched,
}

/// Output of [`normalize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub summary: Option<String>,
    pub questions: QuestionUpdate,
}

impl Normalized {
    /// The per-request content, independent of what the view held before.
    pub fn to_result(&self) -> OperationResult {
        OperationResult {
            summary: self.summary.clone(),
            questions: match &self.questions {
                QuestionUpdate::Replace(list) => Some(list.clone()),
                QuestionUpdate::Clear | QuestionUpdate::Untouched => None,
            },
        }
    }
}

/// Normalise one backend reply.
///
/// `was_question_request` decides what an absent question list means:
/// "no content produced" (clear) for question requests, "nothing to say"
/// (untouched) otherwise. Neither case is an error.
pub fn normalize(payload: &Value, was_question_request: bool) -> Normalized {
    let summary = extract_summary(payload);
    let found = extract_questions(payload).filter(|list| !list.is_empty());

    let questions = match found {
        Some(list) => QuestionUpdate::Replace(list),
        None if was_question_request => {
            warn!("No questions returned from backend");
            QuestionUpdate::Clear
        }
        None => QuestionUpdate::Untouched,
    };

    Normalized { summary, questions }
}

/// A non-empty string `summary` field.
pub fn extract_summary(payload: &Value) -> Option<String> {
    payload
        .get("summary")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// The question list carried by the first matching shape, if any.
///
/// The first array found decides, as-is. Elements that are not question
/// records are dropped one by one; they never discard their neighbours.
pub fn extract_questions(payload: &Value) -> Option<Vec<StudyQuestion>> {
    let (shape, list) = QUESTION_SHAPES
        .iter()
        .find_map(|shape| (shape.locate)(payload).map(|list| (shape, list)))?;
    let items = list.as_array()?;

    let questions: Vec<StudyQuestion> = items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| match StudyQuestion::deserialize(item) {
            Ok(q) => Some(q),
            Err(e) => {
                debug!("Dropping '{}' item {}: not a question record ({})", shape.name, i, e);
                None
            }
        })
        .collect();

    debug!(
        "Question list found via '{}' shape ({} of {} items usable)",
        shape.name,
        questions.len(),
        items.len()
    );
    Some(questions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn q1() -> Value {
        json!({
            "question": "Q1",
            "options": ["A", "B"],
            "answer": "A",
            "difficulty": "easy",
            "questionType": "multiple_choice"
        })
    }

    #[test]
    fn summary_only() {
        let n = normalize(&json!({"summary": "X"}), false);
        assert_eq!(n.summary.as_deref(), Some("X"));
        assert_eq!(n.questions, QuestionUpdate::Untouched);
    }

    #[test]
    fn empty_or_non_string_summary_is_ignored() {
        assert_eq!(extract_summary(&json!({"summary": ""})), None);
        assert_eq!(extract_summary(&json!({"summary": 42})), None);
        assert_eq!(extract_summary(&json!({"summary": null})), None);
        assert_eq!(extract_summary(&json!([{"summary": "nested"}])), None);
    }

    #[test]
    fn all_three_shapes_yield_the_same_list() {
        let bare = normalize(&json!([q1()]), true);
        let wrapped = normalize(&json!({"questions": [q1()]}), true);
        let study = normalize(&json!({"studyQuestions": [q1()]}), true);

        assert_eq!(bare, wrapped);
        assert_eq!(wrapped, study);
        match bare.questions {
            QuestionUpdate::Replace(list) => {
                assert_eq!(list.len(), 1);
                assert_eq!(list[0].question, "Q1");
                assert_eq!(list[0].question_type, "multiple_choice");
            }
            other => panic!("expected Replace, got {other:?}"),
        }
    }

    #[test]
    fn shape_order_is_fixed() {
        let payload = json!({
            "questions": [{"question": "from questions"}],
            "studyQuestions": [{"question": "from studyQuestions"}]
        });
        let list = extract_questions(&payload).unwrap();
        assert_eq!(list[0].question, "from questions");
    }

    #[test]
    fn first_matching_shape_decides_even_when_empty() {
        let payload = json!({"questions": [], "studyQuestions": [q1()]});
        assert_eq!(normalize(&payload, true).questions, QuestionUpdate::Clear);
    }

    #[test]
    fn null_fields_keep_the_whole_list() {
        let payload = json!({"questions": [
            q1(),
            {
                "question": "Explain X",
                "options": null,
                "answer": "Because",
                "difficulty": null,
                "questionType": "short_answer"
            }
        ]});
        match normalize(&payload, true).questions {
            QuestionUpdate::Replace(list) => {
                assert_eq!(list.len(), 2);
                assert_eq!(list[1].question, "Explain X");
                assert!(list[1].options.is_empty());
                assert!(list[1].difficulty.is_empty());
            }
            other => panic!("expected Replace, got {other:?}"),
        }
    }

    #[test]
    fn non_record_items_are_dropped_individually() {
        let payload = json!({"questions": [1, q1(), "junk", null, {"options": "A"}]});
        let list = extract_questions(&payload).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].question, "Q1");
    }

    #[test]
    fn first_array_decides_even_without_records() {
        let payload = json!({"questions": [1, 2, 3], "studyQuestions": [q1()]});
        assert_eq!(extract_questions(&payload), Some(vec![]));
        assert_eq!(normalize(&payload, true).questions, QuestionUpdate::Clear);
    }

    #[test]
    fn missing_questions_on_question_request_clears() {
        let n = normalize(&json!({}), true);
        assert_eq!(n.summary, None);
        assert_eq!(n.questions, QuestionUpdate::Clear);
        assert!(n.to_result().is_empty());
    }

    #[test]
    fn missing_questions_on_summary_request_is_untouched() {
        assert_eq!(
            normalize(&json!({"summary": "S"}), false).questions,
            QuestionUpdate::Untouched
        );
        assert_eq!(normalize(&Value::Null, false).questions, QuestionUpdate::Untouched);
    }

    #[test]
    fn questions_field_that_is_not_an_array_is_ignored() {
        assert_eq!(
            normalize(&json!({"questions": "none"}), true).questions,
            QuestionUpdate::Clear
        );
    }

    #[test]
    fn summary_and_questions_together() {
        let n = normalize(&json!({"summary": "S", "studyQuestions": [q1(), q1()]}), true);
        let r = n.to_result();
        assert_eq!(r.summary.as_deref(), Some("S"));
        assert_eq!(r.questions.map(|l| l.len()), Some(2));
    }
}
