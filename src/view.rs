//! View state: held results plus the two reveal flags.
//!
//! Transition rules:
//!
//! | Event | Effect |
//! |---|---|
//! | summary produced | store it, `summary_visible = true` |
//! | non-empty question list | replace list, `questions_visible = true` |
//! | question request, no questions | clear list, `questions_visible = false` |
//! | user toggle | flip one flag; data is kept |
//!
//! Producing content always reveals it; hiding never discards it.

use crate::model::StudyQuestion;
use crate::normalize::{Normalized, QuestionUpdate};
use serde::Serialize;

/// Two independent panel flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RevealState {
    pub summary_visible: bool,
    pub questions_visible: bool,
}

/// Everything the results area renders from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewState {
    summary: String,
    questions: Vec<StudyQuestion>,
    reveal: RevealState,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one normalised reply.
    pub fn apply(&mut self, normalized: Normalized) {
        if let Some(summary) = normalized.summary {
            self.summary = summary;
            self.reveal.summary_visible = true;
        }

        match normalized.questions {
            QuestionUpdate::Replace(list) if !list.is_empty() => {
                self.questions = list;
                self.reveal.questions_visible = true;
            }
            QuestionUpdate::Replace(_) | QuestionUpdate::Clear => {
                self.questions.clear();
                self.reveal.questions_visible = false;
            }
            QuestionUpdate::Untouched => {}
        }
    }

    pub fn toggle_summary(&mut self) {
        self.reveal.summary_visible = !self.reveal.summary_visible;
    }

    pub fn toggle_questions(&mut self) {
        self.reveal.questions_visible = !self.reveal.questions_visible;
    }

    pub fn set_summary_visible(&mut self, visible: bool) {
        self.reveal.summary_visible = visible;
    }

    pub fn set_questions_visible(&mut self, visible: bool) {
        self.reveal.questions_visible = visible;
    }

    pub fn reveal(&self) -> RevealState {
        self.reveal
    }

    /// Held summary, if any.
    pub fn summary(&self) -> Option<&str> {
        (!self.summary.is_empty()).then_some(self.summary.as_str())
    }

    pub fn questions(&self) -> &[StudyQuestion] {
        &self.questions
    }

    /// Whether the results area exists at all.
    pub fn has_results(&self) -> bool {
        self.summary().is_some() || !self.questions.is_empty()
    }

    /// Summary text when its panel is both present and expanded.
    pub fn expanded_summary(&self) -> Option<&str> {
        self.summary().filter(|_| self.reveal.summary_visible)
    }

    /// Questions when their panel is both present and expanded.
    pub fn expanded_questions(&self) -> Option<&[StudyQuestion]> {
        (self.reveal.questions_visible && !self.questions.is_empty())
            .then_some(self.questions.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(text: &str) -> StudyQuestion {
        StudyQuestion {
            question: text.into(),
            ..Default::default()
        }
    }

    fn summary(s: &str) -> Normalized {
        Normalized {
            summary: Some(s.into()),
            questions: QuestionUpdate::Untouched,
        }
    }

    fn questions(list: Vec<StudyQuestion>) -> Normalized {
        Normalized {
            summary: None,
            questions: QuestionUpdate::Replace(list),
        }
    }

    #[test]
    fn fresh_view_has_nothing() {
        let v = ViewState::new();
        assert!(!v.has_results());
        assert_eq!(v.reveal(), RevealState::default());
        assert!(v.expanded_summary().is_none());
    }

    #[test]
    fn summary_reveals_panel() {
        let mut v = ViewState::new();
        v.apply(summary("X"));
        assert_eq!(v.summary(), Some("X"));
        assert!(v.reveal().summary_visible);
        assert!(!v.reveal().questions_visible);
    }

    #[test]
    fn question_list_replaces_wholesale() {
        let mut v = ViewState::new();
        v.apply(questions(vec![question("a"), question("b")]));
        v.apply(questions(vec![question("c")]));
        assert_eq!(v.questions().len(), 1);
        assert_eq!(v.questions()[0].question, "c");
        assert!(v.reveal().questions_visible);
    }

    #[test]
    fn clear_hides_and_empties() {
        let mut v = ViewState::new();
        v.apply(questions(vec![question("a")]));
        v.apply(Normalized {
            summary: None,
            questions: QuestionUpdate::Clear,
        });
        assert!(v.questions().is_empty());
        assert!(!v.reveal().questions_visible);
    }

    #[test]
    fn untouched_keeps_questions() {
        let mut v = ViewState::new();
        v.apply(questions(vec![question("a")]));
        v.apply(summary("S"));
        assert_eq!(v.questions().len(), 1);
        assert!(v.reveal().questions_visible);
    }

    #[test]
    fn toggling_never_discards_data() {
        let mut v = ViewState::new();
        v.apply(summary("S"));
        v.apply(questions(vec![question("a")]));

        v.toggle_summary();
        v.toggle_questions();
        assert!(!v.reveal().summary_visible);
        assert!(!v.reveal().questions_visible);
        assert_eq!(v.summary(), Some("S"));
        assert_eq!(v.questions().len(), 1);
        assert!(v.expanded_summary().is_none());
        assert!(v.expanded_questions().is_none());

        v.toggle_summary();
        assert_eq!(v.expanded_summary(), Some("S"));
    }

    #[test]
    fn visible_flag_over_empty_data_renders_nothing() {
        let mut v = ViewState::new();
        v.set_questions_visible(true);
        v.set_summary_visible(true);
        assert!(v.expanded_questions().is_none());
        assert!(v.expanded_summary().is_none());
        assert!(!v.has_results());
    }

    #[test]
    fn later_summary_overwrites_and_re_reveals() {
        let mut v = ViewState::new();
        v.apply(summary("old"));
        v.set_summary_visible(false);
        v.apply(summary("new"));
        assert_eq!(v.expanded_summary(), Some("new"));
    }
}
