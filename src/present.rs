//! Presentation helpers for rendering questions.
//!
//! All lookups are case-insensitive and total: an unknown difficulty maps to
//! [`Indicator::Neutral`] and an unknown type to [`GENERIC_SYMBOL`], never to
//! a panic or an empty string.

use crate::model::StudyQuestion;
use serde::Serialize;

/// Symbol for question types we do not recognise.
pub const GENERIC_SYMBOL: &str = "❓";

/// Colour-coded difficulty indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Indicator {
    Green,
    Yellow,
    Red,
    Neutral,
}

impl Indicator {
    /// ANSI SGR colour code for terminal rendering.
    pub fn ansi_code(self) -> &'static str {
        match self {
            Indicator::Green => "32",
            Indicator::Yellow => "33",
            Indicator::Red => "31",
            Indicator::Neutral => "2",
        }
    }
}

/// Map a difficulty string to its indicator.
pub fn difficulty_indicator(difficulty: &str) -> Indicator {
    match difficulty.trim().to_lowercase().as_str() {
        "easy" => Indicator::Green,
        "medium" => Indicator::Yellow,
        "hard" => Indicator::Red,
        _ => Indicator::Neutral,
    }
}

/// Map a question type to its symbol.
pub fn question_type_symbol(question_type: &str) -> &'static str {
    match question_type.trim().to_lowercase().as_str() {
        "multiple_choice" | "multiple choice" => "🔘",
        "true_false" | "true false" => "✓/✗",
        "short_answer" | "short answer" => "✍️",
        _ => GENERIC_SYMBOL,
    }
}

/// Human label for a question type: first `_` becomes a space; empty is
/// `Unknown`.
pub fn question_type_label(question_type: &str) -> String {
    if question_type.is_empty() {
        "Unknown".to_string()
    } else {
        question_type.replacen('_', " ", 1)
    }
}

/// Letter label for the option at `index` (`A`, `B`, …, `Z`, `AA`, …).
pub fn option_label(index: usize) -> String {
    let mut n = index;
    let mut label = Vec::new();
    loop {
        label.push(b'A' + (n % 26) as u8);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    label.reverse();
    String::from_utf8_lossy(&label).into_owned()
}

/// Title of the question panel.
pub fn questions_panel_title(count: usize) -> String {
    format!("Generated Questions ({count})")
}

/// Render one question as plain text lines, numbered from 1.
pub fn render_question(number: usize, q: &StudyQuestion) -> Vec<String> {
    render_question_styled(number, q, |_, difficulty| difficulty.to_string())
}

/// Like [`render_question`], with `style_difficulty` deciding how the
/// difficulty in the header line is drawn (e.g. wrapped in ANSI colour).
pub fn render_question_styled<F>(number: usize, q: &StudyQuestion, style_difficulty: F) -> Vec<String>
where
    F: Fn(Indicator, &str) -> String,
{
    let difficulty = style_difficulty(difficulty_indicator(&q.difficulty), &q.difficulty);
    let mut lines = vec![
        format!(
            "{number}. {}  {} {}",
            q.question,
            question_type_symbol(&q.question_type),
            difficulty
        ),
        format!("   Type: {}", question_type_label(&q.question_type)),
    ];

    if !q.options.is_empty() {
        lines.push("   Options:".to_string());
        lines.extend(
            q.options
                .iter()
                .enumerate()
                .map(|(i, opt)| format!("     {}) {}", option_label(i), opt)),
        );
    }

    if !q.answer.is_empty() {
        lines.push(format!("   Answer: {}", q.answer));
    }

    lines
}
