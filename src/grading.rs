//! Answer normalization and grading.

use crate::models::{Question, QuestionKind};

/// Normalize an answer for lenient comparison: trim, uppercase, and keep
/// only ASCII letters and digits.
pub fn normalize(s: &str) -> String {
    s.trim()
        .to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// Grade a submitted answer against a question's expected answer.
///
/// Free-text answers compare normalized forms; choice answers compare the
/// raw strings. Empty submissions are graded like any other.
pub fn grade(question: &Question, submitted: &str) -> bool {
    match question.kind {
        QuestionKind::FreeText => normalize(submitted) == normalize(&question.answer),
        QuestionKind::Choice => submitted == question.answer,
    }
}
