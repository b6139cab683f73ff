use serde::Deserialize;

/// Identifier of a question, unique within its quiz.
pub type QuestionId = u32;

/// Which presentation a quiz uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizVariant {
    /// Plain question list.
    Normal,
    /// Questions hidden behind flippable cards.
    CardGame,
    /// Answers found by dragging through a letter grid.
    BoardGame,
}

/// How a question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Pick one of the listed options.
    Choice,
    /// Type the answer.
    FreeText,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub kind: QuestionKind,
    pub prompt: String,
    /// Choice questions only; at least two entries, order significant.
    #[serde(default)]
    pub options: Vec<String>,
    pub answer: String,
    #[serde(default)]
    pub points: u32,
    /// Zero or absent means the default limit applies.
    #[serde(default)]
    pub time_limit_secs: u32,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Quiz {
    pub id: String,
    pub topic: String,
    pub variant: QuizVariant,
    /// Order significant; presented first to last.
    pub questions: Vec<Question>,
    #[serde(default)]
    pub team_members: Option<Vec<String>>,
}

/// Final outcome for one question, reported in original quiz order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionResult {
    pub question_id: QuestionId,
    pub was_correct: bool,
}
