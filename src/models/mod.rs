mod quiz;

pub use quiz::{Question, QuestionId, QuestionKind, QuestionResult, Quiz, QuizVariant};
