mod complete;
mod loader;

pub use complete::{CompletionSink, LogCompletion};
pub use loader::{JsonQuizSource, LoadError, QuizSource, validate_quiz};
