//! Quiz repository collaborator.
//!
//! Sessions obtain quiz definitions through [`QuizSource`]; the bundled
//! implementation reads `<quiz_id>.json` files from a directory.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::models::{QuestionKind, Quiz};

/// Error produced when a quiz cannot be loaded.
#[derive(Debug)]
pub enum LoadError {
    /// The requested quiz id is empty or contains illegal characters.
    InvalidId(String),
    /// The quiz file could not be read.
    Read { path: PathBuf, source: io::Error },
    /// The quiz file is not valid JSON.
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The quiz definition violates a structural rule.
    Invalid(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::InvalidId(id) => write!(f, "invalid quiz id '{}'", id),
            LoadError::Read { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            LoadError::Parse { path, source } => {
                write!(f, "failed to parse {}: {}", path.display(), source)
            }
            LoadError::Invalid(reason) => write!(f, "invalid quiz: {}", reason),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Read { source, .. } => Some(source),
            LoadError::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Supplies quiz definitions to the session controller.
pub trait QuizSource {
    fn load_quiz(&self, quiz_id: &str) -> Result<Quiz, LoadError>;
}

/// Loads quizzes from a directory of `<quiz_id>.json` files.
pub struct JsonQuizSource {
    root: PathBuf,
}

impl JsonQuizSource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl QuizSource for JsonQuizSource {
    fn load_quiz(&self, quiz_id: &str) -> Result<Quiz, LoadError> {
        validate_quiz_id(quiz_id)?;

        let path = self.root.join(format!("{quiz_id}.json"));
        let text = fs::read_to_string(&path).map_err(|source| LoadError::Read {
            path: path.clone(),
            source,
        })?;
        let quiz: Quiz =
            serde_json::from_str(&text).map_err(|source| LoadError::Parse { path, source })?;

        if quiz.id != quiz_id {
            return Err(LoadError::Invalid(format!(
                "file declares id '{}', expected '{}'",
                quiz.id, quiz_id
            )));
        }
        validate_quiz(&quiz)?;
        Ok(quiz)
    }
}

fn validate_quiz_id(id: &str) -> Result<(), LoadError> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(LoadError::InvalidId(id.to_string()))
    }
}

/// Structural checks a quiz must pass before a session starts.
pub fn validate_quiz(quiz: &Quiz) -> Result<(), LoadError> {
    let mut seen = HashSet::new();
    for question in &quiz.questions {
        if !seen.insert(question.id) {
            return Err(LoadError::Invalid(format!(
                "duplicate question id {}",
                question.id
            )));
        }
        if question.kind == QuestionKind::Choice && question.options.len() < 2 {
            return Err(LoadError::Invalid(format!(
                "choice question {} has fewer than two options",
                question.id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuizVariant;

    fn write_quiz(dir: &Path, id: &str, body: &str) {
        fs::write(dir.join(format!("{id}.json")), body).unwrap();
    }

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("gridquiz-loader-{tag}-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_loads_quiz_by_id() {
        let dir = temp_dir("ok");
        write_quiz(
            &dir,
            "capitals",
            r#"{"id": "capitals", "topic": "Geography", "variant": "normal",
                "questions": [{"id": 1, "kind": "free_text", "prompt": "Capital of France?", "answer": "Paris"}]}"#,
        );

        let quiz = JsonQuizSource::new(&dir).load_quiz("capitals").unwrap();
        assert_eq!(quiz.variant, QuizVariant::Normal);
        assert_eq!(quiz.questions.len(), 1);
    }

    #[test]
    fn test_rejects_bad_ids() {
        let source = JsonQuizSource::new("quizzes");
        assert!(matches!(source.load_quiz(""), Err(LoadError::InvalidId(_))));
        assert!(matches!(
            source.load_quiz("../escape"),
            Err(LoadError::InvalidId(_))
        ));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = temp_dir("missing");
        let err = JsonQuizSource::new(&dir).load_quiz("nope").unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
    }

    #[test]
    fn test_id_mismatch_rejected() {
        let dir = temp_dir("mismatch");
        write_quiz(
            &dir,
            "alias",
            r#"{"id": "other", "topic": "t", "variant": "normal", "questions": []}"#,
        );
        let err = JsonQuizSource::new(&dir).load_quiz("alias").unwrap_err();
        assert!(matches!(err, LoadError::Invalid(_)));
    }

    #[test]
    fn test_choice_needs_two_options() {
        let dir = temp_dir("options");
        write_quiz(
            &dir,
            "thin",
            r#"{"id": "thin", "topic": "t", "variant": "normal",
                "questions": [{"id": 1, "kind": "choice", "prompt": "p", "options": ["only"], "answer": "only"}]}"#,
        );
        let err = JsonQuizSource::new(&dir).load_quiz("thin").unwrap_err();
        assert!(matches!(err, LoadError::Invalid(_)));
    }

    #[test]
    fn test_duplicate_question_ids_rejected() {
        let dir = temp_dir("dupes");
        write_quiz(
            &dir,
            "dupes",
            r#"{"id": "dupes", "topic": "t", "variant": "normal",
                "questions": [
                    {"id": 1, "kind": "free_text", "prompt": "a", "answer": "a"},
                    {"id": 1, "kind": "free_text", "prompt": "b", "answer": "b"}
                ]}"#,
        );
        let err = JsonQuizSource::new(&dir).load_quiz("dupes").unwrap_err();
        assert!(matches!(err, LoadError::Invalid(_)));
    }
}
