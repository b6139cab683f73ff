//! Completion collaborator.
//!
//! When a session finishes, the controller hands the ordered results to a
//! [`CompletionSink`] exactly once. The engine never persists anything
//! itself.

use log::info;

use crate::models::QuestionResult;

/// Receives the final results of a session.
pub trait CompletionSink {
    fn on_complete(
        &mut self,
        quiz_id: &str,
        results: &[QuestionResult],
        team_members: Option<&[String]>,
    );
}

/// Default sink: writes the outcome to the log.
#[derive(Debug, Default)]
pub struct LogCompletion;

impl CompletionSink for LogCompletion {
    fn on_complete(
        &mut self,
        quiz_id: &str,
        results: &[QuestionResult],
        team_members: Option<&[String]>,
    ) {
        let correct = results.iter().filter(|r| r.was_correct).count();
        match team_members {
            Some(team) => info!(
                "quiz '{}' complete: {}/{} correct (team: {})",
                quiz_id,
                correct,
                results.len(),
                team.join(", ")
            ),
            None => info!(
                "quiz '{}' complete: {}/{} correct",
                quiz_id,
                correct,
                results.len()
            ),
        }
    }
}
