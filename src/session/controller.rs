//! Session state machine.
//!
//! The controller owns question sequencing, answer drafts, grading
//! outcomes, the per-question countdown, and the variant-specific
//! sub-state (card flip, letter grid and drag selection). All mutation
//! happens as synchronous reactions to discrete events; the only
//! asynchronous step is the quiz load, settled through
//! [`SessionController::on_quiz_loaded`].

use std::collections::HashMap;

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use uuid::Uuid;

use crate::board::{Board, DEFAULT_GRID_SIZE, SelectionTracker};
use crate::data::{CompletionSink, LoadError};
use crate::grading::grade;
use crate::models::{Question, QuestionId, QuestionResult, Quiz, QuizVariant};

use super::timer::{QuestionTimer, TimerId};

/// Grading outcome handed to the feedback view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub is_correct: bool,
    pub prompt: String,
    pub correct_answer: String,
}

/// Discrete phases of a quiz session.
///
/// `Ready` and `Grading` from the conceptual state machine are
/// transient: load settlement and grading complete synchronously inside
/// a single event reaction, so they are never observable between events.
#[derive(Debug)]
pub enum Phase {
    /// Waiting for the quiz load to settle.
    Loading,
    /// The current question is open for input.
    Answering,
    /// Showing the grading outcome for the current question.
    Feedback(Feedback),
    /// All questions done; results have been emitted.
    Finished,
    /// The quiz could not be loaded. Terminal.
    Error(LoadError),
}

/// Variant-specific sub-state, rebuilt on every question entry.
enum ModeState {
    Standard,
    Card { revealed: bool },
    Board { board: Board, tracker: SelectionTracker },
}

/// Drives one quiz session from load to completion.
pub struct SessionController {
    session_id: Uuid,
    quiz: Option<Quiz>,
    phase: Phase,
    current: usize,
    selected_option: usize,
    drafts: HashMap<QuestionId, String>,
    outcomes: HashMap<QuestionId, bool>,
    results: Vec<QuestionResult>,
    mode: ModeState,
    timer: Option<QuestionTimer>,
    timer_seq: u64,
    completed: bool,
    sink: Box<dyn CompletionSink>,
    rng: StdRng,
}

impl SessionController {
    pub fn new(sink: Box<dyn CompletionSink>) -> Self {
        Self::with_rng(sink, StdRng::from_entropy())
    }

    /// Use a caller-supplied random source for grid generation, so a
    /// fixed seed reproduces the same boards.
    pub fn with_rng(sink: Box<dyn CompletionSink>, rng: StdRng) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            quiz: None,
            phase: Phase::Loading,
            current: 0,
            selected_option: 0,
            drafts: HashMap::new(),
            outcomes: HashMap::new(),
            results: Vec::new(),
            mode: ModeState::Standard,
            timer: None,
            timer_seq: 0,
            completed: false,
            sink,
            rng,
        }
    }

    /// Settle the quiz load. A zero-question quiz completes immediately
    /// with empty results; a failure is terminal.
    pub fn on_quiz_loaded(&mut self, loaded: Result<Quiz, LoadError>) {
        if !matches!(self.phase, Phase::Loading) {
            return;
        }
        match loaded {
            Err(err) => {
                warn!("session {}: quiz load failed: {}", self.session_id, err);
                self.phase = Phase::Error(err);
            }
            Ok(quiz) => {
                info!(
                    "session {}: loaded quiz '{}' ({} questions, {:?})",
                    self.session_id,
                    quiz.id,
                    quiz.questions.len(),
                    quiz.variant
                );
                let empty = quiz.questions.is_empty();
                self.quiz = Some(quiz);
                if empty {
                    self.finish();
                } else {
                    self.current = 0;
                    self.enter_question();
                }
            }
        }
    }

    /// Record `value` as the draft for the current question, grade it,
    /// and move to feedback. Cancels the active timer.
    pub fn submit_answer(&mut self, value: String) {
        if !matches!(self.phase, Phase::Answering) {
            return;
        }
        self.grade_current(value);
    }

    /// Grade whatever draft exists right now, even an empty one. Invoked
    /// by the countdown reaching zero; never blocked on missing input.
    pub fn force_submit_on_timeout(&mut self) {
        if !matches!(self.phase, Phase::Answering) {
            return;
        }
        let draft = self
            .current_question()
            .map(|q| q.id)
            .and_then(|id| self.drafts.get(&id).cloned())
            .unwrap_or_default();
        self.grade_current(draft);
    }

    /// Acknowledge feedback: move to the next question, or finish after
    /// the last one.
    pub fn advance(&mut self) {
        if !matches!(self.phase, Phase::Feedback(_)) {
            return;
        }
        let total = self.total_questions();
        if self.current + 1 < total {
            self.current += 1;
            self.enter_question();
        } else {
            self.finish();
        }
    }

    /// Step back to the previous question without re-grading it or
    /// clearing its draft. Not available in the board variant, nor at
    /// the first question.
    pub fn go_previous(&mut self) {
        if !matches!(self.phase, Phase::Answering) {
            return;
        }
        let Some(quiz) = self.quiz.as_ref() else {
            return;
        };
        if quiz.variant == QuizVariant::BoardGame || self.current == 0 {
            return;
        }
        self.cancel_timer();
        self.current -= 1;
        self.enter_question();
    }

    /// Deliver one second of countdown addressed to `id`. Ticks carrying
    /// a stale id are discarded, so a tick queued for a superseded
    /// question can never grade the current one.
    pub fn handle_tick(&mut self, id: TimerId) {
        let Some(timer) = self.timer.as_mut() else {
            return;
        };
        if timer.id() != id {
            return;
        }
        if timer.tick() {
            info!(
                "session {}: time expired on question index {}",
                self.session_id, self.current
            );
            self.cancel_timer();
            self.force_submit_on_timeout();
        }
    }

    /// Toggle the card face in the card-game variant.
    pub fn flip_card(&mut self) {
        if !matches!(self.phase, Phase::Answering) {
            return;
        }
        if let ModeState::Card { revealed } = &mut self.mode {
            *revealed = !*revealed;
        }
    }

    /// Append to the current free-text draft.
    pub fn input_char(&mut self, c: char) {
        if !matches!(self.phase, Phase::Answering) {
            return;
        }
        let Some(qid) = self.current_question().map(|q| q.id) else {
            return;
        };
        self.drafts.entry(qid).or_default().push(c);
    }

    /// Delete the last character of the current free-text draft.
    pub fn input_backspace(&mut self) {
        if !matches!(self.phase, Phase::Answering) {
            return;
        }
        let Some(qid) = self.current_question().map(|q| q.id) else {
            return;
        };
        if let Some(draft) = self.drafts.get_mut(&qid) {
            draft.pop();
        }
    }

    pub fn select_next_option(&mut self) {
        let Some(len) = self.current_question().map(|q| q.options.len()) else {
            return;
        };
        if len > 0 {
            self.selected_option = (self.selected_option + 1) % len;
        }
    }

    pub fn select_previous_option(&mut self) {
        let Some(len) = self.current_question().map(|q| q.options.len()) else {
            return;
        };
        if len > 0 {
            self.selected_option = (self.selected_option + len - 1) % len;
        }
    }

    /// Pointer pressed on a grid cell: start a drag. Starting a new drag
    /// discards the previously committed candidate.
    pub fn board_cell_down(&mut self, index: usize) {
        if !matches!(self.phase, Phase::Answering) {
            return;
        }
        let Some(qid) = self.current_question().map(|q| q.id) else {
            return;
        };
        if let ModeState::Board { tracker, .. } = &mut self.mode {
            tracker.on_cell_down(index);
            self.drafts.remove(&qid);
        }
    }

    /// Pointer moved onto a grid cell while dragging.
    pub fn board_cell_enter(&mut self, index: usize) {
        if !matches!(self.phase, Phase::Answering) {
            return;
        }
        if let ModeState::Board { tracker, .. } = &mut self.mode {
            tracker.on_cell_enter(index);
        }
    }

    /// Pointer lifted (or left the grid): commit the selection as the
    /// candidate answer. Safe to call with no active drag.
    pub fn board_drag_end(&mut self) {
        if !matches!(self.phase, Phase::Answering) {
            return;
        }
        let Some(qid) = self.current_question().map(|q| q.id) else {
            return;
        };
        if let ModeState::Board { board, tracker } = &mut self.mode {
            if let Some(candidate) = tracker.on_drag_end(board) {
                let candidate = candidate.to_string();
                self.drafts.insert(qid, candidate);
            }
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn quiz(&self) -> Option<&Quiz> {
        self.quiz.as_ref()
    }

    pub fn variant(&self) -> Option<QuizVariant> {
        self.quiz.as_ref().map(|q| q.variant)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn total_questions(&self) -> usize {
        self.quiz.as_ref().map(|q| q.questions.len()).unwrap_or(0)
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.quiz.as_ref().and_then(|q| q.questions.get(self.current))
    }

    pub fn selected_option(&self) -> usize {
        self.selected_option
    }

    /// Draft recorded for the current question, if any.
    pub fn current_draft(&self) -> &str {
        self.current_question()
            .and_then(|q| self.drafts.get(&q.id))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn remaining_secs(&self) -> Option<u32> {
        self.timer.as_ref().map(QuestionTimer::remaining_secs)
    }

    /// Id of the live countdown, if the session is answering.
    pub fn active_timer(&self) -> Option<TimerId> {
        self.timer.as_ref().map(QuestionTimer::id)
    }

    pub fn board(&self) -> Option<&Board> {
        match &self.mode {
            ModeState::Board { board, .. } => Some(board),
            _ => None,
        }
    }

    pub fn selection(&self) -> Option<&SelectionTracker> {
        match &self.mode {
            ModeState::Board { tracker, .. } => Some(tracker),
            _ => None,
        }
    }

    pub fn card_revealed(&self) -> bool {
        matches!(self.mode, ModeState::Card { revealed: true })
    }

    /// Ordered results, populated once the session reaches `Finished`.
    pub fn results(&self) -> &[QuestionResult] {
        &self.results
    }

    /// Rebuild ephemeral state for the question at `self.current` and
    /// start its countdown.
    fn enter_question(&mut self) {
        let Some(quiz) = self.quiz.as_ref() else {
            return;
        };
        let variant = quiz.variant;
        let Some(question) = quiz.questions.get(self.current) else {
            return;
        };
        let qid = question.id;
        let answer = question.answer.clone();
        let limit = question.time_limit_secs;
        let selected = self
            .drafts
            .get(&qid)
            .and_then(|draft| question.options.iter().position(|o| o == draft))
            .unwrap_or(0);

        self.mode = match variant {
            QuizVariant::Normal => ModeState::Standard,
            QuizVariant::CardGame => ModeState::Card { revealed: false },
            QuizVariant::BoardGame => {
                let board = Board::generate(&answer, DEFAULT_GRID_SIZE, &mut self.rng);
                let tracker = SelectionTracker::new(board.size());
                ModeState::Board { board, tracker }
            }
        };
        self.selected_option = selected;
        self.start_timer(limit);
        self.phase = Phase::Answering;
        debug!(
            "session {}: entering question {} (index {})",
            self.session_id, qid, self.current
        );
    }

    fn grade_current(&mut self, value: String) {
        self.cancel_timer();
        let Some(quiz) = self.quiz.as_ref() else {
            return;
        };
        let Some(question) = quiz.questions.get(self.current) else {
            return;
        };
        let qid = question.id;
        let is_correct = grade(question, &value);
        let feedback = Feedback {
            is_correct,
            prompt: question.prompt.clone(),
            correct_answer: question.answer.clone(),
        };
        info!(
            "session {}: question {} graded {}",
            self.session_id,
            qid,
            if is_correct { "correct" } else { "incorrect" }
        );
        self.drafts.insert(qid, value);
        self.outcomes.insert(qid, is_correct);
        self.phase = Phase::Feedback(feedback);
    }

    /// Build the ordered results (ungraded questions count as incorrect),
    /// emit them exactly once, and terminate the session.
    fn finish(&mut self) {
        self.cancel_timer();
        let Some(quiz) = self.quiz.as_ref() else {
            return;
        };
        let results: Vec<QuestionResult> = quiz
            .questions
            .iter()
            .map(|q| QuestionResult {
                question_id: q.id,
                was_correct: self.outcomes.get(&q.id).copied().unwrap_or(false),
            })
            .collect();
        self.results = results;
        self.mode = ModeState::Standard;
        self.phase = Phase::Finished;

        if !self.completed {
            self.completed = true;
            let correct = self.results.iter().filter(|r| r.was_correct).count();
            info!(
                "session {}: finished quiz '{}' ({}/{} correct)",
                self.session_id,
                quiz.id,
                correct,
                self.results.len()
            );
            self.sink
                .on_complete(&quiz.id, &self.results, quiz.team_members.as_deref());
        }
    }

    fn start_timer(&mut self, limit_secs: u32) {
        self.timer_seq += 1;
        self.timer = Some(QuestionTimer::new(TimerId::new(self.timer_seq), limit_secs));
    }

    /// Drop the countdown and burn its id so stale ticks can never match.
    fn cancel_timer(&mut self) {
        self.timer_seq += 1;
        self.timer = None;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::models::QuestionKind;
    use crate::session::DEFAULT_TIME_LIMIT_SECS;

    type CompletionCall = (String, Vec<QuestionResult>, Option<Vec<String>>);

    #[derive(Clone, Default)]
    struct RecordingSink {
        calls: Rc<RefCell<Vec<CompletionCall>>>,
    }

    impl CompletionSink for RecordingSink {
        fn on_complete(
            &mut self,
            quiz_id: &str,
            results: &[QuestionResult],
            team_members: Option<&[String]>,
        ) {
            self.calls.borrow_mut().push((
                quiz_id.to_string(),
                results.to_vec(),
                team_members.map(<[String]>::to_vec),
            ));
        }
    }

    fn choice(id: QuestionId, options: &[&str], answer: &str) -> Question {
        Question {
            id,
            kind: QuestionKind::Choice,
            prompt: format!("question {id}"),
            options: options.iter().map(|s| s.to_string()).collect(),
            answer: answer.to_string(),
            points: 10,
            time_limit_secs: 0,
            category: String::new(),
            image: None,
        }
    }

    fn free_text(id: QuestionId, answer: &str, limit: u32) -> Question {
        Question {
            id,
            kind: QuestionKind::FreeText,
            prompt: format!("question {id}"),
            options: Vec::new(),
            answer: answer.to_string(),
            points: 10,
            time_limit_secs: limit,
            category: String::new(),
            image: None,
        }
    }

    fn quiz(variant: QuizVariant, questions: Vec<Question>) -> Quiz {
        Quiz {
            id: "test-quiz".to_string(),
            topic: "Testing".to_string(),
            variant,
            questions,
            team_members: None,
        }
    }

    fn seeded(sink: &RecordingSink) -> SessionController {
        SessionController::with_rng(Box::new(sink.clone()), StdRng::seed_from_u64(7))
    }

    #[test]
    fn test_choice_scenario_end_to_end() {
        let sink = RecordingSink::default();
        let mut session = seeded(&sink);
        session.on_quiz_loaded(Ok(quiz(
            QuizVariant::Normal,
            vec![choice(1, &["A", "B"], "B")],
        )));
        assert!(matches!(session.phase(), Phase::Answering));

        session.select_next_option();
        assert_eq!(session.selected_option(), 1);
        session.submit_answer("B".to_string());

        match session.phase() {
            Phase::Feedback(feedback) => assert!(feedback.is_correct),
            other => panic!("expected feedback, got {:?}", other),
        }

        session.advance();
        assert!(matches!(session.phase(), Phase::Finished));

        let calls = sink.calls.borrow();
        assert_eq!(calls.len(), 1);
        let (quiz_id, results, team) = &calls[0];
        assert_eq!(quiz_id, "test-quiz");
        assert!(team.is_none());
        assert_eq!(
            results,
            &vec![QuestionResult {
                question_id: 1,
                was_correct: true
            }]
        );
    }

    #[test]
    fn test_timeout_grades_once_with_existing_draft() {
        let sink = RecordingSink::default();
        let mut session = seeded(&sink);
        session.on_quiz_loaded(Ok(quiz(
            QuizVariant::Normal,
            vec![free_text(1, "PLANT", 30)],
        )));

        let id = session.active_timer().unwrap();
        assert_eq!(session.remaining_secs(), Some(30));

        for _ in 0..29 {
            session.handle_tick(id);
        }
        assert!(matches!(session.phase(), Phase::Answering));
        assert_eq!(session.remaining_secs(), Some(1));

        session.handle_tick(id);
        match session.phase() {
            Phase::Feedback(feedback) => assert!(!feedback.is_correct),
            other => panic!("expected feedback, got {:?}", other),
        }
        assert_eq!(session.current_draft(), "");

        // Extra ticks after expiry change nothing.
        session.handle_tick(id);
        assert!(matches!(session.phase(), Phase::Feedback(_)));
    }

    #[test]
    fn test_default_limit_when_question_has_none() {
        let sink = RecordingSink::default();
        let mut session = seeded(&sink);
        session.on_quiz_loaded(Ok(quiz(
            QuizVariant::Normal,
            vec![free_text(1, "X", 0)],
        )));
        assert_eq!(session.remaining_secs(), Some(DEFAULT_TIME_LIMIT_SECS));
    }

    #[test]
    fn test_stale_tick_never_reaches_new_question() {
        let sink = RecordingSink::default();
        let mut session = seeded(&sink);
        session.on_quiz_loaded(Ok(quiz(
            QuizVariant::Normal,
            vec![free_text(1, "A", 5), free_text(2, "B", 5)],
        )));

        let first_id = session.active_timer().unwrap();
        session.submit_answer("A".to_string());
        assert!(session.active_timer().is_none());

        session.advance();
        let second_id = session.active_timer().unwrap();
        assert_ne!(first_id, second_id);

        // A whole flood of ticks addressed to the dead timer is inert.
        for _ in 0..100 {
            session.handle_tick(first_id);
        }
        assert!(matches!(session.phase(), Phase::Answering));
        assert_eq!(session.remaining_secs(), Some(5));
    }

    #[test]
    fn test_manual_submit_cancels_timer() {
        let sink = RecordingSink::default();
        let mut session = seeded(&sink);
        session.on_quiz_loaded(Ok(quiz(
            QuizVariant::Normal,
            vec![free_text(1, "A", 10)],
        )));

        session.input_char('a');
        session.submit_answer(session.current_draft().to_string());
        assert!(session.active_timer().is_none());
        assert!(session.remaining_secs().is_none());
    }

    #[test]
    fn test_zero_question_quiz_completes_immediately() {
        let sink = RecordingSink::default();
        let mut session = seeded(&sink);
        session.on_quiz_loaded(Ok(quiz(QuizVariant::Normal, Vec::new())));

        assert!(matches!(session.phase(), Phase::Finished));
        assert!(session.active_timer().is_none());

        let calls = sink.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].1.is_empty());
    }

    #[test]
    fn test_load_failure_is_terminal_and_silent() {
        let sink = RecordingSink::default();
        let mut session = seeded(&sink);
        session.on_quiz_loaded(Err(LoadError::InvalidId(String::new())));

        assert!(matches!(session.phase(), Phase::Error(_)));
        assert!(session.active_timer().is_none());
        assert!(sink.calls.borrow().is_empty());

        // No session state exists; events fall through.
        session.submit_answer("X".to_string());
        session.advance();
        assert!(matches!(session.phase(), Phase::Error(_)));
        assert!(sink.calls.borrow().is_empty());
    }

    #[test]
    fn test_results_ordered_with_regrade_overwrite() {
        let sink = RecordingSink::default();
        let mut session = seeded(&sink);
        session.on_quiz_loaded(Ok(quiz(
            QuizVariant::Normal,
            vec![
                free_text(10, "ALPHA", 5),
                free_text(20, "BETA", 5),
                free_text(30, "GAMMA", 5),
            ],
        )));

        // Grade question 10 wrong, move on, step back, regrade it right.
        session.submit_answer("wrong".to_string());
        session.advance();
        assert_eq!(session.current_index(), 1);
        session.go_previous();
        assert_eq!(session.current_index(), 0);
        session.submit_answer("alpha".to_string());
        session.advance();

        session.submit_answer("beta".to_string());
        session.advance();
        session.submit_answer("nope".to_string());
        session.advance();

        let calls = sink.calls.borrow();
        assert_eq!(calls.len(), 1);
        let results = &calls[0].1;
        assert_eq!(
            results.iter().map(|r| r.question_id).collect::<Vec<_>>(),
            vec![10, 20, 30]
        );
        assert_eq!(
            results.iter().map(|r| r.was_correct).collect::<Vec<_>>(),
            vec![true, true, false]
        );
    }

    #[test]
    fn test_go_previous_guards() {
        let sink = RecordingSink::default();
        let mut session = seeded(&sink);
        session.on_quiz_loaded(Ok(quiz(
            QuizVariant::Normal,
            vec![free_text(1, "A", 5), free_text(2, "B", 5)],
        )));

        // At the first question there is nothing to go back to.
        session.go_previous();
        assert_eq!(session.current_index(), 0);

        session.submit_answer("a".to_string());
        session.advance();
        let before = session.active_timer().unwrap();
        session.go_previous();
        assert_eq!(session.current_index(), 0);
        // Navigation restarts a fresh countdown.
        assert_ne!(session.active_timer().unwrap(), before);
        // The earlier draft survives the trip back.
        assert_eq!(session.current_draft(), "a");
    }

    #[test]
    fn test_go_previous_disallowed_in_board_variant() {
        let sink = RecordingSink::default();
        let mut session = seeded(&sink);
        session.on_quiz_loaded(Ok(quiz(
            QuizVariant::BoardGame,
            vec![free_text(1, "CAT", 5), free_text(2, "DOG", 5)],
        )));

        session.submit_answer("cat".to_string());
        session.advance();
        assert_eq!(session.current_index(), 1);
        session.go_previous();
        assert_eq!(session.current_index(), 1);
    }

    #[test]
    fn test_board_drag_submits_found_word() {
        let sink = RecordingSink::default();
        let mut session = seeded(&sink);
        session.on_quiz_loaded(Ok(quiz(
            QuizVariant::BoardGame,
            vec![free_text(1, "PLANT", 30)],
        )));

        let board = session.board().expect("board variant builds a grid");
        let size = board.size();
        let placement = board.placement().expect("PLANT fits the grid");
        assert_eq!(
            board.read_run(placement.start, placement.delta, 5).unwrap(),
            "PLANT"
        );

        // Trace the placement cell by cell; straight runs are always
        // Chebyshev-1 steps.
        let mut row = (placement.start / size) as i32;
        let mut col = (placement.start % size) as i32;
        let mut cells = Vec::new();
        for _ in 0..5 {
            cells.push(row as usize * size + col as usize);
            row += placement.delta.0;
            col += placement.delta.1;
        }

        session.board_cell_down(cells[0]);
        for &cell in &cells[1..] {
            session.board_cell_enter(cell);
        }
        session.board_drag_end();
        assert_eq!(session.current_draft(), "PLANT");

        session.submit_answer(session.current_draft().to_string());
        match session.phase() {
            Phase::Feedback(feedback) => assert!(feedback.is_correct),
            other => panic!("expected feedback, got {:?}", other),
        }
    }

    #[test]
    fn test_new_question_regenerates_board_and_clears_selection() {
        let sink = RecordingSink::default();
        let mut session = seeded(&sink);
        session.on_quiz_loaded(Ok(quiz(
            QuizVariant::BoardGame,
            vec![free_text(1, "CAT", 30), free_text(2, "DOG", 30)],
        )));

        session.board_cell_down(0);
        session.board_cell_enter(1);
        session.board_drag_end();
        assert!(!session.current_draft().is_empty());

        session.submit_answer(session.current_draft().to_string());
        session.advance();

        let tracker = session.selection().unwrap();
        assert!(tracker.selected().is_empty());
        assert!(tracker.candidate().is_none());
        assert_eq!(session.current_draft(), "");
        let board = session.board().unwrap();
        let placement = board.placement().unwrap();
        assert_eq!(
            board.read_run(placement.start, placement.delta, 3).unwrap(),
            "DOG"
        );
    }

    #[test]
    fn test_card_flip_resets_on_advance() {
        let sink = RecordingSink::default();
        let mut session = seeded(&sink);
        session.on_quiz_loaded(Ok(quiz(
            QuizVariant::CardGame,
            vec![free_text(1, "A", 5), free_text(2, "B", 5)],
        )));

        assert!(!session.card_revealed());
        session.flip_card();
        assert!(session.card_revealed());

        session.submit_answer("a".to_string());
        session.advance();
        assert!(!session.card_revealed());
    }

    #[test]
    fn test_completion_reports_team_members() {
        let sink = RecordingSink::default();
        let mut session = seeded(&sink);
        let mut q = quiz(QuizVariant::Normal, vec![free_text(1, "A", 5)]);
        q.team_members = Some(vec!["Ada".to_string(), "Grace".to_string()]);
        session.on_quiz_loaded(Ok(q));

        session.submit_answer("A".to_string());
        session.advance();

        let calls = sink.calls.borrow();
        assert_eq!(
            calls[0].2.as_deref(),
            Some(&["Ada".to_string(), "Grace".to_string()][..])
        );
    }

    #[test]
    fn test_results_emitted_exactly_once() {
        let sink = RecordingSink::default();
        let mut session = seeded(&sink);
        session.on_quiz_loaded(Ok(quiz(QuizVariant::Normal, vec![free_text(1, "A", 5)])));

        session.submit_answer("A".to_string());
        session.advance();
        // Further events after Finished are inert.
        session.advance();
        session.submit_answer("A".to_string());
        session.force_submit_on_timeout();
        assert_eq!(sink.calls.borrow().len(), 1);
    }

    #[test]
    fn test_free_text_draft_editing() {
        let sink = RecordingSink::default();
        let mut session = seeded(&sink);
        session.on_quiz_loaded(Ok(quiz(QuizVariant::Normal, vec![free_text(1, "HI", 5)])));

        session.input_char('h');
        session.input_char('x');
        session.input_backspace();
        session.input_char('i');
        assert_eq!(session.current_draft(), "hi");

        session.submit_answer(session.current_draft().to_string());
        match session.phase() {
            Phase::Feedback(feedback) => assert!(feedback.is_correct),
            other => panic!("expected feedback, got {:?}", other),
        }
    }

    #[test]
    fn test_choice_selection_restored_when_revisiting() {
        let sink = RecordingSink::default();
        let mut session = seeded(&sink);
        session.on_quiz_loaded(Ok(quiz(
            QuizVariant::Normal,
            vec![
                choice(1, &["A", "B", "C"], "C"),
                choice(2, &["X", "Y"], "X"),
            ],
        )));

        session.select_next_option();
        session.select_next_option();
        session.submit_answer("C".to_string());
        session.advance();
        assert_eq!(session.selected_option(), 0);

        session.go_previous();
        // The draft "C" maps back to option index 2.
        assert_eq!(session.selected_option(), 2);
    }
}
