//! # gridquiz
//!
//! A terminal quiz engine: timed questions, lenient free-text grading,
//! and a word-search board variant where answers are found by dragging
//! through a letter grid.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use gridquiz::{JsonQuizSource, LogCompletion, QuizApp, QuizSource, SessionController};
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let source = JsonQuizSource::new("quizzes");
//!     let mut controller = SessionController::new(Box::new(LogCompletion));
//!     controller.on_quiz_loaded(source.load_quiz("solar-system"));
//!
//!     QuizApp::new(controller).run().await
//! }
//! ```

pub mod board;
pub mod data;
pub mod grading;
pub mod models;
pub mod session;
pub mod terminal;
mod ui;

use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::prelude::Rect;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub use data::{CompletionSink, JsonQuizSource, LoadError, LogCompletion, QuizSource};
pub use models::{Question, QuestionId, QuestionKind, QuestionResult, Quiz, QuizVariant};
pub use session::{Feedback, Phase, SessionController, TimerId};

use models::QuizVariant as Variant;

/// One-second ticker feeding the controller's countdown. Owned by the
/// event loop and replaced (old task aborted) whenever the controller's
/// active timer changes, so ticks for a superseded question stop at the
/// source and are discarded by id if already queued.
struct Ticker {
    id: TimerId,
    task: JoinHandle<()>,
}

/// A quiz session wired to the terminal.
pub struct QuizApp {
    controller: SessionController,
    result_scroll: usize,
}

impl QuizApp {
    pub fn new(controller: SessionController) -> Self {
        Self {
            controller,
            result_scroll: 0,
        }
    }

    /// Convenience constructor: load `quiz_id` from `source` and settle
    /// the session with the outcome.
    pub fn load(source: &dyn QuizSource, quiz_id: &str, sink: Box<dyn CompletionSink>) -> Self {
        let mut controller = SessionController::new(sink);
        controller.on_quiz_loaded(source.load_quiz(quiz_id));
        Self::new(controller)
    }

    pub fn controller(&self) -> &SessionController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut SessionController {
        &mut self.controller
    }

    /// Run the session in the terminal until it is quit.
    pub async fn run(mut self) -> io::Result<()> {
        let mut term = terminal::init()?;
        let result = self.event_loop(&mut term).await;
        terminal::restore()?;
        result
    }

    async fn event_loop(&mut self, term: &mut terminal::AppTerminal) -> io::Result<()> {
        let (tick_tx, mut tick_rx) = mpsc::unbounded_channel::<TimerId>();
        let mut ticker: Option<Ticker> = None;
        let mut frame_area = Rect::default();

        loop {
            sync_ticker(&self.controller, &mut ticker, &tick_tx);

            term.draw(|frame| {
                frame_area = frame.area();
                ui::render(frame, &self.controller, self.result_scroll);
            })?;

            // Deliver pending ticks before reading input.
            while let Ok(id) = tick_rx.try_recv() {
                self.controller.handle_tick(id);
            }

            if event::poll(Duration::from_millis(50))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.handle_key(key.code) {
                            break;
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse, frame_area),
                    _ => {}
                }
            }
        }

        if let Some(ticker) = ticker {
            ticker.task.abort();
        }
        Ok(())
    }

    /// Returns true if the app should exit.
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.controller.phase() {
            Phase::Loading => matches!(key, KeyCode::Char('q') | KeyCode::Esc),
            Phase::Error(_) => matches!(key, KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter),
            Phase::Answering => self.handle_answering_key(key),
            Phase::Feedback(_) => self.handle_feedback_key(key),
            Phase::Finished => self.handle_finished_key(key),
        }
    }

    fn handle_answering_key(&mut self, key: KeyCode) -> bool {
        let Some(question) = self.controller.current_question() else {
            return false;
        };
        let kind = question.kind;
        let variant = self.controller.variant().unwrap_or(Variant::Normal);

        if variant == Variant::CardGame && key == KeyCode::Tab {
            self.controller.flip_card();
            return false;
        }
        if variant != Variant::BoardGame && key == KeyCode::Left {
            self.controller.go_previous();
            return false;
        }
        if key == KeyCode::Esc {
            return true;
        }

        if variant == Variant::BoardGame {
            // Answers come from dragging; the keyboard only submits.
            if key == KeyCode::Enter {
                let value = self.controller.current_draft().to_string();
                self.controller.submit_answer(value);
            }
            return false;
        }

        match kind {
            QuestionKind::Choice => match key {
                KeyCode::Up | KeyCode::Char('k') => self.controller.select_previous_option(),
                KeyCode::Down | KeyCode::Char('j') => self.controller.select_next_option(),
                KeyCode::Enter | KeyCode::Char(' ') => {
                    let value = self
                        .controller
                        .current_question()
                        .and_then(|q| q.options.get(self.controller.selected_option()))
                        .cloned()
                        .unwrap_or_default();
                    self.controller.submit_answer(value);
                }
                KeyCode::Char('q') => return true,
                _ => {}
            },
            QuestionKind::FreeText => match key {
                KeyCode::Enter => {
                    let value = self.controller.current_draft().to_string();
                    self.controller.submit_answer(value);
                }
                KeyCode::Backspace => self.controller.input_backspace(),
                KeyCode::Char(c) => self.controller.input_char(c),
                _ => {}
            },
        }
        false
    }

    fn handle_feedback_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.controller.advance();
                false
            }
            KeyCode::Char('q') | KeyCode::Esc => true,
            _ => false,
        }
    }

    fn handle_finished_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Down | KeyCode::Char('j') => {
                let max_scroll = self.controller.results().len().saturating_sub(1);
                self.result_scroll = (self.result_scroll + 1).min(max_scroll);
                false
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.result_scroll = self.result_scroll.saturating_sub(1);
                false
            }
            KeyCode::Char('q') | KeyCode::Esc => true,
            _ => false,
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, frame_area: Rect) {
        if !matches!(self.controller.phase(), Phase::Answering) {
            return;
        }
        let Some(size) = self.controller.board().map(|b| b.size()) else {
            return;
        };
        let grid = ui::board_grid_rect(frame_area, size);
        let cell = ui::board_cell_at(grid, size, mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(index) = cell {
                    self.controller.board_cell_down(index);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => match cell {
                Some(index) => self.controller.board_cell_enter(index),
                // Dragging off the grid ends the gesture.
                None => self.controller.board_drag_end(),
            },
            MouseEventKind::Up(MouseButton::Left) => self.controller.board_drag_end(),
            _ => {}
        }
    }
}

/// Keep the spawned ticker aligned with the controller's active timer:
/// abort it when the timer is gone or superseded, spawn a new one when a
/// fresh countdown starts.
fn sync_ticker(
    controller: &SessionController,
    ticker: &mut Option<Ticker>,
    tick_tx: &mpsc::UnboundedSender<TimerId>,
) {
    let active = controller.active_timer();
    if active == ticker.as_ref().map(|t| t.id) {
        return;
    }

    if let Some(old) = ticker.take() {
        old.task.abort();
    }
    if let Some(id) = active {
        let tx = tick_tx.clone();
        let task = tokio::spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_secs(1)).await;
                if tx.send(id).is_err() {
                    break;
                }
            }
        });
        *ticker = Some(Ticker { id, task });
    }
}
