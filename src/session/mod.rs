//! Session state machine and per-question timing.

mod controller;
mod timer;

pub use controller::{Feedback, Phase, SessionController};
pub use timer::{DEFAULT_TIME_LIMIT_SECS, QuestionTimer, TimerId};
