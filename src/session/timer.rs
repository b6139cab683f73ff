//! Per-question countdown.

/// Seconds granted when a question carries no explicit time limit.
pub const DEFAULT_TIME_LIMIT_SECS: u32 = 30;

/// Token identifying one countdown instance.
///
/// Every timer gets a fresh id; ticks are addressed to an id, so a tick
/// left over from a superseded question can never touch the countdown of
/// the question that replaced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

impl TimerId {
    pub fn new(seq: u64) -> Self {
        Self(seq)
    }
}

/// Countdown for the question currently being answered.
#[derive(Debug)]
pub struct QuestionTimer {
    id: TimerId,
    remaining: u32,
}

impl QuestionTimer {
    /// A zero limit falls back to [`DEFAULT_TIME_LIMIT_SECS`].
    pub fn new(id: TimerId, limit_secs: u32) -> Self {
        let remaining = if limit_secs > 0 {
            limit_secs
        } else {
            DEFAULT_TIME_LIMIT_SECS
        };
        Self { id, remaining }
    }

    pub fn id(&self) -> TimerId {
        self.id
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining
    }

    /// Advance one second; returns true when the countdown reaches zero.
    pub fn tick(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_limit_uses_default() {
        let timer = QuestionTimer::new(TimerId::new(1), 0);
        assert_eq!(timer.remaining_secs(), DEFAULT_TIME_LIMIT_SECS);

        let timer = QuestionTimer::new(TimerId::new(2), 45);
        assert_eq!(timer.remaining_secs(), 45);
    }

    #[test]
    fn test_expires_on_final_tick() {
        let mut timer = QuestionTimer::new(TimerId::new(1), 3);
        assert!(!timer.tick());
        assert!(!timer.tick());
        assert!(timer.tick());
        assert_eq!(timer.remaining_secs(), 0);
    }
}
