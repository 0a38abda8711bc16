//! Position tracking for the sequencer.
//!
//! Tracks the absolute step count since start-up. The count is never reduced
//! modulo the table size; only the lookup into the phase table is.

/// Absolute step counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    /// Steps taken since start-up, signed by direction.
    steps: i64,
}

impl Position {
    /// Create a tracker at step 0.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current absolute step.
    #[inline]
    pub fn steps(&self) -> i64 {
        self.steps
    }

    /// Move by a number of steps.
    #[inline]
    pub fn move_steps(&mut self, delta: i64) {
        self.steps += delta;
    }
}
