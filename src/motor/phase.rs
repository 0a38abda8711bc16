//! Half-step excitation table for a 4-coil unipolar stepper.

/// Number of output channels (coil lines IN1..IN4).
pub const CHANNELS: usize = 4;

/// Number of phases in the half-step cycle.
pub const PHASES: usize = 8;

/// Output levels for one phase, one entry per channel in channel order.
pub type Phase = [bool; CHANNELS];

/// All channels de-energized.
pub const ALL_LOW: Phase = [false; CHANNELS];

/// Cyclic sequence of output phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTable {
    phases: [Phase; PHASES],
}

/// The half-step sequence: single-coil and double-coil phases alternate, so
/// neighbouring entries (including the wrap from last to first) differ by a
/// single channel.
pub const HALF_STEP: PhaseTable = PhaseTable::new([
    [true, false, false, true],
    [true, false, false, false],
    [true, true, false, false],
    [false, true, false, false],
    [false, true, true, false],
    [false, false, true, false],
    [false, false, true, true],
    [false, false, false, true],
]);

impl PhaseTable {
    /// Create a table from explicit phases.
    pub const fn new(phases: [Phase; PHASES]) -> Self {
        Self { phases }
    }

    /// Number of phases in one cycle.
    #[inline]
    pub const fn phase_count(&self) -> usize {
        PHASES
    }

    /// Table index for an absolute step, normalized for negative steps.
    #[inline]
    pub fn index_of(&self, step: i64) -> usize {
        step.rem_euclid(self.phase_count() as i64) as usize
    }

    /// Phase for an absolute step (index taken modulo the phase count).
    #[inline]
    pub fn phase_at(&self, step: i64) -> Phase {
        self.phases[self.index_of(step)]
    }
}
