//! Standalone run: N steps then reset.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::error::Result;
use crate::motion::Direction;
use crate::motor::{Sequencer, StopFlag};

/// Outcome of a standalone run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    /// Steps asked for.
    pub requested: u32,
    /// Steps actually taken.
    pub completed: u32,
    /// Whether the run ended early on a stop request.
    pub stopped: bool,
}

/// Step `count` times in `direction`, then drive every channel low.
///
/// The reset runs on every exit path. If stepping failed, that error is
/// returned even when the reset also fails.
///
/// # Errors
///
/// Returns the first stepping error, otherwise any reset error.
pub fn run_steps<P, D>(
    sequencer: &mut Sequencer<P, D>,
    count: u32,
    direction: Direction,
    stop: &StopFlag,
) -> Result<RunReport>
where
    P: OutputPin,
    D: DelayNs,
{
    info!("{}: running {} steps", sequencer.name(), count);
    let stepped = sequencer.step_until_stopped(count, direction, stop);
    let reset = sequencer.reset();

    let completed = stepped?;
    reset?;

    let report = RunReport {
        requested: count,
        completed,
        stopped: completed < count,
    };
    info!("{}: run finished at step {}", sequencer.name(), sequencer.current_step());
    Ok(report)
}
