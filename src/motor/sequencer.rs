//! Half-step sequencer.
//!
//! Generic over embedded-hal 1.0 output pins and a blocking delay.

use core::time::Duration;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::units::Rpm;
use crate::error::{Error, MotorError, Result};
use crate::motion::{pause, Direction, StepTiming};

use super::builder::SequencerBuilder;
use super::phase::{Phase, PhaseTable, ALL_LOW, CHANNELS, HALF_STEP};
use super::position::Position;
use super::stop::StopFlag;

/// Drives four coil lines through the half-step table.
///
/// Generic over:
/// - `P`: output pin type for the four coil lines (must implement `OutputPin`)
/// - `D`: delay provider used for the per-step dwell (must implement `DelayNs`)
///
/// The sequencer has no state beyond its absolute step counter. Every call to
/// [`Sequencer::step_one`] moves the counter by one, writes the phase for the
/// new counter value to the channels in index order, and blocks for one dwell.
pub struct Sequencer<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Coil lines in channel order (IN1..IN4).
    channels: [P; CHANNELS],

    /// Delay provider for step timing.
    delay: D,

    /// Revolution size and speed; the dwell is derived from these per step.
    timing: StepTiming,

    /// Absolute step count since construction.
    position: Position,

    /// Excitation pattern.
    table: &'static PhaseTable,

    /// Motor name for logging/debugging.
    name: heapless::String<32>,
}

impl<P, D> Sequencer<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Start building a sequencer.
    pub fn builder() -> SequencerBuilder<P, D> {
        SequencerBuilder::new()
    }

    /// Create a sequencer and drive every channel low.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for invalid timing, or a motor error if
    /// the initial low write fails.
    pub(crate) fn new(
        channels: [P; CHANNELS],
        delay: D,
        timing: StepTiming,
        name: heapless::String<32>,
    ) -> Result<Self> {
        timing.validate()?;

        let mut sequencer = Self {
            channels,
            delay,
            timing,
            position: Position::new(),
            table: &HALF_STEP,
            name,
        };
        sequencer.reset()?;
        Ok(sequencer)
    }

    /// Get the motor name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Absolute step count since construction.
    #[inline]
    pub fn current_step(&self) -> i64 {
        self.position.steps()
    }

    /// Index of the current phase within the table.
    #[inline]
    pub fn phase_index(&self) -> usize {
        self.table.index_of(self.current_step())
    }

    /// Steps per output revolution.
    #[inline]
    pub fn steps_per_revolution(&self) -> u32 {
        self.timing.steps_per_revolution()
    }

    /// Current target speed.
    #[inline]
    pub fn speed(&self) -> Rpm {
        self.timing.speed()
    }

    /// Change the target speed. Takes effect from the next step.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSpeed` and keeps the previous speed if `speed` is not
    /// finite and positive.
    pub fn set_speed(&mut self, speed: Rpm) -> Result<()> {
        let mut timing = self.timing;
        timing.set_speed(speed);
        timing.validate()?;
        self.timing = timing;
        debug!("speed set to {} rpm", speed.0);
        Ok(())
    }

    /// Dwell held after each step at the current speed.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the timing parameters are invalid.
    #[inline]
    pub fn dwell_time(&self) -> Result<Duration> {
        self.timing.dwell_time()
    }

    /// Advance one step in `direction` and hold for one dwell.
    ///
    /// The counter is updated before the channel writes. If a write fails the
    /// counter keeps the new value, the remaining channels are not written, and
    /// no dwell is taken.
    ///
    /// # Errors
    ///
    /// Returns a configuration error (before anything moves) for invalid
    /// timing, or `MotorError::PinError` for a failed channel write.
    pub fn step_one(&mut self, direction: Direction) -> Result<()> {
        let dwell = self.dwell_time()?;

        self.position.move_steps(direction.sign());
        let phase = self.table.phase_at(self.current_step());
        self.write_phase(&phase)?;

        pause(&mut self.delay, dwell);
        Ok(())
    }

    /// Run exactly `count` steps in `direction`, one after another.
    ///
    /// # Errors
    ///
    /// Stops at the first failing step and returns its error.
    pub fn step(&mut self, count: u32, direction: Direction) -> Result<()> {
        debug!("{}: stepping {} x {}", self.name.as_str(), count, direction.sign());
        for _ in 0..count {
            self.step_one(direction)?;
        }
        Ok(())
    }

    /// Run up to `count` steps, checking `stop` before each one.
    ///
    /// A step that has started always finishes its dwell. Returns the number of
    /// steps completed; the caller decides whether to [`Sequencer::reset`].
    ///
    /// # Errors
    ///
    /// Stops at the first failing step and returns its error.
    pub fn step_until_stopped(
        &mut self,
        count: u32,
        direction: Direction,
        stop: &StopFlag,
    ) -> Result<u32> {
        debug!("{}: stepping {} x {}", self.name.as_str(), count, direction.sign());
        let mut completed = 0;
        while completed < count {
            if stop.is_requested() {
                info!("{}: stop requested after {} of {} steps", self.name.as_str(), completed, count);
                break;
            }
            self.step_one(direction)?;
            completed += 1;
        }
        Ok(completed)
    }

    /// Drive every channel low. Leaves the step counter untouched.
    ///
    /// # Errors
    ///
    /// Returns `MotorError::PinError` for the first channel that fails; later
    /// channels are not written.
    pub fn reset(&mut self) -> Result<()> {
        trace!("{}: reset", self.name.as_str());
        self.write_phase(&ALL_LOW)
    }

    /// Release the pins and delay provider.
    pub fn release(self) -> ([P; CHANNELS], D) {
        (self.channels, self.delay)
    }

    fn write_phase(&mut self, phase: &Phase) -> Result<()> {
        for (channel, (pin, &level)) in self.channels.iter_mut().zip(phase.iter()).enumerate() {
            let written = if level { pin.set_high() } else { pin.set_low() };
            if written.is_err() {
                warn!("output channel {} write failed", channel);
                return Err(Error::Motor(MotorError::PinError { channel }));
            }
        }
        Ok(())
    }
}
