//! Sensor-triggered vending loop.

use core::time::Duration;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::{validate_trigger, TriggerConfig};
use crate::error::{Error, Result, SensorError};
use crate::motion::{pause, Direction};
use crate::motor::{Sequencer, StopFlag};
use crate::trigger::{DistanceSensor, Edge, PresenceDetector};

/// What a single poll did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Sensor gave no usable reading; state unchanged.
    NoReading,
    /// Reading taken, no edge.
    Unchanged,
    /// Trigger edge: a full vend ran, outputs were reset and the cooldown elapsed.
    Vended {
        /// Steps taken by the vend.
        steps: u32,
    },
    /// Release edge: the detector re-armed.
    Released,
    /// A stop request cut the vend or cooldown short. Outputs were reset.
    Stopped,
}

/// Polls a distance sensor and runs the motor on each trigger edge.
///
/// Generic over:
/// - `P`, `D`: the sequencer's pin and dwell-delay types
/// - `S`: the distance sensor
/// - `W`: delay used for poll pacing and cooldown
pub struct VendingLoop<P, D, S, W>
where
    P: OutputPin,
    D: DelayNs,
    S: DistanceSensor,
    W: DelayNs,
{
    sequencer: Sequencer<P, D>,
    sensor: S,
    pacing: W,
    detector: PresenceDetector,
    config: TriggerConfig,
}

impl<P, D, S, W> VendingLoop<P, D, S, W>
where
    P: OutputPin,
    D: DelayNs,
    S: DistanceSensor,
    W: DelayNs,
{
    /// Create a loop around an already-built sequencer.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the trigger configuration is invalid.
    pub fn new(sequencer: Sequencer<P, D>, sensor: S, pacing: W, config: TriggerConfig) -> Result<Self> {
        validate_trigger(&config)?;
        Ok(Self {
            sequencer,
            sensor,
            pacing,
            detector: PresenceDetector::from_config(&config),
            config,
        })
    }

    /// The sequencer.
    pub fn sequencer(&self) -> &Sequencer<P, D> {
        &self.sequencer
    }

    /// The presence detector.
    pub fn detector(&self) -> &PresenceDetector {
        &self.detector
    }

    /// Steps run per vend.
    pub fn vend_steps(&self) -> u32 {
        self.config.vend_steps_for(self.sequencer.steps_per_revolution())
    }

    /// Take the loop apart.
    pub fn into_parts(self) -> (Sequencer<P, D>, S, W) {
        (self.sequencer, self.sensor, self.pacing)
    }

    /// Read the sensor once and act on any edge. Does not pace.
    ///
    /// # Errors
    ///
    /// Sensor pin faults and motor write errors are returned. Timeouts and
    /// out-of-range readings are not errors.
    pub fn poll_once(&mut self, stop: &StopFlag) -> Result<PollOutcome> {
        let reading = match self.sensor.read() {
            Ok(distance) => Some(distance),
            Err(SensorError::Timeout) | Err(SensorError::OutOfRange) => {
                debug!("no distance reading");
                None
            }
            Err(e) => return Err(Error::Sensor(e)),
        };

        match self.detector.update(reading) {
            Some(Edge::Triggered) => {
                if let Some(distance) = reading {
                    debug!("distance: {}", distance.0);
                }
                info!("triggered");
                self.vend(stop)
            }
            Some(Edge::Released) => {
                if let Some(distance) = reading {
                    debug!("distance: {}", distance.0);
                }
                info!("released");
                Ok(PollOutcome::Released)
            }
            None if reading.is_none() => Ok(PollOutcome::NoReading),
            None => Ok(PollOutcome::Unchanged),
        }
    }

    /// Poll at the configured interval until `stop` is requested.
    ///
    /// Outputs are driven low before returning on every path.
    ///
    /// # Errors
    ///
    /// The first error from [`VendingLoop::poll_once`]; a reset failure is
    /// returned only if polling itself succeeded.
    pub fn run(&mut self, stop: &StopFlag) -> Result<u32> {
        self.run_with(stop, |_| {})
    }

    /// Same as [`VendingLoop::run`], handing every poll outcome to `on_poll`.
    pub fn run_with<F>(&mut self, stop: &StopFlag, mut on_poll: F) -> Result<u32>
    where
        F: FnMut(PollOutcome),
    {
        let mut vends = 0;
        let polled = loop {
            if stop.is_requested() {
                break Ok(());
            }
            let outcome = match self.poll_once(stop) {
                Ok(outcome) => outcome,
                Err(e) => break Err(e),
            };
            on_poll(outcome);
            match outcome {
                PollOutcome::Vended { .. } => vends += 1,
                PollOutcome::Stopped => break Ok(()),
                _ => {}
            }
            pause(&mut self.pacing, Duration::from_millis(self.config.poll_interval_ms as u64));
        };

        info!("vending loop stopping after {} vends", vends);
        let reset = self.sequencer.reset();
        polled?;
        reset?;
        Ok(vends)
    }

    fn vend(&mut self, stop: &StopFlag) -> Result<PollOutcome> {
        let steps = self.vend_steps();
        info!("vending {} steps", steps);

        let stepped = self
            .sequencer
            .step_until_stopped(steps, Direction::Clockwise, stop);
        let reset = self.sequencer.reset();
        let completed = stepped?;
        reset?;

        if completed < steps || !self.cool_down(stop) {
            return Ok(PollOutcome::Stopped);
        }
        Ok(PollOutcome::Vended { steps: completed })
    }

    /// Sleep the cooldown in poll-interval slices. Returns false if stopped.
    fn cool_down(&mut self, stop: &StopFlag) -> bool {
        let slice = self.config.poll_interval_ms;
        let mut remaining = self.config.cooldown_ms;
        while remaining > 0 {
            if stop.is_requested() {
                return false;
            }
            let chunk = remaining.min(slice);
            pause(&mut self.pacing, Duration::from_millis(chunk as u64));
            remaining -= chunk;
        }
        true
    }
}
