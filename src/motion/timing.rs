//! Speed-to-dwell timing math.
//!
//! One step is held for `(60000 / steps_per_revolution) / rpm` milliseconds.

use core::time::Duration;

use embedded_hal::delay::DelayNs;
use libm::round;

use crate::config::units::Rpm;
use crate::error::{ConfigError, Error, Result};

const NANOS_PER_MINUTE: f64 = 60_000_000_000.0;
const NANOS_PER_MILLI: u32 = 1_000_000;

/// Timing parameters for a stepper: revolution size and target speed.
///
/// Values are stored as given; validity is checked whenever a dwell is
/// computed, so a bad speed can never produce an infinite or negative pause.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepTiming {
    steps_per_revolution: u32,
    speed: Rpm,
}

impl StepTiming {
    /// Create timing parameters without validating them.
    #[inline]
    pub const fn new(steps_per_revolution: u32, speed: Rpm) -> Self {
        Self {
            steps_per_revolution,
            speed,
        }
    }

    /// Steps per output revolution.
    #[inline]
    pub fn steps_per_revolution(&self) -> u32 {
        self.steps_per_revolution
    }

    /// Target speed.
    #[inline]
    pub fn speed(&self) -> Rpm {
        self.speed
    }

    /// Replace the target speed (not validated until the next dwell).
    #[inline]
    pub fn set_speed(&mut self, speed: Rpm) {
        self.speed = speed;
    }

    /// Check both parameters.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStepsPerRevolution` or `InvalidSpeed`.
    pub fn validate(&self) -> Result<()> {
        if self.steps_per_revolution == 0 {
            return Err(Error::Config(ConfigError::InvalidStepsPerRevolution(
                self.steps_per_revolution,
            )));
        }
        if !self.speed.is_valid() {
            return Err(Error::Config(ConfigError::InvalidSpeed(self.speed.0)));
        }
        Ok(())
    }

    /// Dwell per step in nanoseconds, rounded to the nearest nanosecond.
    ///
    /// # Errors
    ///
    /// Fails with a configuration error for a zero revolution size or a
    /// non-positive / non-finite speed.
    pub fn dwell_ns(&self) -> Result<u64> {
        self.validate()?;
        let ns = NANOS_PER_MINUTE / (self.steps_per_revolution as f64 * self.speed.0 as f64);
        Ok(round(ns) as u64)
    }

    /// Dwell per step as a [`Duration`]. Recomputed on every call.
    ///
    /// # Errors
    ///
    /// Same as [`StepTiming::dwell_ns`].
    pub fn dwell_time(&self) -> Result<Duration> {
        self.dwell_ns().map(Duration::from_nanos)
    }
}

/// Block on `delay` for `duration`.
///
/// Whole milliseconds go through `delay_ms` so pauses longer than a `u32`
/// nanosecond count are not truncated; the remainder uses `delay_ns`.
pub fn pause<D: DelayNs>(delay: &mut D, duration: Duration) {
    let mut whole_ms = duration.as_millis();
    while whole_ms > 0 {
        let chunk = whole_ms.min(u32::MAX as u128) as u32;
        delay.delay_ms(chunk);
        whole_ms -= chunk as u128;
    }

    let remainder_ns = duration.subsec_nanos() % NANOS_PER_MILLI;
    if remainder_ns > 0 {
        delay.delay_ns(remainder_ns);
    }
}
