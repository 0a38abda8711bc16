//! HC-SR04 ultrasonic ranging driver.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::config::units::Centimeters;
use crate::error::SensorError;

use super::sensor::DistanceSensor;

/// Give up on an echo edge after this long.
pub const DEFAULT_ECHO_TIMEOUT_US: u64 = 30_000;

/// Datasheet ranging limit.
pub const MAX_RANGE: Centimeters = Centimeters(400.0);

/// Speed of sound, cm per microsecond, halved for the round trip.
const CM_PER_ECHO_US: f32 = 0.0343 / 2.0;

const TRIGGER_PULSE_US: u32 = 10;
const TRIGGER_SETTLE_US: u32 = 2;

/// Monotonic microsecond time source used to measure the echo pulse.
pub trait Clock {
    /// Microseconds since an arbitrary fixed origin.
    fn now_us(&mut self) -> u64;
}

/// [`Clock`] backed by `std::time::Instant`.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl SystemClock {
    /// Start a clock at zero.
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for SystemClock {
    fn now_us(&mut self) -> u64 {
        self.origin.elapsed().as_micros() as u64
    }
}

/// HC-SR04 driver.
///
/// Sends a 10 µs trigger pulse and times the echo pulse. Each echo edge is
/// bounded by the timeout; a missing edge means nothing in range.
pub struct Hcsr04<TRIG, ECHO, D, C>
where
    TRIG: OutputPin,
    ECHO: InputPin,
    D: DelayNs,
    C: Clock,
{
    trigger: TRIG,
    echo: ECHO,
    delay: D,
    clock: C,
    timeout_us: u64,
}

impl<TRIG, ECHO, D, C> Hcsr04<TRIG, ECHO, D, C>
where
    TRIG: OutputPin,
    ECHO: InputPin,
    D: DelayNs,
    C: Clock,
{
    /// Create a driver with the default 30 ms echo timeout.
    pub fn new(trigger: TRIG, echo: ECHO, delay: D, clock: C) -> Self {
        Self {
            trigger,
            echo,
            delay,
            clock,
            timeout_us: DEFAULT_ECHO_TIMEOUT_US,
        }
    }

    /// Override the per-edge echo timeout.
    pub fn with_timeout_us(mut self, timeout_us: u64) -> Self {
        self.timeout_us = timeout_us;
        self
    }

    /// Release the pins, delay and clock.
    pub fn release(self) -> (TRIG, ECHO, D, C) {
        (self.trigger, self.echo, self.delay, self.clock)
    }

    /// Take one measurement.
    ///
    /// # Errors
    ///
    /// `Timeout` if an echo edge does not arrive in time, `OutOfRange` past
    /// [`MAX_RANGE`], `Pin` if a pin operation fails.
    pub fn measure(&mut self) -> Result<Centimeters, SensorError> {
        self.trigger.set_low().map_err(|_| SensorError::Pin)?;
        self.delay.delay_us(TRIGGER_SETTLE_US);
        self.trigger.set_high().map_err(|_| SensorError::Pin)?;
        self.delay.delay_us(TRIGGER_PULSE_US);
        self.trigger.set_low().map_err(|_| SensorError::Pin)?;

        let start = self.clock.now_us();
        while !self.echo.is_high().map_err(|_| SensorError::Pin)? {
            if self.clock.now_us().saturating_sub(start) > self.timeout_us {
                return Err(SensorError::Timeout);
            }
        }

        let rise = self.clock.now_us();
        while self.echo.is_high().map_err(|_| SensorError::Pin)? {
            if self.clock.now_us().saturating_sub(rise) > self.timeout_us {
                return Err(SensorError::Timeout);
            }
        }
        let width_us = self.clock.now_us().saturating_sub(rise);

        let distance = Centimeters(width_us as f32 * CM_PER_ECHO_US);
        if distance > MAX_RANGE {
            return Err(SensorError::OutOfRange);
        }
        Ok(distance)
    }
}

impl<TRIG, ECHO, D, C> DistanceSensor for Hcsr04<TRIG, ECHO, D, C>
where
    TRIG: OutputPin,
    ECHO: InputPin,
    D: DelayNs,
    C: Clock,
{
    fn read(&mut self) -> Result<Centimeters, SensorError> {
        self.measure()
    }
}
