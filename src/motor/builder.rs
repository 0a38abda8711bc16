//! Builder pattern for Sequencer.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::units::Rpm;
use crate::config::{MotorConfig, SystemConfig, DEFAULT_SPEED_RPM, DEFAULT_STEPS_PER_REVOLUTION};
use crate::error::{ConfigError, Error, Result};
use crate::motion::StepTiming;

use super::phase::CHANNELS;
use super::sequencer::Sequencer;

/// Builder for creating Sequencer instances.
pub struct SequencerBuilder<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    channels: Option<[P; CHANNELS]>,
    delay: Option<D>,
    name: Option<heapless::String<32>>,
    steps_per_revolution: u32,
    speed: Rpm,
}

impl<P, D> Default for SequencerBuilder<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<P, D> SequencerBuilder<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Create a new builder with 4096 steps/rev at 15 RPM.
    pub fn new() -> Self {
        Self {
            channels: None,
            delay: None,
            name: None,
            steps_per_revolution: DEFAULT_STEPS_PER_REVOLUTION,
            speed: Rpm(DEFAULT_SPEED_RPM),
        }
    }

    /// Set the four coil lines, in IN1..IN4 order.
    pub fn channels(mut self, channels: [P; CHANNELS]) -> Self {
        self.channels = Some(channels);
        self
    }

    /// Set the delay provider.
    pub fn delay(mut self, delay: D) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the motor name.
    pub fn name(mut self, name: &str) -> Self {
        self.name = heapless::String::try_from(name).ok();
        self
    }

    /// Set steps per output revolution.
    pub fn steps_per_revolution(mut self, steps: u32) -> Self {
        self.steps_per_revolution = steps;
        self
    }

    /// Set target speed.
    pub fn speed(mut self, speed: Rpm) -> Self {
        self.speed = speed;
        self
    }

    /// Set target speed in RPM.
    pub fn speed_rpm(self, rpm: f32) -> Self {
        self.speed(Rpm(rpm))
    }

    /// Configure from a MotorConfig.
    pub fn from_motor_config(mut self, config: &MotorConfig) -> Self {
        self.name = Some(config.name.clone());
        self.steps_per_revolution = config.steps_per_revolution;
        self.speed = config.speed_rpm;
        self
    }

    /// Configure from the motor section of a SystemConfig.
    pub fn from_config(self, config: &SystemConfig) -> Self {
        self.from_motor_config(&config.motor)
    }

    /// Build the Sequencer. All channels are driven low before it is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if channels or delay are missing, if the timing is
    /// invalid, or if the initial low write fails.
    pub fn build(self) -> Result<Sequencer<P, D>> {
        let channels = self
            .channels
            .ok_or(Error::Config(ConfigError::MissingField("channels")))?;

        let delay = self
            .delay
            .ok_or(Error::Config(ConfigError::MissingField("delay")))?;

        let name = self
            .name
            .unwrap_or_else(|| heapless::String::try_from("motor").unwrap_or_default());

        let timing = StepTiming::new(self.steps_per_revolution, self.speed);

        Sequencer::new(channels, delay, timing, name)
    }
}
