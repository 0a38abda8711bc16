//! Error types for the vendomatic library.
//!
//! Provides unified error handling across configuration, motor output, and
//! distance sensing.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all vendomatic operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error (invalid configuration).
    Config(ConfigError),
    /// Output channel write failure during stepping or reset.
    Motor(MotorError),
    /// Distance sensor failure.
    Sensor(SensorError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Steps per revolution must be > 0
    InvalidStepsPerRevolution(u32),
    /// Speed must be finite and > 0 RPM
    InvalidSpeed(f32),
    /// Trigger band must satisfy `near_min < near_max <= far`
    InvalidTriggerBand {
        /// Lower (exclusive) bound of the near band
        near_min: f32,
        /// Upper (exclusive) bound of the near band
        near_max: f32,
        /// Release distance
        far: f32,
    },
    /// Sensor poll interval must be > 0 ms
    InvalidPollInterval(u32),
    /// Steps per vend must be > 0 when set
    InvalidVendSteps(u32),
    /// A required builder field was not provided
    MissingField(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Motor output errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MotorError {
    /// Writing an output channel failed.
    PinError {
        /// Index of the channel whose write failed (0..4).
        channel: usize,
    },
}

/// Distance sensor errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// No echo edge seen within the timeout (target absent or too far).
    Timeout,
    /// The measured distance is outside the sensor's usable range.
    OutOfRange,
    /// Trigger or echo pin operation failed.
    Pin,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
            Error::Sensor(e) => write!(f, "Sensor error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidStepsPerRevolution(v) => {
                write!(f, "Invalid steps per revolution: {}. Must be > 0", v)
            }
            ConfigError::InvalidSpeed(v) => write!(f, "Invalid speed: {} RPM. Must be > 0", v),
            ConfigError::InvalidTriggerBand { near_min, near_max, far } => write!(
                f,
                "Invalid trigger band: need near_min ({}) < near_max ({}) <= far ({})",
                near_min, near_max, far
            ),
            ConfigError::InvalidPollInterval(v) => {
                write!(f, "Invalid poll interval: {} ms. Must be > 0", v)
            }
            ConfigError::InvalidVendSteps(v) => {
                write!(f, "Invalid vend steps: {}. Must be > 0", v)
            }
            ConfigError::MissingField(name) => write!(f, "{} is required", name),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::PinError { channel } => {
                write!(f, "GPIO write failed on output channel {}", channel)
            }
        }
    }
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorError::Timeout => write!(f, "Timed out waiting for echo"),
            SensorError::OutOfRange => write!(f, "Distance out of range"),
            SensorError::Pin => write!(f, "Sensor pin operation failed"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Error::Sensor(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}

#[cfg(feature = "std")]
impl std::error::Error for SensorError {}
