//! Unit types for physical quantities.
//!
//! Provides type-safe representations of rotational speed and distance to
//! prevent unit confusion at compile time.

use serde::Deserialize;

/// Rotational speed in revolutions per minute.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct Rpm(pub f32);

impl Rpm {
    /// Create a new Rpm value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Check that the speed is finite and strictly positive.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }
}

/// Distance in centimeters, as reported by the ultrasonic sensor.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct Centimeters(pub f32);

impl Centimeters {
    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }
}
