//! Distance sensor seam.

use crate::config::units::Centimeters;
use crate::error::SensorError;

/// Anything that can report the distance to the nearest object.
pub trait DistanceSensor {
    /// Take one reading.
    ///
    /// # Errors
    ///
    /// `SensorError::Timeout` or `SensorError::OutOfRange` when nothing usable
    /// was measured; `SensorError::Pin` for hardware faults.
    fn read(&mut self) -> Result<Centimeters, SensorError>;
}

impl<S: DistanceSensor + ?Sized> DistanceSensor for &mut S {
    fn read(&mut self) -> Result<Centimeters, SensorError> {
        (**self).read()
    }
}
