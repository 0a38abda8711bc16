//! Motion module for vendomatic.
//!
//! Provides step direction and the speed-to-dwell timing math shared by the
//! sequencer and the drivers.

mod direction;
mod timing;

pub use direction::Direction;
pub use timing::{pause, StepTiming};
