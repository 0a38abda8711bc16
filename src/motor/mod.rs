//! Motor module for vendomatic.
//!
//! Provides the half-step phase table and the sequencer that walks it.

mod builder;
mod phase;
mod position;
mod sequencer;
mod stop;

pub use builder::SequencerBuilder;
pub use phase::{Phase, PhaseTable, ALL_LOW, CHANNELS, HALF_STEP, PHASES};
pub use position::Position;
pub use sequencer::Sequencer;
pub use stop::StopFlag;
