//! Transition layer: sequences the swap from the displayed view model to a
//! newly built one through a fade-out / fade-in cycle.

mod display_cell;
mod scheduler;

pub use display_cell::{display_cell, DisplayReader, DisplayWriter, DisplayedFrame};
pub use scheduler::{
    TransitionHandle, TransitionPhase, TransitionScheduler, DEFAULT_TRANSITION_DELAY,
};
