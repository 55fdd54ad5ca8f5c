//! Round lifecycle: the phase state machine and the timer that drives it.

pub mod scheduler;
pub mod timer;
