//! Round phase and countdown.

use serde::{Deserialize, Serialize};

/// Phase of the round cycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RoundPhase {
    /// Blocks may be locked and moved.
    Running,
    /// Board is frozen until the next round starts.
    Break,
}

/// Current phase paired with the seconds left in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundState {
    /// Active phase.
    pub phase: RoundPhase,
    /// Seconds until the next phase transition.
    pub remaining_time: u64,
}

impl RoundState {
    /// State at the start of a fresh round.
    #[must_use]
    pub fn running(round_seconds: u64) -> Self {
        Self {
            phase: RoundPhase::Running,
            remaining_time: round_seconds,
        }
    }
}
