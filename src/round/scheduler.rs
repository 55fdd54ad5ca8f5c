//! Round phase state machine.
//!
//! ```text
//! running(t) --tick--> running(t-1)            while t-1 > 0
//! running(1) --tick--> break(break_seconds)    emits roundOver, grid frozen
//! break(1)   --tick--> running(round_seconds)  emits newRound, grid repopulated
//! ```
//!
//! Every tick also emits a `roundUpdate` carrying the post-transition state.

use rand::Rng;
use tracing::info;

use crate::board::grid::Grid;
use crate::board::snapshot;
use crate::config::RoundConfig;
use crate::models::events::ServerEvent;
use crate::models::round::{RoundPhase, RoundState};

/// Sole owner and mutator of the [`RoundState`].
#[derive(Debug, Clone)]
pub struct RoundScheduler {
    config: RoundConfig,
    state: RoundState,
}

impl RoundScheduler {
    /// Scheduler positioned at the start of a running phase.
    #[must_use]
    pub fn new(config: RoundConfig) -> Self {
        Self {
            state: RoundState::running(config.round_seconds),
            config,
        }
    }

    /// Current phase and countdown.
    #[must_use]
    pub fn state(&self) -> RoundState {
        self.state
    }

    /// Repopulate `grid` and restart the running phase.
    ///
    /// Used once at process start and on every break expiry.
    pub fn start_round<R: Rng>(&mut self, grid: &mut Grid, rng: &mut R) -> ServerEvent {
        let placed = grid.reset_and_populate(self.config.initial_letters, rng);
        self.state = RoundState::running(self.config.round_seconds);
        info!(
            blocks = placed,
            round_seconds = self.config.round_seconds,
            "new round started"
        );
        ServerEvent::NewRound(snapshot(grid, self.state))
    }

    /// Advance one second.
    pub fn tick<R: Rng>(&mut self, grid: &mut Grid, rng: &mut R) -> Vec<ServerEvent> {
        self.state.remaining_time = self.state.remaining_time.saturating_sub(1);

        let mut events = Vec::with_capacity(2);
        if self.state.remaining_time == 0 {
            match self.state.phase {
                RoundPhase::Running => {
                    self.state = RoundState {
                        phase: RoundPhase::Break,
                        remaining_time: self.config.break_seconds,
                    };
                    info!(
                        break_seconds = self.config.break_seconds,
                        "round over, entering break"
                    );
                    events.push(ServerEvent::RoundOver {});
                }
                RoundPhase::Break => events.push(self.start_round(grid, rng)),
            }
        }

        events.push(ServerEvent::RoundUpdate {
            remaining_time: self.state.remaining_time,
            round_state: self.state.phase,
        });
        events
    }
}
