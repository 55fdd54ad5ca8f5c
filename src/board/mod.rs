//! Shared board state: grid, round countdown, and the RNG that seeds rounds.
//!
//! [`Board`] is the single unit guarded by the coordinator's mutex. Every
//! method completes synchronously so a mutation is never observed halfway.

pub mod grid;
pub mod locks;
pub mod movement;
pub mod placement;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::RoundConfig;
use crate::errors::BoardError;
use crate::models::block::{Block, BlockId, ClientId};
use crate::models::events::{BoardSnapshot, ServerEvent};
use crate::models::round::RoundState;
use crate::round::scheduler::RoundScheduler;

use self::grid::Grid;

/// Capture the grid and countdown as a wire snapshot.
#[must_use]
pub fn snapshot(grid: &Grid, round: RoundState) -> BoardSnapshot {
    BoardSnapshot {
        grid: grid.rows(),
        remaining_time: round.remaining_time,
        round_state: round.phase,
    }
}

/// Grid plus round state plus RNG, mutated as one unit.
#[derive(Debug)]
pub struct Board {
    grid: Grid,
    rounds: RoundScheduler,
    rng: ChaCha8Rng,
}

impl Board {
    /// Empty board in the running phase; call [`start_round`](Self::start_round)
    /// to populate it.
    ///
    /// A `seed` makes letter selection and placement reproducible.
    #[must_use]
    pub fn new(config: RoundConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        Self {
            grid: Grid::new(),
            rounds: RoundScheduler::new(config),
            rng,
        }
    }

    /// Current grid contents.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Direct grid access for seeding specific layouts.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Current phase and countdown.
    #[must_use]
    pub fn round(&self) -> RoundState {
        self.rounds.state()
    }

    /// Snapshot of the whole board.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        snapshot(&self.grid, self.rounds.state())
    }

    /// See [`locks::acquire`].
    ///
    /// # Errors
    ///
    /// Propagates `NotFound` and `AlreadyLocked`.
    pub fn lock(&mut self, block_id: BlockId, who: ClientId) -> Result<Block, BoardError> {
        locks::acquire(&mut self.grid, block_id, who)
    }

    /// See [`locks::release`].
    pub fn unlock(&mut self, block_id: BlockId, who: ClientId) -> bool {
        locks::release(&mut self.grid, block_id, who)
    }

    /// See [`locks::release_all_held_by`].
    pub fn release_all(&mut self, who: ClientId) -> Vec<BlockId> {
        locks::release_all_held_by(&mut self.grid, who)
    }

    /// See [`movement::move_block`].
    ///
    /// # Errors
    ///
    /// Propagates `NotFound`, `LockNotHeld`, and `NoFreeCell`.
    pub fn move_block(
        &mut self,
        block_id: BlockId,
        who: ClientId,
        row: i64,
        col: i64,
    ) -> Result<Block, BoardError> {
        movement::move_block(&mut self.grid, block_id, who, row, col)
    }

    /// Reset the grid and begin a running phase, returning the `newRound` event.
    pub fn start_round(&mut self) -> ServerEvent {
        self.rounds.start_round(&mut self.grid, &mut self.rng)
    }

    /// Advance the countdown by one second, returning the events to broadcast.
    pub fn tick(&mut self) -> Vec<ServerEvent> {
        self.rounds.tick(&mut self.grid, &mut self.rng)
    }
}
