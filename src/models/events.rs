//! Wire messages exchanged with connected clients.
//!
//! Outbound events serialize as `{"event": "<name>", "data": {...}}`;
//! inbound intents as `{"type": "<name>", ...}`. Field names are camelCase.

use serde::{Deserialize, Serialize};

use super::block::{Block, BlockId, ClientId};
use super::round::RoundPhase;

/// Row-major grid contents; `None` marks an empty cell.
pub type GridRows = Vec<Vec<Option<Block>>>;

/// Full board state sent on connect, on a new round, and by `GET /state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    /// Grid contents.
    pub grid: GridRows,
    /// Seconds left in the current phase.
    pub remaining_time: u64,
    /// Current phase.
    pub round_state: RoundPhase,
}

/// Request sent by a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ClientIntent {
    /// Claim exclusive control over a block.
    LockBlock {
        /// Target block.
        block_id: BlockId,
    },
    /// Move a locked block toward a target cell.
    MoveBlock {
        /// Target block.
        block_id: BlockId,
        /// Desired row; may lie outside the grid.
        row: i64,
        /// Desired column; may lie outside the grid.
        col: i64,
    },
    /// Give up a held lock without moving.
    UnlockBlock {
        /// Target block.
        block_id: BlockId,
    },
}

/// Event sent by the server, either to one client or to all of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum ServerEvent {
    /// Snapshot replied to a newly connected client.
    InitialState(BoardSnapshot),
    /// Lock request rejected.
    LockFailed {
        /// Human-readable reason.
        message: String,
        /// Block the request referred to.
        block_id: BlockId,
    },
    /// Move rejected, or an inbound message could not be understood.
    Error {
        /// Human-readable reason.
        message: String,
        /// Block the request referred to, when one could be parsed.
        block_id: Option<BlockId>,
    },
    /// A client acquired a block's lock.
    BlockLocked {
        /// Locked block.
        block_id: BlockId,
        /// New lock holder.
        locked_by: ClientId,
    },
    /// A block landed in a new cell; carries the full updated block.
    BlockPlaced(Block),
    /// A block's lock was released.
    BlockUnlocked {
        /// Released block.
        block_id: BlockId,
    },
    /// The grid was reset for a new round.
    NewRound(BoardSnapshot),
    /// Per-tick countdown update.
    RoundUpdate {
        /// Seconds left in the current phase.
        remaining_time: u64,
        /// Current phase.
        round_state: RoundPhase,
    },
    /// The running phase ended; clients should freeze interaction.
    RoundOver {},
}

impl ServerEvent {
    /// Wire name of the event, for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::InitialState(_) => "initialState",
            Self::LockFailed { .. } => "lockFailed",
            Self::Error { .. } => "error",
            Self::BlockLocked { .. } => "blockLocked",
            Self::BlockPlaced(_) => "blockPlaced",
            Self::BlockUnlocked { .. } => "blockUnlocked",
            Self::NewRound(_) => "newRound",
            Self::RoundUpdate { .. } => "roundUpdate",
            Self::RoundOver {} => "roundOver",
        }
    }
}
