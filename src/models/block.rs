//! Block and client identity types.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Block identifier, allocated from 1 upwards within a round.
pub type BlockId = u32;

/// Opaque per-connection identity used as a lock owner.
///
/// A fresh identity is minted for every connection. It carries no
/// authority and does not survive a reconnect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(Uuid);

impl ClientId {
    /// Mint a new random identity.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ClientId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A letter tile placed on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Identifier unique within the current round.
    pub id: BlockId,
    /// Uppercase letter shown on the tile.
    pub letter: char,
    /// Row of the cell holding this block.
    pub row: usize,
    /// Column of the cell holding this block.
    pub col: usize,
    /// Client currently holding the lock, if any.
    pub locked_by: Option<ClientId>,
}

impl Block {
    /// Whether `who` currently holds this block's lock.
    #[must_use]
    pub fn is_locked_by(&self, who: ClientId) -> bool {
        self.locked_by == Some(who)
    }
}
