//! Single-owner block locking.
//!
//! A lock is the `locked_by` field of a [`Block`]. These functions locate
//! the block through the [`Grid`] and touch nothing but that field. There
//! is no queueing: a request for a block held by someone else fails at once.

use tracing::debug;

use super::grid::Grid;
use crate::errors::BoardError;
use crate::models::block::{Block, BlockId, ClientId};

/// Lock `block_id` on behalf of `who`.
///
/// Re-acquiring a lock already held by `who` succeeds without change.
///
/// # Errors
///
/// Returns `BoardError::NotFound` if no such block exists, or
/// `BoardError::AlreadyLocked` if another client holds the lock.
pub fn acquire(grid: &mut Grid, block_id: BlockId, who: ClientId) -> Result<Block, BoardError> {
    let block = grid
        .find_mut(block_id)
        .ok_or(BoardError::NotFound { block_id })?;

    match block.locked_by {
        Some(holder) if holder != who => Err(BoardError::AlreadyLocked { block_id, holder }),
        _ => {
            block.locked_by = Some(who);
            debug!(block_id, %who, "lock acquired");
            Ok(*block)
        }
    }
}

/// Unlock `block_id` if `who` holds it.
///
/// Missing blocks and locks held by others are ignored. Returns whether a
/// lock was actually released.
pub fn release(grid: &mut Grid, block_id: BlockId, who: ClientId) -> bool {
    match grid.find_mut(block_id) {
        Some(block) if block.is_locked_by(who) => {
            block.locked_by = None;
            debug!(block_id, %who, "lock released");
            true
        }
        _ => false,
    }
}

/// Release every lock held by `who`, returning the freed block ids in
/// row-major order.
pub fn release_all_held_by(grid: &mut Grid, who: ClientId) -> Vec<BlockId> {
    grid.blocks_mut()
        .filter(|block| block.is_locked_by(who))
        .map(|block| {
            block.locked_by = None;
            block.id
        })
        .collect()
}
