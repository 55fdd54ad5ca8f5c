//! Relocating a locked block.

use tracing::{debug, warn};

use super::grid::Grid;
use super::placement::find_nearest_free;
use crate::errors::BoardError;
use crate::models::block::{Block, BlockId, ClientId};

/// Move `block_id` as close to `(target_row, target_col)` as possible.
///
/// The block leaves its cell before the search runs, so its own cell
/// counts as free. The lock is released whether or not the move succeeds:
/// a failed move puts the block back where it was, unlocked.
///
/// # Errors
///
/// Returns `BoardError::NotFound` if the block does not exist,
/// `BoardError::LockNotHeld` if `who` does not hold its lock, or
/// `BoardError::NoFreeCell` if no free cell lies within search range.
pub fn move_block(
    grid: &mut Grid,
    block_id: BlockId,
    who: ClientId,
    target_row: i64,
    target_col: i64,
) -> Result<Block, BoardError> {
    let (block, (old_row, old_col)) = grid
        .lookup_by_id(block_id)
        .ok_or(BoardError::NotFound { block_id })?;

    if !block.is_locked_by(who) {
        return Err(BoardError::LockNotHeld { block_id });
    }

    let Some(mut block) = grid.remove(old_row, old_col) else {
        return Err(BoardError::NotFound { block_id });
    };
    block.locked_by = None;

    if let Some((row, col)) = find_nearest_free(grid, target_row, target_col) {
        if let Some(placed) = grid.place(block, row, col) {
            debug!(block_id, from = ?(old_row, old_col), to = ?(row, col), "block moved");
            return Ok(placed);
        }
    }

    // The vacated cell is still empty; nothing else ran in between.
    let restored = grid.place(block, old_row, old_col);
    debug_assert!(restored.is_some(), "cell of block {block_id} refilled mid-move");
    if restored.is_none() {
        warn!(block_id, row = old_row, col = old_col, "failed to restore block to its cell");
    }
    debug!(block_id, target_row, target_col, "no free cell near target");
    Err(BoardError::NoFreeCell { block_id })
}
