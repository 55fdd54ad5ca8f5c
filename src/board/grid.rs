//! Cell storage and block identity allocation.
//!
//! [`Grid`] is the only mutator of cell contents and of the id counter.
//! Every write goes through [`Grid::place`], which stamps the cell's
//! coordinates onto the block so the two can never disagree.

use rand::Rng;

use crate::models::block::{Block, BlockId};
use crate::models::events::GridRows;

/// Number of grid rows.
pub const ROWS: usize = 10;
/// Number of grid columns.
pub const COLS: usize = 10;

const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const FIRST_BLOCK_ID: BlockId = 1;

/// Fixed-size array of cells, each empty or holding one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: [[Option<Block>; COLS]; ROWS],
    next_id: BlockId,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Empty grid with the id counter at its initial value.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: [[None; COLS]; ROWS],
            next_id: FIRST_BLOCK_ID,
        }
    }

    /// Block stored at `(row, col)`, if any.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<&Block> {
        self.cells.get(row)?.get(col)?.as_ref()
    }

    /// Find a block by id, returning a copy and its coordinates.
    #[must_use]
    pub fn lookup_by_id(&self, id: BlockId) -> Option<(Block, (usize, usize))> {
        self.blocks()
            .find(|block| block.id == id)
            .map(|block| (*block, (block.row, block.col)))
    }

    /// Mutable access to a block located by id.
    ///
    /// Callers outside this module only touch `locked_by`; position
    /// changes go through [`remove`](Self::remove) and [`place`](Self::place).
    pub(crate) fn find_mut(&mut self, id: BlockId) -> Option<&mut Block> {
        self.blocks_mut().find(|block| block.id == id)
    }

    /// True iff `(row, col)` is inside the grid and empty.
    ///
    /// Coordinates are signed because search rings and client targets
    /// routinely fall off the edge of the board.
    #[must_use]
    pub fn is_free(&self, row: i64, col: i64) -> bool {
        let (Ok(row), Ok(col)) = (usize::try_from(row), usize::try_from(col)) else {
            return false;
        };
        row < ROWS && col < COLS && self.cells[row][col].is_none()
    }

    /// Store `block` at `(row, col)` and update its coordinates.
    ///
    /// Returns the placed block, or `None` without touching the grid when
    /// the cell is out of bounds or occupied.
    pub fn place(&mut self, mut block: Block, row: usize, col: usize) -> Option<Block> {
        let slot = self.cells.get_mut(row)?.get_mut(col)?;
        if slot.is_some() {
            return None;
        }
        block.row = row;
        block.col = col;
        *slot = Some(block);
        Some(block)
    }

    /// Clear `(row, col)`, returning whatever it held.
    pub fn remove(&mut self, row: usize, col: usize) -> Option<Block> {
        self.cells.get_mut(row)?.get_mut(col)?.take()
    }

    /// Allocate a fresh unlocked block for `letter` and place it.
    ///
    /// The id counter only advances when placement succeeds.
    pub fn spawn(&mut self, letter: char, row: usize, col: usize) -> Option<Block> {
        let block = Block {
            id: self.next_id,
            letter,
            row,
            col,
            locked_by: None,
        };
        let placed = self.place(block, row, col)?;
        self.next_id += 1;
        Some(placed)
    }

    /// Empty every cell and reset the id counter.
    pub fn clear(&mut self) {
        self.cells = [[None; COLS]; ROWS];
        self.next_id = FIRST_BLOCK_ID;
    }

    /// Clear the grid and scatter `letter_count` distinct letters on it.
    ///
    /// Letters are drawn without replacement, so at most 26 blocks are
    /// placed. Each lands on a uniformly random free cell found by
    /// rejection sampling. Returns the number of blocks placed.
    pub fn reset_and_populate<R: Rng>(&mut self, letter_count: usize, rng: &mut R) -> usize {
        self.clear();

        let mut pool: Vec<char> = ALPHABET.chars().collect();
        let wanted = letter_count.min(pool.len()).min(ROWS * COLS);
        let mut placed = 0;
        while placed < wanted {
            let index = rng.random_range(0..pool.len());
            let letter = pool.remove(index);
            loop {
                let row = rng.random_range(0..ROWS);
                let col = rng.random_range(0..COLS);
                if self.spawn(letter, row, col).is_some() {
                    break;
                }
            }
            placed += 1;
        }
        placed
    }

    /// Occupied cells in row-major order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.cells.iter().flatten().flatten()
    }

    pub(crate) fn blocks_mut(&mut self) -> impl Iterator<Item = &mut Block> {
        self.cells.iter_mut().flatten().flatten()
    }

    /// Number of blocks on the grid.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks().count()
    }

    /// Whether the grid holds no blocks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks().next().is_none()
    }

    /// Row-major copy of the cells for the wire.
    #[must_use]
    pub fn rows(&self) -> GridRows {
        self.cells.iter().map(|row| row.to_vec()).collect()
    }
}
