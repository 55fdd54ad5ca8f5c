//! Nearest-free-cell search by expanding Manhattan-distance rings.

use super::grid::{Grid, COLS, ROWS};

/// Largest ring radius searched around the start cell.
const MAX_RADIUS: i64 = max_radius();

#[allow(clippy::cast_possible_wrap)] // Grid dimensions are small compile-time constants.
const fn max_radius() -> i64 {
    let longest = if ROWS > COLS { ROWS } else { COLS };
    longest as i64 - 1
}

/// Find the free cell closest to `(start_row, start_col)`.
///
/// The start cell wins if free. Otherwise rings of radius `d = 1, 2, …`
/// up to `max(ROWS, COLS) - 1` are scanned with `dr` ascending from `-d`
/// to `d`, testing `(r + dr, c + dc)` before `(r + dr, c - dc)` where
/// `dc = d - |dr|`. This order is the tie-break between equidistant cells
/// and must stay stable.
#[must_use]
pub fn find_nearest_free(grid: &Grid, start_row: i64, start_col: i64) -> Option<(usize, usize)> {
    if grid.is_free(start_row, start_col) {
        return to_cell(start_row, start_col);
    }

    for d in 1..=MAX_RADIUS {
        for dr in -d..=d {
            let dc = d - dr.abs();
            // Targets come straight off the wire; offsets past the i64
            // range can never reach the grid.
            let Some(row) = start_row.checked_add(dr) else {
                continue;
            };
            let candidates = [start_col.checked_add(dc), start_col.checked_sub(dc)];
            for col in candidates.into_iter().flatten() {
                if grid.is_free(row, col) {
                    return to_cell(row, col);
                }
            }
        }
    }

    None
}

fn to_cell(row: i64, col: i64) -> Option<(usize, usize)> {
    Some((usize::try_from(row).ok()?, usize::try_from(col).ok()?))
}
