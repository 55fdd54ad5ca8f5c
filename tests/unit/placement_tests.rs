//! Unit tests for the nearest-free-cell ring search.

use letterboard::board::grid::Grid;
use letterboard::board::placement::find_nearest_free;

use super::test_helpers::fill_except;

#[test]
fn free_start_cell_is_returned_immediately() {
    let grid = Grid::new();
    assert_eq!(find_nearest_free(&grid, 4, 6), Some((4, 6)));
}

#[test]
fn corner_finds_neighbour_in_first_ring() {
    let mut grid = Grid::new();
    fill_except(&mut grid, &[(0, 1)]);
    assert_eq!(find_nearest_free(&grid, 0, 0), Some((0, 1)));
}

#[test]
fn lands_on_only_free_cell_at_distance_three() {
    let mut grid = Grid::new();
    fill_except(&mut grid, &[(3, 3)]);
    assert_eq!(find_nearest_free(&grid, 3, 0), Some((3, 3)));
}

#[test]
fn lower_row_offset_wins_ties() {
    // Both (4,5) [dr = -1] and (6,5) [dr = +1] are at distance 1.
    let mut grid = Grid::new();
    fill_except(&mut grid, &[(4, 5), (6, 5), (5, 6)]);
    assert_eq!(find_nearest_free(&grid, 5, 5), Some((4, 5)));
}

#[test]
fn positive_column_offset_wins_within_a_row_offset() {
    // (5,4) and (5,6) share dr = 0; +dc is tested first.
    let mut grid = Grid::new();
    fill_except(&mut grid, &[(5, 4), (5, 6)]);
    assert_eq!(find_nearest_free(&grid, 5, 5), Some((5, 6)));
}

#[test]
fn diagonal_order_follows_row_offset_then_column_sign() {
    // Ring 2 around (5,5): (3,5) is dr = -2; (4,6) and (4,4) are dr = -1.
    let mut grid = Grid::new();
    fill_except(&mut grid, &[(4, 4), (4, 6), (7, 5)]);
    assert_eq!(find_nearest_free(&grid, 5, 5), Some((4, 6)));

    let mut grid = Grid::new();
    fill_except(&mut grid, &[(4, 4), (7, 5)]);
    assert_eq!(find_nearest_free(&grid, 5, 5), Some((4, 4)));
}

#[test]
fn closer_cell_beats_earlier_order() {
    let mut grid = Grid::new();
    fill_except(&mut grid, &[(0, 0), (6, 5)]);
    assert_eq!(find_nearest_free(&grid, 5, 5), Some((6, 5)));
}

#[test]
fn full_grid_yields_none() {
    let mut grid = Grid::new();
    fill_except(&mut grid, &[]);
    assert_eq!(find_nearest_free(&grid, 5, 5), None);
}

#[test]
fn free_cell_beyond_search_radius_is_not_found() {
    // (0,0) is 18 steps from (9,9); the search stops at radius 9.
    let mut grid = Grid::new();
    fill_except(&mut grid, &[(0, 0)]);
    assert_eq!(find_nearest_free(&grid, 9, 9), None);
    assert_eq!(find_nearest_free(&grid, 0, 9), Some((0, 0)));
}

#[test]
fn out_of_bounds_start_searches_into_the_grid() {
    let grid = Grid::new();
    assert_eq!(find_nearest_free(&grid, -1, 4), Some((0, 4)));
    assert_eq!(find_nearest_free(&grid, 4, 12), Some((4, 9)));
}

#[test]
fn far_out_of_bounds_start_finds_nothing() {
    let grid = Grid::new();
    assert_eq!(find_nearest_free(&grid, -5, -5), None);
}

#[test]
fn extreme_start_finds_nothing() {
    let grid = Grid::new();
    for (row, col) in [
        (i64::MAX, i64::MAX),
        (i64::MIN, i64::MIN),
        (i64::MAX - 3, 2),
        (2, i64::MIN + 3),
    ] {
        assert_eq!(find_nearest_free(&grid, row, col), None, "({row}, {col})");
    }
}

#[test]
fn just_outside_grid_searches_inward() {
    let grid = Grid::new();
    assert_eq!(find_nearest_free(&grid, -1, 4), Some((0, 4)));
    assert_eq!(find_nearest_free(&grid, 12, -1), Some((9, 0)));
}
