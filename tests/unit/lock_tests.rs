//! Unit tests for block locking (acquire, release, release-all).

use letterboard::board::grid::Grid;
use letterboard::board::locks::{acquire, release, release_all_held_by};
use letterboard::models::block::ClientId;
use letterboard::BoardError;

fn grid_with_blocks(count: usize) -> Grid {
    let mut grid = Grid::new();
    for col in 0..count {
        grid.spawn('A', 0, col).expect("spawn");
    }
    grid
}

#[test]
fn acquire_sets_owner() {
    let mut grid = grid_with_blocks(3);
    let alice = ClientId::new();

    let block = acquire(&mut grid, 2, alice).expect("acquire");

    assert_eq!(block.locked_by, Some(alice));
    assert_eq!(grid.cell(0, 1).and_then(|b| b.locked_by), Some(alice));
}

#[test]
fn reacquire_by_same_owner_is_idempotent() {
    let mut grid = grid_with_blocks(1);
    let alice = ClientId::new();
    acquire(&mut grid, 1, alice).expect("first acquire");
    let before = grid.clone();

    acquire(&mut grid, 1, alice).expect("second acquire");

    assert_eq!(grid, before);
}

#[test]
fn acquire_held_by_other_fails_without_mutation() {
    let mut grid = grid_with_blocks(1);
    let alice = ClientId::new();
    let bob = ClientId::new();
    acquire(&mut grid, 1, alice).expect("acquire");

    let err = acquire(&mut grid, 1, bob).expect_err("should be locked");

    assert_eq!(
        err,
        BoardError::AlreadyLocked {
            block_id: 1,
            holder: alice
        }
    );
    assert_eq!(grid.cell(0, 0).and_then(|b| b.locked_by), Some(alice));
}

#[test]
fn acquire_missing_block_is_not_found() {
    let mut grid = grid_with_blocks(1);
    let err = acquire(&mut grid, 9, ClientId::new()).expect_err("missing");
    assert_eq!(err, BoardError::NotFound { block_id: 9 });
}

#[test]
fn release_by_owner_clears_lock() {
    let mut grid = grid_with_blocks(1);
    let alice = ClientId::new();
    acquire(&mut grid, 1, alice).expect("acquire");

    assert!(release(&mut grid, 1, alice));
    assert!(grid.cell(0, 0).is_some_and(|b| b.locked_by.is_none()));
}

#[test]
fn release_by_non_owner_is_silent_noop() {
    let mut grid = grid_with_blocks(1);
    let alice = ClientId::new();
    acquire(&mut grid, 1, alice).expect("acquire");

    assert!(!release(&mut grid, 1, ClientId::new()));
    assert_eq!(grid.cell(0, 0).and_then(|b| b.locked_by), Some(alice));
}

#[test]
fn release_unlocked_or_missing_block_is_noop() {
    let mut grid = grid_with_blocks(1);
    let alice = ClientId::new();
    assert!(!release(&mut grid, 1, alice));
    assert!(!release(&mut grid, 77, alice));
}

#[test]
fn release_all_only_touches_owner_locks() {
    let mut grid = grid_with_blocks(8);
    let x = ClientId::new();
    let y = ClientId::new();
    acquire(&mut grid, 3, x).expect("lock 3");
    acquire(&mut grid, 7, x).expect("lock 7");
    acquire(&mut grid, 5, y).expect("lock 5");

    let released = release_all_held_by(&mut grid, x);

    assert_eq!(released, vec![3, 7]);
    for (block_id, owner) in [(3, None), (7, None), (5, Some(y))] {
        let (block, _) = grid.lookup_by_id(block_id).expect("lookup");
        assert_eq!(block.locked_by, owner, "block {block_id}");
    }
    assert!(release_all_held_by(&mut grid, x).is_empty());
}

#[test]
fn at_most_one_owner_after_competing_acquires() {
    let mut grid = grid_with_blocks(1);
    let clients: Vec<ClientId> = (0..10).map(|_| ClientId::new()).collect();

    let winners = clients
        .iter()
        .filter(|&&who| acquire(&mut grid, 1, who).is_ok())
        .count();

    assert_eq!(winners, 1);
    assert_eq!(grid.cell(0, 0).and_then(|b| b.locked_by), Some(clients[0]));
}
