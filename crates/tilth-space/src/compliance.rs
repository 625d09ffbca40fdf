//! Grid invariant checks.
//!
//! These functions verify that a grid's cells, counters and
//! back-references agree with each other. Reused by every test module that
//! mutates a grid.

use crate::grid::Grid;
use crate::occupancy::Occupancy;
use indexmap::IndexSet;
use tilth_core::Occupant;

/// Assert that no stored cell is empty.
pub fn assert_no_empty_cells_stored<A: Occupant, O: Occupancy<A>>(grid: &Grid<A, O>) {
    for loc in grid.occupied() {
        assert!(
            !loc.is_empty(),
            "cell {:?} is stored but has no occupants",
            loc.coord()
        );
    }
}

/// Assert that every cell holds at most `capacity` occupants.
pub fn assert_capacity_respected<A: Occupant, O: Occupancy<A>>(grid: &Grid<A, O>) {
    let Some(capacity) = grid.capacity() else {
        return;
    };
    for loc in grid.occupied() {
        assert!(
            loc.len() <= capacity,
            "cell {:?} holds {} occupants, capacity is {capacity}",
            loc.coord(),
            loc.len()
        );
    }
}

/// Assert that `agent_count` equals the sum of cell sizes and
/// `occupied_count` equals the number of stored cells.
pub fn assert_counts_consistent<A: Occupant, O: Occupancy<A>>(grid: &Grid<A, O>) {
    let total: usize = grid.occupied().map(|loc| loc.len()).sum();
    assert_eq!(grid.agent_count(), total, "agent_count disagrees with cells");
    assert_eq!(
        grid.occupied_count(),
        grid.occupied_coords().count(),
        "occupied_count disagrees with stored cells"
    );
}

/// Assert that each tracked occupant appears in exactly one cell, and that
/// cell is the one its back-reference names.
pub fn assert_back_references_consistent<A: Occupant, O: Occupancy<A>>(grid: &Grid<A, O>) {
    if !A::TRACKED {
        return;
    }
    let mut seen = IndexSet::new();
    for loc in grid.occupied() {
        for agent in loc.iter() {
            assert!(
                seen.insert(agent),
                "{agent:?} occupies more than one cell (again at {:?})",
                loc.coord()
            );
            assert_eq!(
                grid.location_of(&agent),
                Some(loc.coord()),
                "{agent:?} back-reference disagrees with its cell"
            );
        }
    }
}

/// Run all grid invariant checks.
pub fn run_full_compliance<A: Occupant, O: Occupancy<A>>(grid: &Grid<A, O>) {
    assert_no_empty_cells_stored(grid);
    assert_capacity_respected(grid);
    assert_counts_consistent(grid);
    assert_back_references_consistent(grid);
}
