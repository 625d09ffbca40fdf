//! Neighborhood compliance test helpers.
//!
//! These functions check a bound neighborhood against its own metric and
//! closed-form sizes by brute force over every cell of the grid. Reused by
//! every shape's test module.

use crate::neighborhood::Neighborhood;
use indexmap::IndexSet;
use tilth_core::{Coord, Occupant};
use tilth_space::{Grid, Occupancy};

/// Every coordinate of the grid, in rank order.
fn all_cells<A: Occupant, O: Occupancy<A>>(grid: &Grid<A, O>) -> Vec<Coord> {
    let lattice = grid.lattice();
    (0..lattice.cell_count()).map(|r| lattice.coord_at(r)).collect()
}

/// Largest extent whose rings cannot revisit a cell on this grid.
fn clean_extent<A: Occupant, O: Occupancy<A>>(grid: &Grid<A, O>) -> u32 {
    let min = grid.dims().iter().copied().min().unwrap_or(1);
    (min - 1) / 2
}

/// Assert `distance(a, a) == 0` and `distance(a, b) == distance(b, a)`.
pub fn assert_distance_symmetric<N: Neighborhood, A: Occupant, O: Occupancy<A>>(
    nb: &N,
    grid: &Grid<A, O>,
) {
    let cells = all_cells(grid);
    for a in &cells {
        assert_eq!(nb.distance(a, a).unwrap(), 0.0, "distance({a:?}, {a:?})");
        for b in &cells {
            let dab = nb.distance(a, b).unwrap();
            let dba = nb.distance(b, a).unwrap();
            assert_eq!(dab, dba, "distance({a:?}, {b:?}) != distance({b:?}, {a:?})");
        }
    }
}

/// Assert that each yielded location lies at `current_distance` from the
/// origin and that rings never decrease.
pub fn assert_rings_match_metric<N: Neighborhood, A: Occupant, O: Occupancy<A>>(
    nb: &N,
    grid: &Grid<A, O>,
    origin: &[i32],
    extent: u32,
) {
    let mut it = nb.locations(grid, origin, extent, true).unwrap();
    let mut previous = 0;
    while let Some(loc) = it.next() {
        let ring = it.current_distance().unwrap();
        assert!(ring >= previous, "ring went from {previous} to {ring}");
        assert!(ring <= extent, "ring {ring} beyond extent {extent}");
        let d = nb.distance(origin, loc.coord()).unwrap();
        assert_eq!(d, ring as f64, "{:?} yielded in ring {ring} at distance {d}", loc.coord());
        previous = ring;
    }
}

/// Assert that the traversal yields exactly the cells within `extent` of
/// the origin, each once.
pub fn assert_matches_brute_force<N: Neighborhood, A: Occupant, O: Occupancy<A>>(
    nb: &N,
    grid: &Grid<A, O>,
    origin: &[i32],
    extent: u32,
    include_origin: bool,
) {
    let mut yielded = IndexSet::new();
    for loc in nb.locations(grid, origin, extent, include_origin).unwrap() {
        assert!(yielded.insert(loc.coord().clone()), "{:?} yielded twice", loc.coord());
    }
    let expected: IndexSet<Coord> = all_cells(grid)
        .into_iter()
        .filter(|c| {
            let d = nb.distance(origin, c).unwrap();
            d <= extent as f64 && (include_origin || d > 0.0)
        })
        .collect();
    assert_eq!(
        yielded.len(),
        expected.len(),
        "origin {origin:?}, extent {extent}"
    );
    assert!(yielded.iter().all(|c| expected.contains(c)));
}

/// Assert that the yielded count equals the closed-form size when the
/// grid is toroidal and wide enough that no ring wraps onto itself.
pub fn assert_toroidal_count_matches_size<N: Neighborhood, A: Occupant, O: Occupancy<A>>(
    nb: &N,
    grid: &Grid<A, O>,
    origin: &[i32],
) {
    if !grid.is_toroidal() {
        return;
    }
    for extent in 0..=clean_extent(grid) {
        for include in [false, true] {
            let n = nb.locations(grid, origin, extent, include).unwrap().count();
            assert_eq!(
                n,
                nb.neighborhood_size(extent, include),
                "extent {extent}, include_origin {include}"
            );
        }
    }
}

/// Run all neighborhood compliance checks from a spread of origins.
pub fn run_full_compliance<N: Neighborhood, A: Occupant, O: Occupancy<A>>(
    nb: &N,
    grid: &Grid<A, O>,
) {
    assert_distance_symmetric(nb, grid);
    let extent = clean_extent(grid).max(1);
    let last = grid.dims().iter().map(|&d| d as i32 - 1).collect::<Coord>();
    let middle = grid.dims().iter().map(|&d| d as i32 / 2).collect::<Coord>();
    let corner = Coord::from_elem(0, grid.ndim());
    for origin in [&corner, &middle, &last] {
        assert_rings_match_metric(nb, grid, origin, extent);
        for include in [false, true] {
            assert_matches_brute_force(nb, grid, origin, extent, include);
        }
        assert_toroidal_count_matches_size(nb, grid, origin);
    }
}
