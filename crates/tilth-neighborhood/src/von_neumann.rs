//! Von Neumann neighborhoods: diamonds of the Manhattan metric.

use crate::neighborhood::{normalized_pair, saturating_usize, Binding, Neighborhood};
use crate::shape::{polygon_advance, shifted, Cursor, RingShape, ShapeKind};
use tilth_core::Occupant;
use tilth_space::{Grid, Occupancy, SpaceError};

/// Sector of a von Neumann ring walk.
///
/// Ring `r` starts at the top cell `(ox, oy - r)` and runs down the
/// diamond's four edges, `r` cells each.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Sector {
    /// Ring 0.
    Origin = 0,
    /// Step `(-1, +1)`.
    NorthWest = 1,
    /// Step `(+1, +1)`.
    SouthWest = 2,
    /// Step `(+1, -1)`.
    SouthEast = 3,
    /// Step `(-1, -1)`.
    NorthEast = 4,
}

const SIDES: [Sector; 4] = [
    Sector::NorthWest,
    Sector::SouthWest,
    Sector::SouthEast,
    Sector::NorthEast,
];

impl Sector {
    fn delta(self) -> (i64, i64) {
        match self {
            Self::Origin => (0, 0),
            Self::NorthWest => (-1, 1),
            Self::SouthWest => (1, 1),
            Self::SouthEast => (1, -1),
            Self::NorthEast => (-1, -1),
        }
    }
}

/// Walk state of one cell in a von Neumann ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RingState {
    /// Manhattan distance from the origin.
    pub ring: u32,
    /// Edge of the diamond the cell lies on.
    pub sector: Sector,
    /// Moves taken along `sector`.
    pub step: u32,
}

/// The von Neumann ring walk.
#[derive(Clone, Copy, Debug, Default)]
pub struct VonNeumannRing;

impl RingShape for VonNeumannRing {
    type State = RingState;

    fn start(origin: &Cursor, ring: u32) -> (RingState, Cursor) {
        if ring == 0 {
            let state = RingState {
                ring,
                sector: Sector::Origin,
                step: 0,
            };
            return (state, *origin);
        }
        let state = RingState {
            ring,
            sector: Sector::NorthWest,
            step: 0,
        };
        (state, [origin[0], origin[1] - ring as i64, origin[2]])
    }

    fn transition(origin: &Cursor, state: RingState, cursor: Cursor) -> (RingState, Cursor) {
        if state.sector == Sector::Origin {
            return Self::start(origin, 1);
        }
        let side = state.sector as u8 - 1;
        match polygon_advance(side, state.step, state.ring, SIDES.len() as u8) {
            Some((side, step)) => {
                let sector = SIDES[side as usize];
                let next = RingState {
                    ring: state.ring,
                    sector,
                    step,
                };
                (next, shifted(cursor, sector.delta()))
            }
            None => Self::start(origin, state.ring + 1),
        }
    }

    fn ring(state: &RingState) -> u32 {
        state.ring
    }

    fn direction(state: &RingState) -> u8 {
        state.sector as u8
    }
}

/// Von Neumann neighborhood of a 2D grid.
///
/// Distance is Manhattan distance, wrap-aware on toroidal grids.
///
/// # Examples
///
/// ```
/// use tilth_core::AgentId;
/// use tilth_neighborhood::{Neighborhood, VonNeumann};
/// use tilth_space::{EdgeBehavior, MultiGrid};
///
/// let grid = MultiGrid::<AgentId>::new_2d(3, 3, EdgeBehavior::Absorb).unwrap();
/// let nb = VonNeumann::new(&grid).unwrap();
///
/// let cells: Vec<Vec<i32>> = nb
///     .locations(&grid, &[1, 1], 1, false)
///     .unwrap()
///     .map(|loc| loc.coord().to_vec())
///     .collect();
/// assert_eq!(cells, vec![vec![1, 0], vec![0, 1], vec![1, 2], vec![2, 1]]);
/// assert_eq!(nb.neighborhood_size(1, false), 4);
/// ```
#[derive(Clone, Debug)]
pub struct VonNeumann {
    binding: Binding,
}

impl VonNeumann {
    /// Bind a von Neumann neighborhood to `grid`.
    ///
    /// Returns `Err(SpaceError::UnsupportedTopology)` for 3D grids.
    pub fn new<A: Occupant, O: Occupancy<A>>(grid: &Grid<A, O>) -> Result<Self, SpaceError> {
        if grid.ndim() != 2 {
            return Err(SpaceError::UnsupportedTopology {
                reason: format!("von Neumann neighborhoods need a 2D grid, got {}D", grid.ndim()),
            });
        }
        Ok(Self {
            binding: Binding::new(grid),
        })
    }
}

impl Neighborhood for VonNeumann {
    fn binding(&self) -> &Binding {
        &self.binding
    }

    fn shape(&self) -> ShapeKind {
        ShapeKind::VonNeumann
    }

    fn distance(&self, a: &[i32], b: &[i32]) -> Result<f64, SpaceError> {
        let lattice = self.lattice();
        let (a, b) = normalized_pair(lattice, a, b)?;
        let d = lattice.axis_distance(0, a[0], b[0]) + lattice.axis_distance(1, a[1], b[1]);
        Ok(d as f64)
    }

    fn neighborhood_size(&self, extent: u32, include_origin: bool) -> usize {
        let e = extent as u128;
        saturating_usize(2 * e * e + 2 * e + u128::from(include_origin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use tilth_core::AgentId;
    use tilth_space::{EdgeBehavior, MultiGrid};

    fn walk(origin: Cursor, rings: u32) -> Vec<(RingState, Cursor)> {
        let mut out = Vec::new();
        let (mut state, mut cursor) = VonNeumannRing::start(&origin, 0);
        while state.ring <= rings {
            out.push((state, cursor));
            (state, cursor) = VonNeumannRing::transition(&origin, state, cursor);
        }
        out
    }

    // ── Transitions ─────────────────────────────────────────────

    #[test]
    fn ring_one_order() {
        let cells: Vec<Cursor> = walk([1, 1, 0], 1).into_iter().map(|(_, c)| c).collect();
        assert_eq!(cells, vec![[1, 1, 0], [1, 0, 0], [0, 1, 0], [1, 2, 0], [2, 1, 0]]);
    }

    #[test]
    fn ring_two_sectors() {
        let ring2: Vec<(Sector, Cursor)> = walk([0, 0, 0], 2)
            .into_iter()
            .filter(|(s, _)| s.ring == 2)
            .map(|(s, c)| (s.sector, c))
            .collect();
        assert_eq!(
            ring2,
            vec![
                (Sector::NorthWest, [0, -2, 0]),
                (Sector::NorthWest, [-1, -1, 0]),
                (Sector::NorthWest, [-2, 0, 0]),
                (Sector::SouthWest, [-1, 1, 0]),
                (Sector::SouthWest, [0, 2, 0]),
                (Sector::SouthEast, [1, 1, 0]),
                (Sector::SouthEast, [2, 0, 0]),
                (Sector::NorthEast, [1, -1, 0]),
            ]
        );
    }

    #[test]
    fn every_ring_cell_at_manhattan_distance() {
        for (state, c) in walk([5, -3, 0], 6) {
            let d = (c[0] - 5).unsigned_abs() + (c[1] + 3).unsigned_abs();
            assert_eq!(d, state.ring as u64, "{c:?} in ring {}", state.ring);
        }
    }

    #[test]
    fn ring_sizes() {
        let cells = walk([0, 0, 0], 5);
        for r in 1..=5 {
            assert_eq!(cells.iter().filter(|(s, _)| s.ring == r).count(), 4 * r as usize);
        }
    }

    // ── Neighborhood ────────────────────────────────────────────

    #[test]
    fn rejects_3d_grid() {
        let g = MultiGrid::<AgentId>::new_3d(3, 3, 3, EdgeBehavior::Absorb).unwrap();
        assert!(matches!(
            VonNeumann::new(&g),
            Err(SpaceError::UnsupportedTopology { .. })
        ));
    }

    #[test]
    fn sizes() {
        let g = MultiGrid::<AgentId>::new_2d(3, 3, EdgeBehavior::Absorb).unwrap();
        let nb = VonNeumann::new(&g).unwrap();
        assert_eq!(nb.neighborhood_size(0, true), 1);
        assert_eq!(nb.neighborhood_size(1, false), 4);
        assert_eq!(nb.neighborhood_size(2, true), 13);
    }

    #[test]
    fn toroidal_distance_wraps() {
        let g = MultiGrid::<AgentId>::new_2d(10, 10, EdgeBehavior::Wrap).unwrap();
        let nb = VonNeumann::new(&g).unwrap();
        assert_eq!(nb.distance(&[0, 0], &[9, 9]).unwrap(), 2.0);
        assert_eq!(nb.distance(&[0, 0], &[5, 5]).unwrap(), 10.0);
    }

    #[test]
    fn compliance_bounded_and_toroidal() {
        for edge in [EdgeBehavior::Absorb, EdgeBehavior::Wrap] {
            let g = MultiGrid::<AgentId>::new_2d(9, 8, edge).unwrap();
            let nb = VonNeumann::new(&g).unwrap();
            compliance::run_full_compliance(&nb, &g);
        }
    }
}
