//! Hexagonal neighborhoods on an offset grid.
//!
//! Cells keep plain `[x, y]` grid coordinates; odd rows are shifted half a
//! cell to the right ("odd-r" layout, pointy-top hexes). Diagonal steps
//! therefore depend on the parity of the row they start from, and rings
//! around even-row and odd-row origins trace mirrored offset paths.

use crate::neighborhood::{normalized_pair, saturating_usize, Binding, Neighborhood};
use crate::shape::{polygon_advance, shifted, Cursor, RingShape, ShapeKind};
use tilth_core::Occupant;
use tilth_space::{Grid, Occupancy, SpaceError};

/// Sector of a hex ring walk.
///
/// Ring `r` starts at the west corner `(ox - r, oy)` and runs clockwise
/// along six sides of `r` cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Sector {
    /// Ring 0.
    Origin = 0,
    /// Up and right.
    NorthEast = 1,
    /// Right along the row.
    East = 2,
    /// Down and right.
    SouthEast = 3,
    /// Down and left.
    SouthWest = 4,
    /// Left along the row.
    West = 5,
    /// Up and left.
    NorthWest = 6,
}

const SIDES: [Sector; 6] = [
    Sector::NorthEast,
    Sector::East,
    Sector::SouthEast,
    Sector::SouthWest,
    Sector::West,
    Sector::NorthWest,
];

impl Sector {
    /// Offset step for this sector from a cell in row `y`.
    pub fn delta(self, y: i64) -> (i64, i64) {
        let odd = y & 1 == 1;
        match (self, odd) {
            (Self::Origin, _) => (0, 0),
            (Self::East, _) => (1, 0),
            (Self::West, _) => (-1, 0),
            (Self::NorthEast, false) => (0, -1),
            (Self::NorthEast, true) => (1, -1),
            (Self::SouthEast, false) => (0, 1),
            (Self::SouthEast, true) => (1, 1),
            (Self::SouthWest, false) => (-1, 1),
            (Self::SouthWest, true) => (0, 1),
            (Self::NorthWest, false) => (-1, -1),
            (Self::NorthWest, true) => (0, -1),
        }
    }
}

/// Walk state of one cell in a hex ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RingState {
    /// Hex distance from the origin.
    pub ring: u32,
    /// Side of the hexagon the cell lies on.
    pub sector: Sector,
    /// Moves taken along `sector`.
    pub step: u32,
    /// Whether the cell's row is odd (shifted right).
    pub odd_row: bool,
}

/// The hex ring walk.
#[derive(Clone, Copy, Debug, Default)]
pub struct HexRing;

impl RingShape for HexRing {
    type State = RingState;

    fn start(origin: &Cursor, ring: u32) -> (RingState, Cursor) {
        let sector = if ring == 0 {
            Sector::Origin
        } else {
            Sector::NorthEast
        };
        let state = RingState {
            ring,
            sector,
            step: 0,
            odd_row: origin[1] & 1 == 1,
        };
        (state, [origin[0] - ring as i64, origin[1], origin[2]])
    }

    fn transition(origin: &Cursor, state: RingState, cursor: Cursor) -> (RingState, Cursor) {
        if state.sector == Sector::Origin {
            return Self::start(origin, 1);
        }
        let side = state.sector as u8 - 1;
        match polygon_advance(side, state.step, state.ring, SIDES.len() as u8) {
            Some((side, step)) => {
                let sector = SIDES[side as usize];
                let next = shifted(cursor, sector.delta(cursor[1]));
                let state = RingState {
                    ring: state.ring,
                    sector,
                    step,
                    odd_row: next[1] & 1 == 1,
                };
                (state, next)
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

/// Convert odd-r offset coordinates to axial `(q, r)`.
pub fn offset_to_axial(x: i64, y: i64) -> (i64, i64) {
    (x - (y - (y & 1)) / 2, y)
}

/// Hex distance between two offset coordinates on an unbounded plane.
///
/// # Examples
///
/// ```
/// use tilth_neighborhood::hex::offset_distance;
///
/// assert_eq!(offset_distance((2, 2), (1, 1)), 1);
/// assert_eq!(offset_distance((2, 2), (3, 1)), 2);
/// assert_eq!(offset_distance((2, 1), (3, 0)), 1);
/// ```
pub fn offset_distance(a: (i64, i64), b: (i64, i64)) -> u64 {
    let (aq, ar) = offset_to_axial(a.0, a.1);
    let (bq, br) = offset_to_axial(b.0, b.1);
    let (dq, dr) = (aq - bq, ar - br);
    dq.unsigned_abs()
        .max(dr.unsigned_abs())
        .max((dq + dr).unsigned_abs())
}

/// Hexagonal neighborhood of a 2D grid.
///
/// Distance is hex (cube) distance. On toroidal grids it is the shortest
/// distance over the wrapped images of the target, which is why toroidal
/// hex grids need an even `size_y`: otherwise row parity would flip across
/// the seam.
///
/// # Examples
///
/// ```
/// use tilth_core::AgentId;
/// use tilth_neighborhood::{Hex, Neighborhood};
/// use tilth_space::{EdgeBehavior, MultiGrid};
///
/// let grid = MultiGrid::<AgentId>::new_2d(6, 6, EdgeBehavior::Wrap).unwrap();
/// let hex = Hex::new(&grid).unwrap();
/// assert_eq!(hex.neighborhood_size(1, false), 6);
/// assert_eq!(hex.locations(&grid, &[0, 0], 1, false).unwrap().count(), 6);
/// ```
#[derive(Clone, Debug)]
pub struct Hex {
    binding: Binding,
}

impl Hex {
    /// Bind a hex neighborhood to `grid`.
    ///
    /// Returns `Err(SpaceError::UnsupportedTopology)` for 3D grids and for
    /// toroidal grids with an odd `size_y`.
    pub fn new<A: Occupant, O: Occupancy<A>>(grid: &Grid<A, O>) -> Result<Self, SpaceError> {
        if grid.ndim() != 2 {
            return Err(SpaceError::UnsupportedTopology {
                reason: format!("hex neighborhoods need a 2D grid, got {}D", grid.ndim()),
            });
        }
        if grid.is_toroidal() && grid.size_y() % 2 == 1 {
            return Err(SpaceError::UnsupportedTopology {
                reason: format!(
                    "toroidal hex grids need an even size_y, got {}",
                    grid.size_y()
                ),
            });
        }
        Ok(Self {
            binding: Binding::new(grid),
        })
    }
}

impl Neighborhood for Hex {
    fn binding(&self) -> &Binding {
        &self.binding
    }

    fn shape(&self) -> ShapeKind {
        ShapeKind::Hex
    }

    fn distance(&self, a: &[i32], b: &[i32]) -> Result<f64, SpaceError> {
        let lattice = self.lattice();
        let (a, b) = normalized_pair(lattice, a, b)?;
        let a = (a[0] as i64, a[1] as i64);
        let b = (b[0] as i64, b[1] as i64);
        if !lattice.is_toroidal() {
            return Ok(offset_distance(a, b) as f64);
        }
        let (sx, sy) = (lattice.size(0) as i64, lattice.size(1) as i64);
        let mut best = u64::MAX;
        for ix in -1..=1 {
            for iy in -1..=1 {
                best = best.min(offset_distance(a, (b.0 + ix * sx, b.1 + iy * sy)));
            }
        }
        Ok(best as f64)
    }

    fn neighborhood_size(&self, extent: u32, include_origin: bool) -> usize {
        let e1 = extent as u128 + 1;
        saturating_usize(3 * e1 * e1 - 3 * e1 + u128::from(include_origin))
    }
}
