//! Moore neighborhoods: squares (2D) and cube shells (3D) of the Chebyshev
//! metric.

use crate::neighborhood::{normalized_pair, saturating_usize, Binding, Neighborhood};
use crate::shape::{polygon_advance, shifted, Cursor, RingShape, ShapeKind};
use tilth_core::Occupant;
use tilth_space::{Grid, Occupancy, SpaceError};

/// Zone of a Moore ring walk.
///
/// A 2D ring `r` starts at the corner `(ox - r, oy - r)` and runs clockwise
/// along four sides of `2r` cells. A 3D shell adds whole `Face` slabs at
/// `z = oz - r` and `z = oz + r`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Zone {
    /// Ring 0.
    Origin = 0,
    /// x ascending along `y = oy - r`.
    Top = 1,
    /// y ascending along `x = ox + r`.
    Right = 2,
    /// x descending along `y = oy + r`.
    Bottom = 3,
    /// y descending along `x = ox - r`.
    Left = 4,
    /// A full cap slab of a 3D shell, row by row.
    Face = 5,
}

const SIDES: [Zone; 4] = [Zone::Top, Zone::Right, Zone::Bottom, Zone::Left];

impl Zone {
    fn delta(self) -> (i64, i64) {
        match self {
            Self::Top => (1, 0),
            Self::Right => (0, 1),
            Self::Bottom => (-1, 0),
            Self::Left => (0, -1),
            Self::Origin | Self::Face => (0, 0),
        }
    }
}

/// Walk state of one cell in a 2D Moore ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RingState {
    /// Chebyshev distance from the origin.
    pub ring: u32,
    /// Side of the square the cell lies on.
    pub zone: Zone,
    /// Moves taken along `zone`.
    pub step: u32,
}

/// Walk one step around the square of radius `ring` at the cursor's z.
///
/// `None` once the square is closed.
fn perimeter_step(zone: Zone, step: u32, ring: u32, cursor: Cursor) -> Option<(Zone, u32, Cursor)> {
    let (side, step) = polygon_advance(zone as u8 - 1, step, 2 * ring, SIDES.len() as u8)?;
    let zone = SIDES[side as usize];
    Some((zone, step, shifted(cursor, zone.delta())))
}

/// The 2D Moore ring walk.
#[derive(Clone, Copy, Debug, Default)]
pub struct MooreRing;

impl RingShape for MooreRing {
    type State = RingState;

    fn start(origin: &Cursor, ring: u32) -> (RingState, Cursor) {
        let r = ring as i64;
        let zone = if ring == 0 { Zone::Origin } else { Zone::Top };
        let state = RingState { ring, zone, step: 0 };
        (state, [origin[0] - r, origin[1] - r, origin[2]])
    }

    fn transition(origin: &Cursor, state: RingState, cursor: Cursor) -> (RingState, Cursor) {
        if state.zone == Zone::Origin {
            return Self::start(origin, 1);
        }
        match perimeter_step(state.zone, state.step, state.ring, cursor) {
            Some((zone, step, next)) => (
                RingState {
                    ring: state.ring,
                    zone,
                    step,
                },
                next,
            ),
            None => Self::start(origin, state.ring + 1),
        }
    }

    fn ring(state: &RingState) -> u32 {
        state.ring
    }

    fn direction(state: &RingState) -> u8 {
        state.zone as u8
    }
}

/// Walk state of one cell in a 3D Moore shell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShellState {
    /// Chebyshev distance from the origin.
    pub ring: u32,
    /// Slab index: `z = oz - ring + slab`, in `0..=2 * ring`.
    pub slab: u32,
    /// `Face` on the two cap slabs, a perimeter side otherwise.
    pub zone: Zone,
    /// Moves taken along a perimeter side.
    pub step: u32,
}

/// The 3D Moore shell walk.
///
/// Slabs go from `oz - r` to `oz + r`. The cap slabs are full
/// `(2r + 1) x (2r + 1)` faces walked row by row (x fastest); the slabs
/// between them contribute the 2D ring of radius `r`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Moore3Ring;

impl Moore3Ring {
    fn slab_start(origin: &Cursor, ring: u32, slab: u32) -> (ShellState, Cursor) {
        let r = ring as i64;
        let zone = if slab == 0 || slab == 2 * ring {
            Zone::Face
        } else {
            Zone::Top
        };
        let state = ShellState {
            ring,
            slab,
            zone,
            step: 0,
        };
        (
            state,
            [origin[0] - r, origin[1] - r, origin[2] - r + slab as i64],
        )
    }

    fn next_slab(origin: &Cursor, state: ShellState) -> (ShellState, Cursor) {
        if state.slab >= 2 * state.ring {
            Self::start(origin, state.ring + 1)
        } else {
            Self::slab_start(origin, state.ring, state.slab + 1)
        }
    }
}

impl RingShape for Moore3Ring {
    type State = ShellState;

    fn start(origin: &Cursor, ring: u32) -> (ShellState, Cursor) {
        if ring == 0 {
            let state = ShellState {
                ring,
                slab: 0,
                zone: Zone::Origin,
                step: 0,
            };
            return (state, *origin);
        }
        Self::slab_start(origin, ring, 0)
    }

    fn transition(origin: &Cursor, state: ShellState, cursor: Cursor) -> (ShellState, Cursor) {
        let r = state.ring as i64;
        match state.zone {
            Zone::Origin => Self::start(origin, 1),
            Zone::Face if cursor[0] < origin[0] + r => (state, [cursor[0] + 1, cursor[1], cursor[2]]),
            Zone::Face if cursor[1] < origin[1] + r => {
                (state, [origin[0] - r, cursor[1] + 1, cursor[2]])
            }
            Zone::Face => Self::next_slab(origin, state),
            zone => match perimeter_step(zone, state.step, state.ring, cursor) {
                Some((zone, step, next)) => (ShellState { zone, step, ..state }, next),
                None => Self::next_slab(origin, state),
            },
        }
    }

    fn ring(state: &ShellState) -> u32 {
        state.ring
    }

    fn direction(state: &ShellState) -> u8 {
        state.zone as u8
    }
}

/// Moore neighborhood of a 2D or 3D grid.
///
/// Distance is Chebyshev distance (the largest per-axis displacement),
/// wrap-aware on toroidal grids.
///
/// # Examples
///
/// ```
/// use tilth_core::AgentId;
/// use tilth_neighborhood::{Moore, Neighborhood};
/// use tilth_space::{EdgeBehavior, MultiGrid};
///
/// let grid = MultiGrid::<AgentId>::new_2d(5, 5, EdgeBehavior::Absorb).unwrap();
/// let nb = Moore::new(&grid).unwrap();
/// assert_eq!(nb.locations(&grid, &[2, 2], 1, false).unwrap().count(), 8);
/// assert_eq!(nb.neighborhood_size(1, false), 8);
///
/// // Corners lose the out-of-range cells.
/// assert_eq!(nb.locations(&grid, &[0, 0], 1, false).unwrap().count(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct Moore {
    binding: Binding,
}

impl Moore {
    /// Bind a Moore neighborhood to `grid`.
    pub fn new<A: Occupant, O: Occupancy<A>>(grid: &Grid<A, O>) -> Result<Self, SpaceError> {
        Ok(Self {
            binding: Binding::new(grid),
        })
    }
}

impl Neighborhood for Moore {
    fn binding(&self) -> &Binding {
        &self.binding
    }

    fn shape(&self) -> ShapeKind {
        if self.lattice().ndim() == 3 {
            ShapeKind::Moore3
        } else {
            ShapeKind::Moore
        }
    }

    fn distance(&self, a: &[i32], b: &[i32]) -> Result<f64, SpaceError> {
        let lattice = self.lattice();
        let (a, b) = normalized_pair(lattice, a, b)?;
        let d = (0..lattice.ndim())
            .map(|axis| lattice.axis_distance(axis, a[axis], b[axis]))
            .max()
            .unwrap_or(0);
        Ok(d as f64)
    }

    fn neighborhood_size(&self, extent: u32, include_origin: bool) -> usize {
        let side = 2 * extent as u128 + 1;
        let cells = side.pow(self.lattice().ndim() as u32);
        saturating_usize(cells - u128::from(!include_origin))
    }
}
