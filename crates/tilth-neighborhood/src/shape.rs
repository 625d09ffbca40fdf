//! Ring-walk state machines shared by every neighborhood shape.
//!
//! A shape walks the cells at distance `r` from an origin as a closed
//! polygon of straight runs ("sectors"). Each shape implements
//! [`RingShape`] with pure functions over an unwrapped [`Cursor`], so the
//! sector logic can be tested without a grid. Bounds checking and wrapping
//! happen later, in the ring cursor.

use std::fmt;

/// An unwrapped cell position `[x, y, z]`. 2D shapes keep `z == 0`.
///
/// Wide integers so that walking far outside a grid cannot overflow.
pub type Cursor = [i64; 3];

/// A pure ring-walk state machine.
///
/// Ring 0 is the origin alone. Transitioning out of the last cell of ring
/// `r` lands on the first cell of ring `r + 1`, so a walk never ends by
/// itself; callers stop once [`ring`](Self::ring) exceeds their extent.
pub trait RingShape {
    /// Per-cell walk state.
    type State: Copy + fmt::Debug + PartialEq;

    /// First cell of ring `ring` around `origin`.
    fn start(origin: &Cursor, ring: u32) -> (Self::State, Cursor);

    /// The cell after `cursor`, whose walk state is `state`.
    fn transition(origin: &Cursor, state: Self::State, cursor: Cursor) -> (Self::State, Cursor);

    /// Ring (distance from the origin) of the cell `state` describes.
    fn ring(state: &Self::State) -> u32;

    /// Sector id of the cell `state` describes. 0 is the origin.
    fn direction(state: &Self::State) -> u8;
}

/// Which ring walk a neighborhood uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Diamonds of the Manhattan metric, 2D only.
    VonNeumann,
    /// Squares of the Chebyshev metric on a 2D grid.
    Moore,
    /// Cube shells of the Chebyshev metric on a 3D grid.
    Moore3,
    /// Hexagons on an odd-row-shifted offset grid, 2D only.
    Hex,
}

/// Advance one move along a closed polygon of `sides` straight runs of
/// `len` moves each, starting from its already-yielded first cell.
///
/// `side` and `step` describe the cell just yielded (`step` moves taken on
/// `side`). Returns the side to move along and the step count after the
/// move, or `None` once the next move would return to the first cell.
pub(crate) fn polygon_advance(side: u8, step: u32, len: u32, sides: u8) -> Option<(u8, u32)> {
    let (side, step) = if step >= len { (side + 1, 0) } else { (side, step) };
    if side + 1 >= sides && step + 1 >= len {
        return None;
    }
    Some((side, step + 1))
}

/// Apply a 2D step to a cursor.
pub(crate) fn shifted(cursor: Cursor, (dx, dy): (i64, i64)) -> Cursor {
    [cursor[0] + dx, cursor[1] + dy, cursor[2]]
}
