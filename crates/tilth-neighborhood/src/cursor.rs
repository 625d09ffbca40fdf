//! The ring-expanding cursor behind every neighborhood traversal.

use crate::hex::{self, HexRing};
use crate::moore::{self, Moore3Ring, MooreRing};
use crate::shape::{Cursor, RingShape, ShapeKind};
use crate::von_neumann::{self, VonNeumannRing};
use tilth_core::Coord;
use tilth_space::{Lattice, SpaceError};

/// Walk state of whichever shape a cursor runs.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Walk {
    VonNeumann(von_neumann::RingState),
    Moore(moore::RingState),
    Moore3(moore::ShellState),
    Hex(hex::RingState),
}

fn lift<S>((state, cursor): (S, Cursor), wrap: fn(S) -> Walk) -> (Walk, Cursor) {
    (wrap(state), cursor)
}

impl Walk {
    fn start(shape: ShapeKind, origin: &Cursor, ring: u32) -> (Self, Cursor) {
        match shape {
            ShapeKind::VonNeumann => lift(VonNeumannRing::start(origin, ring), Walk::VonNeumann),
            ShapeKind::Moore => lift(MooreRing::start(origin, ring), Walk::Moore),
            ShapeKind::Moore3 => lift(Moore3Ring::start(origin, ring), Walk::Moore3),
            ShapeKind::Hex => lift(HexRing::start(origin, ring), Walk::Hex),
        }
    }

    fn transition(self, origin: &Cursor, cursor: Cursor) -> (Self, Cursor) {
        match self {
            Walk::VonNeumann(s) => lift(
                VonNeumannRing::transition(origin, s, cursor),
                Walk::VonNeumann,
            ),
            Walk::Moore(s) => lift(MooreRing::transition(origin, s, cursor), Walk::Moore),
            Walk::Moore3(s) => lift(Moore3Ring::transition(origin, s, cursor), Walk::Moore3),
            Walk::Hex(s) => lift(HexRing::transition(origin, s, cursor), Walk::Hex),
        }
    }

    fn ring(&self) -> u32 {
        match self {
            Walk::VonNeumann(s) => VonNeumannRing::ring(s),
            Walk::Moore(s) => MooreRing::ring(s),
            Walk::Moore3(s) => Moore3Ring::ring(s),
            Walk::Hex(s) => HexRing::ring(s),
        }
    }

    fn direction(&self) -> u8 {
        match self {
            Walk::VonNeumann(s) => VonNeumannRing::direction(s),
            Walk::Moore(s) => MooreRing::direction(s),
            Walk::Moore3(s) => Moore3Ring::direction(s),
            Walk::Hex(s) => HexRing::direction(s),
        }
    }
}

/// Lazily walks rings `first..=extent` around an origin, mapping each
/// on-grid cell through a caller-supplied accept function.
///
/// On bounded grids the extent is clamped to the lattice span: no cell
/// lies further away, so rings beyond it would only be skipped.
#[derive(Clone, Debug)]
pub(crate) struct RingCursor {
    lattice: Lattice,
    origin: Cursor,
    extent: u32,
    walk: Walk,
    cursor: Cursor,
    fresh: bool,
    done: bool,
    last: Option<(u32, u8)>,
}

impl RingCursor {
    pub(crate) fn new(
        shape: ShapeKind,
        lattice: &Lattice,
        origin: &[i32],
        extent: u32,
        include_origin: bool,
    ) -> Result<Self, SpaceError> {
        let normalized = lattice.normalize(origin)?;
        let mut start: Cursor = [0; 3];
        for (slot, &v) in start.iter_mut().zip(normalized.iter()) {
            *slot = v as i64;
        }
        let extent = if lattice.is_toroidal() {
            extent
        } else {
            extent.min(u32::try_from(lattice.span()).unwrap_or(u32::MAX))
        };
        let first_ring = u32::from(!include_origin);
        let (walk, cursor) = Walk::start(shape, &start, first_ring);
        Ok(Self {
            lattice: lattice.clone(),
            origin: start,
            extent,
            walk,
            cursor,
            fresh: true,
            done: first_ring > extent,
            last: None,
        })
    }

    /// Normalized origin.
    pub(crate) fn origin(&self) -> Coord {
        self.origin[..self.lattice.ndim()]
            .iter()
            .map(|&v| v as i32)
            .collect()
    }

    /// Effective extent after clamping.
    pub(crate) fn extent(&self) -> u32 {
        self.extent
    }

    /// Advance to the next on-grid cell that `accept` maps to `Some`.
    ///
    /// Cells `accept` rejects are skipped exactly like off-grid ones.
    /// Returns `None` forever once the walk passes `extent`.
    pub(crate) fn next_map<T>(&mut self, mut accept: impl FnMut(Coord) -> Option<T>) -> Option<T> {
        while !self.done {
            if self.fresh {
                self.fresh = false;
            } else {
                (self.walk, self.cursor) = self.walk.transition(&self.origin, self.cursor);
            }
            if self.walk.ring() > self.extent {
                self.done = true;
                break;
            }
            let Some(coord) = self.lattice.try_normalize_wide(&self.cursor) else {
                continue;
            };
            if let Some(item) = accept(coord) {
                self.last = Some((self.walk.ring(), self.walk.direction()));
                return Some(item);
            }
        }
        None
    }

    /// Ring of the last accepted cell.
    pub(crate) fn current_distance(&self) -> Option<u32> {
        self.last.map(|(ring, _)| ring)
    }

    /// Sector id of the last accepted cell.
    pub(crate) fn current_direction(&self) -> Option<u8> {
        self.last.map(|(_, direction)| direction)
    }
}
