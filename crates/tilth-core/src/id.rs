//! Strongly-typed identifiers and the [`Coord`] type alias.

use smallvec::SmallVec;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies an agent placed on a grid.
///
/// Agents themselves live outside the grid; the grid only stores their
/// ids and remembers which cell each id occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(pub u32);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent#{}", self.0)
    }
}

impl From<u32> for AgentId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Counter for unique [`SpaceInstanceId`] allocation.
static SPACE_INSTANCE_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-instance identifier for a grid.
///
/// Allocated from a monotonic atomic counter via [`SpaceInstanceId::next`].
/// Two distinct grids always have different IDs, even if they have
/// identical dimensions. Location views report the id of the grid they
/// borrow from, and neighborhoods remember the id of the grid they were
/// bound to so they can reject queries against any other grid.
///
/// Cloning a grid allocates a fresh id: the clone owns its own cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpaceInstanceId(u64);

impl SpaceInstanceId {
    /// Allocate a fresh, unique instance ID.
    ///
    /// Each call returns a new ID that has never been returned before
    /// within this process. Thread-safe.
    pub fn next() -> Self {
        Self(SPACE_INSTANCE_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for SpaceInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A coordinate on a grid: `[x, y]` or `[x, y, z]`.
///
/// Uses `SmallVec<[i32; 4]>` so 2D and 3D coordinates never touch the
/// heap. Raw coordinates may lie outside the grid; normalized ones are
/// always in `[0, size)` on every axis.
pub type Coord = SmallVec<[i32; 4]>;
