//! The [`Occupant`] trait: anything a grid cell can hold.

use crate::id::AgentId;
use std::fmt;
use std::hash::Hash;

/// A value that can occupy a grid cell.
///
/// Occupants are small handles (`Copy`) compared by value. The grid never
/// owns the entity behind a handle, so dropping a grid leaves agents
/// untouched.
///
/// When [`TRACKED`](Occupant::TRACKED) is `true` the grid keeps a
/// back-reference from each occupant to the cell holding it, and an
/// occupant can be placed in at most one cell at a time. Plain values
/// (raster samples, markers) set it to `false`: the same value may appear
/// in many cells and has no back-reference.
///
/// # Examples
///
/// ```
/// use tilth_core::{AgentId, Occupant};
///
/// #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// struct Sheep(u64);
///
/// impl Occupant for Sheep {}
///
/// assert!(Sheep::TRACKED);
/// assert!(AgentId::TRACKED);
/// assert!(!<i64 as Occupant>::TRACKED);
/// ```
pub trait Occupant: Copy + Eq + Hash + fmt::Debug {
    /// Whether the grid maintains an occupant-to-cell back-reference.
    const TRACKED: bool = true;
}

impl Occupant for AgentId {}

macro_rules! untracked_values {
    ($($t:ty),*) => {
        $(impl Occupant for $t {
            const TRACKED: bool = false;
        })*
    };
}

untracked_values!(u8, u16, u32, u64, i8, i16, i32, i64, char, bool);
