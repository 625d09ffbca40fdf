//! Error types for grid operations.

use std::fmt;
use std::io;
use tilth_core::{Coord, SpaceInstanceId};

/// Errors arising from grid construction, coordinate access, raster
/// loading, or neighborhood queries.
///
/// A full cell is not an error: placement reports it with a `false`
/// return value.
#[derive(Debug)]
pub enum SpaceError {
    /// A coordinate is outside the bounds of a bounded grid.
    CoordOutOfBounds {
        /// The offending coordinate.
        coord: Coord,
        /// Human-readable description of the valid range.
        bounds: String,
    },
    /// A coordinate has the wrong number of axes for the grid.
    DimensionMismatch {
        /// Number of axes the grid has.
        expected: usize,
        /// Number of axes the coordinate has.
        got: usize,
    },
    /// Attempted to construct a grid with zero cells.
    EmptySpace,
    /// A dimension exceeds the maximum representable size.
    DimensionTooLarge {
        /// Which dimension.
        name: &'static str,
        /// The value provided.
        value: u32,
        /// The maximum allowed.
        max: u32,
    },
    /// A cell capacity is zero or larger than the occupancy variant allows.
    InvalidCapacity {
        /// The capacity requested.
        requested: usize,
        /// The largest capacity the variant supports, if bounded.
        max: Option<usize>,
    },
    /// A raster file does not start with the `P2` header.
    UnsupportedFormat {
        /// The header line that was found instead.
        found: String,
    },
    /// A raster file has a valid header but a malformed body.
    InvalidRaster {
        /// Human-readable description of what went wrong.
        detail: String,
    },
    /// An I/O error occurred while reading a raster.
    Io(io::Error),
    /// A neighborhood was queried with a grid other than the one it is
    /// bound to.
    SpaceMismatch {
        /// Instance id of the grid the neighborhood was created for.
        bound: SpaceInstanceId,
        /// Instance id of the grid passed to the query.
        got: SpaceInstanceId,
    },
    /// The grid's topology does not support the requested operation.
    UnsupportedTopology {
        /// What went wrong.
        reason: String,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CoordOutOfBounds { coord, bounds } => {
                write!(f, "coordinate {coord:?} out of bounds: {bounds}")
            }
            Self::DimensionMismatch { expected, got } => {
                write!(f, "expected {expected}D coordinate, got {got}D")
            }
            Self::EmptySpace => write!(f, "grid must have at least one cell"),
            Self::DimensionTooLarge { name, value, max } => {
                write!(f, "{name} = {value} exceeds maximum {max}")
            }
            Self::InvalidCapacity { requested, max } => match max {
                Some(max) => write!(f, "capacity {requested} not in [1, {max}]"),
                None => write!(f, "capacity must be at least 1, got {requested}"),
            },
            Self::UnsupportedFormat { found } => {
                write!(f, "unsupported raster format: expected \"P2\", found {found:?}")
            }
            Self::InvalidRaster { detail } => write!(f, "invalid raster: {detail}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::SpaceMismatch { bound, got } => {
                write!(f, "neighborhood bound to grid {bound}, queried with grid {got}")
            }
            Self::UnsupportedTopology { reason } => {
                write!(f, "unsupported topology: {reason}")
            }
        }
    }
}

impl std::error::Error for SpaceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for SpaceError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
