//! Grid geometry and the per-axis coordinate normalizer.
//!
//! A [`Lattice`] is the shape of a grid (axis sizes plus
//! [`EdgeBehavior`]) without any cells. Grids own one; neighborhoods copy
//! one so their ring walks can normalize coordinates without borrowing
//! cell storage.

use crate::edge::EdgeBehavior;
use crate::error::SpaceError;
use smallvec::SmallVec;
use tilth_core::Coord;

/// Normalize a single axis value.
///
/// Values in `[0, size)` are returned unchanged. Out-of-range values wrap
/// periodically when `toroidal` is set and fail with
/// [`SpaceError::CoordOutOfBounds`] otherwise.
///
/// # Examples
///
/// ```
/// use tilth_space::normalize_axis;
///
/// assert_eq!(normalize_axis(3, 5, false).unwrap(), 3);
/// assert_eq!(normalize_axis(-1, 5, true).unwrap(), 4);
/// assert_eq!(normalize_axis(12, 5, true).unwrap(), 2);
/// assert!(normalize_axis(5, 5, false).is_err());
/// ```
pub fn normalize_axis(value: i32, size: u32, toroidal: bool) -> Result<i32, SpaceError> {
    wrap_axis(value as i64, size, toroidal).ok_or_else(|| SpaceError::CoordOutOfBounds {
        coord: SmallVec::from_slice(&[value]),
        bounds: format!("[0, {size})"),
    })
}

/// Resolve one axis value. `None` means out of range on a bounded axis.
fn wrap_axis(value: i64, size: u32, toroidal: bool) -> Option<i32> {
    let n = size as i64;
    if value >= 0 && value < n {
        return Some(value as i32);
    }
    if toroidal {
        Some(value.rem_euclid(n) as i32)
    } else {
        None
    }
}

/// Axis names used in bounds messages and dimension errors.
const AXIS_NAMES: [&str; 3] = ["size_x", "size_y", "size_z"];

/// The geometry of a 2D or 3D grid: axis sizes and edge behavior.
///
/// Coordinates are `[x, y]` or `[x, y, z]`. Dense ranks are x-major:
/// `rank = (x * size_y + y) * size_z + z`, matching the x-outer, y-inner
/// order of raster loading.
///
/// # Examples
///
/// ```
/// use tilth_space::{EdgeBehavior, Lattice};
///
/// let lattice = Lattice::new(&[3, 4], EdgeBehavior::Absorb).unwrap();
/// assert_eq!(lattice.ndim(), 2);
/// assert_eq!(lattice.cell_count(), 12);
/// assert_eq!(lattice.rank(&[1, 2]), Some(6));
/// assert_eq!(lattice.coord_at(6).as_slice(), &[1, 2]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Lattice {
    dims: SmallVec<[u32; 3]>,
    edge: EdgeBehavior,
}

impl Lattice {
    /// Maximum axis size: coordinates use `i32`, so each axis must fit.
    pub const MAX_DIM: u32 = i32::MAX as u32;

    /// Create a lattice with the given axis sizes.
    ///
    /// Returns `Err(SpaceError::DimensionMismatch)` unless there are 2 or 3
    /// axes, `Err(SpaceError::EmptySpace)` if any axis is 0, and
    /// `Err(SpaceError::DimensionTooLarge)` if any axis exceeds `i32::MAX`.
    pub fn new(dims: &[u32], edge: EdgeBehavior) -> Result<Self, SpaceError> {
        if !(2..=3).contains(&dims.len()) {
            return Err(SpaceError::DimensionMismatch {
                expected: if dims.len() < 2 { 2 } else { 3 },
                got: dims.len(),
            });
        }
        if dims.contains(&0) {
            return Err(SpaceError::EmptySpace);
        }
        for (axis, &value) in dims.iter().enumerate() {
            if value > Self::MAX_DIM {
                return Err(SpaceError::DimensionTooLarge {
                    name: AXIS_NAMES[axis],
                    value,
                    max: Self::MAX_DIM,
                });
            }
        }
        Ok(Self {
            dims: SmallVec::from_slice(dims),
            edge,
        })
    }

    /// Number of axes (2 or 3).
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Axis sizes, x first.
    pub fn dims(&self) -> &[u32] {
        &self.dims
    }

    /// Size of one axis.
    ///
    /// # Panics
    ///
    /// Panics if `axis >= ndim()`.
    pub fn size(&self, axis: usize) -> u32 {
        self.dims[axis]
    }

    /// Edge behavior.
    pub fn edge_behavior(&self) -> EdgeBehavior {
        self.edge
    }

    /// Whether coordinates wrap around on every axis.
    pub fn is_toroidal(&self) -> bool {
        self.edge.is_toroidal()
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.dims.iter().map(|&d| d as usize).product()
    }

    /// Sum of all axis sizes. No cell of a bounded grid is further than
    /// this from any other under the library's metrics.
    pub fn span(&self) -> u64 {
        self.dims.iter().map(|&d| d as u64).sum()
    }

    /// Human-readable description of the valid coordinate range.
    pub fn bounds(&self) -> String {
        self.dims
            .iter()
            .map(|d| format!("[0, {d})"))
            .collect::<Vec<_>>()
            .join(" x ")
    }

    fn check_ndim(&self, got: usize) -> Result<(), SpaceError> {
        if got != self.ndim() {
            return Err(SpaceError::DimensionMismatch {
                expected: self.ndim(),
                got,
            });
        }
        Ok(())
    }

    /// Normalize a coordinate onto the grid.
    ///
    /// Each axis goes through [`normalize_axis`]. On a bounded grid any
    /// out-of-range axis fails with `Err(SpaceError::CoordOutOfBounds)`
    /// carrying the whole coordinate.
    pub fn normalize(&self, coord: &[i32]) -> Result<Coord, SpaceError> {
        self.check_ndim(coord.len())?;
        let mut out = Coord::new();
        for (&v, &size) in coord.iter().zip(&self.dims) {
            match wrap_axis(v as i64, size, self.is_toroidal()) {
                Some(n) => out.push(n),
                None => {
                    return Err(SpaceError::CoordOutOfBounds {
                        coord: SmallVec::from_slice(coord),
                        bounds: self.bounds(),
                    })
                }
            }
        }
        Ok(out)
    }

    /// Non-failing [`normalize`](Self::normalize) over wide cursor values.
    ///
    /// Only the first `ndim()` entries of `cursor` are read, so 2D walks can
    /// pass a 3-element cursor with a zero z. Returns `None` when the
    /// cursor is off a bounded grid.
    pub fn try_normalize_wide(&self, cursor: &[i64]) -> Option<Coord> {
        if cursor.len() < self.ndim() {
            return None;
        }
        let toroidal = self.is_toroidal();
        cursor
            .iter()
            .zip(&self.dims)
            .map(|(&v, &size)| wrap_axis(v, size, toroidal))
            .collect()
    }

    /// Non-failing [`normalize`](Self::normalize).
    pub fn try_normalize(&self, coord: &[i32]) -> Option<Coord> {
        if coord.len() != self.ndim() {
            return None;
        }
        let wide: SmallVec<[i64; 3]> = coord.iter().map(|&v| v as i64).collect();
        self.try_normalize_wide(&wide)
    }

    /// Whether `coord` is already in range on every axis (no wrapping).
    pub fn contains(&self, coord: &[i32]) -> bool {
        coord.len() == self.ndim()
            && coord
                .iter()
                .zip(&self.dims)
                .all(|(&v, &size)| v >= 0 && (v as i64) < size as i64)
    }

    /// Dense index of an in-range coordinate, or `None` if out of range.
    pub fn rank(&self, coord: &[i32]) -> Option<usize> {
        self.contains(coord).then(|| self.rank_unchecked(coord))
    }

    fn rank_unchecked(&self, coord: &[i32]) -> usize {
        coord
            .iter()
            .zip(&self.dims)
            .fold(0usize, |acc, (&v, &size)| acc * size as usize + v as usize)
    }

    /// [`normalize`](Self::normalize) and also return the dense rank.
    pub fn locate(&self, coord: &[i32]) -> Result<(Coord, usize), SpaceError> {
        let normalized = self.normalize(coord)?;
        let rank = self.rank_unchecked(&normalized);
        Ok((normalized, rank))
    }

    /// Inverse of [`rank`](Self::rank).
    ///
    /// # Panics
    ///
    /// Panics (in debug builds) if `rank >= cell_count()`.
    pub fn coord_at(&self, rank: usize) -> Coord {
        debug_assert!(rank < self.cell_count(), "rank {rank} out of range");
        let mut out: Coord = SmallVec::from_elem(0, self.ndim());
        let mut rest = rank;
        for axis in (0..self.ndim()).rev() {
            let size = self.dims[axis] as usize;
            out[axis] = (rest % size) as i32;
            rest /= size;
        }
        out
    }

    /// Signed shortest displacement from `a` to `b` along one axis.
    ///
    /// On a toroidal grid the displacement may cross the seam; ties at
    /// exactly half the axis resolve to the positive direction.
    pub fn axis_delta(&self, axis: usize, a: i32, b: i32) -> i64 {
        let d = b as i64 - a as i64;
        if !self.is_toroidal() {
            return d;
        }
        let n = self.dims[axis] as i64;
        let m = d.rem_euclid(n);
        if m > n / 2 {
            m - n
        } else {
            m
        }
    }

    /// Absolute shortest distance between `a` and `b` along one axis.
    pub fn axis_distance(&self, axis: usize, a: i32, b: i32) -> u64 {
        self.axis_delta(axis, a, b).unsigned_abs()
    }
}
