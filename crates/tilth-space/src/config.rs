//! Grid construction parameters.

use crate::edge::EdgeBehavior;
use crate::error::SpaceError;
use crate::lattice::Lattice;
use crate::store::StoreKind;
use smallvec::SmallVec;

/// Configuration for a [`Grid`](crate::Grid).
///
/// Validated when the grid is built; all values are immutable after
/// creation.
///
/// # Examples
///
/// ```
/// use tilth_space::{EdgeBehavior, GridConfig, MultiGrid, StoreKind};
/// use tilth_core::AgentId;
///
/// let config = GridConfig::new_3d(64, 64, 16)
///     .with_edge(EdgeBehavior::Wrap)
///     .with_capacity(4)
///     .with_store(StoreKind::Sparse);
/// let grid = MultiGrid::<AgentId>::from_config(config).unwrap();
/// assert_eq!(grid.capacity(), Some(4));
/// assert!(grid.is_toroidal());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridConfig {
    /// Axis sizes, x first. Two or three entries.
    pub dims: SmallVec<[u32; 3]>,

    /// Boundary handling.
    ///
    /// Default: [`EdgeBehavior::Absorb`] (bounded).
    pub edge: EdgeBehavior,

    /// Maximum occupants per cell, `None` for unbounded.
    ///
    /// Default: `None`. Single-occupant grids treat `None` as 1.
    pub capacity: Option<usize>,

    /// Cell storage backend.
    ///
    /// Default: [`StoreKind::Dense`].
    pub store: StoreKind,
}

impl GridConfig {
    /// A bounded, unbounded-capacity, dense 2D configuration.
    pub fn new_2d(size_x: u32, size_y: u32) -> Self {
        Self {
            dims: SmallVec::from_slice(&[size_x, size_y]),
            edge: EdgeBehavior::default(),
            capacity: None,
            store: StoreKind::default(),
        }
    }

    /// A bounded, unbounded-capacity, dense 3D configuration.
    pub fn new_3d(size_x: u32, size_y: u32, size_z: u32) -> Self {
        Self {
            dims: SmallVec::from_slice(&[size_x, size_y, size_z]),
            ..Self::new_2d(size_x, size_y)
        }
    }

    /// Set the edge behavior.
    pub fn with_edge(mut self, edge: EdgeBehavior) -> Self {
        self.edge = edge;
        self
    }

    /// Shorthand for `with_edge(EdgeBehavior::from_toroidal(toroidal))`.
    pub fn toroidal(self, toroidal: bool) -> Self {
        self.with_edge(EdgeBehavior::from_toroidal(toroidal))
    }

    /// Bound every cell to `capacity` occupants.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Choose the storage backend.
    pub fn with_store(mut self, store: StoreKind) -> Self {
        self.store = store;
        self
    }

    /// Check the configuration against an occupancy variant's limit.
    ///
    /// Returns the validated geometry and the effective per-cell capacity
    /// (`usize::MAX` for unbounded).
    pub fn validate(&self, max_capacity: Option<usize>) -> Result<(Lattice, usize), SpaceError> {
        let lattice = Lattice::new(&self.dims, self.edge)?;
        let capacity = match (self.capacity, max_capacity) {
            (Some(0), _) => {
                return Err(SpaceError::InvalidCapacity {
                    requested: 0,
                    max: max_capacity,
                })
            }
            (Some(c), Some(max)) if c > max => {
                return Err(SpaceError::InvalidCapacity {
                    requested: c,
                    max: Some(max),
                })
            }
            (Some(c), _) => c,
            (None, Some(max)) => max,
            (None, None) => usize::MAX,
        };
        Ok((lattice, capacity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = GridConfig::new_2d(4, 5);
        assert_eq!(c.dims.as_slice(), &[4, 5]);
        assert_eq!(c.edge, EdgeBehavior::Absorb);
        assert_eq!(c.capacity, None);
        assert_eq!(c.store, StoreKind::Dense);
    }

    #[test]
    fn unbounded_capacity_resolves_to_variant_max() {
        let (_, cap) = GridConfig::new_2d(2, 2).validate(Some(1)).unwrap();
        assert_eq!(cap, 1);
        let (_, cap) = GridConfig::new_2d(2, 2).validate(None).unwrap();
        assert_eq!(cap, usize::MAX);
    }

    #[test]
    fn rejects_zero_and_oversized_capacity() {
        assert!(matches!(
            GridConfig::new_2d(2, 2).with_capacity(0).validate(None),
            Err(SpaceError::InvalidCapacity { requested: 0, .. })
        ));
        assert!(matches!(
            GridConfig::new_2d(2, 2).with_capacity(2).validate(Some(1)),
            Err(SpaceError::InvalidCapacity {
                requested: 2,
                max: Some(1)
            })
        ));
    }

    #[test]
    fn rejects_empty_axis() {
        assert!(matches!(
            GridConfig::new_3d(2, 0, 2).validate(None),
            Err(SpaceError::EmptySpace)
        ));
    }

    #[test]
    fn toroidal_shorthand() {
        assert_eq!(
            GridConfig::new_2d(2, 2).toroidal(true).edge,
            EdgeBehavior::Wrap
        );
    }
}
