//! Spatial edge (boundary) behavior for grids.

/// How a grid handles coordinates that fall off its edges.
///
/// `EdgeBehavior` controls the *topology*: whether a coordinate outside
/// `[0, size)` is rejected or wrapped back onto the grid. Neighborhood
/// walks consult it to decide between skipping and wrapping candidate
/// cells.
///
/// # Examples
///
/// ```
/// use tilth_space::{EdgeBehavior, Lattice};
///
/// // Absorb: off-grid coordinates are rejected.
/// let bounded = Lattice::new(&[4, 4], EdgeBehavior::Absorb).unwrap();
/// assert!(bounded.try_normalize(&[-1, 0]).is_none());
///
/// // Wrap: the grid is a torus.
/// let torus = Lattice::new(&[4, 4], EdgeBehavior::Wrap).unwrap();
/// assert_eq!(torus.try_normalize(&[-1, 0]).unwrap().as_slice(), &[3, 0]);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EdgeBehavior {
    /// Out-of-bounds coordinates are rejected (bounded grid). Neighborhood
    /// walks skip them.
    #[default]
    Absorb,
    /// Out-of-bounds coordinates wrap to the opposite side (toroidal grid).
    Wrap,
}

impl EdgeBehavior {
    /// Whether coordinates wrap around (torus topology).
    pub fn is_toroidal(self) -> bool {
        matches!(self, Self::Wrap)
    }

    /// Edge behavior for a `toroidal` flag.
    pub fn from_toroidal(toroidal: bool) -> Self {
        if toroidal {
            Self::Wrap
        } else {
            Self::Absorb
        }
    }
}
