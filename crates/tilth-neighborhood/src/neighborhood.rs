//! The [`Neighborhood`] trait and the grid binding every shape carries.

use crate::cursor::RingCursor;
use crate::iter::{LocationFilter, Locations, LocationsMut, Neighbors, NeighborsMut};
use crate::shape::ShapeKind;
use tilth_core::{Coord, Occupant, SpaceInstanceId};
use tilth_space::{Grid, Lattice, Occupancy, SpaceError};
use tracing::trace;

/// The grid a neighborhood was created for: its geometry and instance id.
///
/// A neighborhood holds no per-query state, so one binding serves any
/// number of queries. Queries against a different grid fail with
/// [`SpaceError::SpaceMismatch`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    lattice: Lattice,
    space_id: SpaceInstanceId,
}

impl Binding {
    /// Bind to `grid`.
    pub fn new<A: Occupant, O: Occupancy<A>>(grid: &Grid<A, O>) -> Self {
        Self {
            lattice: grid.lattice().clone(),
            space_id: grid.instance_id(),
        }
    }

    /// Geometry of the bound grid.
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Instance id of the bound grid.
    pub fn space_id(&self) -> SpaceInstanceId {
        self.space_id
    }

    /// Fail unless `grid` is the bound grid.
    pub fn check<A: Occupant, O: Occupancy<A>>(&self, grid: &Grid<A, O>) -> Result<(), SpaceError> {
        if grid.instance_id() != self.space_id {
            return Err(SpaceError::SpaceMismatch {
                bound: self.space_id,
                got: grid.instance_id(),
            });
        }
        Ok(())
    }
}

/// A neighborhood shape bound to one grid.
///
/// Implementors supply the metric and closed-form size; the traversal
/// methods are provided. Every traversal is lazy and single-pass: it
/// yields ring 0 (the origin, only with `include_origin`) and then rings
/// `1..=extent` in the shape's documented walk order. Out-of-range cells of
/// bounded grids are skipped; toroidal grids wrap, so extents wider than
/// the grid revisit cells.
pub trait Neighborhood {
    /// The grid this neighborhood is bound to.
    fn binding(&self) -> &Binding;

    /// Which ring walk this neighborhood uses.
    fn shape(&self) -> ShapeKind;

    /// Distance between two cells under this shape's metric.
    ///
    /// Both coordinates are normalized first; on toroidal grids the
    /// distance is the shortest one across the seams.
    fn distance(&self, a: &[i32], b: &[i32]) -> Result<f64, SpaceError>;

    /// Number of cells within `extent` on an unbounded plane.
    fn neighborhood_size(&self, extent: u32, include_origin: bool) -> usize;

    /// Geometry of the bound grid.
    fn lattice(&self) -> &Lattice {
        self.binding().lattice()
    }

    /// Instance id of the bound grid.
    fn space_id(&self) -> SpaceInstanceId {
        self.binding().space_id()
    }

    /// [`neighborhood_size`](Self::neighborhood_size) after checking that
    /// `origin` lies on the bound grid.
    fn neighborhood_size_at(
        &self,
        origin: &[i32],
        extent: u32,
        include_origin: bool,
    ) -> Result<usize, SpaceError> {
        self.lattice().normalize(origin)?;
        Ok(self.neighborhood_size(extent, include_origin))
    }

    /// Every location within `extent` of `origin`, occupied or not.
    fn locations<'g, A: Occupant, O: Occupancy<A>>(
        &self,
        grid: &'g Grid<A, O>,
        origin: &[i32],
        extent: u32,
        include_origin: bool,
    ) -> Result<Locations<'g, A, O>, SpaceError> {
        let cursor = ring_cursor(self, grid, origin, extent, include_origin)?;
        Ok(Locations::new(grid, cursor, LocationFilter::All))
    }

    /// Locations within `extent` of `origin` that have occupants.
    fn occupied_locations<'g, A: Occupant, O: Occupancy<A>>(
        &self,
        grid: &'g Grid<A, O>,
        origin: &[i32],
        extent: u32,
        include_origin: bool,
    ) -> Result<Locations<'g, A, O>, SpaceError> {
        let cursor = ring_cursor(self, grid, origin, extent, include_origin)?;
        Ok(Locations::new(grid, cursor, LocationFilter::Occupied))
    }

    /// Locations within `extent` of `origin` that have no occupants.
    fn empty_locations<'g, A: Occupant, O: Occupancy<A>>(
        &self,
        grid: &'g Grid<A, O>,
        origin: &[i32],
        extent: u32,
        include_origin: bool,
    ) -> Result<Locations<'g, A, O>, SpaceError> {
        let cursor = ring_cursor(self, grid, origin, extent, include_origin)?;
        Ok(Locations::new(grid, cursor, LocationFilter::Empty))
    }

    /// Occupants of the locations within `extent` of `origin`, nearest
    /// rings first.
    fn neighbors<'g, A: Occupant, O: Occupancy<A>>(
        &self,
        grid: &'g Grid<A, O>,
        origin: &[i32],
        extent: u32,
        include_origin: bool,
    ) -> Result<Neighbors<'g, A, O>, SpaceError> {
        let cursor = ring_cursor(self, grid, origin, extent, include_origin)?;
        Ok(Neighbors::new(Locations::new(
            grid,
            cursor,
            LocationFilter::Occupied,
        )))
    }

    /// Mutable counterpart of [`locations`](Self::locations) filtered by
    /// `filter`. Its `remove` clears the last yielded location.
    fn locations_mut<'g, A: Occupant, O: Occupancy<A>>(
        &self,
        grid: &'g mut Grid<A, O>,
        origin: &[i32],
        extent: u32,
        include_origin: bool,
        filter: LocationFilter,
    ) -> Result<LocationsMut<'g, A, O>, SpaceError> {
        let cursor = ring_cursor(self, grid, origin, extent, include_origin)?;
        Ok(LocationsMut::new(grid, cursor, filter))
    }

    /// Mutable counterpart of [`neighbors`](Self::neighbors). Its `remove`
    /// takes the last yielded occupant off the grid.
    fn neighbors_mut<'g, A: Occupant, O: Occupancy<A>>(
        &self,
        grid: &'g mut Grid<A, O>,
        origin: &[i32],
        extent: u32,
        include_origin: bool,
    ) -> Result<NeighborsMut<'g, A, O>, SpaceError> {
        let cursor = ring_cursor(self, grid, origin, extent, include_origin)?;
        Ok(NeighborsMut::new(grid, cursor))
    }
}

fn ring_cursor<N, A, O>(
    neighborhood: &N,
    grid: &Grid<A, O>,
    origin: &[i32],
    extent: u32,
    include_origin: bool,
) -> Result<RingCursor, SpaceError>
where
    N: Neighborhood + ?Sized,
    A: Occupant,
    O: Occupancy<A>,
{
    neighborhood.binding().check(grid)?;
    let shape = neighborhood.shape();
    let cursor = RingCursor::new(shape, grid.lattice(), origin, extent, include_origin)?;
    trace!(
        ?shape,
        origin = ?cursor.origin(),
        extent = cursor.extent(),
        include_origin,
        "ring walk started"
    );
    Ok(cursor)
}

/// Normalize both arguments of a distance query.
pub(crate) fn normalized_pair(
    lattice: &Lattice,
    a: &[i32],
    b: &[i32],
) -> Result<(Coord, Coord), SpaceError> {
    Ok((lattice.normalize(a)?, lattice.normalize(b)?))
}

pub(crate) fn saturating_usize(n: u128) -> usize {
    usize::try_from(n).unwrap_or(usize::MAX)
}
