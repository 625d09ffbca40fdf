//! Grid-bound neighborhood iterators.
//!
//! [`Locations`] and [`Neighbors`] borrow the grid immutably and yield
//! views and occupants. [`LocationsMut`] and [`NeighborsMut`] borrow it
//! mutably; since they cannot hand out views that outlive the next step,
//! they yield coordinates and occupant values and expose `remove` for the
//! item just yielded.

use crate::cursor::RingCursor;
use tilth_core::{Coord, Occupant};
use tilth_space::{Grid, Location, LocationMut, Occupancy, OccupantWalk};

/// Which locations a traversal yields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LocationFilter {
    /// Every location in range.
    #[default]
    All,
    /// Locations with at least one occupant.
    Occupied,
    /// Locations with no occupants.
    Empty,
}

impl LocationFilter {
    /// Whether a location holding `len` occupants passes.
    pub fn accepts(self, len: usize) -> bool {
        match self {
            Self::All => true,
            Self::Occupied => len > 0,
            Self::Empty => len == 0,
        }
    }
}

/// Location views in ring order.
///
/// Created by [`Neighborhood::locations`](crate::Neighborhood::locations)
/// and its filtered variants.
#[derive(Debug)]
pub struct Locations<'g, A, O> {
    grid: &'g Grid<A, O>,
    cursor: RingCursor,
    filter: LocationFilter,
}

impl<'g, A: Occupant, O: Occupancy<A>> Locations<'g, A, O> {
    pub(crate) fn new(grid: &'g Grid<A, O>, cursor: RingCursor, filter: LocationFilter) -> Self {
        Self {
            grid,
            cursor,
            filter,
        }
    }

    /// Ring of the location yielded last.
    pub fn current_distance(&self) -> Option<u32> {
        self.cursor.current_distance()
    }

    /// Sector id of the location yielded last (0 for the origin).
    pub fn current_direction(&self) -> Option<u8> {
        self.cursor.current_direction()
    }
}

impl<'g, A: Occupant, O: Occupancy<A>> Iterator for Locations<'g, A, O> {
    type Item = Location<'g, A, O>;

    fn next(&mut self) -> Option<Location<'g, A, O>> {
        let grid = self.grid;
        let filter = self.filter;
        self.cursor.next_map(|coord| {
            grid.location(&coord)
                .ok()
                .filter(|loc| filter.accepts(loc.len()))
        })
    }
}

/// Occupants of the occupied locations in ring order.
///
/// Created by [`Neighborhood::neighbors`](crate::Neighborhood::neighbors).
#[derive(Debug)]
pub struct Neighbors<'g, A, O> {
    locations: Locations<'g, A, O>,
    current: Option<Location<'g, A, O>>,
    pos: usize,
}

impl<'g, A: Occupant, O: Occupancy<A>> Neighbors<'g, A, O> {
    pub(crate) fn new(locations: Locations<'g, A, O>) -> Self {
        Self {
            locations,
            current: None,
            pos: 0,
        }
    }

    /// Ring of the location the last occupant came from.
    pub fn current_distance(&self) -> Option<u32> {
        self.locations.current_distance()
    }

    /// Sector id of the location the last occupant came from.
    pub fn current_direction(&self) -> Option<u8> {
        self.locations.current_direction()
    }

    /// The location the last occupant came from.
    pub fn current_location(&self) -> Option<&Location<'g, A, O>> {
        self.current.as_ref()
    }
}

impl<A: Occupant, O: Occupancy<A>> Iterator for Neighbors<'_, A, O> {
    type Item = A;

    fn next(&mut self) -> Option<A> {
        loop {
            if let Some(agent) = self.current.as_ref().and_then(|loc| loc.get(self.pos)) {
                self.pos += 1;
                return Some(agent);
            }
            self.current = Some(self.locations.next()?);
            self.pos = 0;
        }
    }
}

/// Coordinates of locations in ring order, over a mutably borrowed grid.
///
/// Created by
/// [`Neighborhood::locations_mut`](crate::Neighborhood::locations_mut).
/// [`remove`](Self::remove) clears the whole location last yielded.
#[derive(Debug)]
pub struct LocationsMut<'g, A, O> {
    grid: &'g mut Grid<A, O>,
    cursor: RingCursor,
    filter: LocationFilter,
    last: Option<Coord>,
}

impl<'g, A: Occupant, O: Occupancy<A>> LocationsMut<'g, A, O> {
    pub(crate) fn new(grid: &'g mut Grid<A, O>, cursor: RingCursor, filter: LocationFilter) -> Self {
        Self {
            grid,
            cursor,
            filter,
            last: None,
        }
    }

    /// Ring of the location yielded last.
    pub fn current_distance(&self) -> Option<u32> {
        self.cursor.current_distance()
    }

    /// Sector id of the location yielded last.
    pub fn current_direction(&self) -> Option<u8> {
        self.cursor.current_direction()
    }

    /// View of the location yielded last.
    pub fn current(&self) -> Option<Location<'_, A, O>> {
        self.grid.location(self.last.as_ref()?).ok()
    }

    /// Mutable view of the location yielded last.
    pub fn current_mut(&mut self) -> Option<LocationMut<'_, A, O>> {
        self.grid.location_mut(self.last.as_ref()?).ok()
    }

    /// Remove every occupant of the location yielded last, returning them.
    ///
    /// Back-references are cleared and the location leaves the cell
    /// store. Returns an empty `Vec` if nothing was yielded since the last
    /// call.
    pub fn remove(&mut self) -> Vec<A> {
        match self.last.take() {
            Some(coord) => self.grid.remove_location(&coord).unwrap_or_default(),
            None => Vec::new(),
        }
    }
}

impl<A: Occupant, O: Occupancy<A>> Iterator for LocationsMut<'_, A, O> {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        let grid = &*self.grid;
        let filter = self.filter;
        let coord = self.cursor.next_map(|coord| {
            let len = grid.location(&coord).ok()?.len();
            filter.accepts(len).then_some(coord)
        });
        self.last = coord.clone();
        coord
    }
}

/// Occupants in ring order, over a mutably borrowed grid.
///
/// Created by
/// [`Neighborhood::neighbors_mut`](crate::Neighborhood::neighbors_mut).
/// [`remove`](Self::remove) takes the occupant last yielded off the grid;
/// iteration continues with the next occupant without skipping any.
#[derive(Debug)]
pub struct NeighborsMut<'g, A, O> {
    grid: &'g mut Grid<A, O>,
    cursor: RingCursor,
    walk: Option<OccupantWalk<A>>,
}

impl<'g, A: Occupant, O: Occupancy<A>> NeighborsMut<'g, A, O> {
    pub(crate) fn new(grid: &'g mut Grid<A, O>, cursor: RingCursor) -> Self {
        Self {
            grid,
            cursor,
            walk: None,
        }
    }

    /// Ring of the location the last occupant came from.
    pub fn current_distance(&self) -> Option<u32> {
        self.cursor.current_distance()
    }

    /// Sector id of the location the last occupant came from.
    pub fn current_direction(&self) -> Option<u8> {
        self.cursor.current_direction()
    }

    /// Coordinate of the location the last occupant came from.
    pub fn current_coord(&self) -> Option<&Coord> {
        self.walk.as_ref().map(OccupantWalk::coord)
    }

    /// Remove the occupant yielded last. Returns `false` if nothing was
    /// yielded since the last removal.
    pub fn remove(&mut self) -> bool {
        match self.walk.as_mut() {
            Some(walk) => walk.remove(self.grid),
            None => false,
        }
    }
}

impl<A: Occupant, O: Occupancy<A>> Iterator for NeighborsMut<'_, A, O> {
    type Item = A;

    fn next(&mut self) -> Option<A> {
        loop {
            if let Some(agent) = self.walk.as_mut().and_then(|w| w.next(&*self.grid)) {
                return Some(agent);
            }
            let grid = &*self.grid;
            let coord = self.cursor.next_map(|coord| {
                let occupied = !grid.location(&coord).ok()?.is_empty();
                occupied.then_some(coord)
            })?;
            self.walk = Some(OccupantWalk::new(&*self.grid, &coord).ok()?);
        }
    }
}
