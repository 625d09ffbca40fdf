//! Views of a single grid cell.
//!
//! [`Location`] borrows the grid immutably and is what lookups and
//! neighborhood iterators hand out. [`LocationMut`] borrows it mutably and
//! routes every change through the grid, so occupancy, capacity and
//! back-references stay consistent.

use crate::error::SpaceError;
use crate::grid::Grid;
use crate::occupancy::{Occupancy, Ordered};
use std::fmt;
use tilth_core::{Coord, Occupant, SpaceInstanceId};

/// Read-only view of the cell at one coordinate.
///
/// The view may describe an unoccupied cell, in which case it is empty and
/// [`is_stored`](Self::is_stored) is `false`.
pub struct Location<'g, A, O> {
    grid: &'g Grid<A, O>,
    coord: Coord,
    cell: Option<&'g O>,
}

impl<'g, A: Occupant, O: Occupancy<A>> Location<'g, A, O> {
    pub(crate) fn new(grid: &'g Grid<A, O>, coord: Coord, rank: usize) -> Self {
        Self {
            cell: grid.cell(rank),
            grid,
            coord,
        }
    }

    /// Normalized coordinate of this cell.
    pub fn coord(&self) -> &Coord {
        &self.coord
    }

    /// The x coordinate.
    pub fn x(&self) -> i32 {
        self.coord[0]
    }

    /// The y coordinate.
    pub fn y(&self) -> i32 {
        self.coord[1]
    }

    /// The z coordinate, on 3D grids.
    pub fn z(&self) -> Option<i32> {
        self.coord.get(2).copied()
    }

    /// The grid this cell belongs to.
    pub fn grid(&self) -> &'g Grid<A, O> {
        self.grid
    }

    /// Instance id of the owning grid.
    pub fn space_id(&self) -> SpaceInstanceId {
        self.grid.instance_id()
    }

    /// Whether the cell currently exists in storage (has an occupant).
    pub fn is_stored(&self) -> bool {
        self.cell.is_some()
    }

    /// Number of occupants.
    pub fn len(&self) -> usize {
        self.cell.map_or(0, |c| c.len())
    }

    /// Whether the cell has no occupants.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The grid's per-cell capacity, `None` if unbounded.
    pub fn capacity(&self) -> Option<usize> {
        self.grid.capacity()
    }

    /// Whether another occupant would exceed capacity.
    pub fn is_full(&self) -> bool {
        self.len() >= self.grid.raw_capacity()
    }

    /// Whether `agent` occupies this cell.
    pub fn contains(&self, agent: &A) -> bool {
        self.cell.is_some_and(|c| c.contains(agent))
    }

    /// The occupant at position `index`.
    pub fn get(&self, index: usize) -> Option<A> {
        self.cell.and_then(|c| c.get(index))
    }

    /// Iterate occupants by position.
    pub fn iter(&self) -> impl Iterator<Item = A> + 'g {
        self.cell.into_iter().flat_map(|c| c.iter())
    }

    /// Occupants collected into a `Vec`.
    pub fn to_vec(&self) -> Vec<A> {
        self.iter().collect()
    }
}

impl<A: Occupant> Location<'_, A, Ordered<A>> {
    /// The earliest-inserted occupant.
    pub fn first(&self) -> Option<A> {
        self.cell.and_then(Ordered::first)
    }

    /// The latest-inserted occupant.
    pub fn last(&self) -> Option<A> {
        self.cell.and_then(Ordered::last)
    }
}

impl<A, O> Clone for Location<'_, A, O> {
    fn clone(&self) -> Self {
        Self {
            grid: self.grid,
            coord: self.coord.clone(),
            cell: self.cell,
        }
    }
}

impl<A: fmt::Debug, O: fmt::Debug> fmt::Debug for Location<'_, A, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Location")
            .field("coord", &self.coord.as_slice())
            .field("cell", &self.cell)
            .finish()
    }
}

/// Mutable view of the cell at one coordinate.
///
/// Adding the first occupant creates the cell; removing the last deletes
/// it. Back-references of tracked occupants follow every change.
pub struct LocationMut<'g, A, O> {
    grid: &'g mut Grid<A, O>,
    coord: Coord,
    rank: usize,
}

impl<'g, A: Occupant, O: Occupancy<A>> LocationMut<'g, A, O> {
    pub(crate) fn new(grid: &'g mut Grid<A, O>, coord: Coord, rank: usize) -> Self {
        Self { grid, coord, rank }
    }

    /// Normalized coordinate of this cell.
    pub fn coord(&self) -> &Coord {
        &self.coord
    }

    /// Reborrow as a read-only view.
    pub fn as_location(&self) -> Location<'_, A, O> {
        Location::new(&*self.grid, self.coord.clone(), self.rank)
    }

    /// Number of occupants.
    pub fn len(&self) -> usize {
        self.grid.cell(self.rank).map_or(0, |c| c.len())
    }

    /// Whether the cell has no occupants.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether another occupant would exceed capacity.
    pub fn is_full(&self) -> bool {
        self.len() >= self.grid.raw_capacity()
    }

    /// Whether `agent` occupies this cell.
    pub fn contains(&self, agent: &A) -> bool {
        self.grid
            .cell(self.rank)
            .is_some_and(|c| c.contains(agent))
    }

    /// Add `agent`. Returns `false` if the cell is full, already holds
    /// it, or a tracked `agent` is placed elsewhere.
    pub fn add(&mut self, agent: A) -> bool {
        self.grid.insert_at_rank(self.rank, &self.coord, agent)
    }

    /// Remove one occurrence of `agent`. Returns `false` if absent.
    pub fn remove(&mut self, agent: &A) -> bool {
        self.grid.remove_from_rank(self.rank, agent)
    }

    /// Remove every occupant, returning them in position order.
    pub fn clear(&mut self) -> Vec<A> {
        self.grid.clear_rank(self.rank)
    }

    /// Iterate occupants with in-flight removal of the last one yielded.
    pub fn occupants_mut(&mut self) -> OccupantsMut<'_, A, O> {
        OccupantsMut {
            walk: OccupantWalk::at(self.coord.clone(), self.rank),
            grid: &mut *self.grid,
        }
    }
}

impl<A: Occupant> LocationMut<'_, A, Ordered<A>> {
    /// Insert `agent` at position `index`, shifting later occupants.
    ///
    /// Returns `false` if `index > len`, the cell is full, or a tracked
    /// `agent` is already placed.
    pub fn insert_at(&mut self, index: usize, agent: A) -> bool {
        self.grid
            .insert_ordered(self.rank, &self.coord, index, agent)
    }

    /// Remove and return the occupant at position `index`.
    pub fn remove_at(&mut self, index: usize) -> Option<A> {
        self.grid.remove_index_from_rank(self.rank, index)
    }

    /// The earliest-inserted occupant.
    pub fn first(&self) -> Option<A> {
        self.grid.cell(self.rank).and_then(Ordered::first)
    }

    /// The latest-inserted occupant.
    pub fn last(&self) -> Option<A> {
        self.grid.cell(self.rank).and_then(Ordered::last)
    }
}

impl<A: fmt::Debug, O: fmt::Debug> fmt::Debug for LocationMut<'_, A, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationMut")
            .field("coord", &self.coord.as_slice())
            .field("rank", &self.rank)
            .finish()
    }
}

/// A position within one cell's occupant list that survives removals.
///
/// The walk does not borrow the grid; each step takes it as an argument.
/// This lets callers holding `&mut Grid` (such as mutable neighborhood
/// iterators) walk a cell and remove the occupant just yielded without
/// skipping the next one.
#[derive(Clone, Debug)]
pub struct OccupantWalk<A> {
    coord: Coord,
    rank: usize,
    pos: usize,
    last: Option<A>,
}

impl<A: Occupant> OccupantWalk<A> {
    /// Start a walk over the cell at `coord`.
    pub fn new<O: Occupancy<A>>(grid: &Grid<A, O>, coord: &[i32]) -> Result<Self, SpaceError> {
        let (coord, rank) = grid.lattice().locate(coord)?;
        Ok(Self::at(coord, rank))
    }

    pub(crate) fn at(coord: Coord, rank: usize) -> Self {
        Self {
            coord,
            rank,
            pos: 0,
            last: None,
        }
    }

    /// Coordinate of the walked cell.
    pub fn coord(&self) -> &Coord {
        &self.coord
    }

    /// Yield the next occupant.
    pub fn next<O: Occupancy<A>>(&mut self, grid: &Grid<A, O>) -> Option<A> {
        let agent = grid.cell(self.rank).and_then(|c| c.get(self.pos));
        if agent.is_some() {
            self.pos += 1;
        }
        self.last = agent;
        agent
    }

    /// Remove the occupant most recently yielded by [`next`](Self::next).
    ///
    /// Returns `false` if nothing was yielded since the last removal, or
    /// the occupant has since been removed by other means.
    pub fn remove<O: Occupancy<A>>(&mut self, grid: &mut Grid<A, O>) -> bool {
        let Some(agent) = self.last.take() else {
            return false;
        };
        let index = self.pos - 1;
        if grid.cell(self.rank).and_then(|c| c.get(index)) != Some(agent) {
            return false;
        }
        let removed = grid.remove_index_from_rank(self.rank, index).is_some();
        if removed {
            self.pos = index;
        }
        removed
    }
}

/// Occupants of one cell, with removal of the last yielded occupant.
///
/// Created by [`LocationMut::occupants_mut`].
pub struct OccupantsMut<'g, A, O> {
    grid: &'g mut Grid<A, O>,
    walk: OccupantWalk<A>,
}

impl<A: Occupant, O: Occupancy<A>> OccupantsMut<'_, A, O> {
    /// Remove the occupant most recently yielded.
    ///
    /// Iteration continues with the occupant that followed it.
    pub fn remove(&mut self) -> bool {
        self.walk.remove(self.grid)
    }
}

impl<A: Occupant, O: Occupancy<A>> Iterator for OccupantsMut<'_, A, O> {
    type Item = A;

    fn next(&mut self) -> Option<A> {
        self.walk.next(self.grid)
    }
}
