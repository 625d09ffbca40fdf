//! The [`Grid`]: a 2D or 3D space of capacity-bounded cells.

use crate::config::GridConfig;
use crate::edge::EdgeBehavior;
use crate::error::SpaceError;
use crate::lattice::Lattice;
use crate::location::{Location, LocationMut};
use crate::occupancy::{Occupancy, Ordered, Single, Unordered};
use crate::store::{CellStore, StoreKind};
use indexmap::IndexMap;
use tilth_core::{Coord, Occupant, SpaceInstanceId};
use tracing::{debug, trace};

/// A discrete grid holding occupants in capacity-bounded cells.
///
/// The grid exclusively owns its cells. A cell exists in storage only
/// while it has at least one occupant: it is created by the first
/// placement and deleted when its last occupant leaves. Looking up an
/// unoccupied coordinate yields an empty [`Location`] view that is not
/// stored.
///
/// For tracked occupants (see [`Occupant::TRACKED`]) the grid also keeps
/// the occupant-to-cell back-reference: [`location_of`](Self::location_of)
/// returns a coordinate iff that cell holds the occupant.
///
/// `O` selects the per-cell collection; see [`SingleGrid`], [`MultiGrid`]
/// and [`OrderedGrid`].
///
/// # Examples
///
/// ```
/// use tilth_core::AgentId;
/// use tilth_space::{EdgeBehavior, MultiGrid};
///
/// let mut grid = MultiGrid::new_2d(10, 10, EdgeBehavior::Wrap).unwrap();
/// assert!(grid.put_agent_at(AgentId(1), &[3, 4]).unwrap());
///
/// // Toroidal: (13, -6) is the same cell as (3, 4).
/// let loc = grid.location(&[13, -6]).unwrap();
/// assert!(loc.contains(&AgentId(1)));
/// assert_eq!(grid.location_of(&AgentId(1)).unwrap().as_slice(), &[3, 4]);
///
/// assert!(grid.remove_agent(AgentId(1)));
/// assert_eq!(grid.occupied_count(), 0);
/// ```
#[derive(Debug)]
pub struct Grid<A, O = Unordered<A>> {
    lattice: Lattice,
    capacity: usize,
    store: CellStore<O>,
    placements: IndexMap<A, Coord>,
    occupants: usize,
    instance_id: SpaceInstanceId,
}

/// A grid whose cells hold at most one occupant.
pub type SingleGrid<A> = Grid<A, Single<A>>;

/// A grid whose cells hold an unordered set of occupants.
pub type MultiGrid<A> = Grid<A, Unordered<A>>;

/// A grid whose cells hold an insertion-ordered list of occupants.
pub type OrderedGrid<A> = Grid<A, Ordered<A>>;

impl<A: Occupant, O: Occupancy<A>> Grid<A, O> {
    /// Create a 2D grid with unbounded cell capacity (1 for [`SingleGrid`]).
    pub fn new_2d(size_x: u32, size_y: u32, edge: EdgeBehavior) -> Result<Self, SpaceError> {
        Self::from_config(GridConfig::new_2d(size_x, size_y).with_edge(edge))
    }

    /// Create a 3D grid with unbounded cell capacity (1 for [`SingleGrid`]).
    pub fn new_3d(
        size_x: u32,
        size_y: u32,
        size_z: u32,
        edge: EdgeBehavior,
    ) -> Result<Self, SpaceError> {
        Self::from_config(GridConfig::new_3d(size_x, size_y, size_z).with_edge(edge))
    }

    /// Create a grid from a validated [`GridConfig`].
    pub fn from_config(config: GridConfig) -> Result<Self, SpaceError> {
        let (lattice, capacity) = config.validate(O::MAX_CAPACITY)?;
        debug!(
            dims = ?lattice.dims(),
            edge = ?lattice.edge_behavior(),
            capacity,
            store = ?config.store,
            "grid created"
        );
        Ok(Self {
            store: CellStore::new(config.store, lattice.cell_count()),
            lattice,
            capacity,
            placements: IndexMap::new(),
            occupants: 0,
            instance_id: SpaceInstanceId::next(),
        })
    }

    // ── Geometry ────────────────────────────────────────────────

    /// The grid's geometry.
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Number of axes (2 or 3).
    pub fn ndim(&self) -> usize {
        self.lattice.ndim()
    }

    /// Axis sizes, x first.
    pub fn dims(&self) -> &[u32] {
        self.lattice.dims()
    }

    /// Size along x.
    pub fn size_x(&self) -> u32 {
        self.lattice.size(0)
    }

    /// Size along y.
    pub fn size_y(&self) -> u32 {
        self.lattice.size(1)
    }

    /// Size along z, for 3D grids.
    pub fn size_z(&self) -> Option<u32> {
        self.lattice.dims().get(2).copied()
    }

    /// Edge behavior.
    pub fn edge_behavior(&self) -> EdgeBehavior {
        self.lattice.edge_behavior()
    }

    /// Whether coordinates wrap around (torus topology).
    pub fn is_toroidal(&self) -> bool {
        self.lattice.is_toroidal()
    }

    /// Maximum occupants per cell, `None` if unbounded.
    pub fn capacity(&self) -> Option<usize> {
        (self.capacity != usize::MAX).then_some(self.capacity)
    }

    /// Storage backend in use.
    pub fn store_kind(&self) -> StoreKind {
        self.store.kind()
    }

    /// Unique identifier of this grid instance.
    pub fn instance_id(&self) -> SpaceInstanceId {
        self.instance_id
    }

    /// Normalize a coordinate onto the grid (see [`Lattice::normalize`]).
    pub fn normalize(&self, coord: &[i32]) -> Result<Coord, SpaceError> {
        self.lattice.normalize(coord)
    }

    // ── Cell access ─────────────────────────────────────────────

    /// View the location at `coord`.
    ///
    /// Unoccupied coordinates yield an empty, unstored view. Fails with
    /// `Err(SpaceError::CoordOutOfBounds)` off a bounded grid.
    pub fn location(&self, coord: &[i32]) -> Result<Location<'_, A, O>, SpaceError> {
        let (coord, rank) = self.lattice.locate(coord)?;
        Ok(Location::new(self, coord, rank))
    }

    /// Mutable view of the location at `coord`.
    pub fn location_mut(&mut self, coord: &[i32]) -> Result<LocationMut<'_, A, O>, SpaceError> {
        let (coord, rank) = self.lattice.locate(coord)?;
        Ok(LocationMut::new(self, coord, rank))
    }

    /// Place `agent` at `coord`.
    ///
    /// Returns `Ok(false)` without changing anything if the cell is full,
    /// already holds `agent`, or `agent` is tracked and placed elsewhere.
    pub fn put_agent_at(&mut self, agent: A, coord: &[i32]) -> Result<bool, SpaceError> {
        let (coord, rank) = self.lattice.locate(coord)?;
        Ok(self.insert_at_rank(rank, &coord, agent))
    }

    /// Remove a tracked `agent` from whichever cell holds it.
    ///
    /// Returns `false` if the agent is not placed. Untracked occupants have
    /// no back-reference; use [`remove_agent_at`](Self::remove_agent_at).
    pub fn remove_agent(&mut self, agent: A) -> bool {
        let Some(rank) = self
            .placements
            .get(&agent)
            .and_then(|coord| self.lattice.rank(coord))
        else {
            return false;
        };
        self.remove_from_rank(rank, &agent)
    }

    /// Remove one occurrence of `agent` from the cell at `coord`.
    pub fn remove_agent_at(&mut self, agent: A, coord: &[i32]) -> Result<bool, SpaceError> {
        let (_, rank) = self.lattice.locate(coord)?;
        Ok(self.remove_from_rank(rank, &agent))
    }

    /// Move a tracked `agent` to `to`.
    ///
    /// Returns `Ok(false)` if the agent is not placed or the target cell is
    /// full; in both cases nothing changes. Moving onto the agent's own
    /// cell succeeds trivially.
    pub fn move_agent(&mut self, agent: A, to: &[i32]) -> Result<bool, SpaceError> {
        let (to, to_rank) = self.lattice.locate(to)?;
        let Some(from_rank) = self
            .placements
            .get(&agent)
            .and_then(|coord| self.lattice.rank(coord))
        else {
            return Ok(false);
        };
        if from_rank == to_rank {
            return Ok(true);
        }
        if self.store.get(to_rank).map_or(0, |c| c.len()) >= self.capacity {
            return Ok(false);
        }
        self.remove_from_rank(from_rank, &agent);
        Ok(self.insert_at_rank(to_rank, &to, agent))
    }

    /// The cell a tracked `agent` occupies.
    pub fn location_of(&self, agent: &A) -> Option<&Coord> {
        self.placements.get(agent)
    }

    /// Delete the location at `coord`, returning its former occupants.
    ///
    /// Back-references of tracked occupants are cleared.
    pub fn remove_location(&mut self, coord: &[i32]) -> Result<Vec<A>, SpaceError> {
        let (_, rank) = self.lattice.locate(coord)?;
        Ok(self.clear_rank(rank))
    }

    /// Release storage bookkeeping that no occupied cell needs.
    pub fn trim(&mut self) {
        self.store.trim();
        self.placements.shrink_to_fit();
        debug!(
            occupied = self.store.len(),
            reserved = self.store.reserved(),
            "grid trimmed"
        );
    }

    // ── Counts and enumeration ──────────────────────────────────

    /// Total occupants across all cells.
    pub fn agent_count(&self) -> usize {
        self.occupants
    }

    /// Number of occupied (stored) cells.
    pub fn occupied_count(&self) -> usize {
        self.store.len()
    }

    /// Whether no cell is occupied.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Views of every occupied location.
    ///
    /// Dense grids yield in rank order (x-major).
    pub fn occupied(&self) -> impl Iterator<Item = Location<'_, A, O>> + '_ {
        self.store
            .iter()
            .map(move |(rank, _)| Location::new(self, self.lattice.coord_at(rank), rank))
    }

    /// Coordinates of every occupied location.
    pub fn occupied_coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.store
            .iter()
            .map(move |(rank, _)| self.lattice.coord_at(rank))
    }

    // ── Crate-internal mutation ─────────────────────────────────

    pub(crate) fn cell(&self, rank: usize) -> Option<&O> {
        self.store.get(rank)
    }

    pub(crate) fn raw_capacity(&self) -> usize {
        self.capacity
    }

    fn admits(&self, agent: &A) -> bool {
        !(A::TRACKED && self.placements.contains_key(agent))
    }

    fn record(&mut self, coord: &Coord, agent: A) {
        self.occupants += 1;
        if A::TRACKED {
            self.placements.insert(agent, coord.clone());
        }
    }

    fn forget(&mut self, agent: &A) {
        self.occupants -= 1;
        if A::TRACKED {
            self.placements.swap_remove(agent);
        }
    }

    fn evict_if_empty(&mut self, rank: usize) {
        if self.store.get(rank).is_some_and(|c| c.is_empty()) {
            self.store.remove(rank);
            trace!(rank, "location evicted");
        }
    }

    pub(crate) fn insert_at_rank(&mut self, rank: usize, coord: &Coord, agent: A) -> bool {
        if !self.admits(&agent) {
            return false;
        }
        let capacity = self.capacity;
        let inserted = match self.store.get_mut(rank) {
            Some(cell) => cell.len() < capacity && cell.insert(agent),
            None => {
                let mut cell = O::default();
                let inserted = cell.insert(agent);
                if inserted {
                    self.store.put(rank, cell);
                    trace!(?coord, "location materialized");
                }
                inserted
            }
        };
        if inserted {
            self.record(coord, agent);
        }
        inserted
    }

    pub(crate) fn remove_from_rank(&mut self, rank: usize, agent: &A) -> bool {
        let removed = self
            .store
            .get_mut(rank)
            .is_some_and(|cell| cell.remove(agent));
        if removed {
            self.forget(agent);
            self.evict_if_empty(rank);
        }
        removed
    }

    pub(crate) fn remove_index_from_rank(&mut self, rank: usize, index: usize) -> Option<A> {
        let agent = self.store.get_mut(rank)?.remove_at(index)?;
        self.forget(&agent);
        self.evict_if_empty(rank);
        Some(agent)
    }

    pub(crate) fn clear_rank(&mut self, rank: usize) -> Vec<A> {
        let Some(mut cell) = self.store.remove(rank) else {
            return Vec::new();
        };
        trace!(rank, "location evicted");
        let removed = cell.take_all();
        for agent in &removed {
            self.forget(agent);
        }
        removed
    }
}

impl<A: Occupant> Grid<A, Ordered<A>> {
    pub(crate) fn insert_ordered(
        &mut self,
        rank: usize,
        coord: &Coord,
        index: usize,
        agent: A,
    ) -> bool {
        if !self.admits(&agent) {
            return false;
        }
        let capacity = self.capacity;
        let inserted = match self.store.get_mut(rank) {
            Some(cell) => cell.len() < capacity && cell.insert_at(index, agent),
            None if index == 0 => {
                let mut cell = Ordered::default();
                cell.insert(agent);
                self.store.put(rank, cell);
                trace!(?coord, "location materialized");
                true
            }
            None => false,
        };
        if inserted {
            self.record(coord, agent);
        }
        inserted
    }
}

impl<A: Occupant, O: Occupancy<A>> Clone for Grid<A, O> {
    /// Deep-copies cells and back-references. The clone gets a fresh
    /// instance id, so neighborhoods bound to the original reject it.
    fn clone(&self) -> Self {
        Self {
            lattice: self.lattice.clone(),
            capacity: self.capacity,
            store: self.store.clone(),
            placements: self.placements.clone(),
            occupants: self.occupants,
            instance_id: SpaceInstanceId::next(),
        }
    }
}
