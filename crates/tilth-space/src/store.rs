//! Cell storage: a map from dense rank to occupied cell.
//!
//! [`CellStore`] only ever holds occupied cells. The grid inserts a cell
//! when it receives its first occupant and removes it when the last one
//! leaves, so the store's length is the number of occupied cells.

use indexmap::IndexMap;

/// Which backend a [`CellStore`] uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StoreKind {
    /// One slot per grid cell, allocated on first insertion. O(1) access,
    /// memory proportional to the grid.
    #[default]
    Dense,
    /// An ordered map keyed by rank. Memory proportional to the number of
    /// occupied cells; suited to large, mostly empty 3D grids.
    Sparse,
}

#[derive(Clone, Debug)]
enum Backend<C> {
    Dense { slots: Vec<Option<C>>, len: usize },
    Sparse(IndexMap<usize, C>),
}

/// Rank-addressed storage for occupied cells.
///
/// # Examples
///
/// ```
/// use tilth_space::{CellStore, StoreKind};
///
/// let mut store: CellStore<&str> = CellStore::new(StoreKind::Sparse, 100);
/// assert!(store.put(42, "cell").is_none());
/// assert_eq!(store.get(42), Some(&"cell"));
/// assert_eq!(store.len(), 1);
/// assert_eq!(store.remove(42), Some("cell"));
/// assert!(store.is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct CellStore<C> {
    backend: Backend<C>,
    cell_count: usize,
}

impl<C> CellStore<C> {
    /// Create an empty store for a grid of `cell_count` cells.
    ///
    /// Neither backend allocates until the first [`put`](Self::put).
    pub fn new(kind: StoreKind, cell_count: usize) -> Self {
        let backend = match kind {
            StoreKind::Dense => Backend::Dense {
                slots: Vec::new(),
                len: 0,
            },
            StoreKind::Sparse => Backend::Sparse(IndexMap::new()),
        };
        Self {
            backend,
            cell_count,
        }
    }

    /// The backend in use.
    pub fn kind(&self) -> StoreKind {
        match self.backend {
            Backend::Dense { .. } => StoreKind::Dense,
            Backend::Sparse(_) => StoreKind::Sparse,
        }
    }

    /// Number of stored cells.
    pub fn len(&self) -> usize {
        match &self.backend {
            Backend::Dense { len, .. } => *len,
            Backend::Sparse(map) => map.len(),
        }
    }

    /// Whether no cell is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The cell at `rank`, if stored.
    pub fn get(&self, rank: usize) -> Option<&C> {
        match &self.backend {
            Backend::Dense { slots, .. } => slots.get(rank).and_then(Option::as_ref),
            Backend::Sparse(map) => map.get(&rank),
        }
    }

    /// Mutable access to the cell at `rank`, if stored.
    pub fn get_mut(&mut self, rank: usize) -> Option<&mut C> {
        match &mut self.backend {
            Backend::Dense { slots, .. } => slots.get_mut(rank).and_then(Option::as_mut),
            Backend::Sparse(map) => map.get_mut(&rank),
        }
    }

    /// Store `cell` at `rank`, returning the cell it replaced.
    ///
    /// # Panics
    ///
    /// Panics if `rank` is not below the grid's cell count.
    pub fn put(&mut self, rank: usize, cell: C) -> Option<C> {
        assert!(
            rank < self.cell_count,
            "rank {rank} out of range for {} cells",
            self.cell_count
        );
        match &mut self.backend {
            Backend::Dense { slots, len } => {
                if slots.is_empty() {
                    slots.resize_with(self.cell_count, || None);
                }
                let old = slots[rank].replace(cell);
                if old.is_none() {
                    *len += 1;
                }
                old
            }
            Backend::Sparse(map) => map.insert(rank, cell),
        }
    }

    /// Remove and return the cell at `rank`.
    pub fn remove(&mut self, rank: usize) -> Option<C> {
        match &mut self.backend {
            Backend::Dense { slots, len } => {
                let old = slots.get_mut(rank).and_then(Option::take);
                if old.is_some() {
                    *len -= 1;
                }
                old
            }
            Backend::Sparse(map) => map.swap_remove(&rank),
        }
    }

    /// Iterate stored cells with their ranks.
    ///
    /// Dense stores yield in rank order; sparse stores in an unspecified
    /// but deterministic order.
    pub fn iter(&self) -> Box<dyn Iterator<Item = (usize, &C)> + '_> {
        match &self.backend {
            Backend::Dense { slots, .. } => Box::new(
                slots
                    .iter()
                    .enumerate()
                    .filter_map(|(rank, slot)| slot.as_ref().map(|c| (rank, c))),
            ),
            Backend::Sparse(map) => Box::new(map.iter().map(|(&rank, c)| (rank, c))),
        }
    }

    /// Release bookkeeping no stored cell needs.
    ///
    /// A sparse map shrinks to its live entries; a dense store with no
    /// occupied cells drops its slot vector until the next insertion.
    pub fn trim(&mut self) {
        match &mut self.backend {
            Backend::Dense { slots, len } => {
                if *len == 0 {
                    *slots = Vec::new();
                }
            }
            Backend::Sparse(map) => map.shrink_to_fit(),
        }
    }

    /// Heap slots currently reserved by the backend.
    pub fn reserved(&self) -> usize {
        match &self.backend {
            Backend::Dense { slots, .. } => slots.capacity(),
            Backend::Sparse(map) => map.capacity(),
        }
    }
}
