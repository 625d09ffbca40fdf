//! Per-cell occupant collections.
//!
//! A grid is generic over how each cell stores its occupants. Three
//! variants share the [`Occupancy`] contract:
//!
//! - [`Single`]: at most one occupant (capacity fixed at 1)
//! - [`Unordered`]: a capacity-bounded set
//! - [`Ordered`]: an insertion-ordered list with indexed access
//!
//! Capacity is enforced by the grid, not by the collection, so these
//! types never need to know it.

use indexmap::IndexSet;
use smallvec::SmallVec;
use std::fmt;
use tilth_core::Occupant;

/// Storage for the occupants of one cell.
pub trait Occupancy<A: Occupant>: Default + Clone + fmt::Debug {
    /// Largest capacity this variant can hold, if bounded.
    const MAX_CAPACITY: Option<usize> = None;

    /// Whether occupants keep their insertion order.
    const ORDERED: bool;

    /// Number of occupants.
    fn len(&self) -> usize;

    /// Whether the cell has no occupants.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `agent` is an occupant.
    fn contains(&self, agent: &A) -> bool;

    /// Append `agent`. Returns `false` if the collection refuses it.
    fn insert(&mut self, agent: A) -> bool;

    /// Remove one occurrence of `agent`. Returns `false` if absent.
    fn remove(&mut self, agent: &A) -> bool;

    /// The occupant at position `index`.
    fn get(&self, index: usize) -> Option<A>;

    /// Remove the occupant at position `index`, shifting later ones down.
    fn remove_at(&mut self, index: usize) -> Option<A>;

    /// Remove and return every occupant.
    fn take_all(&mut self) -> Vec<A>;

    /// Iterate occupants by position.
    fn iter(&self) -> impl Iterator<Item = A> + '_;
}

/// A cell holding at most one occupant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Single<A>(Option<A>);

impl<A> Default for Single<A> {
    fn default() -> Self {
        Self(None)
    }
}

impl<A: Occupant> Occupancy<A> for Single<A> {
    const MAX_CAPACITY: Option<usize> = Some(1);
    const ORDERED: bool = true;

    fn len(&self) -> usize {
        usize::from(self.0.is_some())
    }

    fn contains(&self, agent: &A) -> bool {
        self.0.as_ref() == Some(agent)
    }

    fn insert(&mut self, agent: A) -> bool {
        if self.0.is_some() {
            return false;
        }
        self.0 = Some(agent);
        true
    }

    fn remove(&mut self, agent: &A) -> bool {
        if self.contains(agent) {
            self.0 = None;
            true
        } else {
            false
        }
    }

    fn get(&self, index: usize) -> Option<A> {
        if index == 0 {
            self.0
        } else {
            None
        }
    }

    fn remove_at(&mut self, index: usize) -> Option<A> {
        if index == 0 {
            self.0.take()
        } else {
            None
        }
    }

    fn take_all(&mut self) -> Vec<A> {
        self.0.take().into_iter().collect()
    }

    fn iter(&self) -> impl Iterator<Item = A> + '_ {
        self.0.iter().copied()
    }
}

/// A set of occupants. Inserting a value already present fails.
///
/// Iteration order is deterministic but not part of the contract.
#[derive(Clone, Debug)]
pub struct Unordered<A>(IndexSet<A>);

impl<A> Default for Unordered<A> {
    fn default() -> Self {
        Self(IndexSet::new())
    }
}

impl<A: Occupant> Occupancy<A> for Unordered<A> {
    const ORDERED: bool = false;

    fn len(&self) -> usize {
        self.0.len()
    }

    fn contains(&self, agent: &A) -> bool {
        self.0.contains(agent)
    }

    fn insert(&mut self, agent: A) -> bool {
        self.0.insert(agent)
    }

    fn remove(&mut self, agent: &A) -> bool {
        // Shift (not swap) so positions held by an in-flight cursor stay valid.
        self.0.shift_remove(agent)
    }

    fn get(&self, index: usize) -> Option<A> {
        self.0.get_index(index).copied()
    }

    fn remove_at(&mut self, index: usize) -> Option<A> {
        self.0.shift_remove_index(index)
    }

    fn take_all(&mut self) -> Vec<A> {
        self.0.drain(..).collect()
    }

    fn iter(&self) -> impl Iterator<Item = A> + '_ {
        self.0.iter().copied()
    }
}

/// An insertion-ordered list of occupants.
///
/// Untracked values may repeat; tracked agents are unique grid-wide
/// anyway, so they never repeat within one list.
#[derive(Clone, Debug)]
pub struct Ordered<A>(SmallVec<[A; 4]>);

impl<A> Default for Ordered<A> {
    fn default() -> Self {
        Self(SmallVec::new())
    }
}

impl<A: Occupant> Ordered<A> {
    /// Insert `agent` at `index`, shifting later occupants up.
    ///
    /// Returns `false` if `index > len`.
    pub fn insert_at(&mut self, index: usize, agent: A) -> bool {
        if index > self.0.len() {
            return false;
        }
        self.0.insert(index, agent);
        true
    }

    /// The earliest-inserted occupant.
    pub fn first(&self) -> Option<A> {
        self.0.first().copied()
    }

    /// The latest-inserted occupant.
    pub fn last(&self) -> Option<A> {
        self.0.last().copied()
    }

    /// Position of the first occurrence of `agent`.
    pub fn position(&self, agent: &A) -> Option<usize> {
        self.0.iter().position(|a| a == agent)
    }
}

impl<A: Occupant> Occupancy<A> for Ordered<A> {
    const ORDERED: bool = true;

    fn len(&self) -> usize {
        self.0.len()
    }

    fn contains(&self, agent: &A) -> bool {
        self.0.contains(agent)
    }

    fn insert(&mut self, agent: A) -> bool {
        self.0.push(agent);
        true
    }

    fn remove(&mut self, agent: &A) -> bool {
        match self.position(agent) {
            Some(i) => {
                self.0.remove(i);
                true
            }
            None => false,
        }
    }

    fn get(&self, index: usize) -> Option<A> {
        self.0.get(index).copied()
    }

    fn remove_at(&mut self, index: usize) -> Option<A> {
        (index < self.0.len()).then(|| self.0.remove(index))
    }

    fn take_all(&mut self) -> Vec<A> {
        self.0.drain(..).collect()
    }

    fn iter(&self) -> impl Iterator<Item = A> + '_ {
        self.0.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilth_core::AgentId;

    fn a(n: u32) -> AgentId {
        AgentId(n)
    }

    #[test]
    fn single_holds_one() {
        let mut s = Single::default();
        assert!(s.insert(a(1)));
        assert!(!s.insert(a(2)));
        assert_eq!(s.len(), 1);
        assert_eq!(s.get(0), Some(a(1)));
        assert_eq!(s.get(1), None);
        assert!(!s.remove(&a(2)));
        assert!(s.remove(&a(1)));
        assert!(s.is_empty());
    }

    #[test]
    fn unordered_rejects_duplicates() {
        let mut s = Unordered::default();
        assert!(s.insert(a(1)));
        assert!(!s.insert(a(1)));
        assert!(s.insert(a(2)));
        assert_eq!(s.len(), 2);
        assert!(s.contains(&a(2)));
    }

    #[test]
    fn unordered_remove_keeps_relative_order() {
        let mut s = Unordered::default();
        for n in 0..4 {
            s.insert(a(n));
        }
        assert!(s.remove(&a(1)));
        let rest: Vec<_> = s.iter().collect();
        assert_eq!(rest, vec![a(0), a(2), a(3)]);
        assert_eq!(s.remove_at(0), Some(a(0)));
        assert_eq!(s.get(0), Some(a(2)));
    }

    #[test]
    fn ordered_indexed_ops() {
        let mut s = Ordered::default();
        s.insert(a(1));
        s.insert(a(3));
        assert!(s.insert_at(1, a(2)));
        assert!(!s.insert_at(9, a(9)));
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![a(1), a(2), a(3)]);
        assert_eq!(s.first(), Some(a(1)));
        assert_eq!(s.last(), Some(a(3)));
        assert_eq!(s.remove_at(0), Some(a(1)));
        assert_eq!(s.remove_at(5), None);
        assert_eq!(s.position(&a(3)), Some(1));
    }

    #[test]
    fn ordered_allows_repeated_values() {
        let mut s: Ordered<i64> = Ordered::default();
        assert!(s.insert(7));
        assert!(s.insert(7));
        assert_eq!(s.len(), 2);
        assert!(s.remove(&7));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn take_all_empties() {
        let mut s = Unordered::default();
        s.insert(a(4));
        s.insert(a(5));
        assert_eq!(s.take_all(), vec![a(4), a(5)]);
        assert!(s.is_empty());
    }
}
