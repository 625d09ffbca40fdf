//! Neighborhoods and ring-expanding traversals for Tilth grids.
//!
//! A neighborhood is bound to one [`Grid`](tilth_space::Grid) and
//! enumerates the cells around an origin lazily, ring by ring: first the
//! origin (optionally), then every cell at distance 1, then 2, up to an
//! extent. Each ring is walked as a closed polygon of straight sectors
//! in a fixed order, so traversals are deterministic.
//!
//! # Shapes
//!
//! - [`VonNeumann`]: Manhattan diamonds on 2D grids
//! - [`Moore`]: Chebyshev squares on 2D grids, cube shells on 3D grids
//! - [`Hex`]: hexagons on an odd-row-shifted 2D offset grid
//!
//! The per-shape state machines ([`RingShape`] implementors) are pure and
//! usable without a grid.
//!
//! # Traversals
//!
//! [`Neighborhood`] provides [`Locations`] (optionally filtered to occupied
//! or empty cells), [`Neighbors`] (occupants), and the mutable
//! [`LocationsMut`] and [`NeighborsMut`], which support removal of the
//! item last yielded.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod cursor;
pub mod hex;
pub mod iter;
pub mod moore;
pub mod neighborhood;
pub mod shape;
pub mod von_neumann;

#[cfg(test)]
pub(crate) mod compliance;

pub use hex::{Hex, HexRing};
pub use iter::{LocationFilter, Locations, LocationsMut, Neighbors, NeighborsMut};
pub use moore::{Moore, Moore3Ring, MooreRing};
pub use neighborhood::{Binding, Neighborhood};
pub use shape::{Cursor, RingShape, ShapeKind};
pub use von_neumann::{VonNeumann, VonNeumannRing};
