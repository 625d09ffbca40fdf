//! Grid spaces for Tilth agent simulations.
//!
//! This crate defines [`Grid`], a 2D or 3D lattice of capacity-bounded
//! cells that agents occupy, along with the coordinate normalizer it is
//! built on.
//!
//! # Grids
//!
//! - [`SingleGrid`]: at most one occupant per cell
//! - [`MultiGrid`]: an unordered set of occupants per cell
//! - [`OrderedGrid`]: an insertion-ordered list of occupants per cell
//!
//! Each grid is either bounded or toroidal ([`EdgeBehavior`]) and stores
//! its occupied cells densely or sparsely ([`StoreKind`]). Cells exist in
//! storage only while occupied.
//!
//! # Loading
//!
//! Grids of integer values can be loaded from plain-text `P2` rasters; see
//! [`Raster`] and [`Grid::from_raster`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod edge;
pub mod error;
pub mod grid;
pub mod lattice;
pub mod location;
pub mod occupancy;
pub mod raster;
pub mod store;

#[cfg(test)]
pub(crate) mod compliance;

pub use config::GridConfig;
pub use edge::EdgeBehavior;
pub use error::SpaceError;
pub use grid::{Grid, MultiGrid, OrderedGrid, SingleGrid};
pub use lattice::{normalize_axis, Lattice};
pub use location::{Location, LocationMut, OccupantWalk, OccupantsMut};
pub use occupancy::{Occupancy, Ordered, Single, Unordered};
pub use raster::Raster;
pub use store::{CellStore, StoreKind};
