//! Core types and traits for the Tilth agent grid library.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the identifiers and the [`Occupant`] trait shared by the grid and
//! neighborhood crates.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod id;
pub mod occupant;

pub use id::{AgentId, Coord, SpaceInstanceId};
pub use occupant::Occupant;
