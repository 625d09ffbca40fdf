//! Tilth: grid spaces and ring-expanding neighborhoods for agent-based
//! simulation.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Tilth sub-crates. For most users, adding `tilth` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use tilth::prelude::*;
//!
//! // A 10x10 torus where any number of agents may share a cell.
//! let mut grid = MultiGrid::<AgentId>::new_2d(10, 10, EdgeBehavior::Wrap).unwrap();
//! grid.put_agent_at(AgentId(1), &[0, 0]).unwrap();
//! grid.put_agent_at(AgentId(2), &[9, 9]).unwrap();
//! grid.put_agent_at(AgentId(3), &[5, 5]).unwrap();
//!
//! // Agent 2 sits across the corner seam from the origin.
//! let moore = Moore::new(&grid).unwrap();
//! let near: Vec<AgentId> = moore.neighbors(&grid, &[0, 0], 1, false).unwrap().collect();
//! assert_eq!(near, vec![AgentId(2)]);
//!
//! // Rings are walked lazily; the iterator reports the ring it is on.
//! let mut it = moore.locations(&grid, &[0, 0], 2, true).unwrap();
//! it.next();
//! assert_eq!(it.current_distance(), Some(0));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `tilth-core` | Coordinates, agent and grid ids, the `Occupant` trait |
//! | [`space`] | `tilth-space` | Grids, locations, configuration, raster loading |
//! | [`neighborhood`] | `tilth-neighborhood` | Von Neumann, Moore and hex ring walks |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and traits (`tilth-core`).
///
/// Contains [`types::Coord`], [`types::AgentId`],
/// [`types::SpaceInstanceId`] and the [`types::Occupant`] trait.
pub use tilth_core as types;

/// Grid spaces (`tilth-space`).
///
/// Provides [`space::Grid`] with its three occupancy variants,
/// [`space::Location`] views, [`space::GridConfig`] and the `P2`
/// [`space::Raster`] loader.
pub use tilth_space as space;

/// Ring-expanding neighborhoods (`tilth-neighborhood`).
///
/// [`neighborhood::VonNeumann`], [`neighborhood::Moore`] and
/// [`neighborhood::Hex`], all driven through the
/// [`neighborhood::Neighborhood`] trait.
pub use tilth_neighborhood as neighborhood;

/// Common imports for typical Tilth usage.
///
/// ```rust
/// use tilth::prelude::*;
/// ```
///
/// This imports the grid types, location views, the three neighborhood
/// shapes and the error type.
pub mod prelude {
    // Core types
    pub use tilth_core::{AgentId, Coord, Occupant, SpaceInstanceId};

    // Space
    pub use tilth_space::{
        EdgeBehavior, Grid, GridConfig, Location, LocationMut, MultiGrid, OrderedGrid,
        SingleGrid, StoreKind,
    };

    // Errors
    pub use tilth_space::SpaceError;

    // Neighborhoods
    pub use tilth_neighborhood::{Hex, LocationFilter, Moore, Neighborhood, VonNeumann};
}
