//! Benchmark profiles and utilities for the Tilth agent grid library.
//!
//! Provides pre-populated grids for benchmarks and examples:
//!
//! - [`reference_profile`]: 100x100 torus (10K cells) holding 1K agents
//! - [`stress_profile`]: 316x316 torus (~100K cells) holding 10K agents
//! - [`sparse_profile`]: 64x64x64 bounded grid on the sparse store holding 2K agents
//! - [`probe_origins`]: deterministic query origins for a grid

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use tilth_core::{AgentId, Coord};
use tilth_space::{EdgeBehavior, GridConfig, MultiGrid, SpaceError, StoreKind};
use tilth_test_utils::{populate, SeededPopulation};
use tracing::debug;

/// Agents placed by [`reference_profile`].
pub const REFERENCE_AGENTS: usize = 1_000;

/// Agents placed by [`stress_profile`].
pub const STRESS_AGENTS: usize = 10_000;

/// Agents placed by [`sparse_profile`].
pub const SPARSE_AGENTS: usize = 2_000;

/// Build a reference benchmark profile: 100x100 torus, dense store.
pub fn reference_profile(seed: u64) -> Result<MultiGrid<AgentId>, SpaceError> {
    populated(GridConfig::new_2d(100, 100).toroidal(true), REFERENCE_AGENTS, seed)
}

/// Build a stress benchmark profile: 316x316 torus, dense store.
///
/// Same density as [`reference_profile`] at 10x the cell count.
pub fn stress_profile(seed: u64) -> Result<MultiGrid<AgentId>, SpaceError> {
    populated(GridConfig::new_2d(316, 316).toroidal(true), STRESS_AGENTS, seed)
}

/// Build a large, mostly empty 3D profile on the sparse store.
pub fn sparse_profile(seed: u64) -> Result<MultiGrid<AgentId>, SpaceError> {
    let config = GridConfig::new_3d(64, 64, 64)
        .with_edge(EdgeBehavior::Absorb)
        .with_store(StoreKind::Sparse);
    populated(config, SPARSE_AGENTS, seed)
}

fn populated(config: GridConfig, agents: usize, seed: u64) -> Result<MultiGrid<AgentId>, SpaceError> {
    let mut grid = MultiGrid::<AgentId>::from_config(config)?;
    let placed = populate(&mut grid, agents, seed).len();
    debug!(
        dims = ?grid.dims(),
        placed,
        occupied = grid.occupied_count(),
        "bench profile built"
    );
    Ok(grid)
}

/// `n` deterministic query origins inside a `dims`-shaped grid.
pub fn probe_origins(dims: &[u32], n: usize, seed: u64) -> Vec<Coord> {
    let mut pop = SeededPopulation::new(seed);
    (0..n).map(|_| pop.random_coord(dims)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_profile_places_every_agent() {
        let grid = reference_profile(42).unwrap();
        assert_eq!(grid.agent_count(), REFERENCE_AGENTS);
        assert!(grid.is_toroidal());
    }

    #[test]
    fn sparse_profile_uses_sparse_store() {
        let grid = sparse_profile(7).unwrap();
        assert_eq!(grid.store_kind(), StoreKind::Sparse);
        assert_eq!(grid.agent_count(), SPARSE_AGENTS);
    }

    #[test]
    fn profiles_are_deterministic() {
        let a = reference_profile(3).unwrap();
        let b = reference_profile(3).unwrap();
        let mut ca: Vec<Coord> = a.occupied_coords().collect();
        let mut cb: Vec<Coord> = b.occupied_coords().collect();
        ca.sort();
        cb.sort();
        assert_eq!(ca, cb);
    }

    #[test]
    fn probe_origins_in_range() {
        for c in probe_origins(&[10, 20], 50, 1) {
            assert!((0..10).contains(&c[0]) && (0..20).contains(&c[1]));
        }
    }
}
