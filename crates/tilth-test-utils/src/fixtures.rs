//! Reusable grid fixtures.
//!
//! - [`SeededPopulation`] places fresh [`AgentId`]s at reproducible random
//!   coordinates.
//! - [`pgm_text`] and [`checkerboard_pgm`] build `P2` raster text.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use tilth_core::{AgentId, Coord};
use tilth_space::{Grid, Occupancy};

/// Deterministic agent placement driven by a ChaCha8 stream.
///
/// The same seed and grid shape always produce the same placements, so
/// tests and benchmarks can share populations without storing them.
pub struct SeededPopulation {
    rng: ChaCha8Rng,
    next_id: u32,
}

impl SeededPopulation {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            next_id: 0,
        }
    }

    /// A uniformly random in-range coordinate for a `dims`-shaped grid.
    pub fn random_coord(&mut self, dims: &[u32]) -> Coord {
        dims.iter()
            .map(|&size| self.rng.random_range(0..size) as i32)
            .collect()
    }

    /// Place up to `n` new agents at random cells of `grid`.
    ///
    /// Full cells are retried with a fresh coordinate; placement stops
    /// early once the retry budget runs out, so a nearly full grid may
    /// receive fewer than `n` agents. Returns the agents placed.
    pub fn fill<O: Occupancy<AgentId>>(
        &mut self,
        grid: &mut Grid<AgentId, O>,
        n: usize,
    ) -> Vec<AgentId> {
        let mut placed = Vec::with_capacity(n);
        let mut budget = n.saturating_mul(64).max(grid.lattice().cell_count());
        while placed.len() < n && budget > 0 {
            budget -= 1;
            let coord = self.random_coord(grid.dims());
            let agent = AgentId(self.next_id);
            if grid.put_agent_at(agent, &coord).unwrap_or(false) {
                self.next_id += 1;
                placed.push(agent);
            }
        }
        placed
    }
}

/// Place `n` agents on `grid` using a fresh [`SeededPopulation`].
pub fn populate<O: Occupancy<AgentId>>(
    grid: &mut Grid<AgentId, O>,
    n: usize,
    seed: u64,
) -> Vec<AgentId> {
    SeededPopulation::new(seed).fill(grid, n)
}

/// `P2` raster text with `values` in file order (x-major: the first
/// `height` values fill column 0).
pub fn pgm_text(width: u32, height: u32, values: &[i64]) -> String {
    let max = values.iter().copied().max().unwrap_or(0).max(1);
    let body: Vec<String> = values
        .chunks(height.max(1) as usize)
        .map(|column| {
            column
                .iter()
                .map(i64::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();
    format!("P2\n{width} {height}\n{max}\n{}\n", body.join("\n"))
}

/// A `width` x `height` raster whose cell `(x, y)` holds `(x + y) % 2`.
pub fn checkerboard_pgm(width: u32, height: u32) -> String {
    let values: Vec<i64> = (0..width)
        .flat_map(|x| (0..height).map(move |y| i64::from((x + y) % 2)))
        .collect();
    pgm_text(width, height, &values)
}
