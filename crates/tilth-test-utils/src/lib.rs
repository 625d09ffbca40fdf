//! Test utilities for Tilth development.
//!
//! Provides seeded agent populations ([`populate`], [`SeededPopulation`]),
//! raster text fixtures, and small helpers for comparing coordinate sets
//! independently of walk order.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{checkerboard_pgm, pgm_text, populate, SeededPopulation};

use tilth_core::Coord;

/// Convert coordinates to plain vectors, preserving order.
pub fn plain(coords: impl IntoIterator<Item = Coord>) -> Vec<Vec<i32>> {
    coords.into_iter().map(|c| c.to_vec()).collect()
}

/// Convert coordinates to plain vectors and sort them, for order-free
/// comparisons.
pub fn sorted(coords: impl IntoIterator<Item = Coord>) -> Vec<Vec<i32>> {
    let mut out = plain(coords);
    out.sort();
    out
}

/// Every coordinate of a `dims`-shaped grid whose Chebyshev distance to
/// `origin` is at most `extent`, ignoring wrap. Sorted.
pub fn box_around(dims: &[u32], origin: &[i32], extent: u32) -> Vec<Vec<i32>> {
    let mut out = vec![Vec::new()];
    for (axis, &size) in dims.iter().enumerate() {
        let lo = (origin[axis] - extent as i32).max(0);
        let hi = (origin[axis] + extent as i32).min(size as i32 - 1);
        out = out
            .into_iter()
            .flat_map(|prefix| {
                (lo..=hi).map(move |v| {
                    let mut next = prefix.clone();
                    next.push(v);
                    next
                })
            })
            .collect();
    }
    out.sort();
    out
}
