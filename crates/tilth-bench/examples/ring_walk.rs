//! Ring-walk walkthrough.
//!
//! Demonstrates: build a populated torus → bind each neighborhood shape →
//! walk rings around an origin → relocate neighbors through a mutable walk
//! → load a raster grid.
//!
//! Run with `RUST_LOG=tilth_space=trace` to see cells materialize and evict.

use tilth_bench::reference_profile;
use tilth_core::AgentId;
use tilth_neighborhood::{Hex, LocationFilter, Moore, Neighborhood, VonNeumann};
use tilth_space::{EdgeBehavior, SingleGrid};
use tilth_test_utils::checkerboard_pgm;
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    println!("=== Tilth Ring Walk Example ===\n");

    let mut grid = reference_profile(42).unwrap();
    println!(
        "grid {:?}, {} agents in {} occupied cells\n",
        grid.dims(),
        grid.agent_count(),
        grid.occupied_count()
    );

    let origin = [50, 50];

    // --- Shapes: occupants per ring ---
    let von_neumann = VonNeumann::new(&grid).unwrap();
    let moore = Moore::new(&grid).unwrap();
    let hex = Hex::new(&grid).unwrap();
    println!("Agents per ring around {origin:?}:");
    print_rings("von Neumann", &von_neumann, &grid, &origin);
    print_rings("Moore", &moore, &grid, &origin);
    print_rings("hex", &hex, &grid, &origin);

    // --- Mutable walk: pull every agent within 2 cells onto the origin ---
    let mut near = Vec::new();
    let mut it = moore.neighbors_mut(&mut grid, &origin, 2, false).unwrap();
    while let Some(agent) = it.next() {
        if it.remove() {
            near.push(agent);
        }
    }
    for &agent in &near {
        grid.put_agent_at(agent, &origin).unwrap();
    }
    println!(
        "\ngathered {} agents onto {origin:?}; cell now holds {}",
        near.len(),
        grid.location(&origin).unwrap().len()
    );

    // --- Empty cells around the crowd ---
    let empty = moore
        .locations_mut(&mut grid, &origin, 2, false, LocationFilter::Empty)
        .unwrap()
        .count();
    println!("empty cells within 2: {empty}");

    // --- Raster ---
    let text = checkerboard_pgm(4, 4);
    let raster = SingleGrid::<i64>::from_raster(text.as_bytes(), EdgeBehavior::Absorb).unwrap();
    println!("\nloaded 4x4 raster: {} cells", raster.occupied_count());
    for y in 0..4 {
        let row: Vec<String> = (0..4)
            .map(|x| {
                let loc = raster.location(&[x, y]).unwrap();
                loc.get(0).map_or_else(|| ".".into(), |v| v.to_string())
            })
            .collect();
        println!("  {}", row.join(" "));
    }

    println!("\n=== Done ===");
}

fn print_rings<N: Neighborhood>(
    name: &str,
    nb: &N,
    grid: &tilth_space::MultiGrid<AgentId>,
    origin: &[i32],
) {
    let mut per_ring = [0usize; 4];
    let mut it = nb.neighbors(grid, origin, 3, true).unwrap();
    while it.next().is_some() {
        if let Some(ring) = it.current_distance() {
            per_ring[ring as usize] += 1;
        }
    }
    println!("  {name:<12} {per_ring:?}");
}
