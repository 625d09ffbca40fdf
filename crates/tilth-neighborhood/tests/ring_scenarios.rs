//! End-to-end neighborhood scenarios over populated grids.

use tilth_core::AgentId;
use tilth_neighborhood::{Hex, LocationFilter, Moore, Neighborhood, VonNeumann};
use tilth_space::{EdgeBehavior, MultiGrid, OrderedGrid, SingleGrid};
use tilth_test_utils::{box_around, plain, populate, sorted};

fn coords<N: Neighborhood>(
    nb: &N,
    grid: &MultiGrid<AgentId>,
    origin: &[i32],
    extent: u32,
    include_origin: bool,
) -> Vec<Vec<i32>> {
    let locations = nb.locations(grid, origin, extent, include_origin).unwrap();
    plain(locations.map(|l| l.coord().clone()))
}

#[test]
fn von_neumann_walks_diamond_counterclockwise_from_top() {
    let g = MultiGrid::<AgentId>::new_2d(3, 3, EdgeBehavior::Absorb).unwrap();
    let nb = VonNeumann::new(&g).unwrap();
    assert_eq!(
        coords(&nb, &g, &[1, 1], 1, true),
        vec![vec![1, 1], vec![1, 0], vec![0, 1], vec![1, 2], vec![2, 1]]
    );
}

#[test]
fn moore_ring_one_is_the_eight_surrounding_cells() {
    let g = MultiGrid::<AgentId>::new_2d(5, 5, EdgeBehavior::Absorb).unwrap();
    let nb = Moore::new(&g).unwrap();
    let ring = coords(&nb, &g, &[2, 2], 1, false);
    assert_eq!(ring.len(), 8);
    assert_eq!(ring[0], vec![1, 1]);
    let mut expected = box_around(&[5, 5], &[2, 2], 1);
    expected.retain(|c| c != &vec![2, 2]);
    let mut got = ring;
    got.sort();
    assert_eq!(got, expected);
}

#[test]
fn hex_rings_follow_row_parity_on_a_torus() {
    let g = MultiGrid::<AgentId>::new_2d(6, 6, EdgeBehavior::Wrap).unwrap();
    let nb = Hex::new(&g).unwrap();
    assert_eq!(
        coords(&nb, &g, &[2, 2], 1, false),
        vec![
            vec![1, 2],
            vec![1, 1],
            vec![2, 1],
            vec![3, 2],
            vec![2, 3],
            vec![1, 3]
        ]
    );
    assert_eq!(
        coords(&nb, &g, &[2, 1], 1, false),
        vec![
            vec![1, 1],
            vec![2, 0],
            vec![3, 0],
            vec![3, 1],
            vec![3, 2],
            vec![2, 2]
        ]
    );
    // Across the seam: (0, 0) neighbors wrap to column 5 and row 5.
    let seam = sorted(
        nb.locations(&g, &[0, 0], 1, false)
            .unwrap()
            .map(|l| l.coord().clone()),
    );
    assert_eq!(seam.len(), 6);
    assert!(seam.contains(&vec![5, 0]));
    assert!(seam.contains(&vec![5, 5]));
    assert_eq!(nb.distance(&[0, 0], &[5, 5]).unwrap(), 1.0);
}

#[test]
fn torus_extent_wider_than_grid_revisits_cells() {
    let g = MultiGrid::<AgentId>::new_2d(3, 3, EdgeBehavior::Wrap).unwrap();
    let nb = Moore::new(&g).unwrap();
    let walked = coords(&nb, &g, &[1, 1], 2, true);
    assert_eq!(walked.len(), nb.neighborhood_size(2, true));
    assert_eq!(walked.len(), 25);
    let mut distinct = sorted(walked.iter().map(|c| c.iter().copied().collect()));
    distinct.dedup();
    assert_eq!(distinct.len(), 9);
}

#[test]
fn neighbors_see_every_agent_in_range() {
    let mut g = MultiGrid::<AgentId>::new_2d(20, 20, EdgeBehavior::Absorb).unwrap();
    populate(&mut g, 150, 42);
    let nb = Moore::new(&g).unwrap();
    let origin = [7, 12];
    let expected: usize = box_around(&[20, 20], &origin, 3)
        .iter()
        .map(|c| g.location(c).unwrap().len())
        .sum();
    let seen = nb.neighbors(&g, &origin, 3, true).unwrap().count();
    assert_eq!(seen, expected);
    for loc in nb.occupied_locations(&g, &origin, 3, true).unwrap() {
        assert!(!loc.is_empty());
        assert_eq!(loc.space_id(), g.instance_id());
    }
    for loc in nb.empty_locations(&g, &origin, 3, true).unwrap() {
        assert!(loc.is_empty());
    }
}

#[test]
fn neighbors_mut_remove_takes_one_occupant() {
    let mut g = MultiGrid::<AgentId>::new_2d(5, 5, EdgeBehavior::Absorb).unwrap();
    for i in 0..3 {
        g.put_agent_at(AgentId(i), &[2, 1]).unwrap();
    }
    g.put_agent_at(AgentId(9), &[3, 3]).unwrap();
    let nb = VonNeumann::new(&g).unwrap();

    let mut it = nb.neighbors_mut(&mut g, &[2, 2], 2, false).unwrap();
    let mut seen = Vec::new();
    while let Some(agent) = it.next() {
        seen.push(agent);
        if agent == AgentId(1) {
            assert!(it.remove());
            assert!(!it.remove());
        }
    }
    seen.sort();
    assert_eq!(seen, vec![AgentId(0), AgentId(1), AgentId(2), AgentId(9)]);
    assert_eq!(g.location(&[2, 1]).unwrap().len(), 2);
    assert_eq!(g.location_of(&AgentId(1)), None);
    assert_eq!(g.agent_count(), 3);
}

#[test]
fn locations_mut_remove_clears_whole_location() {
    let mut g = MultiGrid::<AgentId>::new_2d(5, 5, EdgeBehavior::Absorb).unwrap();
    for i in 0..3 {
        g.put_agent_at(AgentId(i), &[2, 1]).unwrap();
    }
    g.put_agent_at(AgentId(9), &[3, 3]).unwrap();
    let nb = Moore::new(&g).unwrap();

    let mut it = nb
        .locations_mut(&mut g, &[2, 2], 1, false, LocationFilter::Occupied)
        .unwrap();
    let first = it.next().unwrap();
    assert_eq!(first.as_slice(), &[2, 1]);
    let mut removed = it.remove();
    removed.sort();
    assert_eq!(removed, vec![AgentId(0), AgentId(1), AgentId(2)]);
    assert!(it.remove().is_empty());
    assert_eq!(it.next().unwrap().as_slice(), &[3, 3]);
    assert!(it.next().is_none());
    assert!(g.location(&[2, 1]).unwrap().is_empty());
    assert_eq!(g.agent_count(), 1);
}

#[test]
fn locations_mut_can_fill_empty_cells() {
    let mut g = SingleGrid::<AgentId>::new_2d(4, 4, EdgeBehavior::Wrap).unwrap();
    let nb = VonNeumann::new(&g).unwrap();
    let mut it = nb
        .locations_mut(&mut g, &[0, 0], 1, true, LocationFilter::Empty)
        .unwrap();
    let mut next_id = 0;
    while it.next().is_some() {
        assert!(it.current_mut().unwrap().add(AgentId(next_id)));
        next_id += 1;
    }
    assert_eq!(next_id, 5);
    assert_eq!(g.agent_count(), 5);
    assert_eq!(g.location_of(&AgentId(0)).unwrap().as_slice(), &[0, 0]);
}

#[test]
fn ordered_occupants_come_out_in_insertion_order() {
    let mut g = OrderedGrid::<AgentId>::new_2d(3, 3, EdgeBehavior::Absorb).unwrap();
    for i in [4, 2, 7] {
        g.put_agent_at(AgentId(i), &[1, 0]).unwrap();
    }
    let nb = VonNeumann::new(&g).unwrap();
    let got: Vec<AgentId> = nb.neighbors(&g, &[1, 1], 1, false).unwrap().collect();
    assert_eq!(got, vec![AgentId(4), AgentId(2), AgentId(7)]);
}

#[test]
fn three_dimensional_moore_shell() {
    let g = MultiGrid::<AgentId>::new_3d(5, 5, 5, EdgeBehavior::Absorb).unwrap();
    let nb = Moore::new(&g).unwrap();
    let shell: Vec<Vec<i32>> = sorted(
        nb.locations(&g, &[2, 2, 2], 1, false)
            .unwrap()
            .map(|l| l.coord().clone()),
    );
    assert_eq!(shell.len(), 26);
    assert_eq!(nb.neighborhood_size(1, false), 26);
    assert!(VonNeumann::new(&g).is_err());
    assert!(Hex::new(&g).is_err());
}
