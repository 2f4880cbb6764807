//! Fuzzes the search by checking for many random grids that a path is found exactly when a naive
//! flood fill reaches the goal, that its length matches the flood fill distance and that every
//! move is a single 4-directional step.
use area_pathfinding::*;
use rand::prelude::*;
use std::collections::{HashMap, VecDeque};

fn random_grid(w: u32, h: u32, rng: &mut StdRng, obstacle_ratio: f64) -> GridMap {
    let mut cells = Vec::new();
    for y in 0..h {
        for x in 0..w {
            // Leave some holes so the map is not always rectangular
            if rng.gen_bool(0.05) {
                continue;
            }
            let occupancy = if rng.gen_bool(obstacle_ratio) {
                Occupancy::Obstacle
            } else {
                Occupancy::Free
            };
            cells.push((Coordinate::new(x, y), occupancy));
        }
    }
    GridMap::from_occupancy(cells)
}

/// Distance in moves from start to goal, found without any of the crate's machinery.
fn flood_fill_distance(grid: &GridMap, start: Coordinate, goal: Coordinate) -> Option<usize> {
    let mut dist = HashMap::new();
    dist.insert(start, 0);
    let mut queue = VecDeque::from([start]);
    while let Some(p) = queue.pop_front() {
        if p == goal {
            return dist.get(&p).copied();
        }
        let d = dist[&p];
        let candidates = [
            p.x.checked_add(1).map(|x| Coordinate::new(x, p.y)),
            p.y.checked_add(1).map(|y| Coordinate::new(p.x, y)),
            p.x.checked_sub(1).map(|x| Coordinate::new(x, p.y)),
            p.y.checked_sub(1).map(|y| Coordinate::new(p.x, y)),
        ];
        for n in candidates.into_iter().flatten() {
            if grid.get(&n) == Some(Occupancy::Free) && !dist.contains_key(&n) {
                dist.insert(n, d + 1);
                queue.push_back(n);
            }
        }
    }
    None
}

fn visualize_grid(grid: &GridMap, start: &Coordinate, end: &Coordinate) {
    println!("S: {start}; E: {end}");
    print!("{}", grid.render(&[*start, *end]));
}

fn random_point(rng: &mut StdRng, w: u32, h: u32) -> Coordinate {
    Coordinate::new(rng.gen_range(0..w), rng.gen_range(0..h))
}

#[test]
fn fuzz() {
    const N: u32 = 10;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..N_GRIDS {
        let grid = random_grid(N, N, &mut rng, 0.35);
        let start = random_point(&mut rng, N, N);
        let end = random_point(&mut rng, N, N);
        let expected = flood_fill_distance(&grid, start, end);
        let path = find_shortest_path(&grid, start, end);
        // Show the grid if the search disagrees with the flood fill
        if path.as_ref().map(|p| p.len() - 1) != expected {
            visualize_grid(&grid, &start, &end);
        }
        assert_eq!(path.as_ref().map(|p| p.len() - 1), expected);
        if let Some(path) = path {
            assert_eq!(path.first(), Some(&start));
            assert_eq!(path.last(), Some(&end));
            assert!(path.windows(2).all(|w| w[0].is_adjacent(&w[1])));
            assert!(path[1..].iter().all(|p| grid.is_free(p)));
        }
    }
}

#[test]
fn obstacle_free_paths_are_manhattan() {
    const N: u32 = 12;
    let mut rng = StdRng::seed_from_u64(1);
    let cells = (0..N).flat_map(|y| (0..N).map(move |x| (Coordinate::new(x, y), Occupancy::Free)));
    let grid = GridMap::from_occupancy(cells);
    for _ in 0..500 {
        let start = random_point(&mut rng, N, N);
        let end = random_point(&mut rng, N, N);
        let path = find_shortest_path(&grid, start, end).unwrap();
        assert_eq!(path.len() as u32 - 1, start.manhattan_distance(&end));
        if start == end {
            assert_eq!(path, vec![start]);
        }
    }
}

#[test]
fn reachability_matches_components() {
    const N: u32 = 8;
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..1000 {
        let grid = random_grid(N, N, &mut rng, 0.4);
        let start = random_point(&mut rng, N, N);
        let end = random_point(&mut rng, N, N);
        let reachable = flood_fill_distance(&grid, start, end).is_some();
        if !reachable {
            assert!(grid.unreachable(&start, &end));
        } else {
            assert!(grid.reachable(&start, &end));
        }
    }
}

#[test]
fn repeated_searches_agree() {
    let mut rng = StdRng::seed_from_u64(3);
    let grid = random_grid(15, 15, &mut rng, 0.25);
    for _ in 0..100 {
        let start = random_point(&mut rng, 15, 15);
        let end = random_point(&mut rng, 15, 15);
        assert_eq!(
            find_shortest_path(&grid, start, end),
            find_shortest_path(&grid.clone(), start, end)
        );
    }
}
