//! Breadth-first search over the area grid. The generic [bfs] keeps parents in an
//! insertion-ordered map and rebuilds the path from it, like the `bfs` function of the
//! [pathfinding](https://docs.rs/pathfinding/latest/pathfinding/directed/bfs/index.html) crate.
use indexmap::map::Entry::Vacant;
use log::{debug, info};
use std::collections::VecDeque;
use std::hash::Hash;

use crate::coordinate::Coordinate;
use crate::grid::GridMap;
use crate::FxIndexMap;

fn reverse_path<N>(parents: &FxIndexMap<N, usize>, start: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
{
    let mut i = start;
    let mut path: Vec<N> = std::iter::from_fn(|| {
        parents.get_index(i).map(|(node, &parent)| {
            i = parent;
            node.clone()
        })
    })
    .collect();
    path.reverse();
    path
}

/// Generic breadth-first search. Nodes are expanded in FIFO order and successors are visited in
/// the order `successors` yields them, so the first path found to a node is also the first among
/// the shortest ones in that order. The start node counts as visited from the beginning and is
/// never passed through `successors`' filtering.
pub fn bfs<N, FN, IN, FS>(start: &N, mut successors: FN, mut success: FS) -> Option<Vec<N>>
where
    N: Eq + Hash + Clone,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = N>,
    FS: FnMut(&N) -> bool,
{
    let mut to_see = VecDeque::new();
    to_see.push_back(0);
    let mut parents: FxIndexMap<N, usize> = FxIndexMap::default();
    parents.insert(start.clone(), usize::MAX);
    while let Some(index) = to_see.pop_front() {
        let successors = {
            let (node, _) = parents.get_index(index)?;
            if success(node) {
                return Some(reverse_path(&parents, index));
            }
            successors(node)
        };
        for successor in successors {
            if let Vacant(e) = parents.entry(successor) {
                to_see.push_back(e.index());
                e.insert(index);
            }
        }
    }
    None
}

/// Shortest 4-connected path from `start` to `end` over the free cells of `grid`, or [None] when
/// `end` cannot be reached. Neighbours are tried right, down, left, up.
///
/// `start` itself is not checked: it may be an obstacle or missing from the grid and the walk
/// still leaves from it. A path from a cell to itself is that single cell.
pub fn find_shortest_path(
    grid: &GridMap,
    start: Coordinate,
    end: Coordinate,
) -> Option<Vec<Coordinate>> {
    if grid.unreachable(&start, &end) {
        info!("{} is not reachable from {}", end, start);
        return None;
    }
    debug!("{} may be reachable from {}, computing path", end, start);
    let path = bfs(&start, |node| grid.free_neighbours(node), |node| *node == end);
    match &path {
        Some(p) => info!("Found path of {} steps from {} to {}", p.len() - 1, start, end),
        None => info!("Search from {} exhausted without reaching {}", start, end),
    }
    path
}
