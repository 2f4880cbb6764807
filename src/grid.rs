use core::fmt;
use log::{info, warn};
use petgraph::unionfind::UnionFind;

use crate::category::CategoryResolver;
use crate::coordinate::{Coordinate, Direction};
use crate::merge::MergedCell;
use crate::{CategoryId, FxIndexMap};

/// Whether the search may walk over a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Occupancy {
    Free,
    Obstacle,
}

/// Structure categories that block movement, on top of construction sites.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObstaclePolicy {
    impassable: Vec<CategoryId>,
}

impl ObstaclePolicy {
    /// Resolves the impassable structure names. Every category carrying one of the names is
    /// impassable, also when several identifiers share a name. Names without a category cannot
    /// occur on the map and are skipped.
    pub fn from_names<S: AsRef<str>>(resolver: &CategoryResolver, names: &[S]) -> ObstaclePolicy {
        let names: Vec<&str> = names.iter().map(|name| name.as_ref().trim()).collect();
        for name in names.iter().filter(|name| resolver.id(name).is_none()) {
            warn!("Impassable structure {:?} has no category, ignoring it", name);
        }
        let impassable = resolver
            .iter()
            .filter(|(_, name)| names.contains(name))
            .map(|(id, _)| id)
            .collect();
        ObstaclePolicy { impassable }
    }

    pub fn from_ids(impassable: Vec<CategoryId>) -> ObstaclePolicy {
        ObstaclePolicy { impassable }
    }

    pub fn classify(&self, cell: &MergedCell) -> Occupancy {
        let blocked_structure = cell
            .structure_category
            .is_some_and(|c| self.impassable.contains(&c));
        if cell.is_construction_site || blocked_structure {
            Occupancy::Obstacle
        } else {
            Occupancy::Free
        }
    }
}

/// [GridMap] holds the occupancy of every merged coordinate in insertion order. In addition it
/// maintains the connected components of free cells in a [UnionFind] keyed by the cell index, so
/// that a search towards an unreachable goal can be rejected without flood-filling.
#[derive(Clone, Debug)]
pub struct GridMap {
    cells: FxIndexMap<Coordinate, Occupancy>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl Default for GridMap {
    fn default() -> GridMap {
        GridMap {
            cells: FxIndexMap::default(),
            components: UnionFind::new(0),
            components_dirty: false,
        }
    }
}

impl GridMap {
    /// Classifies every merged cell. Should a coordinate occur twice, the later cell decides.
    pub fn from_cells(cells: &[MergedCell], policy: &ObstaclePolicy) -> GridMap {
        let mut map = FxIndexMap::default();
        for cell in cells {
            map.insert(cell.coordinate, policy.classify(cell));
        }
        GridMap::from_occupancy(map)
    }

    /// Builds a grid straight from occupancy values, mostly useful for tests.
    pub fn from_occupancy<I>(cells: I) -> GridMap
    where
        I: IntoIterator<Item = (Coordinate, Occupancy)>,
    {
        let mut grid = GridMap {
            cells: cells.into_iter().collect(),
            components: UnionFind::new(0),
            components_dirty: false,
        };
        grid.generate_components();
        grid
    }

    /// Adds `start` as a free cell if the map does not know it yet. Existing cells are never
    /// changed. Returns whether the cell was inserted, in which case the components are flagged
    /// dirty until the next [update](Self::update).
    pub fn insert_start(&mut self, start: Coordinate) -> bool {
        if self.cells.contains_key(&start) {
            return false;
        }
        info!("Start {} is not on the map, adding it as a free cell", start);
        self.cells.insert(start, Occupancy::Free);
        self.components_dirty = true;
        true
    }

    pub fn get(&self, coordinate: &Coordinate) -> Option<Occupancy> {
        self.cells.get(coordinate).copied()
    }

    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        self.cells.contains_key(coordinate)
    }

    pub fn is_free(&self, coordinate: &Coordinate) -> bool {
        self.get(coordinate) == Some(Occupancy::Free)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn obstacle_count(&self) -> usize {
        self.cells
            .values()
            .filter(|&&o| o == Occupancy::Obstacle)
            .count()
    }

    pub fn free_count(&self) -> usize {
        self.len() - self.obstacle_count()
    }

    /// Neighbours of `coordinate` the search may step onto, in the fixed neighbour order.
    pub fn free_neighbours(&self, coordinate: &Coordinate) -> impl Iterator<Item = Coordinate> + '_ {
        coordinate
            .neumann_neighbourhood()
            .into_iter()
            .filter(move |n| self.is_free(n))
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up free neighbours to the same components.
    pub fn generate_components(&mut self) {
        let mut components = UnionFind::new(self.cells.len());
        for (ix, (coordinate, occupancy)) in self.cells.iter().enumerate() {
            if *occupancy == Occupancy::Obstacle {
                continue;
            }
            // Linking towards +x and +y is enough to cover every 4-connected pair
            for next in [Direction::Right, Direction::Down]
                .into_iter()
                .filter_map(|dir| coordinate.step(dir))
            {
                if let Some((n_ix, _, Occupancy::Free)) = self.cells.get_full(&next) {
                    components.union(ix, n_ix);
                }
            }
        }
        self.components = components;
        self.components_dirty = false;
    }

    /// Component indices through which a walk leaving `start` can continue. A start that is not
    /// free (or not on the map) is still walkable, so its free neighbours stand in for it.
    fn start_components(&self, start: &Coordinate) -> Vec<usize> {
        match self.cells.get_full(start) {
            Some((ix, _, Occupancy::Free)) => vec![self.components.find(ix)],
            _ => self
                .free_neighbours(start)
                .filter_map(|n| self.cells.get_index_of(&n))
                .map(|ix| self.components.find(ix))
                .collect(),
        }
    }

    /// Checks whether `goal` can possibly be reached from `start`. While the components are dirty
    /// this errs on the side of reachable.
    pub fn reachable(&self, start: &Coordinate, goal: &Coordinate) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if `goal` is certainly not reachable from `start`.
    pub fn unreachable(&self, start: &Coordinate, goal: &Coordinate) -> bool {
        if start == goal {
            return false;
        }
        let goal_ix = match self.cells.get_full(goal) {
            Some((ix, _, Occupancy::Free)) => ix,
            _ => return true,
        };
        if self.components_dirty {
            return false;
        }
        let goal_component = self.components.find(goal_ix);
        !self
            .start_components(start)
            .into_iter()
            .any(|c| c == goal_component)
    }

    /// Smallest rectangle containing every cell, as (min, max) corners.
    pub fn bounds(&self) -> Option<(Coordinate, Coordinate)> {
        let mut keys = self.cells.keys();
        let first = *keys.next()?;
        Some(keys.fold((first, first), |(lo, hi), c| {
            (
                Coordinate::new(lo.x.min(c.x), lo.y.min(c.y)),
                Coordinate::new(hi.x.max(c.x), hi.y.max(c.y)),
            )
        }))
    }

    /// Text rendering with the given path overlaid. Cells off the map are blank.
    pub fn render(&self, path: &[Coordinate]) -> String {
        let Some((lo, hi)) = self.bounds() else {
            return String::new();
        };
        let mut out = String::new();
        for y in lo.y..=hi.y {
            for x in lo.x..=hi.x {
                let c = Coordinate::new(x, y);
                let ch = if path.first() == Some(&c) {
                    'S'
                } else if path.last() == Some(&c) {
                    'E'
                } else if path.contains(&c) {
                    '*'
                } else {
                    match self.get(&c) {
                        Some(Occupancy::Free) => '.',
                        Some(Occupancy::Obstacle) => '#',
                        None => ' ',
                    }
                };
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }
}

impl PartialEq for GridMap {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}

impl fmt::Display for GridMap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "Grid: {} cells, {} obstacles",
            self.len(),
            self.obstacle_count()
        )?;
        write!(f, "{}", self.render(&[]))
    }
}

/// Parses a map drawn with `.` (free) and `#` (obstacle), top-left cell at (1, 1). Spaces leave
/// the cell off the map.
#[cfg(test)]
pub(crate) fn grid_from_str(rows: &[&str]) -> GridMap {
    let mut cells = Vec::new();
    for (j, row) in rows.iter().enumerate() {
        for (i, ch) in row.chars().enumerate() {
            let c = Coordinate::new(i as u32 + 1, j as u32 + 1);
            match ch {
                '.' => cells.push((c, Occupancy::Free)),
                '#' => cells.push((c, Occupancy::Obstacle)),
                _ => {}
            }
        }
    }
    GridMap::from_occupancy(cells)
}
