//! # area_pathfinding
//!
//! Finds the shortest walk between two structures on an area map. Three tables feed it: the map
//! cells with their construction-site flag, the structures placed on the map and the names of the
//! structure categories. They are joined on coordinate into [MergedCell]s, classified into a
//! [GridMap] of free and blocked cells, and searched with a
//! [breadth-first search](https://en.wikipedia.org/wiki/Breadth-first_search) using
//! 4-directional, uniform-cost moves. Connected components of the free cells are precomputed so
//! that an unreachable destination is rejected without flood-filling.
//!
//! ```
//! use area_pathfinding::{find_shortest_path, Coordinate, GridMap, Occupancy};
//!
//! // |S#.|
//! // |.#.|
//! // |..E|
//! let blocked = [(2, 1), (2, 2)];
//! let grid = GridMap::from_occupancy((1..=3).flat_map(|y| (1..=3).map(move |x| (x, y))).map(|(x, y)| {
//!     let occupancy = if blocked.contains(&(x, y)) { Occupancy::Obstacle } else { Occupancy::Free };
//!     (Coordinate::new(x, y), occupancy)
//! }));
//! let path = find_shortest_path(&grid, Coordinate::new(1, 1), Coordinate::new(3, 3)).unwrap();
//! assert_eq!(path.len(), 5);
//! ```
pub mod category;
pub mod config;
pub mod coordinate;
pub mod dataset;
pub mod error;
pub mod export;
pub mod grid;
pub mod merge;
pub mod route;
pub mod search;

use fxhash::FxBuildHasher;
use indexmap::IndexMap;

pub use crate::category::CategoryResolver;
pub use crate::coordinate::{Coordinate, Direction, NEIGHBOUR_ORDER};
pub use crate::error::{Result, RouteError};
pub use crate::export::{export_steps, StepExport, StepRecord};
pub use crate::grid::{GridMap, ObstaclePolicy, Occupancy};
pub use crate::merge::MergedCell;
pub use crate::route::{plan_route, RoutePlan, RouteRequest};
pub use crate::search::find_shortest_path;

/// Identifier of a structure category.
pub type CategoryId = u32;

/// Category identifier the structure table uses for cells without a structure.
pub const NO_STRUCTURE: CategoryId = 0;

pub(crate) type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;
