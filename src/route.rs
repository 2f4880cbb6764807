use log::{info, warn};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::category::CategoryResolver;
use crate::config::RouteConfig;
use crate::coordinate::Coordinate;
use crate::dataset::Tables;
use crate::error::{Result, RouteError};
use crate::export::{export_steps, write_steps, StepExport};
use crate::grid::{GridMap, ObstaclePolicy};
use crate::merge::{locate_structure, merge_cells, summarize_structures, MergedCell, StructureSummary};
use crate::search::find_shortest_path;

/// What to route between and how to read the map.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteRequest<'a> {
    pub home: &'a str,
    pub destination: &'a str,
    pub impassable: &'a [String],
    pub area_filter: Option<i32>,
}

impl<'a> RouteRequest<'a> {
    pub fn from_config(config: &'a RouteConfig) -> RouteRequest<'a> {
        RouteRequest {
            home: &config.route.home,
            destination: &config.route.destination,
            impassable: &config.route.impassable,
            area_filter: config.data.area_filter,
        }
    }
}

/// Everything the pipeline computed for one request. `path` is [None] when the destination
/// cannot be reached, which is reflected as [StepExport::NoPathFound] in `export`.
#[derive(Clone, Debug)]
pub struct RoutePlan {
    pub start: Coordinate,
    pub end: Coordinate,
    pub resolver: CategoryResolver,
    pub cells: Vec<MergedCell>,
    pub grid: GridMap,
    pub path: Option<Vec<Coordinate>>,
    pub export: StepExport,
}

impl RoutePlan {
    pub fn summary(&self) -> Vec<StructureSummary> {
        summarize_structures(&self.cells, &self.resolver)
    }

    /// Number of moves on the path.
    pub fn distance(&self) -> Option<usize> {
        self.path.as_ref().map(|p| p.len() - 1)
    }

    /// Persists the steps as CSV. Refuses to create a file when there is no path.
    pub fn write_steps(&self, file: &Path) -> Result<()> {
        match &self.export {
            StepExport::Steps(steps) => {
                let f = File::create(file)?;
                write_steps(steps, BufWriter::new(f))?;
                info!("Path saved to {}", file.display());
                Ok(())
            }
            StepExport::NoPathFound => Err(RouteError::EmptyExport {
                start: self.start,
                end: self.end,
            }),
        }
    }
}

/// Runs the whole pipeline: resolve the two structure names, locate them, merge the tables,
/// classify the grid and search it. Missing categories or structures abort before any search.
pub fn plan_route(tables: &Tables, request: &RouteRequest) -> Result<RoutePlan> {
    let resolver = CategoryResolver::new(&tables.categories);
    let home_id = resolver.require(request.home)?;
    let destination_id = resolver.require(request.destination)?;
    let start = locate_structure(&tables.structures, &resolver, home_id)?;
    let end = locate_structure(&tables.structures, &resolver, destination_id)?;
    info!("Start ({}): {}, destination ({}): {}", request.home, start, request.destination, end);

    let cells = merge_cells(&tables.grid_cells, &tables.structures, request.area_filter);
    let policy = ObstaclePolicy::from_names(&resolver, request.impassable);
    let mut grid = GridMap::from_cells(&cells, &policy);
    grid.insert_start(start);
    grid.update();
    info!(
        "Grid has {} cells, {} of them obstacles",
        grid.len(),
        grid.obstacle_count()
    );

    let path = find_shortest_path(&grid, start, end);
    let export = export_steps(path.as_deref().unwrap_or_default());
    if !export.is_found() {
        warn!("No path from {} to {}", start, end);
    }
    Ok(RoutePlan {
        start,
        end,
        resolver,
        cells,
        grid,
        path,
        export,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{CategoryRow, GridCellRow, StructureRow};

    fn tables() -> Tables {
        let mut grid_cells = Vec::new();
        for y in 1..=3 {
            for x in 1..=3 {
                grid_cells.push(GridCellRow::new(x, y, false));
            }
        }
        Tables {
            grid_cells,
            structures: vec![
                StructureRow::new(1, 1, 3),
                StructureRow::new(3, 3, 4),
                StructureRow::new(2, 2, 1),
            ],
            categories: vec![
                CategoryRow::new(1, " Apartment"),
                CategoryRow::new(2, " Building"),
                CategoryRow::new(3, " MyHome"),
                CategoryRow::new(4, " BandalgomCoffee"),
            ],
        }
    }

    fn request() -> RouteRequest<'static> {
        const IMPASSABLE: &[String] = &[];
        RouteRequest {
            home: "MyHome",
            destination: "BandalgomCoffee",
            impassable: IMPASSABLE,
            area_filter: None,
        }
    }

    #[test]
    fn plans_around_apartment() {
        let config = RouteConfig::default();
        let plan = plan_route(&tables(), &RouteRequest::from_config(&config)).unwrap();
        assert_eq!(plan.start, Coordinate::new(1, 1));
        assert_eq!(plan.end, Coordinate::new(3, 3));
        assert_eq!(plan.distance(), Some(4));
        assert!(!plan.path.as_ref().unwrap().contains(&Coordinate::new(2, 2)));
        assert_eq!(plan.export.steps().len(), 5);
        assert_eq!(plan.summary().len(), 3);
    }

    #[test]
    fn missing_category_aborts() {
        let request = RouteRequest {
            destination: "Library",
            ..request()
        };
        assert!(matches!(
            plan_route(&tables(), &request),
            Err(RouteError::MissingCategory { .. })
        ));
    }

    #[test]
    fn unplaced_structure_aborts() {
        let mut tables = tables();
        tables.structures.retain(|s| s.category != 4);
        assert!(matches!(
            plan_route(&tables, &request()),
            Err(RouteError::StructureNotFound { category: 4, .. })
        ));
    }

    #[test]
    fn unreachable_is_not_an_error() {
        let mut tables = tables();
        for cell in tables.grid_cells.iter_mut() {
            if (cell.x, cell.y) == (2, 3) || (cell.x, cell.y) == (3, 2) {
                cell.construction_site = true;
            }
        }
        let plan = plan_route(&tables, &request()).unwrap();
        assert_eq!(plan.path, None);
        assert_eq!(plan.export, StepExport::NoPathFound);
        assert!(matches!(
            plan.write_steps(Path::new("never_written.csv")),
            Err(RouteError::EmptyExport { .. })
        ));
    }
}
