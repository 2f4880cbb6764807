use log::debug;

use crate::category::CategoryResolver;
use crate::coordinate::Coordinate;
use crate::dataset::{GridCellRow, StructureRow};
use crate::error::{Result, RouteError};
use crate::{CategoryId, FxIndexMap, NO_STRUCTURE};

/// One coordinate of the area map joined with the structure placed on it, if any.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergedCell {
    pub coordinate: Coordinate,
    pub is_construction_site: bool,
    pub structure_category: Option<CategoryId>,
    pub area: Option<i32>,
}

/// Left-joins the grid cells with the structure placements on coordinate. Grid cells decide which
/// coordinates exist; a later grid row for an already seen coordinate replaces the earlier one
/// but keeps its position. With `area_filter` set, only cells in that area are kept.
pub fn merge_cells(
    grid_cells: &[GridCellRow],
    structures: &[StructureRow],
    area_filter: Option<i32>,
) -> Vec<MergedCell> {
    let mut placed: FxIndexMap<Coordinate, &StructureRow> = FxIndexMap::default();
    for row in structures {
        placed.insert(row.coordinate(), row);
    }

    let mut cells: FxIndexMap<Coordinate, MergedCell> = FxIndexMap::default();
    for row in grid_cells {
        let coordinate = row.coordinate();
        let structure = placed.get(&coordinate);
        let cell = MergedCell {
            coordinate,
            is_construction_site: row.construction_site,
            structure_category: structure
                .map(|s| s.category)
                .filter(|&c| c != NO_STRUCTURE),
            area: structure.and_then(|s| s.area).or(row.area),
        };
        if cells.insert(coordinate, cell).is_some() {
            debug!("Duplicate grid cell at {}, keeping the last row", coordinate);
        }
    }

    let merged = cells.into_values();
    match area_filter {
        Some(area) => {
            let kept = merged
                .filter(|cell| cell.area == Some(area))
                .collect::<Vec<_>>();
            debug!("Kept {} cells in area {}", kept.len(), area);
            kept
        }
        None => merged.collect(),
    }
}

/// Coordinate of the first placement row of the given category, in table order.
pub fn locate_structure(
    structures: &[StructureRow],
    resolver: &CategoryResolver,
    category: CategoryId,
) -> Result<Coordinate> {
    structures
        .iter()
        .find(|row| row.category == category)
        .map(StructureRow::coordinate)
        .ok_or_else(|| RouteError::StructureNotFound {
            name: resolver.name(category).unwrap_or_default().to_owned(),
            category,
        })
}

/// Placement statistics for one category of the merged map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructureSummary {
    pub category: CategoryId,
    pub name: Option<String>,
    pub count: usize,
    pub area: Option<i32>,
    pub locations: Vec<Coordinate>,
}

/// Groups the structures on the merged map per category, ordered by identifier.
pub fn summarize_structures(
    cells: &[MergedCell],
    resolver: &CategoryResolver,
) -> Vec<StructureSummary> {
    let mut groups: FxIndexMap<CategoryId, StructureSummary> = FxIndexMap::default();
    for cell in cells {
        let Some(category) = cell.structure_category else {
            continue;
        };
        let summary = groups.entry(category).or_insert_with(|| StructureSummary {
            category,
            name: resolver.name(category).map(str::to_owned),
            count: 0,
            area: cell.area,
            locations: Vec::new(),
        });
        summary.count += 1;
        summary.locations.push(cell.coordinate);
    }
    groups.sort_keys();
    groups.into_values().collect()
}
