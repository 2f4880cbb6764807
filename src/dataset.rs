//! Loading of the three area tables from CSV.
//!
//! The core only consumes the row types defined here; any other storage can fill them directly.
//! Rows that are missing fields or have non-numeric coordinates are logged and skipped, the rest
//! of the table is still used.
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::coordinate::Coordinate;
use crate::error::{Result, RouteError};
use crate::CategoryId;

/// One cell of the area map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridCellRow {
    pub x: u32,
    pub y: u32,
    pub construction_site: bool,
    pub area: Option<i32>,
}

/// A structure placed on the map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructureRow {
    pub x: u32,
    pub y: u32,
    pub category: CategoryId,
    pub area: Option<i32>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryRow {
    pub category: CategoryId,
    /// Raw label, possibly padded with whitespace.
    pub name: String,
}

/// The three input tables, already materialized.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tables {
    pub grid_cells: Vec<GridCellRow>,
    pub structures: Vec<StructureRow>,
    pub categories: Vec<CategoryRow>,
}

impl GridCellRow {
    pub fn new(x: u32, y: u32, construction_site: bool) -> GridCellRow {
        GridCellRow {
            x,
            y,
            construction_site,
            area: None,
        }
    }
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.x, self.y)
    }
}

impl StructureRow {
    pub fn new(x: u32, y: u32, category: CategoryId) -> StructureRow {
        StructureRow {
            x,
            y,
            category,
            area: None,
        }
    }
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.x, self.y)
    }
}

impl CategoryRow {
    pub fn new(category: CategoryId, name: &str) -> CategoryRow {
        CategoryRow {
            category,
            name: name.to_owned(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GridCellRecord {
    x: u32,
    y: u32,
    #[serde(rename = "ConstructionSite")]
    construction_site: u8,
    #[serde(default)]
    area: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct StructureRecord {
    x: u32,
    y: u32,
    category: CategoryId,
    #[serde(default)]
    area: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct CategoryRecord {
    category: CategoryId,
    #[serde(rename = "struct")]
    name: String,
}

impl TryFrom<GridCellRecord> for GridCellRow {
    type Error = String;

    fn try_from(r: GridCellRecord) -> std::result::Result<Self, Self::Error> {
        let construction_site = match r.construction_site {
            0 => false,
            1 => true,
            v => return Err(format!("ConstructionSite must be 0 or 1, got {}", v)),
        };
        Ok(GridCellRow {
            x: r.x,
            y: r.y,
            construction_site,
            area: r.area,
        })
    }
}

impl TryFrom<StructureRecord> for StructureRow {
    type Error = String;

    fn try_from(r: StructureRecord) -> std::result::Result<Self, Self::Error> {
        Ok(StructureRow {
            x: r.x,
            y: r.y,
            category: r.category,
            area: r.area,
        })
    }
}

impl TryFrom<CategoryRecord> for CategoryRow {
    type Error = String;

    fn try_from(r: CategoryRecord) -> std::result::Result<Self, Self::Error> {
        if r.name.trim().is_empty() {
            return Err("empty structure name".to_owned());
        }
        Ok(CategoryRow {
            category: r.category,
            name: r.name,
        })
    }
}

/// Deserializes every record of `reader`, skipping (and logging) the ones that do not fit `R`
/// or are rejected by the conversion into `T`.
fn read_table<R, T, Rd>(table: &'static str, reader: Rd) -> Result<Vec<T>>
where
    R: DeserializeOwned,
    T: TryFrom<R, Error = String>,
    Rd: Read,
{
    let mut csv_reader = ReaderBuilder::new()
        .trim(Trim::Headers)
        .flexible(true)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut rows = Vec::new();
    let mut skipped = 0;
    for (i, result) in csv_reader.records().enumerate() {
        // Header is line 1
        let line = i as u64 + 2;
        match result
            .map_err(|e| e.to_string())
            .and_then(|record| parse_record::<R>(&record, &headers))
            .and_then(|r| <T as TryFrom<R>>::try_from(r))
        {
            Ok(row) => rows.push(row),
            Err(reason) => {
                skipped += 1;
                let err = RouteError::MalformedRow {
                    table,
                    line,
                    reason,
                };
                warn!("Skipping row: {}", err);
            }
        }
    }
    info!("Read {} rows from {} ({} skipped)", rows.len(), table, skipped);
    Ok(rows)
}

fn parse_record<R: DeserializeOwned>(
    record: &StringRecord,
    headers: &StringRecord,
) -> std::result::Result<R, String> {
    // Only numeric columns carry meaningful surrounding whitespace; labels keep theirs for the
    // category resolver to trim.
    let trimmed: StringRecord = record
        .iter()
        .zip(headers.iter())
        .map(|(value, header)| if header == "struct" { value } else { value.trim() })
        .collect();
    trimmed
        .deserialize::<R>(Some(headers))
        .map_err(|e| e.to_string())
}

pub fn read_grid_cells<Rd: Read>(reader: Rd) -> Result<Vec<GridCellRow>> {
    read_table::<GridCellRecord, _, _>("grid cells", reader)
}

pub fn read_structures<Rd: Read>(reader: Rd) -> Result<Vec<StructureRow>> {
    read_table::<StructureRecord, _, _>("structures", reader)
}

pub fn read_categories<Rd: Read>(reader: Rd) -> Result<Vec<CategoryRow>> {
    read_table::<CategoryRecord, _, _>("categories", reader)
}

/// File names of the three tables inside a data directory.
#[derive(Clone, Debug)]
pub struct TableFiles<'a> {
    pub grid_cells: &'a str,
    pub structures: &'a str,
    pub categories: &'a str,
}

impl Default for TableFiles<'static> {
    fn default() -> Self {
        TableFiles {
            grid_cells: "area_map.csv",
            structures: "area_struct.csv",
            categories: "area_category.csv",
        }
    }
}

pub fn load_tables(dir: &Path, files: &TableFiles) -> Result<Tables> {
    let open = |name: &str| {
        let path = dir.join(name);
        info!("Loading {}", path.display());
        File::open(&path)
    };
    Ok(Tables {
        grid_cells: read_grid_cells(open(files.grid_cells)?)?,
        structures: read_structures(open(files.structures)?)?,
        categories: read_categories(open(files.categories)?)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_cells_skip_malformed_rows() {
        let data = "x,y,ConstructionSite\n1,1,0\n2,a,0\n3,1\n-1,2,0\n4,1,1\n5,1,7\n";
        let rows = read_grid_cells(data.as_bytes()).unwrap();
        assert_eq!(
            rows,
            vec![GridCellRow::new(1, 1, false), GridCellRow::new(4, 1, true)]
        );
    }

    #[test]
    fn grid_cells_accept_optional_area() {
        let data = "x,y,ConstructionSite,area\n1,1,0,2\n2,1,1,\n";
        let rows = read_grid_cells(data.as_bytes()).unwrap();
        assert_eq!(rows[0].area, Some(2));
        assert_eq!(rows[1].area, None);
        assert!(rows[1].construction_site);
    }

    #[test]
    fn category_labels_keep_padding_and_headers_are_trimmed() {
        let data = "category, struct\n1, Apartment\n2, Building\n3,\n";
        let rows = read_categories(data.as_bytes()).unwrap();
        assert_eq!(
            rows,
            vec![CategoryRow::new(1, " Apartment"), CategoryRow::new(2, " Building")]
        );
    }

    #[test]
    fn structures_with_area() {
        let data = "x,y,category,area\n2,3,4,1\n1,1,0,0\n";
        let rows = read_structures(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].coordinate(), Coordinate::new(2, 3));
        assert_eq!(rows[0].category, 4);
        assert_eq!(rows[0].area, Some(1));
    }
}
