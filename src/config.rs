//! TOML configuration. Every section and key is optional; missing values fall back to the
//! defaults of the coffee map data set (`MyHome` to `BandalgomCoffee`).
//!
//! ```toml
//! [data]
//! directory = "data"
//! area_filter = 1
//!
//! [route]
//! home = "MyHome"
//! destination = "BandalgomCoffee"
//! impassable = ["Apartment", "Building"]
//!
//! [output]
//! path_file = "home_to_cafe.csv"
//! ```
use log::{info, warn};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::dataset::TableFiles;
use crate::error::{Result, RouteError};

pub const DEFAULT_CONFIG_PATHS: [&str; 2] = ["area_pathfinding.toml", "config/area_pathfinding.toml"];

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    pub data: DataConfig,
    pub route: RouteNames,
    pub output: OutputConfig,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub directory: PathBuf,
    pub grid_file: String,
    pub structure_file: String,
    pub category_file: String,
    /// Restrict the map to one area. The start is added back if it lies outside.
    pub area_filter: Option<i32>,
}

impl Default for DataConfig {
    fn default() -> Self {
        let files = TableFiles::default();
        Self {
            directory: PathBuf::from("."),
            grid_file: files.grid_cells.to_owned(),
            structure_file: files.structures.to_owned(),
            category_file: files.categories.to_owned(),
            area_filter: None,
        }
    }
}

impl DataConfig {
    pub fn table_files(&self) -> TableFiles<'_> {
        TableFiles {
            grid_cells: &self.grid_file,
            structures: &self.structure_file,
            categories: &self.category_file,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RouteNames {
    pub home: String,
    pub destination: String,
    pub impassable: Vec<String>,
}

impl Default for RouteNames {
    fn default() -> Self {
        Self {
            home: "MyHome".to_owned(),
            destination: "BandalgomCoffee".to_owned(),
            impassable: vec!["Apartment".to_owned(), "Building".to_owned()],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path_file: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path_file: PathBuf::from("home_to_cafe.csv"),
        }
    }
}

impl RouteConfig {
    pub fn from_toml_str(contents: &str) -> Result<RouteConfig> {
        Ok(toml::from_str(contents)?)
    }

    /// Reads an explicitly requested config file; failing to read or parse it is an error.
    pub fn from_file(path: &Path) -> Result<RouteConfig> {
        let contents = fs::read_to_string(path)
            .map_err(|e| RouteError::Config(format!("{}: {}", path.display(), e)))?;
        let config = RouteConfig::from_toml_str(&contents)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Tries the default locations and falls back to the built-in defaults.
    pub fn discover() -> RouteConfig {
        for path in DEFAULT_CONFIG_PATHS {
            let path = Path::new(path);
            if !path.exists() {
                continue;
            }
            match RouteConfig::from_file(path) {
                Ok(cfg) => return cfg,
                Err(e) => warn!("Ignoring config {}: {}", path.display(), e),
            }
        }
        RouteConfig::default()
    }
}
