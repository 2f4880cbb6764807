//! Error types for the routing pipeline.
//!
//! An unreachable destination is not an error: it is reported as
//! [StepExport::NoPathFound](crate::export::StepExport::NoPathFound).

use thiserror::Error;

use crate::coordinate::Coordinate;
use crate::CategoryId;

#[derive(Error, Debug)]
pub enum RouteError {
    #[error("no category is named {name:?}")]
    MissingCategory { name: String },

    #[error("no structure of category {category} ({name:?}) is placed on the map")]
    StructureNotFound { name: String, category: CategoryId },

    #[error("malformed row {line} in {table}: {reason}")]
    MalformedRow {
        table: &'static str,
        line: u64,
        reason: String,
    },

    #[error("no path from {start} to {end}, nothing to export")]
    EmptyExport { start: Coordinate, end: Coordinate },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for RouteError {
    fn from(e: toml::de::Error) -> Self {
        RouteError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RouteError>;
