use csv::{ReaderBuilder, Trim, WriterBuilder};
use log::info;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::coordinate::Coordinate;
use crate::error::Result;

/// One step of an exported path. `step` starts at 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    pub step: usize,
    pub x: u32,
    pub y: u32,
}

impl StepRecord {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.x, self.y)
    }
}

/// Result of exporting a path: either the numbered steps, or the signal that there was no path
/// to export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepExport {
    Steps(Vec<StepRecord>),
    NoPathFound,
}

impl StepExport {
    pub fn steps(&self) -> &[StepRecord] {
        match self {
            StepExport::Steps(steps) => steps,
            StepExport::NoPathFound => &[],
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, StepExport::Steps(_))
    }
}

pub fn export_steps(path: &[Coordinate]) -> StepExport {
    if path.is_empty() {
        return StepExport::NoPathFound;
    }
    StepExport::Steps(
        path.iter()
            .enumerate()
            .map(|(i, c)| StepRecord {
                step: i + 1,
                x: c.x,
                y: c.y,
            })
            .collect(),
    )
}

/// Writes the records as `step,x,y` CSV with a header line.
pub fn write_steps<W: Write>(steps: &[StepRecord], writer: W) -> Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_writer(writer);
    for step in steps {
        w.serialize(step)?;
    }
    w.flush()?;
    info!("Wrote {} steps", steps.len());
    Ok(())
}

pub fn read_steps<R: Read>(reader: R) -> Result<Vec<StepRecord>> {
    let mut r = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let steps = r
        .deserialize::<StepRecord>()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(steps)
}
