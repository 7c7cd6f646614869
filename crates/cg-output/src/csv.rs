//! CSV output backend.
//!
//! Creates four files in the configured output directory:
//! - `nodes.csv`
//! - `edges.csv`
//! - `upgrades.csv`
//! - `trips.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::row::{EdgeRow, NodeRow, TripStepRow, UpgradeRow};
use crate::writer::ReportWriter;
use crate::OutputResult;

/// Writes report tables to four CSV files.
pub struct CsvWriter {
    nodes:    Writer<File>,
    edges:    Writer<File>,
    upgrades: Writer<File>,
    trips:    Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the four CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut nodes = Writer::from_path(dir.join("nodes.csv"))?;
        nodes.write_record(["node_id", "x", "y"])?;

        let mut edges = Writer::from_path(dir.join("edges.csv"))?;
        edges.write_record(["from", "to", "section_id", "forward", "distance", "danger", "alt_danger"])?;

        let mut upgrades = Writer::from_path(dir.join("upgrades.csv"))?;
        upgrades.write_record(["section_id", "forward", "distance", "score"])?;

        let mut trips = Writer::from_path(dir.join("trips.csv"))?;
        trips.write_record(["trip_id", "step", "node_id", "x", "y"])?;

        Ok(Self {
            nodes,
            edges,
            upgrades,
            trips,
            finished: false,
        })
    }
}

impl ReportWriter for CsvWriter {
    fn write_nodes(&mut self, rows: &[NodeRow]) -> OutputResult<()> {
        for row in rows {
            self.nodes.write_record(&[row.node_id.to_string(), row.x.to_string(), row.y.to_string()])?;
        }
        Ok(())
    }

    fn write_edges(&mut self, rows: &[EdgeRow]) -> OutputResult<()> {
        for row in rows {
            self.edges.write_record(&[
                row.from.to_string(),
                row.to.to_string(),
                row.section_id.to_string(),
                row.forward.to_string(),
                row.distance.to_string(),
                row.danger.to_string(),
                // Empty cell when no override applies.
                row.alt_danger.map(|d| d.to_string()).unwrap_or_default(),
            ])?;
        }
        Ok(())
    }

    fn write_upgrades(&mut self, rows: &[UpgradeRow]) -> OutputResult<()> {
        for row in rows {
            self.upgrades.write_record(&[
                row.section_id.to_string(),
                row.forward.to_string(),
                row.distance.to_string(),
                row.score.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_trips(&mut self, rows: &[TripStepRow]) -> OutputResult<()> {
        for row in rows {
            self.trips.write_record(&[
                row.trip_id.to_string(),
                row.step.to_string(),
                row.node_id.to_string(),
                row.x.to_string(),
                row.y.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.nodes.flush()?;
        self.edges.flush()?;
        self.upgrades.flush()?;
        self.trips.flush()?;
        Ok(())
    }
}
