//! The `ReportWriter` trait implemented by all backend writers.

use crate::row::{EdgeRow, NodeRow, TripStepRow, UpgradeRow};
use crate::OutputResult;

/// Sink for the tables handed to the plotting and reporting side.
pub trait ReportWriter {
    fn write_nodes(&mut self, rows: &[NodeRow]) -> OutputResult<()>;

    fn write_edges(&mut self, rows: &[EdgeRow]) -> OutputResult<()>;

    fn write_upgrades(&mut self, rows: &[UpgradeRow]) -> OutputResult<()>;

    fn write_trips(&mut self, rows: &[TripStepRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
