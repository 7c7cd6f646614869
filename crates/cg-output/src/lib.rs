//! `cg-output` — report tables for the plotting and reporting side.
//!
//! | File           | Columns                                                      |
//! |----------------|--------------------------------------------------------------|
//! | `nodes.csv`    | `node_id,x,y`                                                |
//! | `edges.csv`    | `from,to,section_id,forward,distance,danger,alt_danger`      |
//! | `upgrades.csv` | `section_id,forward,distance,score`                          |
//! | `trips.csv`    | `trip_id,step,node_id,x,y`                                   |
//!
//! Backends implement [`ReportWriter`]; the [`export`] helpers build the
//! rows from workspace types and drive any backend.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cg_output::{export_network, CsvWriter, ReportWriter};
//!
//! let mut writer = CsvWriter::new(Path::new("./out"))?;
//! export_network(&mut writer, &network)?;
//! writer.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod export;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use export::{export_network, export_selection, export_trips};
pub use row::{EdgeRow, NodeRow, TripStepRow, UpgradeRow};
pub use writer::ReportWriter;
