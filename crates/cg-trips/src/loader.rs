//! CSV trip loader.
//!
//! # CSV format
//!
//! One row per traversed segment, rows of a trip in travel order.  Rows of
//! different trips may interleave.
//!
//! ```csv
//! trip_id,start_node,end_node,section_id
//! 0,1001,1002,9098460
//! 0,1002,1003,9098461
//! 1,1003,1002,9098461
//! ```
//!
//! A trip's node list is the chain of row endpoints with consecutive
//! duplicates collapsed; its section list keeps each `section_id` once, in
//! first-use order.  Trips are returned in ascending `trip_id` order.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use log::info;
use serde::Deserialize;

use cg_core::{NodeId, TripId};

use crate::store::TripSet;
use crate::trip::Trip;
use crate::TripResult;

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct TripRecord {
    trip_id:    u32,
    start_node: u64,
    end_node:   u64,
    section_id: u64,
}

#[derive(Default)]
struct TripRows {
    nodes:    Vec<NodeId>,
    sections: Vec<u64>,
}

impl TripRows {
    fn push_node(&mut self, node: NodeId) {
        if self.nodes.last() != Some(&node) {
            self.nodes.push(node);
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load every trip in a CSV file.
pub fn load_trips_csv(path: &Path) -> TripResult<TripSet> {
    let file = std::fs::File::open(path)?;
    load_trips_reader(file)
}

/// Like [`load_trips_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`).
pub fn load_trips_reader<R: Read>(reader: R) -> TripResult<TripSet> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut by_trip: BTreeMap<u32, TripRows> = BTreeMap::new();
    let mut rows = 0usize;

    for result in csv_reader.deserialize::<TripRecord>() {
        let row = result?;
        let trip = by_trip.entry(row.trip_id).or_default();
        trip.push_node(NodeId(row.start_node));
        trip.push_node(NodeId(row.end_node));
        trip.sections.push(row.section_id);
        rows += 1;
    }

    let set: TripSet = by_trip
        .into_iter()
        .map(|(id, rows)| Trip::new(TripId(id), rows.nodes, rows.sections))
        .collect();

    info!("loaded {} trips from {rows} segment rows", set.len());
    Ok(set)
}
