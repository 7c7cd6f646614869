//! CSV network loader.
//!
//! # CSV format
//!
//! Two files.  `nodes.csv`, one row per node:
//!
//! ```csv
//! node_id,x,y
//! 1001,525310.2,6702145.8
//! 1002,525377.9,6702160.1
//! ```
//!
//! `sections.csv`, one row per physical segment.  The facility columns hold
//! the survey layout label of each side (blank = no facility):
//!
//! ```csv
//! section_id,node_start,node_end,length,facility_right,facility_left
//! 9098460,1001,1002,69.3,piste uni,
//! ```
//!
//! Each row installs both directions: `node_start → node_end` as
//! `(section_id, true)` with the right-side danger, the reverse as
//! `(section_id, false)` with the left-side danger.

use std::io::Read;
use std::path::Path;
use std::time::Instant;

use log::info;
use serde::Deserialize;

use cg_core::{NodeId, Point};

use crate::facility::Facility;
use crate::network::RoadNetwork;
use crate::SpatialResult;

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct NodeRecord {
    node_id: u64,
    x:       f64,
    y:       f64,
}

#[derive(Deserialize)]
struct SectionRecord {
    section_id:     u64,
    node_start:     u64,
    node_end:       u64,
    length:         f64,
    facility_right: Option<String>,
    facility_left:  Option<String>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`RoadNetwork`] from a node file and a section file.
pub fn load_network_csv(nodes: &Path, sections: &Path) -> SpatialResult<RoadNetwork> {
    let nodes = std::fs::File::open(nodes)?;
    let sections = std::fs::File::open(sections)?;
    load_network_reader(nodes, sections)
}

/// Like [`load_network_csv`] but accepts any `Read` sources.
///
/// Useful for testing (pass a `std::io::Cursor`).
pub fn load_network_reader<N: Read, S: Read>(nodes: N, sections: S) -> SpatialResult<RoadNetwork> {
    let started = Instant::now();
    let mut network = RoadNetwork::new();

    // ── Nodes ─────────────────────────────────────────────────────────────
    let mut reader = csv::Reader::from_reader(nodes);
    for record in reader.deserialize() {
        let row: NodeRecord = record?;
        network.add_node(NodeId(row.node_id), Point::new(row.x, row.y));
    }

    // ── Sections ──────────────────────────────────────────────────────────
    let mut reader = csv::Reader::from_reader(sections);
    let mut rows = 0usize;
    for record in reader.deserialize() {
        let row: SectionRecord = record?;
        let danger_d = Facility::from_layout(row.facility_right.as_deref()).danger(row.length);
        let danger_g = Facility::from_layout(row.facility_left.as_deref()).danger(row.length);
        network.link(
            NodeId(row.node_start),
            NodeId(row.node_end),
            row.section_id,
            row.length,
            danger_d,
            danger_g,
            true,
        )?;
        rows += 1;
    }

    info!(
        "loaded network: {} nodes, {} section rows ({} directed) in {:.2?}",
        network.node_count(),
        rows,
        network.section_count(),
        started.elapsed()
    );
    Ok(network)
}
