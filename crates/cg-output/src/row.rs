//! Plain data row types written by output backends, and their builders.

use cg_planner::Selection;
use cg_spatial::{DangerChannel, RoadNetwork};
use cg_trips::Trip;

/// One network node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeRow {
    pub node_id: u64,
    pub x:       f64,
    pub y:       f64,
}

/// One directed section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeRow {
    pub from:       u64,
    pub to:         u64,
    pub section_id: u64,
    pub forward:    bool,
    pub distance:   f64,
    pub danger:     f64,
    /// Danger after upgrades; `None` where no override applies.
    pub alt_danger: Option<f64>,
}

/// One accepted upgrade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpgradeRow {
    pub section_id: u64,
    pub forward:    bool,
    pub distance:   f64,
    pub score:      f64,
}

/// One node visit of a sampled trip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TripStepRow {
    pub trip_id: u32,
    pub step:    u32,
    pub node_id: u64,
    pub x:       f64,
    pub y:       f64,
}

/// Node rows in ascending id order.
pub fn node_rows(network: &RoadNetwork) -> Vec<NodeRow> {
    let mut rows: Vec<NodeRow> = network
        .nodes()
        .map(|n| NodeRow { node_id: n.id.0, x: n.pos.x, y: n.pos.y })
        .collect();
    rows.sort_unstable_by_key(|r| r.node_id);
    rows
}

/// Edge rows in `SectionId` order.
pub fn edge_rows(network: &RoadNetwork) -> Vec<EdgeRow> {
    network
        .sections()
        .into_iter()
        .filter_map(|(section, from, to)| {
            let edge = network.edge(from, to)?;
            Some(EdgeRow {
                from:       from.0,
                to:         to.0,
                section_id: section.base,
                forward:    section.forward,
                distance:   edge.distance,
                danger:     edge.danger(DangerChannel::Base),
                alt_danger: edge.alt_danger,
            })
        })
        .collect()
}

/// Upgrade rows in acceptance order.
pub fn upgrade_rows(selection: &Selection) -> Vec<UpgradeRow> {
    selection
        .chosen
        .iter()
        .map(|c| UpgradeRow {
            section_id: c.section.base,
            forward:    c.section.forward,
            distance:   c.distance,
            score:      c.score,
        })
        .collect()
}

/// Step rows for `trips`.  Nodes missing from `network` are skipped.
pub fn trip_rows<'a, I>(trips: I, network: &RoadNetwork) -> Vec<TripStepRow>
where
    I: IntoIterator<Item = &'a Trip>,
{
    let mut rows = Vec::new();
    for trip in trips {
        for (step, &id) in trip.nodes.iter().enumerate() {
            if let Some(node) = network.node(id) {
                rows.push(TripStepRow {
                    trip_id: trip.id.0,
                    step:    step as u32,
                    node_id: id.0,
                    x:       node.pos.x,
                    y:       node.pos.y,
                });
            }
        }
    }
    rows
}
