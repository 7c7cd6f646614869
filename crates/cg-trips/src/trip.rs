//! Recorded user trips.

use rustc_hash::FxHashSet;

use cg_core::{weights::danger_weight, NodeId, TripId, DISTANCE_WEIGHTS};
use cg_spatial::{DangerChannel, Label, RoadNetwork};

use crate::{TripError, TripResult};

// ── DeducedWeights ────────────────────────────────────────────────────────────

/// The scalarization weight whose front label lies nearest to a trip.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeducedWeights {
    /// Index into [`DISTANCE_WEIGHTS`].
    pub index:           usize,
    pub distance_weight: f64,
    pub danger_weight:   f64,
}

impl DeducedWeights {
    pub fn from_index(index: usize) -> Self {
        Self {
            index,
            distance_weight: DISTANCE_WEIGHTS[index],
            danger_weight:   danger_weight(index),
        }
    }
}

// ── Trip ──────────────────────────────────────────────────────────────────────

/// One recorded trip: the nodes a cyclist passed through, in order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trip {
    pub id:       TripId,
    /// Nodes in travel order.  No two consecutive entries are equal.
    pub nodes:    Vec<NodeId>,
    /// Base ids of the segments used, first use order, no duplicates.
    pub sections: Vec<u64>,
    /// Set by the evaluator; `None` until the trip is compared to a front.
    pub deduced:  Option<DeducedWeights>,
}

impl Trip {
    /// Build a trip, collapsing repeated consecutive nodes and duplicate
    /// section ids.
    pub fn new(id: TripId, nodes: Vec<NodeId>, sections: Vec<u64>) -> Self {
        let mut path = nodes;
        path.dedup();

        let mut seen = FxHashSet::default();
        let sections = sections.into_iter().filter(|s| seen.insert(*s)).collect();

        Self { id, nodes: path, sections, deduced: None }
    }

    pub fn start(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn end(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    /// `(start, end)`, or `EmptyTrip`.
    pub fn endpoints(&self) -> TripResult<(NodeId, NodeId)> {
        match (self.start(), self.end()) {
            (Some(s), Some(e)) => Ok((s, e)),
            _ => Err(TripError::EmptyTrip(self.id)),
        }
    }

    /// Number of node-to-node steps.
    pub fn steps(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    pub fn is_loop(&self) -> bool {
        self.nodes.len() < 2 || self.start() == self.end()
    }

    /// Raw (distance, danger) totals along the recorded nodes, base danger.
    pub fn totals(&self, network: &RoadNetwork) -> TripResult<Label> {
        let mut label = Label::default();
        for pair in self.nodes.windows(2) {
            let edge = network.edge(pair[0], pair[1]).ok_or(TripError::MissingEdge {
                trip: self.id,
                from: pair[0],
                to:   pair[1],
            })?;
            label.distance += edge.distance;
            label.danger += edge.danger(DangerChannel::Base);
        }
        Ok(label)
    }

    /// 1-based index of the first step with no edge in `network`, if any.
    pub fn first_gap(&self, network: &RoadNetwork) -> Option<usize> {
        self.nodes
            .windows(2)
            .position(|pair| network.edge(pair[0], pair[1]).is_none())
            .map(|i| i + 1)
    }

    /// `true` if any node of the trip is in `nodes`.
    pub fn passes_any(&self, nodes: &FxHashSet<NodeId>) -> bool {
        self.nodes.iter().any(|n| nodes.contains(n))
    }
}
