//! Road network representation.
//!
//! # Data layout
//!
//! Nodes are keyed by their upstream [`NodeId`] in a hash map.  Each node
//! owns its outgoing adjacency as an ordered map `neighbour → Edge`, so
//! iteration over a node's outgoing edges is deterministic; the router's
//! tie-breaking relies on that.
//!
//! Every physical segment is stored as two directed [`Edge`]s, one per
//! [`SectionId`] direction.  The section index maps each `SectionId` back to
//! its ordered `(start, end)` node pair.
//!
//! # Danger channels
//!
//! An edge carries its surveyed (base) danger plus an optional alternate
//! danger written by [`RoadNetwork::apply_overrides`].  Readers select the
//! value with a [`DangerChannel`]; the base value is never overwritten, so a
//! single network answers both "before" and "after" queries.

use std::collections::BTreeMap;

use log::{debug, warn};
use rustc_hash::FxHashMap;

use cg_core::{NodeId, Point, SectionId};

use crate::{SpatialError, SpatialResult};

// ── Edge ──────────────────────────────────────────────────────────────────────

/// Which danger value a reader wants from an edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DangerChannel {
    /// The surveyed danger of the current layout.
    Base,
    /// The danger after proposed upgrades; falls back to `Base` on edges no
    /// upgrade touched.
    Alternate,
}

/// One directed traversal of a road segment.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Edge {
    pub section:    SectionId,
    /// Length in metres.  Non-negative.
    pub distance:   f64,
    /// Surveyed danger.  Non-negative.
    pub danger:     f64,
    /// Danger after a proposed upgrade, if any.
    pub alt_danger: Option<f64>,
}

impl Edge {
    /// Danger of this edge as seen through `channel`.
    #[inline]
    pub fn danger(&self, channel: DangerChannel) -> f64 {
        match channel {
            DangerChannel::Base => self.danger,
            DangerChannel::Alternate => self.alt_danger.unwrap_or(self.danger),
        }
    }
}

// ── Node ──────────────────────────────────────────────────────────────────────

/// A road node with its outgoing adjacency.
#[derive(Clone, Debug)]
pub struct Node {
    pub id:   NodeId,
    pub pos:  Point,
    adjacent: BTreeMap<NodeId, Edge>,
}

impl Node {
    fn new(id: NodeId, pos: Point) -> Self {
        Self { id, pos, adjacent: BTreeMap::new() }
    }

    /// Outgoing edges in ascending neighbour order.
    #[inline]
    pub fn neighbours(&self) -> impl Iterator<Item = (NodeId, &Edge)> + '_ {
        self.adjacent.iter().map(|(&n, e)| (n, e))
    }

    /// The edge from this node to `neighbour`, if one exists.
    #[inline]
    pub fn edge_to(&self, neighbour: NodeId) -> Option<&Edge> {
        self.adjacent.get(&neighbour)
    }

    pub fn out_degree(&self) -> usize {
        self.adjacent.len()
    }
}

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Directed, weighted road graph plus the section index.
///
/// The network is populated once by a loader, then read by every query.
/// The only mutation after loading is [`apply_overrides`](Self::apply_overrides),
/// which takes `&mut self` and so can never overlap a running query.
#[derive(Clone, Debug, Default)]
pub struct RoadNetwork {
    nodes:    FxHashMap<NodeId, Node>,
    sections: FxHashMap<SectionId, (NodeId, NodeId)>,
}

impl RoadNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of directed sections (twice the number of physical segments).
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ── Nodes ─────────────────────────────────────────────────────────────

    /// Insert a node.  An existing node with the same id is replaced,
    /// adjacency included; check [`contains_node`](Self::contains_node) first
    /// when that matters.
    pub fn add_node(&mut self, id: NodeId, pos: Point) {
        self.nodes.insert(id, Node::new(id, pos));
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Look up a node.  `None` when the id was never added.
    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// All nodes, in arbitrary order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values()
    }

    // ── Sections ──────────────────────────────────────────────────────────

    /// Link two existing nodes with both directions of segment `base_id`.
    ///
    /// `start → end` gets `(base_id, forward)` and `danger_d`;
    /// `end → start` gets `(base_id, !forward)` and `danger_g`.  Both carry
    /// the same `length`.
    #[allow(clippy::too_many_arguments)]
    pub fn link(
        &mut self,
        start:    NodeId,
        end:      NodeId,
        base_id:  u64,
        length:   f64,
        danger_d: f64,
        danger_g: f64,
        forward:  bool,
    ) -> SpatialResult<()> {
        if !self.nodes.contains_key(&start) {
            return Err(SpatialError::NodeNotFound(start));
        }
        if !self.nodes.contains_key(&end) {
            return Err(SpatialError::NodeNotFound(end));
        }

        let there = SectionId::new(base_id, forward);
        let back  = there.reversed();

        self.install(start, end, Edge { section: there, distance: length, danger: danger_d, alt_danger: None });
        self.install(end, start, Edge { section: back, distance: length, danger: danger_g, alt_danger: None });
        Ok(())
    }

    fn install(&mut self, from: NodeId, to: NodeId, edge: Edge) {
        self.sections.insert(edge.section, (from, to));
        if let Some(node) = self.nodes.get_mut(&from) {
            node.adjacent.insert(to, edge);
        }
    }

    /// `(start, end)` node pair of `section`.
    #[inline]
    pub fn section_nodes(&self, section: SectionId) -> Option<(NodeId, NodeId)> {
        self.sections.get(&section).copied()
    }

    pub fn section_start(&self, section: SectionId) -> Option<&Node> {
        self.section_nodes(section).and_then(|(s, _)| self.node(s))
    }

    pub fn section_end(&self, section: SectionId) -> Option<&Node> {
        self.section_nodes(section).and_then(|(_, e)| self.node(e))
    }

    /// The edge record stored for `section`.
    pub fn section_edge(&self, section: SectionId) -> Option<&Edge> {
        let (start, end) = self.section_nodes(section)?;
        self.edge(start, end)
    }

    pub fn distance_by_section(&self, section: SectionId) -> Option<f64> {
        self.section_edge(section).map(|e| e.distance)
    }

    pub fn danger_by_section(&self, section: SectionId, channel: DangerChannel) -> Option<f64> {
        self.section_edge(section).map(|e| e.danger(channel))
    }

    /// Straight-line length between the two endpoints of `section`.
    pub fn geometric_length(&self, section: SectionId) -> Option<f64> {
        let start = self.section_start(section)?;
        let end   = self.section_end(section)?;
        Some(start.pos.distance(end.pos))
    }

    /// The directed edge `from → to`, if the two nodes are adjacent.
    #[inline]
    pub fn edge(&self, from: NodeId, to: NodeId) -> Option<&Edge> {
        self.nodes.get(&from).and_then(|n| n.edge_to(to))
    }

    /// Section travelled when moving `from → to`.
    pub fn section_between(&self, from: NodeId, to: NodeId) -> Option<SectionId> {
        self.edge(from, to).map(|e| e.section)
    }

    /// Every directed section with its endpoints, sorted by `SectionId`.
    pub fn sections(&self) -> Vec<(SectionId, NodeId, NodeId)> {
        let mut all: Vec<_> = self
            .sections
            .iter()
            .map(|(&id, &(s, e))| (id, s, e))
            .collect();
        all.sort_unstable_by_key(|&(id, _, _)| id);
        all
    }

    // ── Danger overrides ──────────────────────────────────────────────────

    /// Write the alternate danger of every overridden segment.
    ///
    /// For each `(base_id, safety_factor)`, both directions of the segment get
    /// `alt_danger = distance / safety_factor`.  Distances and base dangers
    /// are unchanged.  Unknown segments and non-positive factors are skipped
    /// with a warning.  Returns the number of segments updated.
    pub fn apply_overrides<I>(&mut self, overrides: I) -> usize
    where
        I: IntoIterator<Item = (u64, f64)>,
    {
        let mut applied = 0;
        for (base_id, factor) in overrides {
            if !(factor > 0.0) {
                warn!("ignoring override of segment {base_id}: safety factor {factor} is not positive");
                continue;
            }
            let forward  = self.set_alt_danger(SectionId::new(base_id, true), factor);
            let backward = self.set_alt_danger(SectionId::new(base_id, false), factor);
            if forward && backward {
                applied += 1;
            } else {
                warn!("ignoring override of segment {base_id}: not in network");
            }
        }
        debug!("applied {applied} danger overrides");
        applied
    }

    fn set_alt_danger(&mut self, section: SectionId, factor: f64) -> bool {
        let Some((start, end)) = self.section_nodes(section) else {
            return false;
        };
        match self.nodes.get_mut(&start).and_then(|n| n.adjacent.get_mut(&end)) {
            Some(edge) => {
                edge.alt_danger = Some(edge.distance / factor);
                true
            }
            None => false,
        }
    }

    /// Drop every alternate danger, restoring the surveyed network.
    pub fn clear_overrides(&mut self) {
        for node in self.nodes.values_mut() {
            for edge in node.adjacent.values_mut() {
                edge.alt_danger = None;
            }
        }
    }
}
