//! Routing trait and scalarized Dijkstra implementation.
//!
//! # Scalar cost
//!
//! The network has two objectives per edge, distance and danger.  A query
//! fixes a distance weight `w` and a [`DangerChannel`] and searches on the
//! single scalar `w·distance + (1-w)·danger`.  Both attributes are
//! non-negative, so the scalar is too and label-setting search is exact.
//!
//! # Search state
//!
//! Per-node costs and predecessors live in a [`SearchState`] owned by the
//! caller, never on the network.  [`Router::route`] allocates a fresh one per
//! call.  [`Router::route_with_state`] reuses a caller-owned one, reset before
//! each search; front building and batch trip evaluation keep one per worker.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use rustc_hash::{FxHashMap, FxHashSet};

use cg_core::{NodeId, DISTANCE_WEIGHTS};

use crate::front::Label;
use crate::network::{DangerChannel, Edge, RoadNetwork};
use crate::{SpatialError, SpatialResult};

// ── ScalarCost ────────────────────────────────────────────────────────────────

/// Linear combination of distance and danger used as the edge cost.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScalarCost {
    pub distance_weight: f64,
    pub channel:         DangerChannel,
}

impl ScalarCost {
    pub fn new(distance_weight: f64, channel: DangerChannel) -> Self {
        Self { distance_weight, channel }
    }

    /// Cost for the weight at `index` of the fixed weight set.
    pub fn from_weight_index(index: usize, channel: DangerChannel) -> Self {
        Self::new(DISTANCE_WEIGHTS[index], channel)
    }

    #[inline]
    pub fn edge_cost(&self, edge: &Edge) -> f64 {
        self.distance_weight * edge.distance + (1.0 - self.distance_weight) * edge.danger(self.channel)
    }
}

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query: the node path and its scalar cost.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Nodes in travel order, source first, sink last.
    pub nodes: Vec<NodeId>,
    /// Scalar cost the path was optimal for.  Not a raw objective total.
    pub cost:  f64,
}

impl Route {
    /// `true` if the source and sink are the same node.
    pub fn is_trivial(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Raw (distance, danger) totals along the path.
    pub fn label(&self, network: &RoadNetwork, channel: DangerChannel) -> SpatialResult<Label> {
        path_label(network, &self.nodes, channel)
    }
}

/// Sum raw edge attributes along consecutive nodes of `path`.
pub fn path_label(network: &RoadNetwork, path: &[NodeId], channel: DangerChannel) -> SpatialResult<Label> {
    let mut label = Label::default();
    for pair in path.windows(2) {
        let edge = network
            .edge(pair[0], pair[1])
            .ok_or(SpatialError::MissingEdge { from: pair[0], to: pair[1] })?;
        label.distance += edge.distance;
        label.danger += edge.danger(channel);
    }
    Ok(label)
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable scalarized routing engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so they can be shared across Rayon
/// workers during batch trip evaluation.
pub trait Router: Send + Sync {
    /// Compute the minimum-`cost` route from `from` to `to`.
    ///
    /// `from == to` yields a trivial route rather than an error.
    fn route(
        &self,
        network: &RoadNetwork,
        from:    NodeId,
        to:      NodeId,
        cost:    ScalarCost,
    ) -> SpatialResult<Route>;

    /// Like [`route`](Router::route) with caller-owned scratch.
    ///
    /// Routers without per-query scratch ignore `state`.
    fn route_with_state(
        &self,
        network: &RoadNetwork,
        from:    NodeId,
        to:      NodeId,
        cost:    ScalarCost,
        _state:  &mut SearchState,
    ) -> SpatialResult<Route> {
        self.route(network, from, to, cost)
    }
}

// ── SearchState ───────────────────────────────────────────────────────────────

/// Heap entry ordered by cost, then node id for a deterministic tie-break.
#[derive(Copy, Clone, Debug)]
struct Frontier {
    cost: f64,
    node: NodeId,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .total_cmp(&other.cost)
            .then_with(|| self.node.cmp(&other.node))
    }
}

/// Transient per-query scratch: best known cost and predecessor per reached
/// node, settled set, and the frontier heap.
///
/// Nodes absent from `cost` are at +∞.
#[derive(Debug, Default)]
pub struct SearchState {
    cost:    FxHashMap<NodeId, f64>,
    prev:    FxHashMap<NodeId, NodeId>,
    settled: FxHashSet<NodeId>,
    heap:    BinaryHeap<Reverse<Frontier>>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything from the previous query.  Keeps allocations.
    pub fn reset(&mut self) {
        self.cost.clear();
        self.prev.clear();
        self.settled.clear();
        self.heap.clear();
    }

    /// Best known cost to `node`; +∞ if unreached.
    #[inline]
    pub fn cost_of(&self, node: NodeId) -> f64 {
        self.cost.get(&node).copied().unwrap_or(f64::INFINITY)
    }

    pub fn is_settled(&self, node: NodeId) -> bool {
        self.settled.contains(&node)
    }
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Label-setting Dijkstra over the scalarized edge cost.
///
/// Ties between equal-cost frontier nodes are broken by ascending `NodeId`;
/// ties between equal-cost paths to one node keep the first path found.
#[derive(Copy, Clone, Debug, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(
        &self,
        network: &RoadNetwork,
        from:    NodeId,
        to:      NodeId,
        cost:    ScalarCost,
    ) -> SpatialResult<Route> {
        dijkstra(network, from, to, cost, &mut SearchState::new())
    }

    fn route_with_state(
        &self,
        network: &RoadNetwork,
        from:    NodeId,
        to:      NodeId,
        cost:    ScalarCost,
        state:   &mut SearchState,
    ) -> SpatialResult<Route> {
        dijkstra(network, from, to, cost, state)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

fn dijkstra(
    network: &RoadNetwork,
    from:    NodeId,
    to:      NodeId,
    cost:    ScalarCost,
    state:   &mut SearchState,
) -> SpatialResult<Route> {
    if !network.contains_node(from) {
        return Err(SpatialError::NodeNotFound(from));
    }
    if !network.contains_node(to) {
        return Err(SpatialError::NodeNotFound(to));
    }

    state.reset();

    if from == to {
        return Ok(Route { nodes: vec![from], cost: 0.0 });
    }

    state.cost.insert(from, 0.0);
    state.heap.push(Reverse(Frontier { cost: 0.0, node: from }));

    while let Some(Reverse(Frontier { cost: node_cost, node })) = state.heap.pop() {
        // The first pop of a node carries its final cost; later pops are stale.
        if !state.settled.insert(node) {
            continue;
        }

        if node == to {
            return Ok(reconstruct(state, from, to, node_cost));
        }

        let Some(current) = network.node(node) else {
            continue;
        };

        for (neighbour, edge) in current.neighbours() {
            if state.settled.contains(&neighbour) {
                continue;
            }
            let new_cost = node_cost + cost.edge_cost(edge);
            if new_cost < state.cost_of(neighbour) {
                state.cost.insert(neighbour, new_cost);
                state.prev.insert(neighbour, node);
                state.heap.push(Reverse(Frontier { cost: new_cost, node: neighbour }));
            }
        }
    }

    Err(SpatialError::NoRoute { from, to })
}

fn reconstruct(state: &SearchState, from: NodeId, to: NodeId, total: f64) -> Route {
    let mut nodes = vec![to];
    let mut cur = to;
    while cur != from {
        match state.prev.get(&cur) {
            Some(&p) => {
                nodes.push(p);
                cur = p;
            }
            None => break,
        }
    }
    nodes.reverse();
    Route { nodes, cost: total }
}
