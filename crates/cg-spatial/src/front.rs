//! Approximate Pareto front built by repeated scalarized search.
//!
//! One shortest path is computed per weight of [`DISTANCE_WEIGHTS`] and its
//! raw (distance, danger) totals recorded as a [`Label`].  Weighted sums can
//! only reach supported points of the true front: Pareto-optimal paths in a
//! non-convex region of the front are never found, whatever the weight set.
//! The seven points are a deliberate approximation, not an enumeration.

use log::warn;

use cg_core::{NodeId, DANGER_EXTREME, DISTANCE_EXTREME, DISTANCE_WEIGHTS, WEIGHT_COUNT};

use crate::network::{DangerChannel, RoadNetwork};
use crate::router::{Router, ScalarCost, SearchState};
use crate::SpatialResult;

/// Tolerance used when comparing accumulated float totals.
pub const LABEL_EPSILON: f64 = 1e-9;

// ── Label ─────────────────────────────────────────────────────────────────────

/// Raw objective totals of one path.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Label {
    pub distance: f64,
    pub danger:   f64,
}

impl Label {
    pub fn new(distance: f64, danger: f64) -> Self {
        Self { distance, danger }
    }

    /// Euclidean distance in (distance, danger) space.
    pub fn gap(&self, other: &Label) -> f64 {
        let dd = self.distance - other.distance;
        let dg = self.danger - other.danger;
        (dd * dd + dg * dg).sqrt()
    }

    /// Equal up to [`LABEL_EPSILON`] on both objectives.
    pub fn approx_eq(&self, other: &Label) -> bool {
        (self.distance - other.distance).abs() <= LABEL_EPSILON
            && (self.danger - other.danger).abs() <= LABEL_EPSILON
    }
}

// ── ParetoFront ───────────────────────────────────────────────────────────────

/// One [`Label`] per weight of the fixed weight set, in weight order.
#[derive(Clone, Debug, PartialEq)]
pub struct ParetoFront {
    labels: [Label; WEIGHT_COUNT],
}

/// The widest spacing between consecutive front labels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrontGap {
    /// Weight index of the lower label of the pair.
    pub lower: usize,
    pub gap:   f64,
    /// `gap` divided by the mean spacing between the two extreme labels.
    pub ratio: f64,
}

impl ParetoFront {
    pub fn from_labels(labels: [Label; WEIGHT_COUNT]) -> Self {
        Self { labels }
    }

    #[inline]
    pub fn label(&self, index: usize) -> Label {
        self.labels[index]
    }

    /// `(distance weight, label)` pairs in ascending weight order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, Label)> + '_ {
        DISTANCE_WEIGHTS.iter().copied().zip(self.labels.iter().copied())
    }

    /// Label found with the largest distance weight (shortest path).
    pub fn distance_extreme(&self) -> Label {
        self.labels[DISTANCE_EXTREME]
    }

    /// Label found with the smallest distance weight (safest path).
    pub fn danger_extreme(&self) -> Label {
        self.labels[DANGER_EXTREME]
    }

    /// Index of the label closest to `point`; ties go to the lowest index.
    pub fn nearest(&self, point: &Label) -> usize {
        let mut best = 0;
        let mut best_gap = f64::INFINITY;
        for (i, label) in self.labels.iter().enumerate() {
            let gap = label.gap(point);
            if gap < best_gap {
                best = i;
                best_gap = gap;
            }
        }
        best
    }

    /// Distance non-increasing and danger non-decreasing along the weights.
    ///
    /// Always holds for exact search on a connected pair; a `false` points at
    /// bad input data.
    pub fn is_monotone(&self) -> bool {
        self.labels.windows(2).all(|w| {
            w[0].distance + LABEL_EPSILON >= w[1].distance
                && w[0].danger <= w[1].danger + LABEL_EPSILON
        })
    }

    /// Widest gap between consecutive labels, relative to the mean spacing.
    ///
    /// `None` when both extremes coincide (every weight found the same path).
    pub fn widest_gap(&self) -> Option<FrontGap> {
        let span = self.distance_extreme().gap(&self.danger_extreme());
        let mean = span / (WEIGHT_COUNT - 1) as f64;
        if !(mean > LABEL_EPSILON) {
            return None;
        }

        let (lower, gap) = self
            .labels
            .windows(2)
            .map(|w| w[0].gap(&w[1]))
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |best, (i, g)| if g > best.1 { (i, g) } else { best });

        Some(FrontGap { lower, gap, ratio: gap / mean })
    }
}

// ── Front construction ────────────────────────────────────────────────────────

/// Build the approximate front between `source` and `sink`.
///
/// Runs one search per weight; each search starts from a reset state.
/// Fails with the first routing error (unknown node, no route).
pub fn build_front<R: Router + ?Sized>(
    router:  &R,
    network: &RoadNetwork,
    source:  NodeId,
    sink:    NodeId,
    channel: DangerChannel,
) -> SpatialResult<ParetoFront> {
    build_front_with_state(router, network, source, sink, channel, &mut SearchState::new())
}

/// Like [`build_front`], with one caller-owned [`SearchState`] shared by the
/// seven searches.
pub fn build_front_with_state<R: Router + ?Sized>(
    router:  &R,
    network: &RoadNetwork,
    source:  NodeId,
    sink:    NodeId,
    channel: DangerChannel,
    state:   &mut SearchState,
) -> SpatialResult<ParetoFront> {
    let mut labels = [Label::default(); WEIGHT_COUNT];
    for (index, slot) in labels.iter_mut().enumerate() {
        let cost = ScalarCost::from_weight_index(index, channel);
        let route = router.route_with_state(network, source, sink, cost, state)?;
        *slot = route.label(network, channel)?;
    }

    let front = ParetoFront::from_labels(labels);
    if !front.is_monotone() {
        warn!("front {source} → {sink} ({channel:?}) is not monotone: {:?}", front.labels);
    }
    Ok(front)
}

/// Report a front whose widest gap exceeds `ratio_warning` times the mean
/// spacing: an extra weight between the two labels would refine it.
pub fn check_spacing(front: &ParetoFront, ratio_warning: f64) -> Option<FrontGap> {
    let gap = front.widest_gap()?;
    if gap.ratio < ratio_warning {
        return None;
    }
    warn!(
        "front gap between weights {} and {} is {:.1}× the mean spacing",
        DISTANCE_WEIGHTS[gap.lower],
        DISTANCE_WEIGHTS[gap.lower + 1],
        gap.ratio
    );
    Some(gap)
}
