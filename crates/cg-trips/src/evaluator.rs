//! Trip evaluation against the approximate front.
//!
//! A trip's own (distance, danger) totals are compared with the front built
//! for its start and end nodes.  The nearest front label names the weight the
//! cyclist implicitly used; the gap between the trip and that label, in
//! normalized cost, is the trip's deviation.

use std::sync::atomic::{AtomicUsize, Ordering};

use log::{debug, info};

use cg_core::DISTANCE_WEIGHTS;
use cg_spatial::{build_front_with_state, DangerChannel, Label, ParetoFront, RoadNetwork, Router, SearchState};

use crate::trip::{DeducedWeights, Trip};
use crate::TripResult;

/// Batch operations log progress every this many trips.
pub const PROGRESS_EVERY: usize = 50;

/// Histogram buckets of [`DeviationSummary`]: ten 1 %-wide buckets plus one
/// for everything else.
pub const DEVIATION_BUCKETS: usize = 11;

// ── Results ───────────────────────────────────────────────────────────────────

/// Output of [`deduce_weights`].
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    /// The trip's own totals.
    pub totals:  Label,
    /// Front between the trip's endpoints, base danger.
    pub front:   ParetoFront,
    /// Index of the front label nearest to `totals`.
    pub nearest: usize,
}

/// Mean deviation and its distribution over a batch of trips.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeviationSummary {
    pub trips:   usize,
    /// Mean percent deviation; 0 for an empty batch.
    pub mean:    f64,
    /// `[0,1) [1,2) … [8,9) [9,10]` then everything else (negative or > 10).
    pub buckets: [usize; DEVIATION_BUCKETS],
}

impl DeviationSummary {
    pub fn from_deviations(deviations: &[f64]) -> Self {
        let mut buckets = [0; DEVIATION_BUCKETS];
        for &d in deviations {
            buckets[bucket_of(d)] += 1;
        }
        let mean = if deviations.is_empty() {
            0.0
        } else {
            deviations.iter().sum::<f64>() / deviations.len() as f64
        };
        Self { trips: deviations.len(), mean, buckets }
    }

    /// Trips outside `[0, 10]`.
    pub fn overflow(&self) -> usize {
        self.buckets[DEVIATION_BUCKETS - 1]
    }
}

fn bucket_of(deviation: f64) -> usize {
    let last = DEVIATION_BUCKETS - 1;
    if (0.0..10.0).contains(&deviation) {
        deviation.floor() as usize
    } else if deviation == 10.0 {
        last - 1
    } else {
        last
    }
}

// ── Normalized cost ───────────────────────────────────────────────────────────

/// `w·distance/distance_norm + (1-w)·danger/danger_norm` for the weight at
/// `index`.
#[inline]
pub fn normalized_cost(label: &Label, index: usize, distance_norm: f64, danger_norm: f64) -> f64 {
    let w = DISTANCE_WEIGHTS[index];
    w * label.distance / distance_norm + (1.0 - w) * label.danger / danger_norm
}

/// Percent change from `before` to `after`.
#[inline]
pub(crate) fn percent_change(before: f64, after: f64) -> f64 {
    (after - before) / before * 100.0
}

// ── Progress ──────────────────────────────────────────────────────────────────

/// Thread-safe counter that logs every [`PROGRESS_EVERY`] trips.
pub(crate) struct Progress<'a> {
    label: &'a str,
    total: usize,
    done:  AtomicUsize,
}

impl<'a> Progress<'a> {
    pub(crate) fn new(label: &'a str, total: usize) -> Self {
        Self { label, total, done: AtomicUsize::new(0) }
    }

    pub(crate) fn tick(&self) {
        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        if done % PROGRESS_EVERY == 0 {
            info!(
                "{}: {done}/{} trips ({:.0}%)",
                self.label,
                self.total,
                done as f64 / self.total as f64 * 100.0
            );
        }
    }
}

// ── Operations ────────────────────────────────────────────────────────────────

/// Compare `trip` with its base-danger front and record the nearest weight.
///
/// Ties between equally near labels go to the lowest weight index.
pub fn deduce_weights<R: Router + ?Sized>(
    trip:    &mut Trip,
    router:  &R,
    network: &RoadNetwork,
) -> TripResult<Evaluation> {
    deduce_with_state(trip, router, network, &mut SearchState::new())
}

pub(crate) fn deduce_with_state<R: Router + ?Sized>(
    trip:    &mut Trip,
    router:  &R,
    network: &RoadNetwork,
    state:   &mut SearchState,
) -> TripResult<Evaluation> {
    let totals = trip.totals(network)?;
    let (start, end) = trip.endpoints()?;
    let front = build_front_with_state(router, network, start, end, DangerChannel::Base, state)?;
    let nearest = front.nearest(&totals);
    trip.deduced = Some(DeducedWeights::from_index(nearest));
    Ok(Evaluation { totals, front, nearest })
}

/// Percent gap in normalized cost between `trip` and its nearest front label.
///
/// Every failure (no route, missing edge, zero normalizer) yields 0.
pub fn deviation_from_front<R: Router + ?Sized>(
    trip:    &mut Trip,
    router:  &R,
    network: &RoadNetwork,
) -> f64 {
    deviation_with_state(trip, router, network, &mut SearchState::new())
}

fn deviation_with_state<R: Router + ?Sized>(
    trip:    &mut Trip,
    router:  &R,
    network: &RoadNetwork,
    state:   &mut SearchState,
) -> f64 {
    match try_deviation(trip, router, network, state) {
        Ok(d) if d.is_finite() => d,
        Ok(d) => {
            debug!("{}: deviation {d} is not finite, using 0", trip.id);
            0.0
        }
        Err(e) => {
            debug!("{}: deviation unavailable ({e}), using 0", trip.id);
            0.0
        }
    }
}

fn try_deviation<R: Router + ?Sized>(
    trip:    &mut Trip,
    router:  &R,
    network: &RoadNetwork,
    state:   &mut SearchState,
) -> TripResult<f64> {
    let eval = deduce_with_state(trip, router, network, state)?;
    let distance_norm = eval.front.distance_extreme().distance;
    let danger_norm = eval.front.danger_extreme().danger;

    let label_cost = normalized_cost(&eval.front.label(eval.nearest), eval.nearest, distance_norm, danger_norm);
    let trip_cost = normalized_cost(&eval.totals, eval.nearest, distance_norm, danger_norm);
    Ok(percent_change(label_cost, trip_cost))
}

/// Deviation of every trip, summarized.
pub fn summarize_deviation<R: Router + ?Sized>(
    trips:   &mut [Trip],
    router:  &R,
    network: &RoadNetwork,
) -> DeviationSummary {
    info!("computing deviation for {} trips", trips.len());
    let progress = Progress::new("deviation", trips.len());

    #[cfg(not(feature = "parallel"))]
    let deviations: Vec<f64> = {
        let mut state = SearchState::new();
        trips
            .iter_mut()
            .map(|trip| {
                let d = deviation_with_state(trip, router, network, &mut state);
                progress.tick();
                d
            })
            .collect()
    };

    // One search state per Rayon worker.
    #[cfg(feature = "parallel")]
    let deviations: Vec<f64> = {
        use rayon::prelude::*;
        trips
            .par_iter_mut()
            .map_init(SearchState::new, |state, trip| {
                let d = deviation_with_state(trip, router, network, state);
                progress.tick();
                d
            })
            .collect()
    };

    let summary = DeviationSummary::from_deviations(&deviations);
    info!(
        "mean deviation {:.2}% over {} trips; {} outside [0, 10]%",
        summary.mean,
        summary.trips,
        summary.overflow()
    );
    summary
}
