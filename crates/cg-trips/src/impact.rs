//! Before/after impact of danger overrides on recorded trips.
//!
//! For each trip, the base-danger front (which also deduces the trip's
//! weight) is compared with the alternate-danger front for the same endpoints.
//! Only the deduced weight and its immediate neighbours are inspected: those
//! are the tradeoffs plausible for that cyclist.

use std::borrow::BorrowMut;

use log::{debug, info};

use cg_core::{weights::neighbourhood, DANGER_EXTREME, DISTANCE_EXTREME};
use cg_spatial::{build_front_with_state, DangerChannel, ParetoFront, RoadNetwork, Router, SearchState};

use crate::evaluator::{deduce_with_state, normalized_cost, percent_change, Progress};
use crate::trip::Trip;
use crate::TripResult;

/// Aggregate effect of the current overrides.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImpactReport {
    /// Trips examined.
    pub evaluated:         usize,
    /// Trips for which at least one neighbouring label changed.
    pub impacted:          usize,
    /// `impacted / evaluated`; 0 for an empty batch.
    pub impacted_fraction: f64,
    /// Mean of the per-trip improvement over impacted trips only; 0 when none.
    /// Negative means cheaper routes.
    pub mean_improvement:  f64,
}

impl ImpactReport {
    /// Aggregate per-trip outcomes: `Some(change)` for impacted trips.
    pub fn from_outcomes(outcomes: &[Option<f64>]) -> Self {
        let evaluated = outcomes.len();
        let changes: Vec<f64> = outcomes.iter().flatten().copied().collect();
        let impacted = changes.len();

        Self {
            evaluated,
            impacted,
            impacted_fraction: if evaluated == 0 { 0.0 } else { impacted as f64 / evaluated as f64 },
            mean_improvement:  if impacted == 0 { 0.0 } else { changes.iter().sum::<f64>() / impacted as f64 },
        }
    }
}

/// Percent change of `trip`'s cost under the alternate danger channel, or
/// `None` if no label near its deduced weight moved.
///
/// The reported change is the most favourable (minimum) one over the
/// neighbouring weights.  Non-finite changes count as 0.
pub fn trip_impact<R: Router + ?Sized>(
    trip:    &mut Trip,
    router:  &R,
    network: &RoadNetwork,
) -> TripResult<Option<f64>> {
    impact_with_state(trip, router, network, &mut SearchState::new())
}

fn impact_with_state<R: Router + ?Sized>(
    trip:    &mut Trip,
    router:  &R,
    network: &RoadNetwork,
    state:   &mut SearchState,
) -> TripResult<Option<f64>> {
    let eval = deduce_with_state(trip, router, network, state)?;
    let (start, end) = trip.endpoints()?;
    let after = build_front_with_state(router, network, start, end, DangerChannel::Alternate, state)?;
    Ok(compare_fronts(&eval.front, &after, eval.nearest))
}

/// Minimum percent change over the labels around `deduced` that differ
/// between `before` and `after`.
pub fn compare_fronts(before: &ParetoFront, after: &ParetoFront, deduced: usize) -> Option<f64> {
    let distance_norm = before
        .label(DISTANCE_EXTREME)
        .distance
        .max(after.label(DISTANCE_EXTREME).distance);
    let danger_norm = before
        .label(DANGER_EXTREME)
        .danger
        .max(after.label(DANGER_EXTREME).danger);

    neighbourhood(deduced)
        .filter(|&i| !before.label(i).approx_eq(&after.label(i)))
        .map(|i| {
            let old = normalized_cost(&before.label(i), i, distance_norm, danger_norm);
            let new = normalized_cost(&after.label(i), i, distance_norm, danger_norm);
            let change = percent_change(old, new);
            if change.is_finite() { change } else { 0.0 }
        })
        .reduce(f64::min)
}

/// Impact of the network's current overrides over `trips`.
///
/// Accepts owned trips or a slice of `&mut Trip` picked from a larger set.
/// Trips that cannot be evaluated count as not impacted.
pub fn impact_of_modification<T, R>(trips: &mut [T], router: &R, network: &RoadNetwork) -> ImpactReport
where
    T: BorrowMut<Trip> + Send,
    R: Router + ?Sized,
{
    info!("computing impact over {} trips", trips.len());
    let progress = Progress::new("impact", trips.len());

    let outcome = |trip: &mut Trip, state: &mut SearchState| {
        let result = match impact_with_state(trip, router, network, state) {
            Ok(change) => change,
            Err(e) => {
                debug!("{}: impact unavailable ({e}), counted as unchanged", trip.id);
                None
            }
        };
        progress.tick();
        result
    };

    #[cfg(not(feature = "parallel"))]
    let outcomes: Vec<Option<f64>> = {
        let mut state = SearchState::new();
        trips
            .iter_mut()
            .map(|t| outcome(<T as BorrowMut<Trip>>::borrow_mut(t), &mut state))
            .collect()
    };

    // One search state per Rayon worker.
    #[cfg(feature = "parallel")]
    let outcomes: Vec<Option<f64>> = {
        use rayon::prelude::*;
        trips
            .par_iter_mut()
            .map_init(SearchState::new, |state, t| outcome(<T as BorrowMut<Trip>>::borrow_mut(t), state))
            .collect()
    };

    let report = ImpactReport::from_outcomes(&outcomes);
    info!(
        "{} of {} trips impacted ({:.1}%), mean cost change {:.3}%",
        report.impacted,
        report.evaluated,
        report.impacted_fraction * 100.0,
        report.mean_improvement
    );
    report
}
