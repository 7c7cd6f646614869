//! End-to-end planning: pick upgrades, apply them, measure the effect.
//!
//! Both entry points replace any earlier overrides on the network, so each
//! report describes exactly one scenario against the surveyed network.

use log::info;
use rustc_hash::FxHashSet;

use cg_core::{AnalysisConfig, NodeId, SectionId};
use cg_spatial::{RoadNetwork, Router};
use cg_trips::{impact_of_modification, ImpactReport, Trip};

use crate::candidates::candidates_near_high_usage;
use crate::select::{select_under_budget, Selection};
use crate::usage::usage_count;
use crate::{PlanError, PlanResult};

/// Output of [`apply`].
#[derive(Clone, Debug, PartialEq)]
pub struct PlanReport {
    pub selection: Selection,
    /// Segments whose alternate danger was written.
    pub upgraded:  usize,
    pub impact:    ImpactReport,
}

/// Output of [`assess_section`].
#[derive(Clone, Debug, PartialEq)]
pub struct SectionAssessment {
    pub base_id: u64,
    /// Radius used to find nearby nodes.
    pub radius:  f64,
    /// Nodes within `radius` of either endpoint, endpoints included.
    pub nodes:   usize,
    pub impact:  ImpactReport,
}

/// Usage count, candidate search and budgeted selection in one call.
pub fn plan_upgrades(network: &RoadNetwork, trips: &[Trip], config: &AnalysisConfig) -> PlanResult<Selection> {
    config.validate()?;
    let usage = usage_count(trips);
    let candidates = candidates_near_high_usage(&usage, network, config.threshold_distance, config.min_usage);
    Ok(select_under_budget(candidates, config.budget))
}

/// Override every chosen segment with `safety_factor` and measure the impact
/// over all `trips`.
pub fn apply<R: Router + ?Sized>(
    selection:     Selection,
    network:       &mut RoadNetwork,
    trips:         &mut [Trip],
    router:        &R,
    safety_factor: f64,
) -> PlanReport {
    network.clear_overrides();
    let upgraded = network.apply_overrides(selection.base_ids().into_iter().map(|id| (id, safety_factor)));
    info!("upgraded {upgraded} segments ({:.1} m)", selection.spent);

    let impact = impact_of_modification(trips, router, network);
    PlanReport { selection, upgraded, impact }
}

/// Override a single segment and measure the impact on trips passing near it.
///
/// A trip is considered if it visits any node strictly within
/// `max(threshold_distance, segment length)` of either segment endpoint.
pub fn assess_section<R: Router + ?Sized>(
    base_id:            u64,
    safety_factor:      f64,
    network:            &mut RoadNetwork,
    trips:              &mut [Trip],
    router:             &R,
    threshold_distance: f64,
) -> PlanResult<SectionAssessment> {
    let section = SectionId::new(base_id, true);
    let (Some(start), Some(end), Some(length)) = (
        network.section_start(section).map(|n| n.pos),
        network.section_end(section).map(|n| n.pos),
        network.geometric_length(section),
    ) else {
        return Err(PlanError::SegmentNotFound(base_id));
    };

    network.clear_overrides();
    network.apply_overrides([(base_id, safety_factor)]);

    let radius = threshold_distance.max(length);
    let nearby: FxHashSet<NodeId> = network
        .nodes()
        .filter(|n| n.pos.distance(start) < radius || n.pos.distance(end) < radius)
        .map(|n| n.id)
        .collect();

    let mut involved: Vec<&mut Trip> = trips.iter_mut().filter(|t| t.passes_any(&nearby)).collect();
    info!(
        "segment {base_id}: {} nodes within {radius:.1} m, {} trips involved",
        nearby.len(),
        involved.len()
    );

    let impact = impact_of_modification(&mut involved, router, network);
    Ok(SectionAssessment { base_id, radius, nodes: nearby.len(), impact })
}
