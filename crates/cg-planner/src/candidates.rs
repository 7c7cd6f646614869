//! Upgrade candidates around heavily used segments.
//!
//! Every high-usage segment defines a disc around each of its endpoints.
//! Any section with an endpoint inside one of the discs, and not yet fully
//! safe, becomes a candidate and inherits the segment's usage count.  A
//! section near several busy segments accumulates all their counts.
//!
//! Danger is read from the base channel: [`apply`](crate::apply) replaces any
//! earlier overrides, so candidates are ranked against the surveyed network.

use log::{debug, info};
use rustc_hash::{FxHashMap, FxHashSet};

use cg_core::{SectionId, FULLY_SAFE_FACTOR};
use cg_spatial::front::LABEL_EPSILON;
use cg_spatial::{DangerChannel, Edge, RoadNetwork, SectionLocator};

use crate::usage::{high_usage, UsageMap};

/// Disc radius as a multiple of the busy segment's length.
pub const RADIUS_LENGTH_FACTOR: f64 = 1.5;

/// A section proposed for upgrade.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Candidate {
    pub section:  SectionId,
    /// Accumulated usage of the busy segments nearby.
    pub usage:    u32,
    pub distance: f64,
    /// Surveyed danger (base channel).
    pub danger:   f64,
    pub score:    f64,
}

impl Candidate {
    fn new(section: SectionId, usage: u32, edge: &Edge) -> Self {
        let danger = edge.danger(DangerChannel::Base);
        Self {
            section,
            usage,
            distance: edge.distance,
            danger,
            score: score(usage, edge.distance, danger),
        }
    }
}

/// `usage × (danger − distance/5) / danger`: usage weighted by the share of
/// the section's danger an upgrade would remove.
pub fn score(usage: u32, distance: f64, danger: f64) -> f64 {
    let gain = (danger - distance / FULLY_SAFE_FACTOR) / danger;
    if gain.is_finite() { f64::from(usage) * gain } else { 0.0 }
}

/// `true` if the section's surveyed danger is above the fully-safe value.
pub fn is_improvable(edge: &Edge) -> bool {
    edge.danger(DangerChannel::Base) > edge.distance / FULLY_SAFE_FACTOR + LABEL_EPSILON
}

/// Candidates around every segment used by at least `min_usage` trips.
///
/// Builds a throwaway [`SectionLocator`]; use [`candidates_with_locator`]
/// to share one across calls.
pub fn candidates_near_high_usage(
    usage:              &UsageMap,
    network:            &RoadNetwork,
    threshold_distance: f64,
    min_usage:          u32,
) -> Vec<Candidate> {
    let locator = SectionLocator::build(network);
    candidates_with_locator(usage, network, &locator, threshold_distance, min_usage)
}

/// Like [`candidates_near_high_usage`] with a prebuilt endpoint index.
///
/// Result sorted by `SectionId`.
pub fn candidates_with_locator(
    usage:              &UsageMap,
    network:            &RoadNetwork,
    locator:            &SectionLocator,
    threshold_distance: f64,
    min_usage:          u32,
) -> Vec<Candidate> {
    let busy = high_usage(usage, min_usage);
    let mut accumulated: FxHashMap<SectionId, u32> = FxHashMap::default();

    for &(base, count) in &busy {
        let section = SectionId::new(base, true);
        let (Some(start), Some(end), Some(length)) = (
            network.section_start(section),
            network.section_end(section),
            network.geometric_length(section),
        ) else {
            debug!("busy segment {base} is not in the network, skipped");
            continue;
        };
        let radius = threshold_distance.max(RADIUS_LENGTH_FACTOR * length);

        // One contribution per nearby section, whichever endpoints matched.
        let nearby: FxHashSet<SectionId> = locator
            .sections_within(start.pos, radius)
            .chain(locator.sections_within(end.pos, radius))
            .collect();

        for near in nearby {
            if network.section_edge(near).is_some_and(is_improvable) {
                *accumulated.entry(near).or_insert(0) += count;
            }
        }
    }

    let mut candidates: Vec<Candidate> = accumulated
        .into_iter()
        .filter_map(|(section, usage)| network.section_edge(section).map(|e| Candidate::new(section, usage, e)))
        .collect();
    candidates.sort_unstable_by_key(|c| c.section);

    info!("{} candidates around {} busy segments", candidates.len(), busy.len());
    candidates
}
