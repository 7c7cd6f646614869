//! Greedy budgeted selection.

use log::info;
use rustc_hash::FxHashSet;

use crate::candidates::Candidate;

/// Candidates accepted under a length budget, in acceptance order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Selection {
    pub chosen: Vec<Candidate>,
    pub budget: f64,
    /// Total distance of `chosen`.  Never above `budget`.
    pub spent:  f64,
}

impl Selection {
    pub fn remaining(&self) -> f64 {
        self.budget - self.spent
    }

    /// Base ids of the chosen segments, in acceptance order.
    pub fn base_ids(&self) -> Vec<u64> {
        self.chosen.iter().map(|c| c.section.base).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.chosen.is_empty()
    }
}

/// Best-score-first greedy fill of `budget` metres.
///
/// Ties in score go to the smaller `SectionId`.  Upgrades apply to whole
/// segments, so once one direction is chosen the other is skipped at no
/// cost.  Stops when the budget is spent or the list is exhausted.
pub fn select_under_budget(mut candidates: Vec<Candidate>, budget: f64) -> Selection {
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.section.cmp(&b.section)));

    let mut selection = Selection { budget, ..Selection::default() };
    let mut segments: FxHashSet<u64> = FxHashSet::default();

    for candidate in candidates {
        if selection.remaining() <= 0.0 {
            break;
        }
        if segments.contains(&candidate.section.base) {
            continue;
        }
        if candidate.distance <= selection.remaining() {
            segments.insert(candidate.section.base);
            selection.spent += candidate.distance;
            selection.chosen.push(candidate);
        }
    }

    info!(
        "selected {} segments, {:.1} of {:.1} m budget",
        selection.chosen.len(),
        selection.spent,
        budget
    );
    selection
}
