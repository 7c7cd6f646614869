//! The working set of trips and its pre-analysis filters.
//!
//! Raw trip records are noisy: map-matching leaves loops, gaps between
//! consecutive nodes and very short hops.  The filters here run once, after
//! loading and before any evaluation, and report what they removed instead of
//! failing.

use log::info;

use cg_core::{SampleRng, TripId};
use cg_spatial::RoadNetwork;

use crate::trip::Trip;

/// Steps at either end of a trip inside which a gap counts as "near an
/// endpoint".  Map-matching errors cluster there.
pub const ENDPOINT_WINDOW: usize = 6;

/// Lower bounds of the trip-length bands reported by
/// [`TripSet::retain_min_length`], in metres.
pub const LENGTH_BANDS: [f64; 6] = [0.0, 20.0, 50.0, 200.0, 500.0, 1000.0];

// ── Reports ───────────────────────────────────────────────────────────────────

/// Outcome of [`TripSet::validate`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterReport {
    /// Trips examined.
    pub checked:        usize,
    /// Trips removed (loops plus gaps).
    pub removed:        usize,
    /// Removed because start equals end.
    pub loops:          usize,
    /// Removed for a gap within [`ENDPOINT_WINDOW`] steps of either end.
    pub near_endpoints: usize,
}

/// Trip counts per length band, taken before short trips are removed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LengthProfile {
    /// One count per entry of [`LENGTH_BANDS`]; the last band is open.
    pub bands:   [usize; LENGTH_BANDS.len()],
    pub removed: usize,
}

fn band_of(length: f64) -> usize {
    LENGTH_BANDS.iter().rposition(|&lo| length >= lo).unwrap_or(0)
}

// ── TripSet ───────────────────────────────────────────────────────────────────

/// Owned collection of trips, in ascending id order once loaded.
#[derive(Clone, Debug, Default)]
pub struct TripSet {
    trips: Vec<Trip>,
}

impl TripSet {
    pub fn new(trips: Vec<Trip>) -> Self {
        Self { trips }
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Trip> + '_ {
        self.trips.iter()
    }

    pub fn as_slice(&self) -> &[Trip] {
        &self.trips
    }

    pub fn as_mut_slice(&mut self) -> &mut [Trip] {
        &mut self.trips
    }

    pub fn get(&self, id: TripId) -> Option<&Trip> {
        self.trips.iter().find(|t| t.id == id)
    }

    pub fn into_vec(self) -> Vec<Trip> {
        self.trips
    }

    // ── Filters ───────────────────────────────────────────────────────────

    /// Drop trips that start where they end or step between two nodes with
    /// no edge.
    pub fn validate(&mut self, network: &RoadNetwork) -> FilterReport {
        let mut report = FilterReport { checked: self.trips.len(), ..FilterReport::default() };

        self.trips.retain(|trip| {
            if trip.is_loop() {
                report.loops += 1;
                return false;
            }
            match trip.first_gap(network) {
                None => true,
                Some(step) => {
                    let size = trip.nodes.len();
                    if step <= ENDPOINT_WINDOW || step + ENDPOINT_WINDOW >= size {
                        report.near_endpoints += 1;
                    }
                    false
                }
            }
        });

        report.removed = report.checked - self.trips.len();
        info!(
            "trip validation: {} of {} trips removed ({} loops, {} gaps within {} steps of an endpoint)",
            report.removed, report.checked, report.loops, report.near_endpoints, ENDPOINT_WINDOW
        );
        report
    }

    /// Drop trips shorter than `min_length` metres.
    ///
    /// A trip whose totals cannot be computed counts as length 0.
    pub fn retain_min_length(&mut self, network: &RoadNetwork, min_length: f64) -> LengthProfile {
        let mut profile = LengthProfile::default();
        let before = self.trips.len();

        self.trips.retain(|trip| {
            let length = trip.totals(network).map(|l| l.distance).unwrap_or(0.0);
            profile.bands[band_of(length)] += 1;
            length >= min_length
        });

        profile.removed = before - self.trips.len();
        info!(
            "trip lengths over {before} trips: {:?} (bands from {:?} m); {} shorter than {min_length} m removed",
            profile.bands, LENGTH_BANDS, profile.removed
        );
        profile
    }

    /// Cut `steps` nodes off both ends of every trip.  Trips with no more
    /// than `2 × steps` nodes are removed.  Returns the number removed.
    pub fn trim_ends(&mut self, steps: usize) -> usize {
        if steps == 0 {
            return 0;
        }
        let before = self.trips.len();
        self.trips.retain_mut(|trip| {
            if trip.nodes.len() <= steps * 2 {
                return false;
            }
            trip.nodes.drain(..steps);
            trip.nodes.truncate(trip.nodes.len() - steps);

            if trip.sections.len() <= steps * 2 {
                trip.sections.clear();
            } else {
                trip.sections.drain(..steps);
                trip.sections.truncate(trip.sections.len() - steps);
            }
            trip.deduced = None;
            true
        });
        before - self.trips.len()
    }

    /// A reproducible random subset of `count` trips, in set order.
    pub fn sample(&self, count: usize, seed: u64) -> TripSet {
        let picked = SampleRng::new(seed).pick_indices(self.trips.len(), count);
        TripSet::new(picked.into_iter().map(|i| self.trips[i].clone()).collect())
    }
}

impl FromIterator<Trip> for TripSet {
    fn from_iter<I: IntoIterator<Item = Trip>>(iter: I) -> Self {
        TripSet::new(iter.into_iter().collect())
    }
}

impl IntoIterator for TripSet {
    type Item = Trip;
    type IntoIter = std::vec::IntoIter<Trip>;

    fn into_iter(self) -> Self::IntoIter {
        self.trips.into_iter()
    }
}
