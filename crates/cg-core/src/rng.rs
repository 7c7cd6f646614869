//! Deterministic RNG for trip sampling.
//!
//! Samples handed to the plotter must be reproducible, so every draw comes
//! from a `SmallRng` seeded from a caller-supplied `u64`.  The same seed and
//! the same input order always yield the same subset.

use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Seeded RNG used by the trip sampler.
pub struct SampleRng(SmallRng);

impl SampleRng {
    pub fn new(seed: u64) -> Self {
        SampleRng(SmallRng::seed_from_u64(seed))
    }

    /// `count` distinct indices from `0..len`, ascending.
    ///
    /// Returns every index when `count >= len`.
    pub fn pick_indices(&mut self, len: usize, count: usize) -> Vec<usize> {
        if count >= len {
            return (0..len).collect();
        }
        let mut picked = rand::seq::index::sample(&mut self.0, len, count).into_vec();
        picked.sort_unstable();
        picked
    }
}
