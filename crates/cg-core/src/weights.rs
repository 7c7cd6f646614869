//! The fixed scalarization weight set.
//!
//! Every front in the system is built from the same seven distance weights.
//! Index 0 almost ignores distance (danger-minimising), the last index almost
//! ignores danger (distance-minimising).  Weights are referred to by index
//! everywhere so no code ever compares floats for equality to find one.

/// Distance weights `w` of the scalar cost `w·distance + (1-w)·danger`,
/// ascending.
pub const DISTANCE_WEIGHTS: [f64; 7] = [0.001, 0.2, 0.4, 0.5, 0.6, 0.8, 0.999];

/// Number of points on every approximate front.
pub const WEIGHT_COUNT: usize = DISTANCE_WEIGHTS.len();

/// Index of the most danger-averse weight.
pub const DANGER_EXTREME: usize = 0;

/// Index of the most distance-averse weight.
pub const DISTANCE_EXTREME: usize = WEIGHT_COUNT - 1;

/// Danger weight paired with the distance weight at `index`.
#[inline]
pub fn danger_weight(index: usize) -> f64 {
    1.0 - DISTANCE_WEIGHTS[index]
}

/// `index` and its immediate neighbours in the weight set: two indices at
/// either end of the set, three in the interior.
pub fn neighbourhood(index: usize) -> std::ops::RangeInclusive<usize> {
    let lo = index.saturating_sub(1);
    let hi = (index + 1).min(DISTANCE_EXTREME);
    lo..=hi
}
