//! Analysis configuration.

use crate::{CoreError, CoreResult};

/// Danger divisor of a section with a fully separated cycling facility.
///
/// A section whose danger equals `distance / FULLY_SAFE_FACTOR` cannot be
/// upgraded any further.
pub const FULLY_SAFE_FACTOR: f64 = 5.0;

/// Top-level analysis configuration.
///
/// Typically loaded from a JSON file by the application crate and passed
/// to the planner and evaluator.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnalysisConfig {
    /// Minimum radius around a busy section inside which other sections are
    /// upgrade candidates.  Default: 67.0, the mean section length of the
    /// reference network.
    pub threshold_distance: f64,

    /// Total section length that may be upgraded.  Default: 150.0.
    pub budget: f64,

    /// Trips shorter than this are discarded before analysis.  Default: 500.0.
    pub min_trip_length: f64,

    /// Trip count at which a section counts as heavily used.  Default: 1,
    /// i.e. every section any trip touched.
    pub min_usage: u32,

    /// Safety factor applied to upgraded sections.  Default: 5.0.
    pub safety_factor: f64,

    /// Ratio of widest front gap to mean front spacing above which the front
    /// is reported as too coarse.  Default: 3.0.
    pub gap_ratio_warning: f64,

    /// Worker thread count passed to Rayon.  `None` uses all logical cores.
    pub num_threads: Option<usize>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            threshold_distance: 67.0,
            budget:             150.0,
            min_trip_length:    500.0,
            min_usage:          1,
            safety_factor:      FULLY_SAFE_FACTOR,
            gap_ratio_warning:  3.0,
            num_threads:        None,
        }
    }
}

impl AnalysisConfig {
    /// Reject values that would make the analysis meaningless.
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.budget > 0.0) {
            return Err(CoreError::Config(format!("budget must be positive, got {}", self.budget)));
        }
        if !(self.safety_factor > 0.0) {
            return Err(CoreError::Config(format!(
                "safety_factor must be positive, got {}",
                self.safety_factor
            )));
        }
        if !(self.threshold_distance >= 0.0) {
            return Err(CoreError::Config(format!(
                "threshold_distance must not be negative, got {}",
                self.threshold_distance
            )));
        }
        if !(self.min_trip_length >= 0.0) {
            return Err(CoreError::Config(format!(
                "min_trip_length must not be negative, got {}",
                self.min_trip_length
            )));
        }
        if self.num_threads == Some(0) {
            return Err(CoreError::Config("num_threads must be at least 1".into()));
        }
        Ok(())
    }
}
