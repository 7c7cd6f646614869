//! `cg-core` — foundational types for the cycle-gap analysis workspace.
//!
//! This crate is a dependency of every other `cg-*` crate.  It intentionally
//! has no `cg-*` dependencies and minimal external ones (`thiserror` and
//! `rand`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`ids`]       | `NodeId`, `SectionId`, `TripId`                         |
//! | [`geo`]       | `Point`, Euclidean distance                             |
//! | [`weights`]   | `DISTANCE_WEIGHTS`, neighbourhood helper                |
//! | [`config`]    | `AnalysisConfig`, `FULLY_SAFE_FACTOR`                   |
//! | [`rng`]       | `SampleRng` (seeded `SmallRng` for trip sampling)       |
//! | [`error`]     | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required to load `AnalysisConfig` from a file.             |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod weights;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{AnalysisConfig, FULLY_SAFE_FACTOR};
pub use error::{CoreError, CoreResult};
pub use geo::Point;
pub use ids::{NodeId, SectionId, TripId};
pub use rng::SampleRng;
pub use weights::{DANGER_EXTREME, DISTANCE_EXTREME, DISTANCE_WEIGHTS, WEIGHT_COUNT};
