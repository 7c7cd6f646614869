//! `cg-planner` — where to spend a limited upgrade budget, and what it buys.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                 |
//! |-----------------|----------------------------------------------------------|
//! | [`usage`]       | `usage_count`, `UsageMap`                                |
//! | [`candidates`]  | `Candidate`, `candidates_near_high_usage`, `score`       |
//! | [`select`]      | `select_under_budget`, `Selection`                       |
//! | [`planner`]     | `plan_upgrades`, `apply`, `assess_section`               |
//! | [`error`]       | `PlanError`, `PlanResult<T>`                             |
//!
//! # Pipeline
//!
//! ```text
//! trips ──usage_count──▶ UsageMap ──candidates_near_high_usage──▶ Vec<Candidate>
//!       ──select_under_budget──▶ Selection ──apply──▶ PlanReport { impact }
//! ```
//!
//! `apply` writes the alternate danger channel of the network; the base
//! channel is untouched, so the impact compares before and after on the
//! same network value.

pub mod candidates;
pub mod error;
pub mod planner;
pub mod select;
pub mod usage;


pub use candidates::{candidates_near_high_usage, candidates_with_locator, is_improvable, score, Candidate};
pub use error::{PlanError, PlanResult};
pub use planner::{apply, assess_section, plan_upgrades, PlanReport, SectionAssessment};
pub use select::{select_under_budget, Selection};
pub use usage::{high_usage, usage_count, UsageMap};
