//! `cg-trips` — recorded trips and their evaluation against route fronts.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`trip`]      | `Trip`, `DeducedWeights`                                  |
//! | [`store`]     | `TripSet` with validation, length filter, trim, sampling  |
//! | [`evaluator`] | `deduce_weights`, `deviation_from_front`, `summarize_deviation` |
//! | [`impact`]    | `impact_of_modification`, `ImpactReport`                  |
//! | [`loader`]    | `load_trips_csv`, `load_trips_reader`                     |
//! | [`error`]     | `TripError`, `TripResult<T>`                              |
//!
//! # Evaluation model (summary)
//!
//! ```text
//! totals    = Σ (distance, base danger) along the recorded nodes
//! front     = one label per distance weight, start → end, base danger
//! deduced   = index of the label nearest to totals (ties → lowest)
//! cost(l)   = w·l.distance/front[0.999].distance + (1-w)·l.danger/front[0.001].danger
//! deviation = (cost(totals) - cost(front[deduced])) / cost(front[deduced]) × 100
//! ```
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | Batch evaluation runs on Rayon's thread pool.           |
//! | `serde`    | `Serialize`/`Deserialize` on `Trip` and `DeducedWeights`. |

pub mod error;
pub mod evaluator;
pub mod impact;
pub mod loader;
pub mod store;
pub mod trip;


pub use error::{TripError, TripResult};
pub use evaluator::{
    deduce_weights, deviation_from_front, normalized_cost, summarize_deviation, DeviationSummary, Evaluation,
};
pub use impact::{compare_fronts, impact_of_modification, trip_impact, ImpactReport};
pub use loader::{load_trips_csv, load_trips_reader};
pub use store::{FilterReport, LengthProfile, TripSet};
pub use trip::{DeducedWeights, Trip};
