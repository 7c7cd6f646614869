//! `cg-spatial` — road network, scalarized routing, and approximate fronts.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`network`]  | `RoadNetwork`, `Node`, `Edge`, `DangerChannel`            |
//! | [`router`]   | `Router` trait, `Route`, `ScalarCost`, `DijkstraRouter`   |
//! | [`front`]    | `Label`, `ParetoFront`, `build_front(_with_state)`        |
//! | [`facility`] | `Facility` layout classes and their danger coefficients   |
//! | [`locator`]  | `SectionLocator` (R-tree over section endpoints)          |
//! | [`loader`]   | `load_network_csv`, `load_network_reader`                 |
//! | [`error`]    | `SpatialError`, `SpatialResult<T>`                        |

pub mod error;
pub mod facility;
pub mod front;
pub mod loader;
pub mod locator;
pub mod network;
pub mod router;

#[cfg(test)]
mod tests;

pub use error::{SpatialError, SpatialResult};
pub use facility::Facility;
pub use front::{build_front, build_front_with_state, check_spacing, FrontGap, Label, ParetoFront};
pub use loader::{load_network_csv, load_network_reader};
pub use locator::SectionLocator;
pub use network::{DangerChannel, Edge, Node, RoadNetwork};
pub use router::{path_label, DijkstraRouter, Route, Router, ScalarCost, SearchState};
