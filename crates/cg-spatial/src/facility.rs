//! Cycling facility layouts and the danger they imply.
//!
//! A section's danger is its length divided by a safety coefficient that
//! depends on the cycling facility on that side of the road.  Separated
//! infrastructure divides by [`FULLY_SAFE_FACTOR`]; riding in mixed traffic
//! divides by 1, so danger equals length.

use log::error;

use cg_core::FULLY_SAFE_FACTOR;

/// Facility class of one side of a road segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Facility {
    /// Dedicated path, cycle track or greenway.
    Separated,
    /// Painted lane, bus lane or sidewalk path.
    Lane,
    /// Shared carriageway markings ("chaucidou", contraflow lane).
    Shared,
    /// Mixed traffic, contraflow without markings, or no layout recorded.
    Mixed,
    /// Layout string the survey vocabulary does not contain.
    Unrecognised(String),
}

impl Facility {
    /// Classify a survey layout label.  `None` and blank labels are `Mixed`.
    pub fn from_layout(layout: Option<&str>) -> Facility {
        let Some(layout) = layout.map(str::trim).filter(|s| !s.is_empty()) else {
            return Facility::Mixed;
        };
        match layout {
            "chemin dedie uni"
            | "chemin dedie bi"
            | "chemin service site propre uni"
            | "chemin service site propre bi"
            | "piste uni"
            | "piste bi"
            | "piste trottoir bi"
            | "piste trottoir uni"
            | "voie verte bi"
            | "voie verte uni" => Facility::Separated,

            "cheminement trottoir uni"
            | "cheminement trottoir bi"
            | "autre chemin velo uni"
            | "autre chemin velo bi"
            | "bande uni"
            | "bande bi"
            | "voie bus uni"
            | "voie bus bi" => Facility::Lane,

            "chaucidou" | "cheminement uni" | "cheminement bi" | "DSC bande" => Facility::Shared,

            "DSC" | "bicycle_no" => Facility::Mixed,

            other => Facility::Unrecognised(other.to_owned()),
        }
    }

    /// Divisor applied to the section length.
    ///
    /// Unrecognised layouts get `i32::MAX`, which makes their danger
    /// negligible and keeps them out of the upgrade candidates.
    pub fn coefficient(&self) -> f64 {
        match self {
            Facility::Separated => FULLY_SAFE_FACTOR,
            Facility::Lane => 3.0,
            Facility::Shared => 2.0,
            Facility::Mixed => 1.0,
            Facility::Unrecognised(_) => f64::from(i32::MAX),
        }
    }

    /// Danger of a section of `length` with this facility.
    pub fn danger(&self, length: f64) -> f64 {
        if let Facility::Unrecognised(layout) = self {
            error!("unrecognised facility layout {layout:?}");
        }
        length / self.coefficient()
    }
}
