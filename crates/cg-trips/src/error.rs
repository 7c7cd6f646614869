use thiserror::Error;

use cg_core::{NodeId, TripId};
use cg_spatial::SpatialError;

#[derive(Debug, Error)]
pub enum TripError {
    #[error("{trip}: no edge from {from} to {to}")]
    MissingEdge { trip: TripId, from: NodeId, to: NodeId },

    #[error("{0} has no nodes")]
    EmptyTrip(TripId),

    #[error(transparent)]
    Spatial(#[from] SpatialError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type TripResult<T> = Result<T, TripError>;
