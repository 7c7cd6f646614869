//! Spatial-subsystem error type.

use thiserror::Error;

use cg_core::{NodeId, SectionId};

/// Errors produced by `cg-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },

    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error("section {0} not found in network")]
    SectionNotFound(SectionId),

    #[error("no edge from {from} to {to}")]
    MissingEdge { from: NodeId, to: NodeId },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
