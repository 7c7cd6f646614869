use thiserror::Error;

use cg_core::CoreError;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("segment {0} not found in network")]
    SegmentNotFound(u64),

    #[error(transparent)]
    Config(#[from] CoreError),
}

pub type PlanResult<T> = Result<T, PlanError>;
