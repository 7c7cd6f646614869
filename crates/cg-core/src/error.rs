//! Workspace base error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` where they
//! need it.

use thiserror::Error;

/// Errors raised by `cg-core` itself.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `cg-core`.
pub type CoreResult<T> = Result<T, CoreError>;
