//! Error types for unmasm-core.

use thiserror::Error;

/// Core error type.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// Invalid basic block reference.
    #[error("invalid basic block id: {0:?}")]
    InvalidBlockId(crate::BasicBlockId),
}
