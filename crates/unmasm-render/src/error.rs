//! Rendering error types.

use thiserror::Error;

/// Error raised while unparsing an operand expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnparseError {
    /// The tree holds a node the MASM unparser has no text form for.
    #[error("unhandled expression kind {kind}")]
    UnsupportedExpressionKind { kind: &'static str },
}

/// Error raised while rendering a listing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// An operand of the instruction at `address` could not be unparsed.
    #[error("instruction at {address:#x}: {source}")]
    Instruction {
        address: u64,
        #[source]
        source: UnparseError,
    },
}

impl RenderError {
    /// Returns the address of the offending instruction.
    pub fn address(&self) -> u64 {
        match self {
            Self::Instruction { address, .. } => *address,
        }
    }
}
