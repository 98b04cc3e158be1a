//! Typed error surface for mixing primitives, interactions, and runs.

use thiserror::Error;

use crate::ops::OpName;

/// Error kinds detected synchronously by primitives and interactions.
///
/// All transforms are pure, so retrying a failed operation without
/// changing its inputs is meaningless; errors abort immediately.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// An operation received input it cannot operate on (an empty buffer
    /// where a non-empty one is required, or key material too short to
    /// index).
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    /// Two buffers required to be equal length were not.
    #[error("buffer length mismatch: {left} vs {right} bytes")]
    LengthMismatch { left: usize, right: usize },

    /// A step named an operation outside the registry.
    #[error("unknown operation '{0}'")]
    UnknownOperation(String),

    /// A context-supplied region token is not one of R1..R5.
    #[error("unknown region '{0}'")]
    UnknownRegion(String),
}

/// A script run failure, tagged with the step that caused it.
///
/// The runner aborts on the first failing step and never returns a
/// partial history.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("step {index} ({op}) failed: {source}")]
pub struct StepError {
    /// Zero-based index of the failing step.
    pub index: usize,
    /// Operation named by the failing step.
    pub op: OpName,
    /// Underlying error kind.
    pub source: EngineError,
}
