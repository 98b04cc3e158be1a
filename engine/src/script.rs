//! Script and step definitions.

use crate::ops::OpName;
use crate::region::RegionName;

/// Per-step parameters with named fields.
///
/// Each interaction reads only the fields it declares; everything else is
/// ignored. Unset fields fall back to the defaults documented on the
/// consuming interaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepContext {
    /// Source region for the blend interaction (defaults to R1).
    pub source: Option<RegionName>,
    /// Target region for the echo interaction (defaults to R1).
    pub target: Option<RegionName>,
    /// Previous-delta override for the echo interaction. The runner fills
    /// this with the running delta when unset.
    pub prev_delta: Option<Vec<u8>>,
    /// Candidate pool for the wildcard interaction.
    pub pool: Vec<OpName>,
}

/// One script step: an interaction name plus its context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub op: OpName,
    pub ctx: StepContext,
}

impl Step {
    /// Step with an empty context.
    pub fn bare(op: OpName) -> Step {
        Step {
            op,
            ctx: StepContext::default(),
        }
    }
}

/// An ordered run definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    pub steps: Vec<Step>,
}

impl Script {
    pub fn new(steps: Vec<Step>) -> Script {
        Script { steps }
    }
}

/// Check semantic invariants not expressible in the script schema:
/// - Wildcard pools must not list `E8` itself.
///
/// Returns stable error messages tagged with step indices.
pub fn validate_invariants(script: &Script) -> Vec<String> {
    let mut errors = Vec::new();
    for (index, step) in script.steps.iter().enumerate() {
        if step.ctx.pool.contains(&OpName::E8) {
            errors.push(format!("step {index}: wildcard pool may not include E8"));
        }
    }
    errors
}
