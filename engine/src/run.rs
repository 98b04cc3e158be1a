//! Sequential script execution with delta threading.

use tracing::debug;

use crate::choice::WildcardChoice;
use crate::error::StepError;
use crate::mixer::xor_bytes;
use crate::script::{Script, Step, StepContext};
use crate::state::SystemState;

/// Execute `script` against `initial`, returning every intermediate state.
///
/// The history always starts with a copy of the initial state; a run of
/// `n` steps yields `n + 1` states. After each step the XOR delta of R1
/// across the step is recorded and threaded into the next step's context,
/// unless that step pinned its own `prev_delta`. The first failing step
/// aborts the run with its index; no partial history is returned.
pub fn run_script<C: WildcardChoice>(
    initial: &SystemState,
    script: &Script,
    choice: &mut C,
) -> Result<Vec<SystemState>, StepError> {
    let mut history = Vec::with_capacity(script.steps.len() + 1);
    history.push(initial.clone());
    let mut current = initial.clone();
    let mut prev_delta = vec![0u8; initial.r1.len()];

    for (index, step) in script.steps.iter().enumerate() {
        let ctx = effective_context(step, &prev_delta);
        debug!(step = index, op = %step.op, "applying interaction");

        let next = step
            .op
            .apply(&current, &ctx, choice)
            .map_err(|source| StepError {
                index,
                op: step.op,
                source,
            })?;

        prev_delta =
            xor_bytes(current.r1.data(), next.r1.data()).map_err(|source| StepError {
                index,
                op: step.op,
                source,
            })?;
        debug!(
            step = index,
            delta = %hex::encode(&prev_delta),
            "recorded R1 delta"
        );

        history.push(next.clone());
        current = next;
    }

    Ok(history)
}

/// Build the step's effective context: the running delta fills
/// `prev_delta` unless the step pinned its own.
fn effective_context(step: &Step, prev_delta: &[u8]) -> StepContext {
    let mut ctx = step.ctx.clone();
    if ctx.prev_delta.is_none() {
        ctx.prev_delta = Some(prev_delta.to_vec());
    }
    ctx
}
