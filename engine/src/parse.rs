//! Script parsing with schema + invariant validation.
//!
//! External step definitions arrive as JSON documents. Validation is
//! layered: JSON parse, structural schema check, vocabulary conversion
//! (operation and region tokens, hex-encoded deltas), then semantic
//! invariants. Scripts never touch the filesystem; the document comes in
//! as a string.

use jsonschema::validator_for;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::error::EngineError;
use crate::ops::OpName;
use crate::region::RegionName;
use crate::script::{Script, Step, StepContext, validate_invariants};

const SCRIPT_SCHEMA: &str = include_str!("../schemas/script.schema.json");

/// Script parse or validation failure.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The document is not valid JSON.
    #[error("malformed script JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The document does not match the script schema.
    #[error("script schema validation failed: {0}")]
    Schema(String),
    /// A step uses vocabulary outside the registry.
    #[error("step {index}: {source}")]
    Step {
        index: usize,
        #[source]
        source: EngineError,
    },
    /// A step violates a semantic invariant.
    #[error("script invariants failed: {0}")]
    Invariants(String),
}

#[derive(Debug, Deserialize)]
struct RawScript {
    steps: Vec<RawStep>,
}

#[derive(Debug, Deserialize)]
struct RawStep {
    op: String,
    #[serde(default)]
    ctx: RawContext,
}

#[derive(Debug, Default, Deserialize)]
struct RawContext {
    source: Option<String>,
    target: Option<String>,
    prev_delta: Option<String>,
    #[serde(default)]
    pool: Vec<String>,
}

/// Parse and validate a script document.
pub fn parse_script(json: &str) -> Result<Script, ScriptError> {
    let value: Value = serde_json::from_str(json)?;
    validate_schema(&value)?;
    let raw: RawScript = serde_json::from_value(value)?;
    let script = convert(raw)?;
    let errors = validate_invariants(&script);
    if !errors.is_empty() {
        return Err(ScriptError::Invariants(errors.join("; ")));
    }
    Ok(script)
}

fn validate_schema(value: &Value) -> Result<(), ScriptError> {
    let schema: Value = serde_json::from_str(SCRIPT_SCHEMA)?;
    let compiled =
        validator_for(&schema).map_err(|err| ScriptError::Schema(format!("invalid schema: {err}")))?;
    if !compiled.is_valid(value) {
        let messages = compiled
            .iter_errors(value)
            .map(|err| err.to_string())
            .collect::<Vec<_>>();
        return Err(ScriptError::Schema(messages.join("; ")));
    }
    Ok(())
}

fn convert(raw: RawScript) -> Result<Script, ScriptError> {
    let mut steps = Vec::with_capacity(raw.steps.len());
    for (index, raw_step) in raw.steps.into_iter().enumerate() {
        let step = convert_step(raw_step).map_err(|source| ScriptError::Step { index, source })?;
        steps.push(step);
    }
    Ok(Script::new(steps))
}

fn convert_step(raw: RawStep) -> Result<Step, EngineError> {
    let op = OpName::parse(&raw.op)?;
    let source = raw.ctx.source.as_deref().map(RegionName::parse).transpose()?;
    let target = raw.ctx.target.as_deref().map(RegionName::parse).transpose()?;
    let prev_delta = raw.ctx.prev_delta.as_deref().map(decode_delta).transpose()?;
    let pool = raw
        .ctx
        .pool
        .iter()
        .map(|token| OpName::parse(token))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Step {
        op,
        ctx: StepContext {
            source,
            target,
            prev_delta,
            pool,
        },
    })
}

fn decode_delta(token: &str) -> Result<Vec<u8>, EngineError> {
    hex::decode(token).map_err(|_| EngineError::InvalidInput("prev_delta must be hex-encoded bytes"))
}
