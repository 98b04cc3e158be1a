//! The interaction registry: nine named, pure state transforms.
//!
//! Every interaction deep-copies the incoming state and returns a new one;
//! the receiver is never mutated. Key material is derived from the state
//! itself via [`mix_bytes`], so identical states yield identical results
//! for every interaction except the wildcard, whose pool pick goes through
//! the injected [`WildcardChoice`] seam.

use std::fmt;

use crate::choice::WildcardChoice;
use crate::error::EngineError;
use crate::mixer::{mix_bytes, permute_bytes, rotate_left_bits, xor_bytes};
use crate::region::{Region, RegionName};
use crate::script::StepContext;
use crate::state::SystemState;

/// Rounds for standard key derivation.
const MIX_ROUNDS: usize = 3;
/// Rounds for the deeper scramble used by E3.
const DEEP_MIX_ROUNDS: usize = 4;
/// Suffix mixed into the flag-pad derivation of E4B.
const FLAG_SALT: &[u8] = b"flags";

/// Closed registry of interaction names.
///
/// The textual tokens (`"E1"`, `"E4A"`, ...) are the wire vocabulary for
/// external scripts; [`OpName::parse`] is the registry lookup and the only
/// place an unknown operation can surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpName {
    E1,
    E2,
    E3,
    E4A,
    E4B,
    E5,
    E6,
    E7,
    E8,
}

impl OpName {
    /// Every registered interaction, in registry order.
    pub const ALL: [OpName; 9] = [
        OpName::E1,
        OpName::E2,
        OpName::E3,
        OpName::E4A,
        OpName::E4B,
        OpName::E5,
        OpName::E6,
        OpName::E7,
        OpName::E8,
    ];

    /// Look up an operation token in the registry.
    pub fn parse(token: &str) -> Result<OpName, EngineError> {
        match token {
            "E1" => Ok(OpName::E1),
            "E2" => Ok(OpName::E2),
            "E3" => Ok(OpName::E3),
            "E4A" => Ok(OpName::E4A),
            "E4B" => Ok(OpName::E4B),
            "E5" => Ok(OpName::E5),
            "E6" => Ok(OpName::E6),
            "E7" => Ok(OpName::E7),
            "E8" => Ok(OpName::E8),
            other => Err(EngineError::UnknownOperation(other.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OpName::E1 => "E1",
            OpName::E2 => "E2",
            OpName::E3 => "E3",
            OpName::E4A => "E4A",
            OpName::E4B => "E4B",
            OpName::E5 => "E5",
            OpName::E6 => "E6",
            OpName::E7 => "E7",
            OpName::E8 => "E8",
        }
    }

    /// Apply this interaction to `state` under `ctx`, returning the new
    /// state. `choice` is consulted only by the wildcard.
    pub fn apply<C: WildcardChoice>(
        self,
        state: &SystemState,
        ctx: &StepContext,
        choice: &mut C,
    ) -> Result<SystemState, EngineError> {
        match self {
            OpName::E1 => distort(state),
            OpName::E2 => distort_half(state),
            OpName::E3 => scramble(state),
            OpName::E4A => setup(state),
            OpName::E4B => resolve(state),
            OpName::E5 => merge(state),
            OpName::E6 => blend(state, ctx.source.unwrap_or(RegionName::R1)),
            OpName::E7 => echo(state, ctx),
            OpName::E8 => wildcard(state, ctx, choice),
        }
    }
}

impl fmt::Display for OpName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// E1: distort R1, keyed from R3 + R2.
fn distort(state: &SystemState) -> Result<SystemState, EngineError> {
    let mut s = state.clone();
    let key = mix_bytes(&concat(s.r3.data(), s.r2.data()), MIX_ROUNDS)?;
    let rotated = s.r1.rotate(usize::from(key_byte(&key, 0)?))?;
    s.r1 = rotated.permute(&key)?;
    Ok(s)
}

/// E2: distort only the first half of R1, keyed from R3 + R4.
///
/// The second half of R1 and its total length are preserved.
fn distort_half(state: &SystemState) -> Result<SystemState, EngineError> {
    let mut s = state.clone();
    let key = mix_bytes(&concat(s.r3.data(), s.r4.data()), MIX_ROUNDS)?;
    let half = s.r1.len() / 2;
    let first = rotate_left_bits(&s.r1.data()[..half], usize::from(key_byte(&key, 1)?))?;
    let mut data = permute_bytes(&first, &key)?;
    data.extend_from_slice(&s.r1.data()[half..]);
    s.r1 = Region::new(data);
    Ok(s)
}

/// E3: distort R1 with a deeper scramble, keyed from R3 + R4 + R5.
fn scramble(state: &SystemState) -> Result<SystemState, EngineError> {
    let mut s = state.clone();
    let material = [s.r3.data(), s.r4.data(), s.r5.data()].concat();
    let key = mix_bytes(&material, DEEP_MIX_ROUNDS)?;
    let rotated = s.r1.rotate(usize::from(key_byte(&key, 2)?))?;
    let pad = cycle_to(&key, rotated.len());
    let xored = xor_bytes(rotated.data(), &pad)?;
    let reversed: Vec<u8> = key.iter().rev().copied().collect();
    s.r1 = Region::new(permute_bytes(&xored, &reversed)?);
    Ok(s)
}

/// E4A: setup. Mixes R1 + R4 into a frozen pad, rewrites R2 from it, and
/// perturbs the R3 prefix.
fn setup(state: &SystemState) -> Result<SystemState, EngineError> {
    let mut s = state.clone();
    let frozen = mix_bytes(&concat(s.r1.data(), s.r4.data()), MIX_ROUNDS)?;
    s.r2 = Region::new(cycle_to(&frozen, s.r2.len()));

    let n = s.r3.len().min(frozen.len());
    let mut blended = xor_bytes(&s.r3.data()[..n], &frozen[..n])?;
    blended.extend_from_slice(&s.r3.data()[n..]);
    s.r3 = Region::new(blended);
    Ok(s)
}

/// E4B: resolve. Mixes R2 + R3 into a key, folds it into R1, and folds a
/// salted variant into R4.
fn resolve(state: &SystemState) -> Result<SystemState, EngineError> {
    let mut s = state.clone();
    let key = mix_bytes(&concat(s.r2.data(), s.r3.data()), MIX_ROUNDS)?;

    let pad = cycle_to(&key, s.r1.len());
    s.r1 = Region::new(xor_bytes(s.r1.data(), &pad)?);

    let flag_pad = mix_bytes(&concat(&key, FLAG_SALT), MIX_ROUNDS)?;
    let flag_pad = cycle_to(&flag_pad, s.r4.len());
    s.r4 = Region::new(xor_bytes(s.r4.data(), &flag_pad)?);
    Ok(s)
}

/// E5: merge the R2 prefix into R3.
///
/// The merged prefix covers the first half of R3 (shorter if R2 runs out)
/// and the result is truncated to R3's length.
fn merge(state: &SystemState) -> Result<SystemState, EngineError> {
    let mut s = state.clone();
    let half = s.r3.len() / 2;
    let take = half.min(s.r2.len());
    let mut combined = s.r2.data()[..take].to_vec();
    combined.extend_from_slice(&s.r3.data()[half..]);
    combined.truncate(s.r3.len());
    s.r3 = Region::new(combined);
    Ok(s)
}

/// E6: blend a source region into the R3 prefix.
fn blend(state: &SystemState, source: RegionName) -> Result<SystemState, EngineError> {
    let mut s = state.clone();
    let src = s.region(source).clone();
    let n = s.r3.len().min(src.len());
    let mut blended = xor_bytes(&s.r3.data()[..n], &src.data()[..n])?;
    blended.extend_from_slice(&s.r3.data()[n..]);
    s.r3 = Region::new(blended);
    Ok(s)
}

/// E7: echo. Reapplies the previous delta to a target region.
///
/// The delta is truncated to the target's length before the XOR; a delta
/// shorter than the target fails with a length mismatch. Without an
/// explicit `prev_delta` the delta defaults to a zero buffer of R1's
/// length.
fn echo(state: &SystemState, ctx: &StepContext) -> Result<SystemState, EngineError> {
    let mut s = state.clone();
    let target = ctx.target.unwrap_or(RegionName::R1);
    let zero;
    let prev_delta: &[u8] = match &ctx.prev_delta {
        Some(delta) => delta,
        None => {
            zero = vec![0u8; s.r1.len()];
            &zero
        }
    };
    let region = s.region(target);
    let take = prev_delta.len().min(region.len());
    let echoed = xor_bytes(region.data(), &prev_delta[..take])?;
    s.set_region(target, Region::new(echoed));
    Ok(s)
}

/// E8: wildcard. Applies one interaction picked uniformly from the pool.
///
/// An empty pool is a no-op copy. A pick that lands on the wildcard itself
/// resolves to the no-op copy instead of recursing.
fn wildcard<C: WildcardChoice>(
    state: &SystemState,
    ctx: &StepContext,
    choice: &mut C,
) -> Result<SystemState, EngineError> {
    if ctx.pool.is_empty() {
        return Ok(state.clone());
    }
    let picked = ctx.pool[choice.pick(ctx.pool.len())];
    if picked == OpName::E8 {
        return Ok(state.clone());
    }
    picked.apply(state, ctx, choice)
}

fn concat(a: &[u8], b: &[u8]) -> Vec<u8> {
    [a, b].concat()
}

/// Repeat `pattern` cyclically until it covers `len` bytes.
fn cycle_to(pattern: &[u8], len: usize) -> Vec<u8> {
    pattern.iter().copied().cycle().take(len).collect()
}

/// Index into derived key material.
///
/// Mixed key material is as long as the regions it came from, so a short
/// key only occurs for degenerate region layouts; fail rather than wrap.
fn key_byte(key: &[u8], index: usize) -> Result<u8, EngineError> {
    key.get(index)
        .copied()
        .ok_or(EngineError::InvalidInput("interaction key material too short"))
}
