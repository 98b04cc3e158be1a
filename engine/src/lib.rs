//! Deterministic region-mixing engine.
//!
//! Five named byte regions ([`state::SystemState`]) are transformed by a
//! closed registry of pure interactions ([`ops::OpName`]) built from
//! bit-level mixing primitives ([`mixer`]). A sequential runner
//! ([`run::run_script`]) replays an ordered script over an initial state
//! and returns the full history of intermediate states, threading the
//! previous R1 delta between steps for echo-style interactions.
//!
//! The architecture keeps everything pure and replayable:
//!
//! - Interactions never mutate their input state; buffers are never
//!   aliased across history entries.
//! - The single point of non-determinism (the wildcard interaction's pool
//!   pick) sits behind the injectable [`choice::WildcardChoice`] seam, so
//!   whole runs replay byte-for-byte under test.
//! - External step definitions are JSON documents validated in layers
//!   ([`parse`]): schema for structure, the registry for vocabulary,
//!   semantic invariants last.
//!
//! The mixing primitives are reproducible scramblers, not cryptography.

pub mod choice;
pub mod error;
pub mod logging;
pub mod mixer;
pub mod ops;
pub mod parse;
pub mod region;
pub mod run;
pub mod script;
pub mod state;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
