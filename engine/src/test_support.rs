//! Test-only helpers: deterministic states, fixtures, and choice sources.

use crate::choice::WildcardChoice;
use crate::region::Region;
use crate::state::SystemState;

/// State with recognizable per-region fill bytes (R1=0x11 .. R5=0x55).
pub fn patterned_state(r1: usize, r2: usize, r3: usize, r4: usize, r5: usize) -> SystemState {
    SystemState::new(
        Region::filled(0x11, r1),
        Region::filled(0x22, r2),
        Region::filled(0x33, r3),
        Region::filled(0x44, r4),
        Region::filled(0x55, r5),
    )
}

/// The fixed 64/64/32/32/64 layout used by reproducibility tests:
/// everything zeroed except R3, which is all 0x01.
pub fn reference_state() -> SystemState {
    SystemState::new(
        Region::zeroed(64),
        Region::zeroed(64),
        Region::filled(0x01, 32),
        Region::zeroed(32),
        Region::zeroed(64),
    )
}

/// JSON script fixtures by name.
pub fn script_fixture(name: &str) -> &'static str {
    match name {
        "reference_run" => include_str!("../fixtures/reference_run.json"),
        "wildcard_pool" => include_str!("../fixtures/wildcard_pool.json"),
        other => panic!("unknown fixture '{other}'"),
    }
}

/// Deterministic choice source replaying a scripted pick sequence.
///
/// Picks are clamped into range; once the sequence runs out, every pick
/// is index 0.
pub struct ScriptedChoice {
    picks: Vec<usize>,
    next: usize,
}

impl ScriptedChoice {
    pub fn new(picks: Vec<usize>) -> ScriptedChoice {
        ScriptedChoice { picks, next: 0 }
    }
}

impl WildcardChoice for ScriptedChoice {
    fn pick(&mut self, pool_len: usize) -> usize {
        let pick = self.picks.get(self.next).copied().unwrap_or(0);
        self.next += 1;
        pick % pool_len
    }
}
