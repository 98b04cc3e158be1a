//! Named byte regions and their derived transforms.

use std::fmt;

use crate::error::EngineError;
use crate::mixer::{permute_bytes, rotate_left_bits, xor_bytes};

/// The five fixed region identifiers.
///
/// The engine assigns no semantic meaning to individual regions; callers
/// define interpretation. Access through this enum is exhaustive, so a
/// bad region reference cannot exist past parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionName {
    R1,
    R2,
    R3,
    R4,
    R5,
}

impl RegionName {
    /// All region names, in layout order.
    pub const ALL: [RegionName; 5] = [
        RegionName::R1,
        RegionName::R2,
        RegionName::R3,
        RegionName::R4,
        RegionName::R5,
    ];

    /// Parse an externally supplied region token.
    ///
    /// Fails with [`EngineError::UnknownRegion`] for anything outside
    /// `R1..R5`.
    pub fn parse(token: &str) -> Result<RegionName, EngineError> {
        match token {
            "R1" => Ok(RegionName::R1),
            "R2" => Ok(RegionName::R2),
            "R3" => Ok(RegionName::R3),
            "R4" => Ok(RegionName::R4),
            "R5" => Ok(RegionName::R5),
            other => Err(EngineError::UnknownRegion(other.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RegionName::R1 => "R1",
            RegionName::R2 => "R2",
            RegionName::R3 => "R3",
            RegionName::R4 => "R4",
            RegionName::R5 => "R5",
        }
    }
}

impl fmt::Display for RegionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A byte buffer owned by one [`SystemState`](crate::state::SystemState).
///
/// Derived operations never mutate the receiver; each returns a freshly
/// allocated region. `Clone` deep-copies the buffer, so regions are never
/// aliased across states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region(Vec<u8>);

impl Region {
    pub fn new(data: Vec<u8>) -> Region {
        Region(data)
    }

    /// Region of `len` zero bytes.
    pub fn zeroed(len: usize) -> Region {
        Region(vec![0; len])
    }

    /// Region of `len` copies of `byte`.
    pub fn filled(byte: u8, len: usize) -> Region {
        Region(vec![byte; len])
    }

    pub fn data(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lowercase hex rendering for display and logs.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Position-wise XOR with an equal-length region.
    pub fn xor(&self, other: &Region) -> Result<Region, EngineError> {
        Ok(Region(xor_bytes(&self.0, &other.0)?))
    }

    /// Whole-buffer bit rotation, see [`rotate_left_bits`].
    pub fn rotate(&self, n_bits: usize) -> Result<Region, EngineError> {
        Ok(Region(rotate_left_bits(&self.0, n_bits)?))
    }

    /// Keyed byte permutation, see [`permute_bytes`].
    pub fn permute(&self, key: &[u8]) -> Result<Region, EngineError> {
        Ok(Region(permute_bytes(&self.0, key)?))
    }
}

impl From<Vec<u8>> for Region {
    fn from(data: Vec<u8>) -> Region {
        Region(data)
    }
}
