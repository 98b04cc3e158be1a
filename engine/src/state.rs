use crate::region::{Region, RegionName};

/// Abstract memory layout: five named regions with value-copy semantics.
///
/// `Clone` deep-copies every buffer; states in a run history never share
/// storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemState {
    pub r1: Region,
    pub r2: Region,
    pub r3: Region,
    pub r4: Region,
    pub r5: Region,
}

impl SystemState {
    pub fn new(r1: Region, r2: Region, r3: Region, r4: Region, r5: Region) -> SystemState {
        SystemState { r1, r2, r3, r4, r5 }
    }

    /// Shared access by region name.
    pub fn region(&self, name: RegionName) -> &Region {
        match name {
            RegionName::R1 => &self.r1,
            RegionName::R2 => &self.r2,
            RegionName::R3 => &self.r3,
            RegionName::R4 => &self.r4,
            RegionName::R5 => &self.r5,
        }
    }

    /// Replace a region by name.
    pub fn set_region(&mut self, name: RegionName, region: Region) {
        match name {
            RegionName::R1 => self.r1 = region,
            RegionName::R2 => self.r2 = region,
            RegionName::R3 => self.r3 = region,
            RegionName::R4 => self.r4 = region,
            RegionName::R5 => self.r5 = region,
        };
    }
}
