//! Durability tracking shared by all equippable items

use serde::{Deserialize, Serialize};

use crate::error::{ItemError, ItemResult};

/// Default durability for equipment that does not specify one
pub const DEFAULT_DURABILITY: u32 = 100;

/// Raw durability as stored by callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurabilityData {
    pub current: u32,
    pub max: u32,
}

/// Current/max wear counters
///
/// `max` is at least 1 and `current` never exceeds it. Stored data is read
/// through `Durability::from_data`, which holds to the same rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DurabilityData", into = "DurabilityData")]
pub struct Durability {
    current: u32,
    max: u32,
}

impl Durability {
    /// Create durability, raising `max` to 1 and clamping `current` to it
    pub fn new(current: u32, max: u32) -> Self {
        let max = max.max(1);
        Self { current: current.min(max), max }
    }

    /// Validate raw data: a zero `max` is rejected, an oversized `current`
    /// is clamped
    pub fn from_data(raw: DurabilityData) -> ItemResult<Self> {
        if raw.max == 0 {
            return Err(ItemError::invalid("durability", "max must be positive"));
        }
        if raw.current > raw.max {
            log::warn!("Durability {} exceeds max {}; clamping", raw.current, raw.max);
        }
        Ok(Self::new(raw.current, raw.max))
    }

    pub fn full(max: u32) -> Self {
        Self::new(max, max)
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn is_broken(&self) -> bool {
        self.current == 0
    }

    /// Fraction of durability left, 0.0..=1.0
    pub fn ratio(&self) -> f32 {
        self.current as f32 / self.max as f32
    }

    /// Wear the item down, never below zero
    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    /// Restore durability, never above max
    pub fn repair(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount).min(self.max);
    }

    pub fn repair_fully(&mut self) {
        self.current = self.max;
    }
}

impl Default for Durability {
    fn default() -> Self {
        Self::full(DEFAULT_DURABILITY)
    }
}

impl TryFrom<DurabilityData> for Durability {
    type Error = ItemError;

    fn try_from(raw: DurabilityData) -> Result<Self, Self::Error> {
        Self::from_data(raw)
    }
}

impl From<Durability> for DurabilityData {
    fn from(durability: Durability) -> Self {
        Self { current: durability.current, max: durability.max }
    }
}
