//! Inventory system
//!
//! Holds an owner's unequipped items as stacks. Displaced equipment lands
//! here and consumables are used from here.

use serde::{Deserialize, Serialize};

use super::consumable::ConsumeOutcome;
use super::item::{Item, ItemBehavior, ItemId};
use super::stats::Vitals;
use crate::error::{ItemError, ItemResult};

/// Default number of stacks an inventory holds
pub const DEFAULT_CAPACITY: usize = 40;

/// One stack of identical items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub item: Item,
    pub quantity: u32,
}

/// Player inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "InventoryData")]
pub struct Inventory {
    entries: Vec<InventoryEntry>,
    capacity: usize,
}

/// Stored form of an `Inventory`, checked against capacity and stack limits
#[derive(Deserialize)]
struct InventoryData {
    entries: Vec<InventoryEntry>,
    capacity: usize,
}

impl TryFrom<InventoryData> for Inventory {
    type Error = ItemError;

    fn try_from(raw: InventoryData) -> Result<Self, Self::Error> {
        if raw.entries.len() > raw.capacity {
            return Err(ItemError::InventoryFull { capacity: raw.capacity });
        }
        for entry in &raw.entries {
            if entry.quantity == 0 || entry.quantity > entry.item.stack_limit() {
                return Err(ItemError::invalid(
                    "quantity",
                    format!("{} x{} outside 1..={}", entry.item.name(), entry.quantity, entry.item.stack_limit()),
                ));
            }
        }
        Ok(Self { entries: raw.entries, capacity: raw.capacity })
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl Inventory {
    /// Create a new inventory holding at most `capacity` stacks
    pub fn new(capacity: usize) -> Self {
        Self { entries: Vec::new(), capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of stacks
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    pub fn entries(&self) -> &[InventoryEntry] {
        &self.entries
    }

    /// Add one item, stacking onto a matching stack with room
    pub fn add(&mut self, item: Item) -> ItemResult<()> {
        if let Some(index) = self.open_stack(&item) {
            self.entries[index].quantity += 1;
            return Ok(());
        }

        if self.is_full() {
            return Err(ItemError::InventoryFull { capacity: self.capacity });
        }
        log::debug!("Added {} to inventory", item.name());
        self.entries.push(InventoryEntry { item, quantity: 1 });
        Ok(())
    }

    /// Stack with room for one more `item`
    fn open_stack(&self, item: &Item) -> Option<usize> {
        if !item.can_stack() {
            return None;
        }
        let limit = item.stack_limit();
        self.entries.iter().position(|e| e.item == *item && e.quantity < limit)
    }

    /// Whether `add(item)` would succeed
    pub fn can_accept(&self, item: &Item) -> bool {
        !self.is_full() || self.open_stack(item).is_some()
    }

    /// Add `quantity` copies; stops at the first failure
    pub fn add_many(&mut self, item: Item, quantity: u32) -> ItemResult<()> {
        for _ in 0..quantity {
            self.add(item.clone())?;
        }
        Ok(())
    }

    /// Get item by ID
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.entries.iter().find(|e| e.item.id() == id).map(|e| &e.item)
    }

    /// Total units of `id` across stacks
    pub fn quantity_of(&self, id: ItemId) -> u32 {
        self.entries
            .iter()
            .filter(|e| e.item.id() == id)
            .map(|e| e.quantity)
            .sum()
    }

    /// Remove one unit of `id`
    pub fn take(&mut self, id: ItemId) -> Option<Item> {
        let index = self.entries.iter().position(|e| e.item.id() == id)?;
        let entry = &mut self.entries[index];
        if entry.quantity > 1 {
            entry.quantity -= 1;
            Some(entry.item.clone())
        } else {
            Some(self.entries.remove(index).item)
        }
    }

    /// Use the consumable `id` on `target`
    ///
    /// A unit used out of a larger stack is split off into its own entry, so
    /// the units left in the stack keep their state. A unit with no uses
    /// left is discarded. A failed call changes nothing.
    pub fn consume(&mut self, id: ItemId, target: &Vitals) -> ItemResult<ConsumeOutcome> {
        let index = self
            .entries
            .iter()
            .position(|e| e.item.id() == id)
            .ok_or(ItemError::ItemNotFound(id))?;

        let mut unit = self.entries[index].item.clone();
        let name = unit.name().to_string();
        let consumable = unit
            .as_consumable_mut()
            .ok_or_else(|| ItemError::UseConditionNotMet(format!("{} cannot be used", name)))?;
        let outcome = consumable.consume(target)?;
        let spent = consumable.is_exhausted();

        if self.entries[index].quantity == 1 {
            if spent {
                self.entries.remove(index);
                log::debug!("{} used up", name);
            } else {
                self.entries[index].item = unit;
            }
            return Ok(outcome);
        }

        if !spent && unit != self.entries[index].item && !self.can_accept(&unit) {
            return Err(ItemError::InventoryFull { capacity: self.capacity });
        }
        self.entries[index].quantity -= 1;
        if spent {
            log::debug!("{} used up", name);
        } else {
            self.add(unit)?;
        }
        Ok(outcome)
    }
}
