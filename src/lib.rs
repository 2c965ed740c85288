//! Armory - item, equipment and combat damage model for RPG backends
//!
//! Items are built from raw data by the factory, carried in an inventory,
//! worn in an equipment set and fed into the damage calculator.

pub mod api;
pub mod combat;
pub mod data;
pub mod error;
pub mod items;

// Re-export commonly used types
pub use combat::{Combatant, CombatStats, DamageCalculator, DamageConfig, DamageResult, SkillBook};
pub use data::DataManager;
pub use error::{ErrorKind, ItemError, ItemResult};
pub use items::{
    EquipmentSet, EquipmentSlot, Equippable, Inventory, Item, ItemBehavior, ItemCategory, ItemData, ItemFactory,
    ItemType, Rarity, TypeRegistry,
};
