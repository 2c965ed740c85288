//! Item system

pub mod category;
pub mod stats;
pub mod durability;
pub mod item;
pub mod consumable;
pub mod weapon;
pub mod armor;
pub mod material;
pub mod equipment;
pub mod inventory;
pub mod factory;
pub mod samples;

pub use category::{ItemCategory, ItemType, Rarity};
pub use stats::{Stat, StatModifiers, Vitals, STAT_LIMIT};
pub use durability::{Durability, DurabilityData};
pub use item::{Equippable, Item, ItemBase, ItemBehavior, ItemId};
pub use consumable::{Consumable, ConsumeOutcome, EffectType, UsageLimit};
pub use weapon::{Weapon, WeaponType};
pub use armor::Armor;
pub use material::Material;
pub use equipment::{AllowAll, CharacterSnapshot, EquipGate, EquipOutcome, EquipmentSet, EquipmentSlot};
pub use inventory::{Inventory, InventoryEntry};
pub use factory::{ItemData, ItemFactory, TypeRegistry};
