//! Item definitions
//!
//! The shared item contract, the equippable capability, and the `Item`
//! tagged union over the four concrete variants.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::armor::Armor;
use super::category::{ItemCategory, ItemType, Rarity};
use super::consumable::Consumable;
use super::durability::Durability;
use super::equipment::{CharacterSnapshot, EquipGate, EquipmentSlot};
use super::factory::ItemData;
use super::material::Material;
use super::stats::StatModifiers;
use super::weapon::Weapon;

/// Unique item ID for tracking
pub type ItemId = u64;

/// Fields every item carries regardless of variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemBase {
    id: ItemId,
    name: String,
    description: String,
    category: ItemCategory,
    rarity: Rarity,
    value: u32,
}

impl ItemBase {
    pub fn new(id: ItemId, name: impl Into<String>, category: ItemCategory) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            category,
            rarity: Rarity::COMMON,
            value: 0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    pub fn with_value(mut self, value: u32) -> Self {
        self.value = value;
        self
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> ItemCategory {
        self.category
    }

    pub fn rarity(&self) -> Rarity {
        self.rarity
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Name prefixed with the category icon
    pub fn display_name(&self) -> String {
        format!("{} {}", self.category.icon(), self.name)
    }
}

/// Contract shared by every item variant
pub trait ItemBehavior {
    fn base(&self) -> &ItemBase;

    fn item_type(&self) -> ItemType;

    fn can_stack(&self) -> bool;

    fn stack_limit(&self) -> u32;

    fn is_usable(&self) -> bool {
        false
    }

    fn is_equippable(&self) -> bool {
        false
    }

    fn has_durability(&self) -> bool {
        false
    }

    /// Variant-specific details for display
    fn item_info(&self) -> Map<String, Value>;

    /// What the item does when used or equipped
    fn effects(&self) -> Map<String, Value> {
        Map::new()
    }

    fn id(&self) -> ItemId {
        self.base().id()
    }

    fn name(&self) -> &str {
        self.base().name()
    }

    fn description(&self) -> &str {
        self.base().description()
    }

    fn category(&self) -> ItemCategory {
        self.base().category()
    }

    fn rarity(&self) -> Rarity {
        self.base().rarity()
    }

    fn value(&self) -> u32 {
        self.base().value()
    }

    fn display_name(&self) -> String {
        self.base().display_name()
    }

    fn rarity_name(&self) -> &'static str {
        self.rarity().name()
    }

    fn rarity_color(&self) -> (u8, u8, u8) {
        self.rarity().color()
    }
}

/// Capability shared by weapons and armor: a slot, wear, and stat bonuses
pub trait Equippable {
    fn equipment_slot(&self) -> EquipmentSlot;

    fn durability(&self) -> &Durability;

    fn durability_mut(&mut self) -> &mut Durability;

    /// Modifiers as declared, ignoring wear
    fn base_stat_modifiers(&self) -> &StatModifiers;

    /// Modifiers actually granted; nothing while broken
    fn stat_modifiers(&self) -> StatModifiers {
        if self.is_broken() {
            StatModifiers::new()
        } else {
            self.base_stat_modifiers().clone()
        }
    }

    fn is_broken(&self) -> bool {
        self.durability().is_broken()
    }

    fn take_damage(&mut self, amount: u32) {
        self.durability_mut().take_damage(amount);
    }

    fn repair(&mut self, amount: u32) {
        self.durability_mut().repair(amount);
    }

    fn repair_fully(&mut self) {
        self.durability_mut().repair_fully();
    }
}

/// An item of exactly one variant
///
/// Serialized as its `ItemData`; deserializing goes back through the
/// factory checks, so stored items obey the same invariants as built ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ItemData", into = "ItemData")]
pub enum Item {
    Consumable(Consumable),
    Weapon(Weapon),
    Armor(Armor),
    Material(Material),
}

impl Item {
    fn behavior(&self) -> &dyn ItemBehavior {
        match self {
            Item::Consumable(c) => c,
            Item::Weapon(w) => w,
            Item::Armor(a) => a,
            Item::Material(m) => m,
        }
    }

    pub fn as_equippable(&self) -> Option<&dyn Equippable> {
        match self {
            Item::Weapon(w) => Some(w as &dyn Equippable),
            Item::Armor(a) => Some(a as &dyn Equippable),
            _ => None,
        }
    }

    pub fn as_equippable_mut(&mut self) -> Option<&mut dyn Equippable> {
        match self {
            Item::Weapon(w) => Some(w as &mut dyn Equippable),
            Item::Armor(a) => Some(a as &mut dyn Equippable),
            _ => None,
        }
    }

    pub fn as_consumable(&self) -> Option<&Consumable> {
        match self {
            Item::Consumable(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_consumable_mut(&mut self) -> Option<&mut Consumable> {
        match self {
            Item::Consumable(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_weapon(&self) -> Option<&Weapon> {
        match self {
            Item::Weapon(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_armor(&self) -> Option<&Armor> {
        match self {
            Item::Armor(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_material(&self) -> Option<&Material> {
        match self {
            Item::Material(m) => Some(m),
            _ => None,
        }
    }

    /// Slot this item goes into, if it is equippable
    pub fn equipment_slot(&self) -> Option<EquipmentSlot> {
        self.as_equippable().map(|e| e.equipment_slot())
    }

    /// Effective modifiers; empty for non-equippables and broken gear
    pub fn stat_modifiers(&self) -> StatModifiers {
        self.as_equippable().map(|e| e.stat_modifiers()).unwrap_or_default()
    }

    pub fn is_broken(&self) -> bool {
        self.as_equippable().is_some_and(|e| e.is_broken())
    }

    /// Check character-level gating through the supplied gate
    pub fn can_equip_by(&self, character: &CharacterSnapshot, gate: &dyn EquipGate) -> bool {
        self.is_equippable() && gate.allows(character, self)
    }
}

impl ItemBehavior for Item {
    fn base(&self) -> &ItemBase {
        self.behavior().base()
    }

    fn item_type(&self) -> ItemType {
        self.behavior().item_type()
    }

    fn can_stack(&self) -> bool {
        self.behavior().can_stack()
    }

    fn stack_limit(&self) -> u32 {
        self.behavior().stack_limit()
    }

    fn is_usable(&self) -> bool {
        self.behavior().is_usable()
    }

    fn is_equippable(&self) -> bool {
        self.behavior().is_equippable()
    }

    fn has_durability(&self) -> bool {
        self.behavior().has_durability()
    }

    fn item_info(&self) -> Map<String, Value> {
        self.behavior().item_info()
    }

    fn effects(&self) -> Map<String, Value> {
        self.behavior().effects()
    }
}

impl From<Consumable> for Item {
    fn from(c: Consumable) -> Self {
        Item::Consumable(c)
    }
}

impl From<Weapon> for Item {
    fn from(w: Weapon) -> Self {
        Item::Weapon(w)
    }
}

impl From<Armor> for Item {
    fn from(a: Armor) -> Self {
        Item::Armor(a)
    }
}

impl From<Material> for Item {
    fn from(m: Material) -> Self {
        Item::Material(m)
    }
}

/// Shared `item_info` entries for equippable variants
pub(crate) fn equippable_info(item: &dyn Equippable, info: &mut Map<String, Value>) {
    let durability = item.durability();
    info.insert("equipment_slot".into(), Value::from(item.equipment_slot().as_str()));
    info.insert("durability".into(), Value::from(durability.current()));
    info.insert("max_durability".into(), Value::from(durability.max()));
    info.insert("is_broken".into(), Value::from(durability.is_broken()));
}

/// `effects` for equippable variants: the modifiers actually in force
pub(crate) fn equippable_effects(item: &dyn Equippable) -> Map<String, Value> {
    item.stat_modifiers()
        .iter()
        .map(|(stat, delta)| (stat.as_str().to_string(), Value::from(delta)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::equipment::AllowAll;
    use crate::items::stats::Stat;
    use crate::items::weapon::WeaponType;

    fn sword() -> Item {
        let base = ItemBase::new(7, "Iron Sword", ItemCategory::Weapon)
            .with_rarity(Rarity::UNCOMMON)
            .with_value(50);
        Weapon::new(base, WeaponType::Physical, 12, 0)
            .with_durability(Durability::full(10))
            .with_stat_modifiers(StatModifiers::new().with(Stat::Attack, 3))
            .into()
    }

    #[test]
    fn test_display_metadata() {
        let item = sword();
        assert_eq!(item.display_name(), "⚔️ Iron Sword");
        assert_eq!(item.rarity_name(), "Uncommon");
        assert_eq!(item.rarity_color(), (100, 255, 100));
    }

    #[test]
    fn test_flags_dispatch_to_variant() {
        let item = sword();
        assert_eq!(item.item_type(), ItemType::Weapon);
        assert!(item.is_equippable());
        assert!(item.has_durability());
        assert!(!item.is_usable());
        assert!(!item.can_stack());
        assert_eq!(item.stack_limit(), 1);
    }

    #[test]
    fn test_broken_item_grants_nothing() {
        let mut item = sword();
        assert_eq!(item.stat_modifiers().get(Stat::Attack), 3);
        item.as_equippable_mut().unwrap().take_damage(10);
        assert!(item.is_broken());
        assert!(item.stat_modifiers().is_empty());
        assert!(item.effects().is_empty());
    }

    #[test]
    fn test_can_equip_by_uses_gate() {
        let item = sword();
        let novice = CharacterSnapshot::new(1, "knight");
        assert!(item.can_equip_by(&novice, &AllowAll));
        let level_gate = |c: &CharacterSnapshot, i: &Item| c.level >= i.rarity().tier() as u32 * 5;
        assert!(!item.can_equip_by(&novice, &level_gate));
        assert!(item.can_equip_by(&CharacterSnapshot::new(10, "knight"), &level_gate));
    }

    #[test]
    fn test_serde_tag() {
        let json = serde_json::to_value(sword()).unwrap();
        assert_eq!(json["item_type"], "weapon");
        let back: Item = serde_json::from_value(json).unwrap();
        assert_eq!(back, sword());
    }

    #[test]
    fn test_deserialize_clamps_durability() {
        let mut json = serde_json::to_value(sword()).unwrap();
        json["durability"] = serde_json::json!({"current": 50, "max": 10});
        let item: Item = serde_json::from_value(json).unwrap();
        let durability = item.as_equippable().unwrap().durability();
        assert_eq!((durability.current(), durability.max()), (10, 10));
    }

    #[test]
    fn test_deserialize_rejects_invalid_items() {
        let mut zero_max = serde_json::to_value(sword()).unwrap();
        zero_max["durability"] = serde_json::json!({"current": 0, "max": 0});
        assert!(serde_json::from_value::<Item>(zero_max).is_err());

        let helm_in_weapon_slot = serde_json::json!({
            "id": 8, "name": "Helm", "category": "head_equipment",
            "item_type": "armor", "equipment_slot": "weapon"
        });
        assert!(serde_json::from_value::<Item>(helm_in_weapon_slot).is_err());

        let bad_effect = serde_json::json!({
            "id": 9, "name": "Brew", "category": "potion", "effect_type": "heal_xp"
        });
        assert!(serde_json::from_value::<Item>(bad_effect).is_err());
    }

    #[test]
    fn test_deserialize_clamps_remaining_uses() {
        let json = serde_json::json!({
            "id": 10, "name": "Flask", "category": "potion",
            "effect_type": "heal_hp", "effect_value": 5,
            "usage_limit": 2, "remaining_uses": 9
        });
        let item: Item = serde_json::from_value(json).unwrap();
        assert_eq!(item.as_consumable().unwrap().remaining_uses(), Some(2));
    }
}
