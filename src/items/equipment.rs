//! Equipment system
//!
//! Manages equipped items per owner and calculates total bonuses.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::category::ItemCategory;
use super::item::{Item, ItemBehavior, ItemId};
use super::stats::StatModifiers;
use super::weapon::Weapon;
use crate::error::{ItemError, ItemResult};

/// Equipment slot for wearable items
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    Weapon,
    Head,
    Body,
    Foot,
    Shield,
    Accessory,
    Bag,
}

impl EquipmentSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentSlot::Weapon => "weapon",
            EquipmentSlot::Head => "head",
            EquipmentSlot::Body => "body",
            EquipmentSlot::Foot => "foot",
            EquipmentSlot::Shield => "shield",
            EquipmentSlot::Accessory => "accessory",
            EquipmentSlot::Bag => "bag",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EquipmentSlot::Weapon => "Weapon",
            EquipmentSlot::Head => "Head",
            EquipmentSlot::Body => "Body",
            EquipmentSlot::Foot => "Feet",
            EquipmentSlot::Shield => "Shield",
            EquipmentSlot::Accessory => "Accessory",
            EquipmentSlot::Bag => "Bag",
        }
    }

    /// Slot an item of this category is worn in
    pub fn for_category(category: ItemCategory) -> Option<EquipmentSlot> {
        match category {
            ItemCategory::Weapon => Some(EquipmentSlot::Weapon),
            ItemCategory::HeadEquipment => Some(EquipmentSlot::Head),
            ItemCategory::BodyEquipment => Some(EquipmentSlot::Body),
            ItemCategory::FootEquipment => Some(EquipmentSlot::Foot),
            ItemCategory::Shield => Some(EquipmentSlot::Shield),
            ItemCategory::Accessory => Some(EquipmentSlot::Accessory),
            ItemCategory::Bag => Some(EquipmentSlot::Bag),
            ItemCategory::Potion | ItemCategory::Material => None,
        }
    }

    /// Get all slots in display order
    pub fn all() -> &'static [EquipmentSlot] {
        &[
            EquipmentSlot::Weapon,
            EquipmentSlot::Head,
            EquipmentSlot::Body,
            EquipmentSlot::Foot,
            EquipmentSlot::Shield,
            EquipmentSlot::Accessory,
            EquipmentSlot::Bag,
        ]
    }
}

impl fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EquipmentSlot {
    type Err = ItemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let normalized = normalized.strip_suffix("_equipment").unwrap_or(&normalized);
        EquipmentSlot::all()
            .iter()
            .copied()
            .find(|slot| slot.as_str() == normalized)
            .ok_or_else(|| ItemError::InvalidEquipSlot(s.to_string()))
    }
}

/// What the equipment layer knows about the character putting gear on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSnapshot {
    pub level: u32,
    pub class_name: String,
}

impl CharacterSnapshot {
    pub fn new(level: u32, class_name: impl Into<String>) -> Self {
        Self { level, class_name: class_name.into() }
    }
}

/// Character-level equip rule supplied by the embedding game
pub trait EquipGate {
    fn allows(&self, character: &CharacterSnapshot, item: &Item) -> bool;
}

impl<F> EquipGate for F
where
    F: Fn(&CharacterSnapshot, &Item) -> bool,
{
    fn allows(&self, character: &CharacterSnapshot, item: &Item) -> bool {
        self(character, item)
    }
}

/// Gate that lets anyone equip anything
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl EquipGate for AllowAll {
    fn allows(&self, _character: &CharacterSnapshot, _item: &Item) -> bool {
        true
    }
}

/// Result of a successful `equip`
#[derive(Debug, Clone, PartialEq)]
pub struct EquipOutcome {
    pub slot: EquipmentSlot,
    /// Item that previously occupied the slot, handed back to the caller
    pub displaced: Option<Item>,
}

/// Equipped items of one owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EquipmentSetData")]
pub struct EquipmentSet {
    owner_id: u64,
    /// Slots this owner may use
    schema: BTreeSet<EquipmentSlot>,
    /// Items in each slot
    slots: HashMap<EquipmentSlot, Item>,
}

/// Stored form of an `EquipmentSet`, re-equipped item by item on load
#[derive(Deserialize)]
struct EquipmentSetData {
    owner_id: u64,
    schema: BTreeSet<EquipmentSlot>,
    slots: HashMap<EquipmentSlot, Item>,
}

impl TryFrom<EquipmentSetData> for EquipmentSet {
    type Error = ItemError;

    fn try_from(raw: EquipmentSetData) -> Result<Self, Self::Error> {
        let mut set = EquipmentSet { owner_id: raw.owner_id, schema: raw.schema, slots: HashMap::new() };
        for (slot, item) in raw.slots {
            if item.equipment_slot() != Some(slot) {
                return Err(ItemError::InvalidEquipSlot(format!("{} stored in the {} slot", item.name(), slot)));
            }
            set.equip(item)?;
        }
        Ok(set)
    }
}

impl EquipmentSet {
    /// Empty set with every slot available
    pub fn new(owner_id: u64) -> Self {
        Self::with_slots(owner_id, EquipmentSlot::all())
    }

    /// Empty set restricted to `slots`
    pub fn with_slots(owner_id: u64, slots: &[EquipmentSlot]) -> Self {
        Self {
            owner_id,
            schema: slots.iter().copied().collect(),
            slots: HashMap::new(),
        }
    }

    pub fn owner_id(&self) -> u64 {
        self.owner_id
    }

    pub fn has_slot(&self, slot: EquipmentSlot) -> bool {
        self.schema.contains(&slot)
    }

    /// Equip an item, returning the previously equipped item if any
    pub fn equip(&mut self, item: Item) -> ItemResult<EquipOutcome> {
        let slot = item
            .equipment_slot()
            .ok_or_else(|| ItemError::NotEquippable { name: item.name().to_string() })?;

        if !self.has_slot(slot) {
            return Err(ItemError::InvalidEquipSlot(format!(
                "owner {} has no {} slot",
                self.owner_id, slot
            )));
        }

        if let Some(other) = self.slot_of(item.id()).filter(|other| *other != slot) {
            return Err(ItemError::AlreadyEquipped { id: item.id(), slot: other });
        }

        log::info!("Owner {} equipped {} in {} slot", self.owner_id, item.name(), slot);
        let displaced = self.slots.insert(slot, item);
        if let Some(previous) = &displaced {
            log::debug!("{} returned to owner {}", previous.name(), self.owner_id);
        }

        Ok(EquipOutcome { slot, displaced })
    }

    /// Equip after checking the character against `gate`
    pub fn equip_for(
        &mut self,
        item: Item,
        character: &CharacterSnapshot,
        gate: &dyn EquipGate,
    ) -> ItemResult<EquipOutcome> {
        if item.is_equippable() && !item.can_equip_by(character, gate) {
            return Err(ItemError::EquipConditionNotMet(format!(
                "{} (level {}) cannot equip {}",
                character.class_name,
                character.level,
                item.name()
            )));
        }
        self.equip(item)
    }

    /// Unequip an item from a slot
    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<Item> {
        let item = self.slots.remove(&slot);
        if let Some(item) = &item {
            log::info!("Owner {} unequipped {}", self.owner_id, item.name());
        }
        item
    }

    /// Get item in a slot
    pub fn get(&self, slot: EquipmentSlot) -> Option<&Item> {
        self.slots.get(&slot)
    }

    /// Check if a slot is empty
    pub fn is_empty(&self, slot: EquipmentSlot) -> bool {
        !self.slots.contains_key(&slot)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Slot currently holding `id`
    pub fn slot_of(&self, id: ItemId) -> Option<EquipmentSlot> {
        self.slots.iter().find(|(_, item)| item.id() == id).map(|(slot, _)| *slot)
    }

    /// Equipped weapon, broken or not
    pub fn weapon(&self) -> Option<&Weapon> {
        self.get(EquipmentSlot::Weapon).and_then(Item::as_weapon)
    }

    /// Read-only snapshot in slot order
    pub fn get_equipped_items(&self) -> BTreeMap<EquipmentSlot, &Item> {
        self.slots.iter().map(|(slot, item)| (*slot, item)).collect()
    }

    /// Sum of modifiers over all equipped items; broken items add nothing
    pub fn get_total_stats(&self) -> StatModifiers {
        let mut total = StatModifiers::new();
        for item in self.slots.values() {
            total.merge(&item.stat_modifiers());
        }
        total
    }

    /// Wear down the item in `slot`; returns whether it is now broken
    pub fn damage_slot(&mut self, slot: EquipmentSlot, amount: u32) -> Option<bool> {
        let item = self.slots.get_mut(&slot)?.as_equippable_mut()?;
        let was_broken = item.is_broken();
        item.take_damage(amount);
        let broken = item.is_broken();
        if broken && !was_broken {
            log::info!("Owner {}'s {} gear broke", self.owner_id, slot);
        }
        Some(broken)
    }

    pub fn repair_slot(&mut self, slot: EquipmentSlot, amount: u32) -> Option<u32> {
        let item = self.slots.get_mut(&slot)?.as_equippable_mut()?;
        item.repair(amount);
        Some(item.durability().current())
    }

    pub fn repair_all(&mut self) {
        for item in self.slots.values_mut() {
            if let Some(gear) = item.as_equippable_mut() {
                gear.repair_fully();
            }
        }
    }

    /// Slots whose items are currently broken
    pub fn broken_items(&self) -> Vec<EquipmentSlot> {
        let mut broken: Vec<_> = self
            .slots
            .iter()
            .filter(|(_, item)| item.is_broken())
            .map(|(slot, _)| *slot)
            .collect();
        broken.sort();
        broken
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::armor::Armor;
    use crate::items::category::Rarity;
    use crate::items::consumable::{Consumable, EffectType};
    use crate::items::durability::Durability;
    use crate::items::item::ItemBase;
    use crate::items::stats::Stat;
    use crate::items::weapon::WeaponType;

    fn weapon(id: ItemId, name: &str, attack: i32) -> Item {
        Weapon::new(ItemBase::new(id, name, ItemCategory::Weapon), WeaponType::Physical, 10, 0)
            .with_durability(Durability::full(10))
            .with_stat_modifiers(StatModifiers::new().with(Stat::Attack, attack))
            .into()
    }

    fn helm(id: ItemId, defense: i32) -> Item {
        Armor::for_category(ItemBase::new(id, "Helm", ItemCategory::HeadEquipment).with_rarity(Rarity::RARE))
            .unwrap()
            .with_stat_modifiers(StatModifiers::new().with(Stat::Defense, defense).with(Stat::Attack, 1))
            .into()
    }

    #[test]
    fn test_equip_into_occupied_slot_displaces() {
        let mut set = EquipmentSet::new(1);
        assert!(set.equip(weapon(1, "A", 2)).unwrap().displaced.is_none());
        let outcome = set.equip(weapon(2, "B", 3)).unwrap();
        assert_eq!(outcome.slot, EquipmentSlot::Weapon);
        assert_eq!(outcome.displaced.unwrap().id(), 1);
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(EquipmentSlot::Weapon).unwrap().id(), 2);
    }

    #[test]
    fn test_equip_rejects_non_equippable() {
        let mut set = EquipmentSet::new(1);
        let potion: Item =
            Consumable::new(ItemBase::new(5, "Potion", ItemCategory::Potion), EffectType::HealHp, 5).into();
        assert!(matches!(set.equip(potion), Err(ItemError::NotEquippable { .. })));
    }

    #[test]
    fn test_equip_outside_schema() {
        let mut set = EquipmentSet::with_slots(1, &[EquipmentSlot::Weapon]);
        assert!(matches!(set.equip(helm(3, 2)), Err(ItemError::InvalidEquipSlot(_))));
    }

    #[test]
    fn test_item_occupies_one_slot() {
        let mut set = EquipmentSet::new(1);
        set.equip(weapon(9, "Blade", 1)).unwrap();
        let err = set.equip(helm(9, 1)).unwrap_err();
        assert_eq!(err, ItemError::AlreadyEquipped { id: 9, slot: EquipmentSlot::Weapon });
    }

    #[test]
    fn test_total_stats_sum() {
        let mut set = EquipmentSet::new(1);
        set.equip(weapon(1, "A", 5)).unwrap();
        set.equip(helm(2, 3)).unwrap();
        let total = set.get_total_stats();
        assert_eq!(total.get(Stat::Attack), 6);
        assert_eq!(total.get(Stat::Defense), 3);
    }

    #[test]
    fn test_broken_items_contribute_nothing() {
        let mut set = EquipmentSet::new(1);
        set.equip(weapon(1, "A", 5)).unwrap();
        set.equip(helm(2, 3)).unwrap();
        assert_eq!(set.damage_slot(EquipmentSlot::Weapon, 10), Some(true));
        assert_eq!(set.broken_items(), vec![EquipmentSlot::Weapon]);
        assert_eq!(set.get_total_stats().get(Stat::Attack), 1);

        set.repair_all();
        assert!(set.broken_items().is_empty());
        assert_eq!(set.get_total_stats().get(Stat::Attack), 6);
    }

    #[test]
    fn test_unequip() {
        let mut set = EquipmentSet::new(1);
        set.equip(helm(2, 3)).unwrap();
        assert_eq!(set.unequip(EquipmentSlot::Head).unwrap().id(), 2);
        assert!(set.unequip(EquipmentSlot::Head).is_none());
        assert!(set.is_empty(EquipmentSlot::Head));
    }

    #[test]
    fn test_gated_equip() {
        let mut set = EquipmentSet::new(1);
        let mages_only = |c: &CharacterSnapshot, _: &Item| c.class_name == "mage";
        let knight = CharacterSnapshot::new(5, "knight");
        assert!(matches!(
            set.equip_for(weapon(1, "A", 1), &knight, &mages_only),
            Err(ItemError::EquipConditionNotMet(_))
        ));
        assert!(set.equip_for(weapon(1, "A", 1), &CharacterSnapshot::new(5, "mage"), &mages_only).is_ok());
    }

    #[test]
    fn test_slot_parse() {
        assert_eq!("head_equipment".parse::<EquipmentSlot>().unwrap(), EquipmentSlot::Head);
        assert_eq!("Shield".parse::<EquipmentSlot>().unwrap(), EquipmentSlot::Shield);
        assert!(matches!("tail".parse::<EquipmentSlot>(), Err(ItemError::InvalidEquipSlot(_))));
    }

    #[test]
    fn test_serde_reequips() {
        let mut set = EquipmentSet::new(4);
        set.equip(weapon(1, "A", 2)).unwrap();
        set.equip(helm(2, 3)).unwrap();
        let json = serde_json::to_value(&set).unwrap();
        let back: EquipmentSet = serde_json::from_value(json).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn test_serde_rejects_misplaced_item() {
        let mut set = EquipmentSet::new(4);
        set.equip(helm(2, 3)).unwrap();
        let mut json = serde_json::to_value(&set).unwrap();
        let helm = json["slots"]["head"].take();
        json["slots"] = serde_json::json!({ "weapon": helm });
        assert!(serde_json::from_value::<EquipmentSet>(json).is_err());
    }

    #[test]
    fn test_serde_rejects_slot_outside_schema() {
        let mut set = EquipmentSet::with_slots(4, &[EquipmentSlot::Head]);
        set.equip(helm(2, 3)).unwrap();
        let mut json = serde_json::to_value(&set).unwrap();
        json["schema"] = serde_json::json!(["weapon"]);
        assert!(serde_json::from_value::<EquipmentSet>(json).is_err());
    }

    #[test]
    fn test_snapshot_ordered() {
        let mut set = EquipmentSet::new(1);
        set.equip(helm(2, 3)).unwrap();
        set.equip(weapon(1, "A", 1)).unwrap();
        let slots: Vec<_> = set.get_equipped_items().keys().copied().collect();
        assert_eq!(slots, vec![EquipmentSlot::Weapon, EquipmentSlot::Head]);
    }
}
