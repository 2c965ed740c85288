//! Armor: anything worn outside the weapon slot

use serde_json::{Map, Value};

use super::category::{ItemCategory, ItemType};
use super::durability::Durability;
use super::equipment::EquipmentSlot;
use super::item::{equippable_effects, equippable_info, Equippable, ItemBase, ItemBehavior};
use super::stats::StatModifiers;
use crate::error::{ItemError, ItemResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Armor {
    base: ItemBase,
    equipment_slot: EquipmentSlot,
    durability: Durability,
    stat_modifiers: StatModifiers,
}

impl Armor {
    /// Armor for `slot`; the weapon slot is rejected
    pub fn new(base: ItemBase, equipment_slot: EquipmentSlot) -> ItemResult<Self> {
        if equipment_slot == EquipmentSlot::Weapon {
            return Err(ItemError::InvalidEquipSlot(format!(
                "{} cannot be worn in the weapon slot",
                base.name()
            )));
        }
        Ok(Self {
            base,
            equipment_slot,
            durability: Durability::default(),
            stat_modifiers: StatModifiers::new(),
        })
    }

    /// Armor whose slot follows from its category
    pub fn for_category(base: ItemBase) -> ItemResult<Self> {
        let slot = EquipmentSlot::for_category(base.category()).ok_or_else(|| {
            ItemError::InvalidEquipSlot(format!(
                "category `{}` has no armor slot",
                base.category()
            ))
        })?;
        Self::new(base, slot)
    }

    pub fn with_durability(mut self, durability: Durability) -> Self {
        self.durability = durability;
        self
    }

    pub fn with_stat_modifiers(mut self, modifiers: StatModifiers) -> Self {
        self.stat_modifiers = modifiers;
        self
    }

    /// Bags and accessories are worn but rarely fought in
    pub fn is_protective(&self) -> bool {
        matches!(
            self.base.category(),
            ItemCategory::HeadEquipment
                | ItemCategory::BodyEquipment
                | ItemCategory::FootEquipment
                | ItemCategory::Shield
        )
    }
}

impl ItemBehavior for Armor {
    fn base(&self) -> &ItemBase {
        &self.base
    }

    fn item_type(&self) -> ItemType {
        ItemType::Armor
    }

    fn can_stack(&self) -> bool {
        false
    }

    fn stack_limit(&self) -> u32 {
        1
    }

    fn is_equippable(&self) -> bool {
        true
    }

    fn has_durability(&self) -> bool {
        true
    }

    fn item_info(&self) -> Map<String, Value> {
        let mut info = Map::new();
        info.insert("type".into(), Value::from("armor"));
        info.insert("protective".into(), Value::from(self.is_protective()));
        equippable_info(self, &mut info);
        info
    }

    fn effects(&self) -> Map<String, Value> {
        equippable_effects(self)
    }
}

impl Equippable for Armor {
    fn equipment_slot(&self) -> EquipmentSlot {
        self.equipment_slot
    }

    fn durability(&self) -> &Durability {
        &self.durability
    }

    fn durability_mut(&mut self) -> &mut Durability {
        &mut self.durability
    }

    fn base_stat_modifiers(&self) -> &StatModifiers {
        &self.stat_modifiers
    }
}
