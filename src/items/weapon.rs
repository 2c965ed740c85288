//! Weapons

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::category::ItemType;
use super::durability::Durability;
use super::equipment::EquipmentSlot;
use super::item::{equippable_effects, equippable_info, Equippable, ItemBase, ItemBehavior};
use super::stats::StatModifiers;
use crate::error::ItemError;

/// Which power a weapon attacks with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponType {
    Physical,
    Magical,
}

impl WeaponType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeaponType::Physical => "physical",
            WeaponType::Magical => "magical",
        }
    }
}

impl fmt::Display for WeaponType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeaponType {
    type Err = ItemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "physical" => Ok(WeaponType::Physical),
            "magical" | "magic" => Ok(WeaponType::Magical),
            _ => Err(ItemError::invalid("weapon_type", format!("unknown weapon type `{}`", s))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Weapon {
    base: ItemBase,
    weapon_type: WeaponType,
    attack_power: u32,
    magic_attack_power: u32,
    battle_skill_id: Option<u32>,
    durability: Durability,
    stat_modifiers: StatModifiers,
}

impl Weapon {
    pub fn new(base: ItemBase, weapon_type: WeaponType, attack_power: u32, magic_attack_power: u32) -> Self {
        Self {
            base,
            weapon_type,
            attack_power,
            magic_attack_power,
            battle_skill_id: None,
            durability: Durability::default(),
            stat_modifiers: StatModifiers::new(),
        }
    }

    pub fn with_battle_skill(mut self, skill_id: u32) -> Self {
        self.battle_skill_id = Some(skill_id);
        self
    }

    pub fn with_durability(mut self, durability: Durability) -> Self {
        self.durability = durability;
        self
    }

    pub fn with_stat_modifiers(mut self, modifiers: StatModifiers) -> Self {
        self.stat_modifiers = modifiers;
        self
    }

    pub fn weapon_type(&self) -> WeaponType {
        self.weapon_type
    }

    pub fn attack_power(&self) -> u32 {
        self.attack_power
    }

    pub fn magic_attack_power(&self) -> u32 {
        self.magic_attack_power
    }

    /// Power matching the weapon type
    pub fn power(&self) -> u32 {
        match self.weapon_type {
            WeaponType::Physical => self.attack_power,
            WeaponType::Magical => self.magic_attack_power,
        }
    }

    pub fn battle_skill_id(&self) -> Option<u32> {
        self.battle_skill_id
    }
}

impl ItemBehavior for Weapon {
    fn base(&self) -> &ItemBase {
        &self.base
    }

    fn item_type(&self) -> ItemType {
        ItemType::Weapon
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
        info.insert("type".into(), Value::from("weapon"));
        info.insert("weapon_type".into(), Value::from(self.weapon_type.as_str()));
        info.insert("attack_power".into(), Value::from(self.attack_power));
        info.insert("magic_attack_power".into(), Value::from(self.magic_attack_power));
        info.insert("battle_skill_id".into(), self.battle_skill_id.map_or(Value::Null, Value::from));
        equippable_info(self, &mut info);
        info
    }

    fn effects(&self) -> Map<String, Value> {
        equippable_effects(self)
    }
}

impl Equippable for Weapon {
    fn equipment_slot(&self) -> EquipmentSlot {
        EquipmentSlot::Weapon
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
