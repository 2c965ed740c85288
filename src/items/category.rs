//! Item taxonomy
//!
//! Categories, variant tags and rarity tiers with their display metadata.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ItemError;

/// Item rarity tier, 1 (common) through 5 (legendary)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rarity(u8);

impl Rarity {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub const COMMON: Rarity = Rarity(1);
    pub const UNCOMMON: Rarity = Rarity(2);
    pub const RARE: Rarity = Rarity(3);
    pub const EPIC: Rarity = Rarity(4);
    pub const LEGENDARY: Rarity = Rarity(5);

    /// Build a rarity, rejecting tiers outside 1..=5
    pub fn new(tier: u8) -> Result<Self, ItemError> {
        if (Self::MIN..=Self::MAX).contains(&tier) {
            Ok(Rarity(tier))
        } else {
            Err(ItemError::invalid(
                "rarity",
                format!("{} is outside {}..={}", tier, Self::MIN, Self::MAX),
            ))
        }
    }

    pub fn tier(&self) -> u8 {
        self.0
    }

    /// Get rarity name
    pub fn name(&self) -> &'static str {
        match self.0 {
            1 => "Common",
            2 => "Uncommon",
            3 => "Rare",
            4 => "Epic",
            _ => "Legendary",
        }
    }

    /// Get display color RGB
    pub fn color(&self) -> (u8, u8, u8) {
        match self.0 {
            1 => (200, 200, 200), // White
            2 => (100, 255, 100), // Green
            3 => (100, 150, 255), // Blue
            4 => (200, 100, 255), // Purple
            _ => (255, 180, 50),  // Orange
        }
    }

    /// Hex form of `color`, as the web layer wants it
    pub fn color_hex(&self) -> String {
        let (r, g, b) = self.color();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    pub fn all() -> impl Iterator<Item = Rarity> {
        (Self::MIN..=Self::MAX).map(Rarity)
    }
}

impl Default for Rarity {
    fn default() -> Self {
        Rarity::COMMON
    }
}

impl TryFrom<u8> for Rarity {
    type Error = ItemError;

    fn try_from(tier: u8) -> Result<Self, Self::Error> {
        Rarity::new(tier)
    }
}

impl From<Rarity> for u8 {
    fn from(rarity: Rarity) -> u8 {
        rarity.0
    }
}

/// Item categories as shown in shops and inventories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    Potion,
    Weapon,
    HeadEquipment,
    BodyEquipment,
    FootEquipment,
    Shield,
    Accessory,
    Bag,
    Material,
}

impl ItemCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemCategory::Potion => "potion",
            ItemCategory::Weapon => "weapon",
            ItemCategory::HeadEquipment => "head_equipment",
            ItemCategory::BodyEquipment => "body_equipment",
            ItemCategory::FootEquipment => "foot_equipment",
            ItemCategory::Shield => "shield",
            ItemCategory::Accessory => "accessory",
            ItemCategory::Bag => "bag",
            ItemCategory::Material => "material",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ItemCategory::Potion => "Potion",
            ItemCategory::Weapon => "Weapon",
            ItemCategory::HeadEquipment => "Head Equipment",
            ItemCategory::BodyEquipment => "Body Equipment",
            ItemCategory::FootEquipment => "Foot Equipment",
            ItemCategory::Shield => "Shield",
            ItemCategory::Accessory => "Accessory",
            ItemCategory::Bag => "Bag",
            ItemCategory::Material => "Material",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ItemCategory::Potion => "🧪",
            ItemCategory::Weapon => "⚔️",
            ItemCategory::HeadEquipment => "⛑️",
            ItemCategory::BodyEquipment => "👕",
            ItemCategory::FootEquipment => "👢",
            ItemCategory::Shield => "🛡️",
            ItemCategory::Accessory => "💍",
            ItemCategory::Bag => "🎒",
            ItemCategory::Material => "🪨",
        }
    }

    /// Badge color used by list views for this category
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            ItemCategory::Potion => (220, 80, 80),
            ItemCategory::Weapon => (230, 140, 60),
            ItemCategory::HeadEquipment
            | ItemCategory::BodyEquipment
            | ItemCategory::FootEquipment => (90, 140, 220),
            ItemCategory::Shield => (120, 120, 200),
            ItemCategory::Accessory => (210, 180, 60),
            ItemCategory::Bag => (150, 110, 70),
            ItemCategory::Material => (140, 140, 140),
        }
    }

    /// Get sort value for grouping (lower = appears first)
    pub fn sort_value(&self) -> u8 {
        match self {
            ItemCategory::Weapon => 0,
            ItemCategory::HeadEquipment => 1,
            ItemCategory::BodyEquipment => 2,
            ItemCategory::FootEquipment => 3,
            ItemCategory::Shield => 4,
            ItemCategory::Accessory => 5,
            ItemCategory::Bag => 6,
            ItemCategory::Potion => 7,
            ItemCategory::Material => 8,
        }
    }

    /// Check if this is an equipment category
    pub fn is_equipment(&self) -> bool {
        !matches!(self, ItemCategory::Potion | ItemCategory::Material)
    }

    pub fn all() -> &'static [ItemCategory] {
        &[
            ItemCategory::Potion,
            ItemCategory::Weapon,
            ItemCategory::HeadEquipment,
            ItemCategory::BodyEquipment,
            ItemCategory::FootEquipment,
            ItemCategory::Shield,
            ItemCategory::Accessory,
            ItemCategory::Bag,
            ItemCategory::Material,
        ]
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemCategory {
    type Err = ItemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        ItemCategory::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| ItemError::UnknownCategory(s.to_string()))
    }
}

/// Concrete variant backing an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Consumable,
    Weapon,
    Armor,
    Material,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Consumable => "consumable",
            ItemType::Weapon => "weapon",
            ItemType::Armor => "armor",
            ItemType::Material => "material",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = ItemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "consumable" => Ok(ItemType::Consumable),
            "weapon" => Ok(ItemType::Weapon),
            "armor" => Ok(ItemType::Armor),
            "material" => Ok(ItemType::Material),
            _ => Err(ItemError::UnknownItemType(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_bounds() {
        assert!(Rarity::new(0).is_err());
        assert!(Rarity::new(6).is_err());
        assert_eq!(Rarity::new(3).unwrap().name(), "Rare");
        assert_eq!(Rarity::all().count(), 5);
    }

    #[test]
    fn test_rarity_color_hex() {
        assert_eq!(Rarity::COMMON.color_hex(), "#c8c8c8");
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("head_equipment".parse::<ItemCategory>().unwrap(), ItemCategory::HeadEquipment);
        assert_eq!(" Potion ".parse::<ItemCategory>().unwrap(), ItemCategory::Potion);
        assert_eq!(
            "gizmo".parse::<ItemCategory>(),
            Err(ItemError::UnknownCategory("gizmo".to_string()))
        );
    }

    #[test]
    fn test_category_round_trips_through_str() {
        for category in ItemCategory::all() {
            assert_eq!(category.as_str().parse::<ItemCategory>().unwrap(), *category);
        }
    }

    #[test]
    fn test_item_type_parse() {
        assert_eq!("Weapon".parse::<ItemType>().unwrap(), ItemType::Weapon);
        assert_eq!(
            "unknown".parse::<ItemType>(),
            Err(ItemError::UnknownItemType("unknown".to_string()))
        );
    }

    #[test]
    fn test_rarity_deserialize_rejects_out_of_range() {
        assert!(serde_json::from_str::<Rarity>("9").is_err());
        assert_eq!(serde_json::from_str::<Rarity>("2").unwrap(), Rarity::UNCOMMON);
    }
}
