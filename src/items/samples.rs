//! Built-in sample catalog
//!
//! Deterministic item data used for demos, tests, and as the fallback
//! catalog when no `items.ron` is present.

use super::category::ItemCategory;
use super::consumable::EffectType;
use super::equipment::EquipmentSlot;
use super::factory::ItemData;
use super::stats::Stat;
use super::weapon::WeaponType;

/// Every sample, in catalog order
pub fn standard_samples() -> Vec<ItemData> {
    let mut samples = consumables();
    samples.extend(weapons());
    samples.extend(armors());
    samples.extend(materials());
    samples
}

pub fn consumables() -> Vec<ItemData> {
    vec![herb(), healing_potion(), mana_potion(), stamina_tonic(), elixir()]
}

pub fn weapons() -> Vec<ItemData> {
    vec![bronze_sword(), iron_sword(), oak_staff(), flame_blade(), arcane_scepter(), dragon_slayer()]
}

pub fn armors() -> Vec<ItemData> {
    vec![
        leather_cap(),
        chain_mail(),
        leather_boots(),
        wooden_shield(),
        iron_shield(),
        silver_ring(),
        lucky_charm(),
        travelers_pack(),
    ]
}

pub fn materials() -> Vec<ItemData> {
    vec![iron_ore(), spider_silk(), moonstone(), dragon_scale()]
}

// Consumables

pub fn herb() -> ItemData {
    ItemData::new(101, "Herb", ItemCategory::Potion)
        .with_description("A bitter leaf that closes small wounds.")
        .with_value(10)
        .with_effect(EffectType::HealHp, 20)
        .with_usage_limit(1)
}

pub fn healing_potion() -> ItemData {
    ItemData::new(102, "Healing Potion", ItemCategory::Potion)
        .with_description("Restores 50 HP.")
        .with_rarity(2)
        .with_value(40)
        .with_effect(EffectType::HealHp, 50)
        .with_usage_limit(1)
}

pub fn mana_potion() -> ItemData {
    ItemData::new(103, "Mana Potion", ItemCategory::Potion)
        .with_description("Restores 30 MP.")
        .with_rarity(2)
        .with_value(45)
        .with_effect(EffectType::HealMp, 30)
        .with_usage_limit(1)
}

pub fn stamina_tonic() -> ItemData {
    ItemData::new(104, "Stamina Tonic", ItemCategory::Potion)
        .with_description("Restores 25 SP.")
        .with_value(30)
        .with_effect(EffectType::HealSp, 25)
        .with_usage_limit(1)
}

pub fn elixir() -> ItemData {
    ItemData::new(105, "Elixir", ItemCategory::Potion)
        .with_description("A flask that refills itself, three times.")
        .with_rarity(4)
        .with_value(600)
        .with_effect(EffectType::HealHp, 200)
        .with_use_cost(5)
        .with_usage_limit(3)
        .with_stack_limit(5)
}

// Weapons

pub fn bronze_sword() -> ItemData {
    ItemData::new(201, "Bronze Sword", ItemCategory::Weapon)
        .with_description("A soft blade, but better than fists.")
        .with_value(50)
        .with_weapon(WeaponType::Physical, 15, 0)
        .with_durability(60, 60)
}

pub fn iron_sword() -> ItemData {
    ItemData::new(202, "Iron Sword", ItemCategory::Weapon)
        .with_description("A sturdy iron blade.")
        .with_rarity(2)
        .with_value(120)
        .with_weapon(WeaponType::Physical, 20, 0)
        .with_durability(100, 100)
        .with_modifier(Stat::Attack, 2)
}

pub fn oak_staff() -> ItemData {
    ItemData::new(203, "Oak Staff", ItemCategory::Weapon)
        .with_description("Channels a novice's will into sparks.")
        .with_rarity(2)
        .with_value(110)
        .with_weapon(WeaponType::Magical, 3, 14)
        .with_battle_skill(2)
        .with_durability(80, 80)
        .with_modifier(Stat::MagicAttack, 3)
        .with_modifier(Stat::MaxMp, 10)
}

pub fn flame_blade() -> ItemData {
    ItemData::new(204, "Flame Blade", ItemCategory::Weapon)
        .with_description("A blade wreathed in eternal flame.")
        .with_rarity(3)
        .with_value(480)
        .with_weapon(WeaponType::Physical, 28, 6)
        .with_battle_skill(1)
        .with_durability(120, 120)
        .with_modifier(Stat::Attack, 4)
}

pub fn arcane_scepter() -> ItemData {
    ItemData::new(205, "Arcane Scepter", ItemCategory::Weapon)
        .with_description("Starlight hums inside the crystal head.")
        .with_rarity(4)
        .with_value(1200)
        .with_weapon(WeaponType::Magical, 5, 40)
        .with_battle_skill(3)
        .with_durability(90, 90)
        .with_modifier(Stat::MagicAttack, 8)
        .with_modifier(Stat::Accuracy, 5)
}

pub fn dragon_slayer() -> ItemData {
    ItemData::new(206, "Dragon Slayer", ItemCategory::Weapon)
        .with_description("Forged to split scales the size of doors.")
        .with_rarity(5)
        .with_value(5000)
        .with_weapon(WeaponType::Physical, 65, 0)
        .with_battle_skill(4)
        .with_durability(200, 200)
        .with_modifier(Stat::Attack, 12)
        .with_modifier(Stat::CriticalRate, 5)
}

// Armor

pub fn leather_cap() -> ItemData {
    ItemData::new(301, "Leather Cap", ItemCategory::HeadEquipment)
        .with_description("Keeps the rain and the odd arrow off.")
        .with_value(30)
        .with_durability(40, 40)
        .with_modifier(Stat::Defense, 2)
}

pub fn chain_mail() -> ItemData {
    ItemData::new(302, "Chain Mail", ItemCategory::BodyEquipment)
        .with_description("Interlocking rings of iron.")
        .with_rarity(2)
        .with_value(180)
        .with_durability(120, 120)
        .with_modifier(Stat::Defense, 6)
        .with_modifier(Stat::Evasion, -2)
}

pub fn leather_boots() -> ItemData {
    ItemData::new(303, "Leather Boots", ItemCategory::FootEquipment)
        .with_description("Simple leather boots.")
        .with_value(35)
        .with_durability(50, 50)
        .with_modifier(Stat::Defense, 1)
        .with_modifier(Stat::Evasion, 2)
}

pub fn wooden_shield() -> ItemData {
    ItemData::new(304, "Wooden Shield", ItemCategory::Shield)
        .with_description("A simple wooden shield.")
        .with_value(40)
        .with_durability(60, 60)
        .with_modifier(Stat::Defense, 3)
}

pub fn iron_shield() -> ItemData {
    ItemData::new(305, "Iron Shield", ItemCategory::Shield)
        .with_description("A sturdy iron shield.")
        .with_rarity(2)
        .with_value(90)
        .with_durability(100, 100)
        .with_modifier(Stat::Defense, 5)
        .with_modifier(Stat::MagicDefense, 1)
}

pub fn silver_ring() -> ItemData {
    ItemData::new(306, "Silver Ring", ItemCategory::Accessory)
        .with_description("A polished silver ring that wards off curses.")
        .with_rarity(2)
        .with_value(150)
        .with_durability(30, 30)
        .with_modifier(Stat::MagicDefense, 3)
}

pub fn lucky_charm() -> ItemData {
    ItemData::new(307, "Lucky Charm", ItemCategory::Accessory)
        .with_description("A four-leaf clover sealed in resin.")
        .with_rarity(3)
        .with_value(320)
        .with_slot(EquipmentSlot::Accessory)
        .with_durability(30, 30)
        .with_modifier(Stat::CriticalRate, 5)
        .with_modifier(Stat::Accuracy, 3)
}

pub fn travelers_pack() -> ItemData {
    ItemData::new(308, "Traveler's Pack", ItemCategory::Bag)
        .with_description("Room for rations and a spare pair of socks.")
        .with_value(60)
        .with_durability(80, 80)
        .with_modifier(Stat::MaxSp, 5)
}

// Materials

pub fn iron_ore() -> ItemData {
    ItemData::new(401, "Iron Ore", ItemCategory::Material)
        .with_description("Smelts into ingots.")
        .with_value(5)
}

pub fn spider_silk() -> ItemData {
    ItemData::new(402, "Spider Silk", ItemCategory::Material)
        .with_description("Light, strong thread.")
        .with_rarity(2)
        .with_value(15)
}

pub fn moonstone() -> ItemData {
    ItemData::new(403, "Moonstone", ItemCategory::Material)
        .with_description("Glows faintly at night.")
        .with_rarity(3)
        .with_value(80)
        .with_stack_limit(99)
}

pub fn dragon_scale() -> ItemData {
    ItemData::new(404, "Dragon Scale", ItemCategory::Material)
        .with_description("Still warm.")
        .with_rarity(5)
        .with_value(900)
        .with_stack_limit(10)
}
