//! Item factory
//!
//! Turns raw attribute data into the right item variant. Strings coming in
//! from outside are parsed into closed enums here and nowhere else.

use std::collections::{BTreeMap, HashMap};

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::armor::Armor;
use super::category::{ItemCategory, ItemType, Rarity};
use super::consumable::{Consumable, EffectType, UsageLimit};
use super::durability::{Durability, DurabilityData};
use super::equipment::EquipmentSlot;
use super::item::{Equippable, Item, ItemBase, ItemBehavior, ItemId};
use super::material::Material;
use super::samples;
use super::stats::{Stat, StatModifiers};
use super::weapon::{Weapon, WeaponType};
use crate::error::{ItemError, ItemResult};

/// Raw item attributes from a catalog, a save record, or a generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemData {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    pub rarity: u8,
    pub value: u32,

    // Consumable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect_value: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_cost: Option<u32>,
    /// `None` means unlimited
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_uses: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_limit: Option<u32>,

    // Weapon
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weapon_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attack_power: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub magic_attack_power: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battle_skill_id: Option<u32>,

    // Armor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment_slot: Option<String>,

    // Equippable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub durability: Option<DurabilityData>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub stat_modifiers: BTreeMap<String, i32>,
}

impl Default for ItemData {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            description: String::new(),
            category: ItemCategory::Material.as_str().to_string(),
            item_type: None,
            rarity: Rarity::MIN,
            value: 0,
            effect_type: None,
            effect_value: None,
            use_cost: None,
            usage_limit: None,
            remaining_uses: None,
            stack_limit: None,
            weapon_type: None,
            attack_power: None,
            magic_attack_power: None,
            battle_skill_id: None,
            equipment_slot: None,
            durability: None,
            stat_modifiers: BTreeMap::new(),
        }
    }
}

impl ItemData {
    pub fn new(id: ItemId, name: impl Into<String>, category: ItemCategory) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.as_str().to_string(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: ItemId) -> Self {
        self.id = id;
        self
    }

    pub fn with_type(mut self, item_type: ItemType) -> Self {
        self.item_type = Some(item_type.as_str().to_string());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_rarity(mut self, rarity: u8) -> Self {
        self.rarity = rarity;
        self
    }

    pub fn with_value(mut self, value: u32) -> Self {
        self.value = value;
        self
    }

    pub fn with_effect(mut self, effect_type: EffectType, effect_value: i32) -> Self {
        self.effect_type = Some(effect_type.as_str().to_string());
        self.effect_value = Some(effect_value);
        self
    }

    pub fn with_use_cost(mut self, use_cost: u32) -> Self {
        self.use_cost = Some(use_cost);
        self
    }

    pub fn with_usage_limit(mut self, usage_limit: u32) -> Self {
        self.usage_limit = Some(usage_limit);
        self
    }

    pub fn with_stack_limit(mut self, stack_limit: u32) -> Self {
        self.stack_limit = Some(stack_limit);
        self
    }

    pub fn with_weapon(mut self, weapon_type: WeaponType, attack_power: u32, magic_attack_power: u32) -> Self {
        self.weapon_type = Some(weapon_type.as_str().to_string());
        self.attack_power = Some(attack_power);
        self.magic_attack_power = Some(magic_attack_power);
        self
    }

    pub fn with_battle_skill(mut self, skill_id: u32) -> Self {
        self.battle_skill_id = Some(skill_id);
        self
    }

    pub fn with_slot(mut self, slot: EquipmentSlot) -> Self {
        self.equipment_slot = Some(slot.as_str().to_string());
        self
    }

    pub fn with_durability(mut self, current: u32, max: u32) -> Self {
        self.durability = Some(DurabilityData { current, max });
        self
    }

    pub fn with_modifier(mut self, stat: Stat, delta: i32) -> Self {
        self.stat_modifiers.insert(stat.as_str().to_string(), delta);
        self
    }
}

/// Category → item type routing, built once and shared by reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRegistry {
    routes: HashMap<ItemCategory, ItemType>,
}

impl TypeRegistry {
    /// The standard routing table
    pub fn standard() -> Self {
        Self::from_routes([
            (ItemCategory::Potion, ItemType::Consumable),
            (ItemCategory::Weapon, ItemType::Weapon),
            (ItemCategory::HeadEquipment, ItemType::Armor),
            (ItemCategory::BodyEquipment, ItemType::Armor),
            (ItemCategory::FootEquipment, ItemType::Armor),
            (ItemCategory::Shield, ItemType::Armor),
            (ItemCategory::Accessory, ItemType::Armor),
            (ItemCategory::Bag, ItemType::Armor),
            (ItemCategory::Material, ItemType::Material),
        ])
    }

    pub fn from_routes(routes: impl IntoIterator<Item = (ItemCategory, ItemType)>) -> Self {
        Self { routes: routes.into_iter().collect() }
    }

    pub fn lookup(&self, category: ItemCategory) -> Option<ItemType> {
        self.routes.get(&category).copied()
    }

    /// Type for `category`, falling back to material when unmapped
    pub fn resolve(&self, category: ItemCategory) -> ItemType {
        self.lookup(category).unwrap_or_else(|| {
            log::warn!("No item type mapped for category `{}`; using material", category);
            ItemType::Material
        })
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Builds items from raw data
#[derive(Debug, Clone)]
pub struct ItemFactory<'r> {
    registry: &'r TypeRegistry,
    samples: Vec<ItemData>,
}

impl<'r> ItemFactory<'r> {
    /// Factory with the built-in sample catalog
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self::with_samples(registry, samples::standard_samples())
    }

    pub fn with_samples(registry: &'r TypeRegistry, samples: Vec<ItemData>) -> Self {
        Self { registry, samples }
    }

    pub fn registry(&self) -> &TypeRegistry {
        self.registry
    }

    /// Create an item, resolving its type from the data
    ///
    /// Resolution order: explicit `item_type`, then the registry entry for
    /// the category, then material.
    pub fn create(&self, data: &ItemData) -> ItemResult<Item> {
        let category: ItemCategory = data.category.parse()?;
        let item_type = match &data.item_type {
            Some(item_type) => item_type.parse()?,
            None => self.registry.resolve(category),
        };
        build(item_type, category, data)
    }

    /// Create an item of an explicitly named type
    pub fn create_by_type(&self, item_type: &str, data: &ItemData) -> ItemResult<Item> {
        let item_type: ItemType = item_type.parse()?;
        let category: ItemCategory = data.category.parse()?;
        build(item_type, category, data)
    }

    /// Create an item in `category`, typed by the registry
    pub fn create_by_category(&self, category: ItemCategory, data: &ItemData) -> ItemResult<Item> {
        build(self.registry.resolve(category), category, data)
    }

    /// Raw sample catalog
    pub fn sample_data(&self) -> &[ItemData] {
        &self.samples
    }

    /// Every sample, built
    pub fn sample_items(&self) -> ItemResult<Vec<Item>> {
        self.samples.iter().map(|data| self.create(data)).collect()
    }

    /// Samples of one variant, built
    pub fn samples_of(&self, item_type: ItemType) -> ItemResult<Vec<Item>> {
        Ok(self
            .sample_items()?
            .into_iter()
            .filter(|item| item.item_type() == item_type)
            .collect())
    }

    pub fn sample_consumables(&self) -> ItemResult<Vec<Item>> {
        self.samples_of(ItemType::Consumable)
    }

    pub fn sample_weapons(&self) -> ItemResult<Vec<Item>> {
        self.samples_of(ItemType::Weapon)
    }

    pub fn sample_armors(&self) -> ItemResult<Vec<Item>> {
        self.samples_of(ItemType::Armor)
    }

    pub fn sample_materials(&self) -> ItemResult<Vec<Item>> {
        self.samples_of(ItemType::Material)
    }

    /// Case-insensitive sample lookup
    pub fn find_sample_by_name(&self, name: &str) -> Option<&ItemData> {
        self.samples.iter().find(|data| data.name.eq_ignore_ascii_case(name))
    }

    pub fn create_sample(&self, name: &str) -> ItemResult<Item> {
        let data = self
            .find_sample_by_name(name)
            .ok_or_else(|| ItemError::NoMatchingItems(format!("no sample named `{}`", name)))?;
        self.create(data)
    }

    pub fn samples_by_rarity(&self, rarity: Rarity) -> Vec<&ItemData> {
        self.samples.iter().filter(|data| data.rarity == rarity.tier()).collect()
    }

    pub fn samples_by_category(&self, category: ItemCategory) -> Vec<&ItemData> {
        self.samples
            .iter()
            .filter(|data| data.category.parse::<ItemCategory>().ok() == Some(category))
            .collect()
    }

    /// Build a random sample matching the optional filters
    pub fn create_random_item<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        category: Option<ItemCategory>,
        rarity: Option<Rarity>,
    ) -> ItemResult<Item> {
        let candidates: Vec<&ItemData> = self
            .samples
            .iter()
            .filter(|data| category.map_or(true, |c| data.category.parse::<ItemCategory>().ok() == Some(c)))
            .filter(|data| rarity.map_or(true, |r| data.rarity == r.tier()))
            .collect();

        let data = candidates.choose(rng).ok_or_else(|| {
            ItemError::NoMatchingItems(format!(
                "no samples for category {} and rarity {}",
                category.map_or("any".to_string(), |c| c.to_string()),
                rarity.map_or("any".to_string(), |r| r.tier().to_string()),
            ))
        })?;
        self.create(data)
    }
}

fn build(item_type: ItemType, category: ItemCategory, data: &ItemData) -> ItemResult<Item> {
    if data.name.trim().is_empty() {
        return Err(ItemError::invalid("name", "must not be empty"));
    }
    let base = ItemBase::new(data.id, data.name.clone(), category)
        .with_description(data.description.clone())
        .with_rarity(Rarity::new(data.rarity)?)
        .with_value(data.value);

    let item: Item = match item_type {
        ItemType::Consumable => build_consumable(base, data)?.into(),
        ItemType::Weapon => build_weapon(base, data)?.into(),
        ItemType::Armor => build_armor(base, data)?.into(),
        ItemType::Material => {
            let mut material = Material::new(base);
            if let Some(limit) = data.stack_limit {
                material = material.with_stack_limit(limit);
            }
            material.into()
        }
    };

    log::debug!("Created {} `{}` (category {})", item_type, item.name(), category);
    Ok(item)
}

fn build_consumable(base: ItemBase, data: &ItemData) -> ItemResult<Consumable> {
    let effect_type: EffectType = data
        .effect_type
        .as_deref()
        .ok_or_else(|| ItemError::invalid("effect_type", "required for consumables"))?
        .parse()?;

    let mut consumable = Consumable::new(base, effect_type, data.effect_value.unwrap_or(0))
        .with_use_cost(data.use_cost.unwrap_or(0))
        .with_usage_limit(UsageLimit::from(data.usage_limit));
    if let Some(remaining) = data.remaining_uses {
        consumable = consumable.with_remaining_uses(remaining);
    }
    if let Some(limit) = data.stack_limit {
        consumable = consumable.with_stack_limit(limit);
    }
    Ok(consumable)
}

fn build_weapon(base: ItemBase, data: &ItemData) -> ItemResult<Weapon> {
    let weapon_type = match data.weapon_type.as_deref() {
        Some(raw) => raw.parse()?,
        None => WeaponType::Physical,
    };
    let mut weapon = Weapon::new(
        base,
        weapon_type,
        data.attack_power.unwrap_or(0),
        data.magic_attack_power.unwrap_or(0),
    )
    .with_durability(parse_durability(data)?)
    .with_stat_modifiers(StatModifiers::from_raw(&data.stat_modifiers)?);
    if let Some(skill_id) = data.battle_skill_id {
        weapon = weapon.with_battle_skill(skill_id);
    }
    Ok(weapon)
}

fn build_armor(base: ItemBase, data: &ItemData) -> ItemResult<Armor> {
    let armor = match data.equipment_slot.as_deref() {
        Some(raw) => Armor::new(base, raw.parse()?)?,
        None => Armor::for_category(base)?,
    };
    Ok(armor
        .with_durability(parse_durability(data)?)
        .with_stat_modifiers(StatModifiers::from_raw(&data.stat_modifiers)?))
}

fn parse_durability(data: &ItemData) -> ItemResult<Durability> {
    data.durability.map_or(Ok(Durability::default()), Durability::from_data)
}

impl Item {
    /// Raw data that `ItemFactory::create` turns back into this item
    pub fn to_data(&self) -> ItemData {
        let base = self.base();
        let mut data = ItemData::new(base.id(), base.name(), base.category())
            .with_type(self.item_type())
            .with_description(base.description())
            .with_rarity(base.rarity().tier())
            .with_value(base.value());

        match self {
            Item::Consumable(c) => {
                data = data
                    .with_effect(c.effect_type(), c.effect_value())
                    .with_use_cost(c.use_cost())
                    .with_stack_limit(c.stack_limit());
                data.usage_limit = c.usage_limit().as_option();
                data.remaining_uses = c.remaining_uses();
            }
            Item::Weapon(w) => {
                data = data.with_weapon(w.weapon_type(), w.attack_power(), w.magic_attack_power());
                data.battle_skill_id = w.battle_skill_id();
            }
            Item::Armor(a) => {
                data = data.with_slot(a.equipment_slot());
            }
            Item::Material(m) => {
                data = data.with_stack_limit(m.stack_limit());
            }
        }

        if let Some(gear) = self.as_equippable() {
            let durability = gear.durability();
            data = data.with_durability(durability.current(), durability.max());
            data.stat_modifiers = gear.base_stat_modifiers().to_raw();
        }
        data
    }
}

impl From<Item> for ItemData {
    fn from(item: Item) -> Self {
        item.to_data()
    }
}

/// Stored items go back through the factory, typed by the standard registry
/// when the data names no `item_type`
impl TryFrom<ItemData> for Item {
    type Error = ItemError;

    fn try_from(data: ItemData) -> Result<Self, Self::Error> {
        let category: ItemCategory = data.category.parse()?;
        let item_type = match &data.item_type {
            Some(item_type) => item_type.parse()?,
            None => TypeRegistry::standard().resolve(category),
        };
        build(item_type, category, &data)
    }
}
