//! Boundary shapes
//!
//! Plain serde views and request/response pairs for whatever layer embeds
//! the crate (an HTTP handler, a script host, the demo binary). Failures
//! never escape as `Err` here; they come back as `success: false` with a
//! message and an `ErrorKind`.

use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::combat::{CombatStats, Combatant, DamageCalculator, DamageModifier};
use crate::error::{ErrorKind, ItemError, ItemResult};
use crate::items::{
    EquipmentSet, EquipmentSlot, Inventory, Item, ItemBehavior, ItemCategory, ItemData, ItemFactory, ItemId,
    ItemType, Vitals, WeaponType,
};

/// Everything a client needs to render one item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemView {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub category: ItemCategory,
    pub item_type: ItemType,
    pub rarity: u8,
    pub rarity_name: String,
    pub rarity_color: String,
    pub value: u32,
    pub display_name: String,
    pub item_info: Map<String, Value>,
    pub effects: Map<String, Value>,
}

impl From<&Item> for ItemView {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id(),
            name: item.name().to_string(),
            description: item.description().to_string(),
            category: item.category(),
            item_type: item.item_type(),
            rarity: item.rarity().tier(),
            rarity_name: item.rarity_name().to_string(),
            rarity_color: item.rarity().color_hex(),
            value: item.value(),
            display_name: item.display_name(),
            item_info: item.item_info(),
            effects: item.effects(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipRequest {
    pub item_id: ItemId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipResponse {
    pub success: bool,
    pub message: String,
    pub slot: Option<EquipmentSlot>,
    /// Item moved back to the inventory
    pub displaced_item: Option<ItemView>,
    pub error: Option<ErrorKind>,
}

impl EquipResponse {
    fn failed(err: &ItemError) -> Self {
        Self {
            success: false,
            message: err.to_string(),
            slot: None,
            displaced_item: None,
            error: Some(err.kind()),
        }
    }
}

/// Move one unit of `item_id` from the inventory into its slot
///
/// Whatever was in the slot goes back to the inventory. If it does not fit
/// the swap is undone and both containers are left as they were.
pub fn equip_from_inventory(
    inventory: &mut Inventory,
    equipment: &mut EquipmentSet,
    request: &EquipRequest,
) -> EquipResponse {
    match try_equip(inventory, equipment, request.item_id) {
        Ok((slot, name, displaced)) => {
            let message = match &displaced {
                Some(previous) => format!("Equipped {} (replaced {})", name, previous.name),
                None => format!("Equipped {}", name),
            };
            EquipResponse {
                success: true,
                message,
                slot: Some(slot),
                displaced_item: displaced,
                error: None,
            }
        }
        Err(err) => {
            log::debug!("Equip of item {} rejected: {}", request.item_id, err);
            EquipResponse::failed(&err)
        }
    }
}

fn try_equip(
    inventory: &mut Inventory,
    equipment: &mut EquipmentSet,
    item_id: ItemId,
) -> ItemResult<(EquipmentSlot, String, Option<ItemView>)> {
    let item = inventory.get(item_id).ok_or(ItemError::ItemNotFound(item_id))?;
    if !item.is_equippable() {
        return Err(ItemError::NotEquippable { name: item.name().to_string() });
    }

    let item = inventory.take(item_id).ok_or(ItemError::ItemNotFound(item_id))?;
    let name = item.name().to_string();
    let outcome = match equipment.equip(item.clone()) {
        Ok(outcome) => outcome,
        Err(err) => {
            inventory.add(item)?;
            return Err(err);
        }
    };

    let Some(previous) = outcome.displaced else {
        return Ok((outcome.slot, name, None));
    };
    let view = ItemView::from(&previous);
    if let Err(err) = inventory.add(previous.clone()) {
        // Roll back: old item back in the slot, new one back in the bag
        equipment.unequip(outcome.slot);
        equipment.equip(previous)?;
        inventory.add(item)?;
        return Err(err);
    }
    Ok((outcome.slot, name, Some(view)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumeRequest {
    pub item_id: ItemId,
    pub target: Vitals,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumeResponse {
    pub success: bool,
    pub message: String,
    pub applied: i32,
    /// Target after the effect, or unchanged on failure
    pub target: Vitals,
    pub error: Option<ErrorKind>,
}

/// Use one consumable from the inventory on the request's target
pub fn consume_from_inventory(inventory: &mut Inventory, request: &ConsumeRequest) -> ConsumeResponse {
    match inventory.consume(request.item_id, &request.target) {
        Ok(outcome) => ConsumeResponse {
            success: outcome.success,
            message: outcome.message,
            applied: outcome.applied,
            target: outcome.target,
            error: None,
        },
        Err(err) => ConsumeResponse {
            success: false,
            message: err.to_string(),
            applied: 0,
            target: request.target,
            error: Some(err.kind()),
        },
    }
}

/// One side of a damage request; the weapon arrives as raw item data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatantData {
    #[serde(flatten)]
    pub stats: CombatStats,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapon: Option<ItemData>,
}

impl CombatantData {
    pub fn to_combatant(&self, factory: &ItemFactory<'_>) -> ItemResult<Combatant> {
        let Some(data) = &self.weapon else {
            return Ok(Combatant::new(self.stats));
        };
        match factory.create(data)? {
            Item::Weapon(weapon) => Ok(Combatant::armed(self.stats, weapon)),
            other => Err(ItemError::InvalidItemData {
                field: "weapon",
                reason: format!("{} is not a weapon", other.name()),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageRequest {
    pub attacker: CombatantData,
    pub target: CombatantData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageResponse {
    pub success: bool,
    pub message: String,
    pub damage_type: Option<WeaponType>,
    pub base_damage: u32,
    pub modifiers: Vec<DamageModifier>,
    pub final_damage: u32,
    pub hit: bool,
    pub is_critical: bool,
    pub skill_triggered: bool,
    pub skill_name: Option<String>,
    pub error: Option<ErrorKind>,
}

/// Resolve both sides and compute one attack
pub fn calculate_damage<R: Rng + ?Sized>(
    factory: &ItemFactory<'_>,
    calculator: &DamageCalculator<'_>,
    request: &DamageRequest,
    rng: &mut R,
) -> DamageResponse {
    let sides = request
        .attacker
        .to_combatant(factory)
        .and_then(|attacker| request.target.to_combatant(factory).map(|target| (attacker, target)));
    let (attacker, target) = match sides {
        Ok(sides) => sides,
        Err(err) => {
            return DamageResponse {
                success: false,
                message: err.to_string(),
                damage_type: None,
                base_damage: 0,
                modifiers: Vec::new(),
                final_damage: 0,
                hit: false,
                is_critical: false,
                skill_triggered: false,
                skill_name: None,
                error: Some(err.kind()),
            }
        }
    };

    let result = calculator.calculate_attack_damage(&attacker, &target, rng);
    DamageResponse {
        success: true,
        message: result.message,
        damage_type: Some(result.damage_type),
        base_damage: result.base_damage,
        modifiers: result.modifiers,
        final_damage: result.final_damage,
        hit: result.hit,
        is_critical: result.is_critical,
        skill_triggered: result.skill_triggered,
        skill_name: result.skill_name,
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{DamageConfig, SkillBook};
    use crate::items::TypeRegistry;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn stocked() -> (TypeRegistry, Inventory) {
        let registry = TypeRegistry::standard();
        let mut inventory = Inventory::new(10);
        {
            let factory = ItemFactory::new(&registry);
            for name in ["Bronze Sword", "Iron Sword", "Herb", "Iron Ore"] {
                inventory.add(factory.create_sample(name).unwrap()).unwrap();
            }
        }
        (registry, inventory)
    }

    #[test]
    fn test_item_view() {
        let registry = TypeRegistry::standard();
        let factory = ItemFactory::new(&registry);
        let view = ItemView::from(&factory.create_sample("Iron Sword").unwrap());
        assert_eq!(view.display_name, "⚔️ Iron Sword");
        assert_eq!(view.item_type, ItemType::Weapon);
        assert_eq!(view.rarity_name, "Uncommon");
        assert_eq!(view.item_info["attack_power"], 20);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["category"], "weapon");
    }

    #[test]
    fn test_equip_swaps_into_inventory() {
        let (_registry, mut inventory) = stocked();
        let mut equipment = EquipmentSet::new(1);

        let first = equip_from_inventory(&mut inventory, &mut equipment, &EquipRequest { item_id: 201 });
        assert!(first.success, "{}", first.message);
        assert_eq!(first.slot, Some(EquipmentSlot::Weapon));
        assert!(inventory.get(201).is_none());

        let second = equip_from_inventory(&mut inventory, &mut equipment, &EquipRequest { item_id: 202 });
        assert!(second.success);
        assert_eq!(second.displaced_item.as_ref().map(|v| v.id), Some(201));
        assert!(inventory.get(201).is_some());
        assert_eq!(equipment.get(EquipmentSlot::Weapon).map(|i| i.id()), Some(202));
        assert_eq!(equipment.len(), 1);
    }

    #[test]
    fn test_equip_failures() {
        let (_registry, mut inventory) = stocked();
        let mut equipment = EquipmentSet::new(1);

        let missing = equip_from_inventory(&mut inventory, &mut equipment, &EquipRequest { item_id: 999 });
        assert_eq!(missing.error, Some(ErrorKind::ItemNotFound));

        let herb = equip_from_inventory(&mut inventory, &mut equipment, &EquipRequest { item_id: 101 });
        assert!(!herb.success);
        assert_eq!(herb.error, Some(ErrorKind::NotEquippable));
        assert_eq!(inventory.quantity_of(101), 1);

        let mut no_weapon = EquipmentSet::with_slots(2, &[EquipmentSlot::Head]);
        let rejected = equip_from_inventory(&mut inventory, &mut no_weapon, &EquipRequest { item_id: 201 });
        assert_eq!(rejected.error, Some(ErrorKind::InvalidEquipSlot));
        assert_eq!(inventory.quantity_of(201), 1);
    }

    #[test]
    fn test_equip_swap_in_full_inventory() {
        let registry = TypeRegistry::standard();
        let factory = ItemFactory::new(&registry);
        let mut equipment = EquipmentSet::new(1);
        equipment.equip(factory.create_sample("Bronze Sword").unwrap()).unwrap();

        let mut inventory = Inventory::new(1);
        inventory.add(factory.create_sample("Iron Sword").unwrap()).unwrap();
        assert!(inventory.is_full());

        let response = equip_from_inventory(&mut inventory, &mut equipment, &EquipRequest { item_id: 202 });
        assert!(response.success, "{}", response.message);
        assert_eq!(inventory.quantity_of(201), 1);
        assert_eq!(equipment.get(EquipmentSlot::Weapon).map(|i| i.id()), Some(202));
    }

    #[test]
    fn test_consume_request() {
        let (_registry, mut inventory) = stocked();
        let target = Vitals::new(30, 100, 10, 10, 10, 10);

        let used = consume_from_inventory(&mut inventory, &ConsumeRequest { item_id: 101, target });
        assert!(used.success);
        assert_eq!(used.applied, 20);
        assert_eq!(used.target.hp, 50);
        assert_eq!(inventory.quantity_of(101), 0);

        let gone = consume_from_inventory(&mut inventory, &ConsumeRequest { item_id: 101, target });
        assert_eq!(gone.error, Some(ErrorKind::ItemNotFound));
        assert_eq!(gone.target, target);

        let ore = consume_from_inventory(&mut inventory, &ConsumeRequest { item_id: 401, target });
        assert_eq!(ore.error, Some(ErrorKind::UseConditionNotMet));
    }

    #[test]
    fn test_damage_request_from_json() {
        let registry = TypeRegistry::standard();
        let factory = ItemFactory::new(&registry);
        let skills = SkillBook::standard();
        let calculator = DamageCalculator::new(DamageConfig::default(), &skills);

        let request: DamageRequest = serde_json::from_value(serde_json::json!({
            "attacker": {
                "accuracy": 100,
                "weapon": {"id": 9, "name": "Test Blade", "category": "weapon",
                           "weapon_type": "physical", "attack_power": 20}
            },
            "target": {"defense": 5, "evasion": 0}
        }))
        .unwrap();

        let response = calculate_damage(&factory, &calculator, &request, &mut StdRng::seed_from_u64(1));
        assert!(response.success);
        assert!(response.hit);
        assert_eq!(response.final_damage, 15);
    }

    #[test]
    fn test_damage_request_rejects_non_weapon() {
        let registry = TypeRegistry::standard();
        let factory = ItemFactory::new(&registry);
        let skills = SkillBook::default();
        let calculator = DamageCalculator::new(DamageConfig::default(), &skills);

        let mut request = DamageRequest::default();
        request.attacker.weapon = factory.find_sample_by_name("Iron Ore").cloned();
        let response = calculate_damage(&factory, &calculator, &request, &mut StdRng::seed_from_u64(1));
        assert!(!response.success);
        assert_eq!(response.error, Some(ErrorKind::InvalidItemData));
    }
}
