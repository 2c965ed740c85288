//! End-to-end walk-throughs of the item, equipment and damage flows

use armory::combat::{CombatStats, Combatant, DamageCalculator, DamageConfig, SkillBook};
use armory::error::ItemError;
use armory::items::{
    EffectType, EquipmentSet, EquipmentSlot, Equippable, Item, ItemBehavior, ItemCategory, ItemData, ItemFactory,
    TypeRegistry, Vitals, WeaponType,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_herb_heals_once() {
    let registry = TypeRegistry::standard();
    let factory = ItemFactory::new(&registry);
    let data = ItemData::new(1, "Herb", ItemCategory::Potion)
        .with_effect(EffectType::HealHp, 20)
        .with_use_cost(0)
        .with_usage_limit(1);

    let mut item = factory.create(&data).unwrap();
    let herb = item.as_consumable_mut().unwrap();
    let target = Vitals { hp: 50, max_hp: 100, ..Default::default() };

    let outcome = herb.consume(&target).unwrap();
    assert!(outcome.success);
    assert_eq!(outcome.target.hp, 70);

    let again = herb.consume(&outcome.target);
    assert_eq!(again, Err(ItemError::UsageLimitExceeded { name: "Herb".to_string() }));
}

#[test]
fn test_huge_use_cost_never_affordable() {
    let registry = TypeRegistry::standard();
    let factory = ItemFactory::new(&registry);
    let data = ItemData::new(9, "Kings Draught", ItemCategory::Potion)
        .with_effect(EffectType::HealHp, 10)
        .with_use_cost(3_000_000_000);

    let mut item = factory.create(&data).unwrap();
    let draught = item.as_consumable_mut().unwrap();
    let target = Vitals { hp: 10, max_hp: 100, sp: 0, max_sp: 20, ..Default::default() };
    assert!(matches!(draught.consume(&target), Err(ItemError::UseConditionNotMet(_))));
    assert!(draught.is_usable());
}

#[test]
fn test_broken_weapon_grants_nothing() {
    let registry = TypeRegistry::standard();
    let factory = ItemFactory::new(&registry);
    let data = ItemData::new(2, "Worn Sword", ItemCategory::Weapon)
        .with_weapon(WeaponType::Physical, 15, 0)
        .with_durability(10, 10)
        .with_modifier(armory::items::Stat::Attack, 3);

    let mut item = factory.create(&data).unwrap();
    item.as_equippable_mut().unwrap().take_damage(10);
    assert!(item.is_broken());

    let mut set = EquipmentSet::new(1);
    set.equip(item).unwrap();
    assert!(set.get_total_stats().is_empty());
}

#[test]
fn test_create_by_type_rejects_unknown() {
    let registry = TypeRegistry::standard();
    let factory = ItemFactory::new(&registry);
    let data = ItemData::new(3, "Short Sword", ItemCategory::Weapon).with_weapon(WeaponType::Physical, 10, 0);

    let sword = factory.create_by_type("weapon", &data).unwrap();
    assert_eq!(sword.name(), "Short Sword");

    let err = factory.create_by_type("unknown", &data).unwrap_err();
    assert_eq!(err.to_string(), "UnknownItemType: unknown");
}

#[test]
fn test_equip_displaces_previous_weapon() {
    let registry = TypeRegistry::standard();
    let factory = ItemFactory::new(&registry);
    let weapon_a = factory.create_sample("Bronze Sword").unwrap();
    let weapon_b = factory.create_sample("Iron Sword").unwrap();

    let mut set = EquipmentSet::new(7);
    assert!(set.equip(weapon_a.clone()).unwrap().displaced.is_none());

    let outcome = set.equip(weapon_b.clone()).unwrap();
    assert_eq!(outcome.slot, EquipmentSlot::Weapon);
    assert_eq!(outcome.displaced, Some(weapon_a));
    assert_eq!(set.len(), 1);
    assert_eq!(set.get(EquipmentSlot::Weapon), Some(&weapon_b));
}

#[test]
fn test_attack_through_defense() {
    let skills = SkillBook::standard();
    let calculator = DamageCalculator::new(DamageConfig::default(), &skills);
    let registry = TypeRegistry::standard();
    let factory = ItemFactory::new(&registry);
    let sword = match factory
        .create(&ItemData::new(4, "Test Sword", ItemCategory::Weapon).with_weapon(WeaponType::Physical, 20, 0))
        .unwrap()
    {
        Item::Weapon(w) => w,
        other => panic!("expected weapon, got {:?}", other),
    };

    let attacker = Combatant::armed(CombatStats { accuracy: 100, ..Default::default() }, sword);
    let target = Combatant::new(CombatStats { defense: 5, evasion: 0, ..Default::default() });

    for seed in 0..20 {
        let result = calculator.calculate_attack_damage(&attacker, &target, &mut StdRng::seed_from_u64(seed));
        assert!(result.hit);
        assert_eq!(result.final_damage, 15);
    }
}

#[test]
fn test_full_loadout_feeds_damage() {
    let registry = TypeRegistry::standard();
    let factory = ItemFactory::new(&registry);
    let skills = SkillBook::standard();
    let calculator = DamageCalculator::new(DamageConfig::default(), &skills);

    let mut set = EquipmentSet::new(1);
    for name in ["Iron Sword", "Leather Cap", "Chain Mail", "Leather Boots", "Iron Shield"] {
        set.equip(factory.create_sample(name).unwrap()).unwrap();
    }
    let totals = set.get_total_stats();
    assert_eq!(totals.get(armory::items::Stat::Defense), 2 + 6 + 1 + 5);
    assert_eq!(totals.get(armory::items::Stat::Attack), 2);

    let hero = Combatant::with_equipment(CombatStats { accuracy: 100, ..Default::default() }, &set);
    let dummy = Combatant::new(CombatStats::default());
    let result = calculator.calculate_attack_damage(&hero, &dummy, &mut StdRng::seed_from_u64(0));
    assert_eq!(result.base_damage, 22);
    assert_eq!(result.final_damage, 22);

    // Wear the sword out; the hero falls back to fists
    let broke = set.damage_slot(EquipmentSlot::Weapon, 1_000).unwrap();
    assert!(broke);
    assert_eq!(set.broken_items(), vec![EquipmentSlot::Weapon]);
    let hero = Combatant::with_equipment(CombatStats { accuracy: 100, ..Default::default() }, &set);
    let result = calculator.calculate_attack_damage(&hero, &dummy, &mut StdRng::seed_from_u64(0));
    assert_eq!(result.final_damage, DamageConfig::default().unarmed_power);

    set.repair_all();
    assert!(set.broken_items().is_empty());
    assert!(set.weapon().is_some_and(|w| !w.is_broken()));
}
