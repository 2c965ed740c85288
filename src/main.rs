//! Armory - Demo entry point
//!
//! Loads the data directory, builds a small loadout and prints each step of
//! an equip / consume / attack walk-through as JSON.
//!
//! Usage: `armory [DATA_DIR] [--seed N] [--export DIR]`

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use armory::api::{self, CombatantData, ConsumeRequest, DamageRequest, EquipRequest, ItemView};
use armory::combat::{CombatStats, Combatant};
use armory::data::{export_default_data, DataManager};
use armory::items::{EquipmentSet, EquipmentSlot, Inventory, Item, ItemBehavior, ItemFactory, TypeRegistry, Vitals};
use armory::DamageCalculator;

struct Args {
    data_dir: Option<PathBuf>,
    export_dir: Option<PathBuf>,
    seed: u64,
}

fn parse_args() -> Result<Args> {
    let mut args = Args { data_dir: None, export_dir: None, seed: 42 };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--seed" => {
                let raw = iter.next().context("--seed needs a value")?;
                args.seed = raw.parse().with_context(|| format!("invalid seed `{}`", raw))?;
            }
            "--export" => {
                args.export_dir = Some(iter.next().context("--export needs a directory")?.into());
            }
            flag if flag.starts_with("--") => bail!("unknown flag `{}`", flag),
            dir => args.data_dir = Some(dir.into()),
        }
    }
    Ok(args)
}

fn print_step<T: Serialize>(title: &str, value: &T) -> Result<()> {
    println!("== {}", title);
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Armory v{}", env!("CARGO_PKG_VERSION"));

    let args = parse_args()?;

    if let Some(dir) = &args.export_dir {
        export_default_data(dir).with_context(|| format!("exporting defaults to {}", dir.display()))?;
        println!("Wrote default data to {}", dir.display());
        return Ok(());
    }

    let registry = TypeRegistry::standard();
    let data = match &args.data_dir {
        Some(dir) => DataManager::load_with_registry(dir, &registry)
            .with_context(|| format!("loading data from {}", dir.display()))?,
        None => DataManager::new(),
    };

    let factory = ItemFactory::with_samples(&registry, data.items.clone());
    let calculator = DamageCalculator::new(data.combat.clone(), &data.skills);
    let mut rng = StdRng::seed_from_u64(args.seed);

    let catalog: Vec<ItemView> = factory.sample_items()?.iter().map(ItemView::from).collect();
    print_step("Catalog", &catalog)?;

    let mut inventory = Inventory::default();
    let mut equipment = EquipmentSet::new(1);
    for _ in 0..3 {
        inventory.add(factory.create_random_item(&mut rng, None, None)?)?;
    }
    for name in ["Iron Sword", "Leather Cap", "Chain Mail", "Healing Potion"] {
        match factory.create_sample(name) {
            Ok(item) => inventory.add(item)?,
            Err(e) => log::warn!("Skipping {}: {}", name, e),
        }
    }

    let ids: Vec<_> = inventory.entries().iter().map(|e| e.item.id()).collect();
    for item_id in ids {
        if inventory.get(item_id).is_some_and(|item| item.equipment_slot().is_some()) {
            let response = api::equip_from_inventory(&mut inventory, &mut equipment, &EquipRequest { item_id });
            print_step("Equip", &response)?;
        }
    }
    print_step("Total stats", &equipment.get_total_stats())?;

    let hurt = Vitals::new(25, 100, 10, 40, 20, 30);
    let potion = inventory
        .entries()
        .iter()
        .find(|e| e.item.is_usable())
        .map(|e| e.item.id());
    if let Some(item_id) = potion {
        let response = api::consume_from_inventory(&mut inventory, &ConsumeRequest { item_id, target: hurt });
        print_step("Consume", &response)?;
    }

    let hero = Combatant::with_equipment(CombatStats { attack: 4, accuracy: 90, ..Default::default() }, &equipment);
    let slime = Combatant::new(CombatStats { defense: 3, evasion: 10, ..Default::default() });
    for _ in 0..3 {
        let result = calculator.calculate_attack_damage(&hero, &slime, &mut rng);
        print_step("Attack", &result)?;
    }

    let request = DamageRequest {
        attacker: CombatantData {
            stats: hero.stats,
            weapon: hero.weapon.clone().map(|w| Item::from(w).to_data()),
        },
        target: CombatantData { stats: slime.stats, weapon: None },
    };
    print_step("Attack request", &api::calculate_damage(&factory, &calculator, &request, &mut rng))?;

    if let Some(broke) = equipment.damage_slot(EquipmentSlot::Weapon, 500) {
        log::info!("Weapon worn down (broken: {})", broke);
        print_step("Broken", &equipment.broken_items())?;
        equipment.repair_all();
    }

    log::info!("Armory demo finished");
    Ok(())
}
