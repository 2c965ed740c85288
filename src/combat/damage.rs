//! Damage calculation
//!
//! Handles all combat math: base power, mitigation, hit checks, battle
//! skills and crits. Nothing here mutates its inputs; weapon wear after an
//! attack is up to the caller.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::skills::SkillBook;
use crate::items::{Equippable, EquipmentSet, Stat, StatModifiers, Weapon, WeaponType};

/// Tuning knobs for the damage formulas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageConfig {
    /// Base power with no (or a broken) weapon
    pub unarmed_power: u32,
    /// Share of magic defense that counts against magical attacks
    pub magic_defense_factor: f64,
    pub min_hit_chance: f64,
    pub max_hit_chance: f64,
    pub critical_multiplier: f64,
    /// Cap on crit chance, 0.0..=1.0
    pub max_critical_chance: f64,
}

impl Default for DamageConfig {
    fn default() -> Self {
        Self {
            unarmed_power: 5,
            magic_defense_factor: 0.5,
            min_hit_chance: 0.05,
            max_hit_chance: 1.0,
            critical_multiplier: 1.5,
            max_critical_chance: 0.5,
        }
    }
}

/// Combat-relevant stats of one side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatStats {
    pub attack: i32,
    pub magic_attack: i32,
    pub defense: i32,
    pub magic_defense: i32,
    pub accuracy: i32,
    pub evasion: i32,
    /// Crit chance in percent
    pub critical_rate: i32,
}

impl Default for CombatStats {
    fn default() -> Self {
        Self {
            attack: 0,
            magic_attack: 0,
            defense: 0,
            magic_defense: 0,
            accuracy: 95,
            evasion: 0,
            critical_rate: 0,
        }
    }
}

impl CombatStats {
    /// Stats with equipment bonuses folded in
    pub fn with_modifiers(&self, modifiers: &StatModifiers) -> Self {
        let add = |base: i32, stat: Stat| base.saturating_add(modifiers.get(stat));
        Self {
            attack: add(self.attack, Stat::Attack),
            magic_attack: add(self.magic_attack, Stat::MagicAttack),
            defense: add(self.defense, Stat::Defense),
            magic_defense: add(self.magic_defense, Stat::MagicDefense),
            accuracy: add(self.accuracy, Stat::Accuracy),
            evasion: add(self.evasion, Stat::Evasion),
            critical_rate: add(self.critical_rate, Stat::CriticalRate),
        }
    }
}

/// One side of an attack
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Combatant {
    pub stats: CombatStats,
    pub weapon: Option<Weapon>,
}

impl Combatant {
    pub fn new(stats: CombatStats) -> Self {
        Self { stats, weapon: None }
    }

    pub fn armed(stats: CombatStats, weapon: Weapon) -> Self {
        Self { stats, weapon: Some(weapon) }
    }

    /// Combatant wearing `equipment`: totals added, weapon taken from its slot
    pub fn with_equipment(stats: CombatStats, equipment: &EquipmentSet) -> Self {
        Self {
            stats: stats.with_modifiers(&equipment.get_total_stats()),
            weapon: equipment.weapon().cloned(),
        }
    }
}

/// Where a damage adjustment came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierKind {
    Mitigation,
    Skill,
    Critical,
}

/// A single step applied to the damage, with its signed effect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageModifier {
    pub kind: ModifierKind,
    pub source: String,
    pub amount: f64,
}

/// Result of a combat attack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageResult {
    pub damage_type: WeaponType,
    /// Power before mitigation
    pub base_damage: u32,
    pub modifiers: Vec<DamageModifier>,
    pub final_damage: u32,
    pub is_critical: bool,
    pub skill_triggered: bool,
    pub skill_name: Option<String>,
    pub hit: bool,
    /// Descriptive message
    pub message: String,
}

impl DamageResult {
    fn missed(damage_type: WeaponType, base_damage: u32, modifiers: Vec<DamageModifier>) -> Self {
        Self {
            damage_type,
            base_damage,
            modifiers,
            final_damage: 0,
            is_critical: false,
            skill_triggered: false,
            skill_name: None,
            hit: false,
            message: "missed".to_string(),
        }
    }
}

/// Computes attack damage from two combatants
#[derive(Debug, Clone)]
pub struct DamageCalculator<'s> {
    config: DamageConfig,
    skills: &'s SkillBook,
}

impl<'s> DamageCalculator<'s> {
    pub fn new(config: DamageConfig, skills: &'s SkillBook) -> Self {
        Self { config, skills }
    }

    pub fn config(&self) -> &DamageConfig {
        &self.config
    }

    /// Hit probability (0.0..=1.0) from accuracy vs evasion
    pub fn hit_chance(&self, accuracy: i32, evasion: i32) -> f64 {
        let raw = (accuracy as f64 - evasion as f64) / 100.0;
        sanitize(raw.max(self.config.min_hit_chance).min(self.config.max_hit_chance))
    }

    /// Crit probability (0.0..=1.0) from a percent rate
    pub fn critical_chance(&self, critical_rate: i32) -> f64 {
        sanitize((critical_rate as f64 / 100.0).min(self.config.max_critical_chance))
    }

    /// Calculate a full attack
    pub fn calculate_attack_damage<R: Rng + ?Sized>(
        &self,
        attacker: &Combatant,
        target: &Combatant,
        rng: &mut R,
    ) -> DamageResult {
        // A broken weapon fights like bare hands
        let weapon = attacker.weapon.as_ref().filter(|w| !w.is_broken());
        let damage_type = weapon.map_or(WeaponType::Physical, Weapon::weapon_type);

        let base_power = match weapon {
            Some(w) => {
                let stat = match damage_type {
                    WeaponType::Physical => attacker.stats.attack,
                    WeaponType::Magical => attacker.stats.magic_attack,
                };
                w.power() as i64 + stat as i64
            }
            None => self.config.unarmed_power as i64 + attacker.stats.attack as i64,
        };
        let base_damage = base_power.clamp(0, u32::MAX as i64) as u32;

        let defense = match damage_type {
            WeaponType::Physical => target.stats.defense as f64,
            WeaponType::Magical => target.stats.magic_defense as f64 * self.config.magic_defense_factor,
        }
        .max(0.0);
        let mitigated = defense.min(base_damage as f64);
        let mut damage = base_damage as f64 - mitigated;

        let mut modifiers = vec![DamageModifier {
            kind: ModifierKind::Mitigation,
            source: match damage_type {
                WeaponType::Physical => "defense".to_string(),
                WeaponType::Magical => "magic_defense".to_string(),
            },
            amount: -mitigated,
        }];

        let hit_roll = self.hit_chance(attacker.stats.accuracy, target.stats.evasion);
        if !rng.gen_bool(hit_roll) {
            log::debug!("Attack missed (hit chance {:.2})", hit_roll);
            return DamageResult::missed(damage_type, base_damage, modifiers);
        }

        let mut skill_name = None;
        let skill = weapon
            .and_then(|w| w.battle_skill_id())
            .and_then(|id| self.skills.find(id));
        if let Some(skill) = skill {
            if rng.gen_bool(skill.trigger_probability()) {
                let before = damage;
                damage = skill.apply(damage);
                modifiers.push(DamageModifier {
                    kind: ModifierKind::Skill,
                    source: skill.name.clone(),
                    amount: damage - before,
                });
                skill_name = Some(skill.name.clone());
            }
        } else if let Some(id) = weapon.and_then(|w| w.battle_skill_id()) {
            log::debug!("Battle skill {} is not in the skill book", id);
        }

        let is_critical = rng.gen_bool(self.critical_chance(attacker.stats.critical_rate));
        if is_critical {
            let before = damage;
            damage = (damage * self.config.critical_multiplier).max(0.0);
            modifiers.push(DamageModifier {
                kind: ModifierKind::Critical,
                source: "critical".to_string(),
                amount: damage - before,
            });
        }

        let final_damage = if damage.is_finite() {
            damage.round().clamp(0.0, u32::MAX as f64) as u32
        } else {
            0
        };

        let message = match (is_critical, &skill_name) {
            (true, Some(name)) => format!("{}! CRIT! {} damage", name, final_damage),
            (true, None) => format!("CRIT! {} damage", final_damage),
            (false, Some(name)) => format!("{}! {} damage", name, final_damage),
            (false, None) => format!("{} damage", final_damage),
        };

        DamageResult {
            damage_type,
            base_damage,
            modifiers,
            final_damage,
            is_critical,
            skill_triggered: skill_name.is_some(),
            skill_name,
            hit: true,
            message,
        }
    }
}

fn sanitize(probability: f64) -> f64 {
    if probability.is_finite() {
        probability.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
