//! Battle skills carried by weapons

use serde::{Deserialize, Serialize};

/// What a skill does to an attack's damage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillEffect {
    /// Multiply damage after mitigation
    Multiplier(f64),
    /// Add flat damage after mitigation
    FlatBonus(i32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleSkill {
    pub id: u32,
    pub name: String,
    pub effect: SkillEffect,
    /// Probability (0.0..=1.0) the skill fires on a hit
    pub trigger_chance: f64,
}

impl BattleSkill {
    pub fn new(id: u32, name: impl Into<String>, effect: SkillEffect, trigger_chance: f64) -> Self {
        Self { id, name: name.into(), effect, trigger_chance }
    }

    /// Damage after the skill, never negative
    pub fn apply(&self, damage: f64) -> f64 {
        let boosted = match self.effect {
            SkillEffect::Multiplier(factor) => damage * factor,
            SkillEffect::FlatBonus(bonus) => damage + bonus as f64,
        };
        boosted.max(0.0)
    }

    pub fn trigger_probability(&self) -> f64 {
        if self.trigger_chance.is_finite() {
            self.trigger_chance.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Immutable skill lookup, loaded once and shared by reference
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillBook {
    pub skills: Vec<BattleSkill>,
}

impl SkillBook {
    pub fn new(skills: Vec<BattleSkill>) -> Self {
        Self { skills }
    }

    /// Skills referenced by the built-in sample weapons
    pub fn standard() -> Self {
        Self::new(vec![
            BattleSkill::new(1, "Flame Slash", SkillEffect::Multiplier(1.5), 0.3),
            BattleSkill::new(2, "Arcane Spark", SkillEffect::FlatBonus(8), 0.25),
            BattleSkill::new(3, "Starfall", SkillEffect::Multiplier(2.0), 0.15),
            BattleSkill::new(4, "Dragonbane", SkillEffect::FlatBonus(20), 0.2),
        ])
    }

    /// Find a skill by ID
    pub fn find(&self, id: u32) -> Option<&BattleSkill> {
        self.skills.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}
