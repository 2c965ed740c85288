//! Combat system

pub mod damage;
pub mod skills;

pub use damage::{
    CombatStats, Combatant, DamageCalculator, DamageConfig, DamageModifier, DamageResult, ModifierKind,
};
pub use skills::{BattleSkill, SkillBook, SkillEffect};
