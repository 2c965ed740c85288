//! Stats and stat modifiers

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ItemError;

/// Upper bound (in magnitude) for any aggregated stat delta
pub const STAT_LIMIT: i32 = 1_000_000;

/// Stats an item can modify
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    MaxHp,
    MaxMp,
    MaxSp,
    Attack,
    Defense,
    MagicAttack,
    MagicDefense,
    Accuracy,
    Evasion,
    Agility,
    CriticalRate,
}

impl Stat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stat::MaxHp => "max_hp",
            Stat::MaxMp => "max_mp",
            Stat::MaxSp => "max_sp",
            Stat::Attack => "attack",
            Stat::Defense => "defense",
            Stat::MagicAttack => "magic_attack",
            Stat::MagicDefense => "magic_defense",
            Stat::Accuracy => "accuracy",
            Stat::Evasion => "evasion",
            Stat::Agility => "agility",
            Stat::CriticalRate => "critical_rate",
        }
    }

    pub fn all() -> &'static [Stat] {
        &[
            Stat::MaxHp,
            Stat::MaxMp,
            Stat::MaxSp,
            Stat::Attack,
            Stat::Defense,
            Stat::MagicAttack,
            Stat::MagicDefense,
            Stat::Accuracy,
            Stat::Evasion,
            Stat::Agility,
            Stat::CriticalRate,
        ]
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stat {
    type Err = ItemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Stat::all()
            .iter()
            .copied()
            .find(|stat| stat.as_str() == normalized)
            .ok_or_else(|| ItemError::invalid("stat_modifiers", format!("unknown stat `{}`", s)))
    }
}

/// Named stat deltas, e.g. `{attack: +5}`
///
/// Arithmetic saturates and clamps to `±STAT_LIMIT`, so aggregating any
/// number of items never overflows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatModifiers(BTreeMap<Stat, i32>);

impl StatModifiers {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Builder-style insert
    pub fn with(mut self, stat: Stat, delta: i32) -> Self {
        self.add(stat, delta);
        self
    }

    /// Add a delta to a stat; zero results are dropped from the map
    pub fn add(&mut self, stat: Stat, delta: i32) {
        let current = self.get(stat);
        let total = current.saturating_add(delta).clamp(-STAT_LIMIT, STAT_LIMIT);
        if total == 0 {
            self.0.remove(&stat);
        } else {
            self.0.insert(stat, total);
        }
    }

    /// Fold another set of modifiers into this one
    pub fn merge(&mut self, other: &StatModifiers) {
        for (stat, delta) in other.iter() {
            self.add(stat, delta);
        }
    }

    pub fn get(&self, stat: Stat) -> i32 {
        self.0.get(&stat).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Stat, i32)> + '_ {
        self.0.iter().map(|(stat, delta)| (*stat, *delta))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Parse raw `name -> delta` pairs coming in from outside
    pub fn from_raw(raw: &BTreeMap<String, i32>) -> Result<Self, ItemError> {
        let mut modifiers = StatModifiers::new();
        for (name, delta) in raw {
            modifiers.add(name.parse()?, *delta);
        }
        Ok(modifiers)
    }

    pub fn to_raw(&self) -> BTreeMap<String, i32> {
        self.iter().map(|(stat, delta)| (stat.as_str().to_string(), delta)).collect()
    }
}

impl FromIterator<(Stat, i32)> for StatModifiers {
    fn from_iter<I: IntoIterator<Item = (Stat, i32)>>(iter: I) -> Self {
        let mut modifiers = StatModifiers::new();
        for (stat, delta) in iter {
            modifiers.add(stat, delta);
        }
        modifiers
    }
}

/// Stat bag a consumable acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Vitals {
    pub hp: i32,
    pub max_hp: i32,
    pub mp: i32,
    pub max_mp: i32,
    pub sp: i32,
    pub max_sp: i32,
}

impl Vitals {
    pub fn new(hp: i32, max_hp: i32, mp: i32, max_mp: i32, sp: i32, max_sp: i32) -> Self {
        Self { hp, max_hp, mp, max_mp, sp, max_sp }
    }
}
