//! Consumable items (potions, herbs, tonics)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::category::ItemType;
use super::item::{ItemBase, ItemBehavior};
use super::stats::Vitals;
use crate::error::{ItemError, ItemResult};

/// Default stack size for consumables
pub const CONSUMABLE_STACK_LIMIT: u32 = 99;

/// Which vital a consumable restores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectType {
    HealHp,
    HealMp,
    HealSp,
}

impl EffectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectType::HealHp => "heal_hp",
            EffectType::HealMp => "heal_mp",
            EffectType::HealSp => "heal_sp",
        }
    }

    /// Short stat label used in messages
    pub fn stat_label(&self) -> &'static str {
        match self {
            EffectType::HealHp => "HP",
            EffectType::HealMp => "MP",
            EffectType::HealSp => "SP",
        }
    }

    /// (current, max) of the targeted vital
    fn read(&self, target: &Vitals) -> (i32, i32) {
        match self {
            EffectType::HealHp => (target.hp, target.max_hp),
            EffectType::HealMp => (target.mp, target.max_mp),
            EffectType::HealSp => (target.sp, target.max_sp),
        }
    }

    fn write(&self, target: &mut Vitals, value: i32) {
        match self {
            EffectType::HealHp => target.hp = value,
            EffectType::HealMp => target.mp = value,
            EffectType::HealSp => target.sp = value,
        }
    }
}

impl fmt::Display for EffectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EffectType {
    type Err = ItemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "heal_hp" => Ok(EffectType::HealHp),
            "heal_mp" => Ok(EffectType::HealMp),
            "heal_sp" => Ok(EffectType::HealSp),
            _ => Err(ItemError::invalid("effect_type", format!("unknown effect `{}`", s))),
        }
    }
}

/// How many times a single consumable can be used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageLimit {
    Limited(u32),
    Unlimited,
}

impl UsageLimit {
    pub fn as_option(&self) -> Option<u32> {
        match self {
            UsageLimit::Limited(k) => Some(*k),
            UsageLimit::Unlimited => None,
        }
    }
}

impl From<Option<u32>> for UsageLimit {
    fn from(limit: Option<u32>) -> Self {
        limit.map_or(UsageLimit::Unlimited, UsageLimit::Limited)
    }
}

/// Result of a successful `consume`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumeOutcome {
    pub success: bool,
    pub message: String,
    /// Amount actually restored after clamping to max
    pub applied: i32,
    pub target: Vitals,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Consumable {
    base: ItemBase,
    effect_type: EffectType,
    effect_value: i32,
    use_cost: u32,
    usage_limit: UsageLimit,
    remaining_uses: u32,
    stack_limit: u32,
}

impl Consumable {
    /// Single-use consumable with the default stack size
    pub fn new(base: ItemBase, effect_type: EffectType, effect_value: i32) -> Self {
        Self {
            base,
            effect_type,
            effect_value,
            use_cost: 0,
            usage_limit: UsageLimit::Limited(1),
            remaining_uses: 1,
            stack_limit: CONSUMABLE_STACK_LIMIT,
        }
    }

    pub fn with_use_cost(mut self, use_cost: u32) -> Self {
        self.use_cost = use_cost;
        self
    }

    /// Set the usage limit; remaining uses reset to the full budget
    pub fn with_usage_limit(mut self, usage_limit: UsageLimit) -> Self {
        self.usage_limit = usage_limit;
        self.remaining_uses = usage_limit.as_option().unwrap_or(0);
        self
    }

    /// Restore a partially used state, clamped to the limit
    pub fn with_remaining_uses(mut self, remaining: u32) -> Self {
        if let UsageLimit::Limited(k) = self.usage_limit {
            self.remaining_uses = remaining.min(k);
        }
        self
    }

    pub fn with_stack_limit(mut self, stack_limit: u32) -> Self {
        self.stack_limit = stack_limit.max(1);
        self
    }

    pub fn effect_type(&self) -> EffectType {
        self.effect_type
    }

    pub fn effect_value(&self) -> i32 {
        self.effect_value
    }

    pub fn use_cost(&self) -> u32 {
        self.use_cost
    }

    pub fn usage_limit(&self) -> UsageLimit {
        self.usage_limit
    }

    /// Uses left; `None` when unlimited
    pub fn remaining_uses(&self) -> Option<u32> {
        match self.usage_limit {
            UsageLimit::Limited(_) => Some(self.remaining_uses),
            UsageLimit::Unlimited => None,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self.usage_limit, UsageLimit::Limited(_)) && self.remaining_uses == 0
    }

    /// Whether the effect would do anything for `target`
    pub fn can_use_on(&self, target: &Vitals) -> bool {
        self.check_target(target).is_ok()
    }

    /// SP the target pays, once it is known the target can afford it
    fn check_target(&self, target: &Vitals) -> ItemResult<i32> {
        let (current, max) = self.effect_type.read(target);
        if current >= max {
            return Err(ItemError::UseConditionNotMet(format!(
                "Target is already at full {}",
                self.effect_type.stat_label()
            )));
        }
        match i32::try_from(self.use_cost) {
            Ok(cost) if target.sp >= cost => Ok(cost),
            _ => Err(ItemError::UseConditionNotMet(format!(
                "{} needs {} SP to use",
                self.base.name(),
                self.use_cost
            ))),
        }
    }

    /// Apply the effect to `target`
    ///
    /// Fails with `UsageLimitExceeded` once the budget is spent and with
    /// `UseConditionNotMet` when the target would not benefit. A failed call
    /// never spends a use.
    pub fn consume(&mut self, target: &Vitals) -> ItemResult<ConsumeOutcome> {
        if self.is_exhausted() {
            return Err(ItemError::UsageLimitExceeded { name: self.base.name().to_string() });
        }
        let cost = self.check_target(target)?;

        let mut updated = *target;
        updated.sp -= cost;

        let (current, max) = self.effect_type.read(&updated);
        let restored = current.saturating_add(self.effect_value).clamp(0, max.max(0));
        self.effect_type.write(&mut updated, restored);
        let applied = restored - current;

        if let UsageLimit::Limited(_) = self.usage_limit {
            self.remaining_uses -= 1;
        }

        log::debug!(
            "{} restored {} {} ({} uses left)",
            self.base.name(),
            applied,
            self.effect_type.stat_label(),
            self.remaining_uses().map_or("unlimited".to_string(), |n| n.to_string())
        );

        Ok(ConsumeOutcome {
            success: true,
            message: format!(
                "Used {}: restored {} {}",
                self.base.name(),
                applied,
                self.effect_type.stat_label()
            ),
            applied,
            target: updated,
        })
    }
}

impl ItemBehavior for Consumable {
    fn base(&self) -> &ItemBase {
        &self.base
    }

    fn item_type(&self) -> ItemType {
        ItemType::Consumable
    }

    fn can_stack(&self) -> bool {
        true
    }

    fn stack_limit(&self) -> u32 {
        self.stack_limit
    }

    fn is_usable(&self) -> bool {
        !self.is_exhausted()
    }

    fn item_info(&self) -> Map<String, Value> {
        let mut info = Map::new();
        info.insert("type".into(), Value::from("consumable"));
        info.insert("use_cost".into(), Value::from(self.use_cost));
        info.insert("usage_limit".into(), self.usage_limit.as_option().map_or(Value::Null, Value::from));
        info.insert("remaining_uses".into(), self.remaining_uses().map_or(Value::Null, Value::from));
        info.insert("stack_limit".into(), Value::from(self.stack_limit));
        info
    }

    fn effects(&self) -> Map<String, Value> {
        let mut effects = Map::new();
        effects.insert(self.effect_type.as_str().into(), Value::from(self.effect_value));
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::category::ItemCategory;

    fn herb() -> Consumable {
        Consumable::new(ItemBase::new(1, "Herb", ItemCategory::Potion), EffectType::HealHp, 20)
    }

    fn wounded() -> Vitals {
        Vitals { hp: 50, max_hp: 100, ..Default::default() }
    }

    #[test]
    fn test_heal_and_limit() {
        let mut item = herb();
        let outcome = item.consume(&wounded()).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.target.hp, 70);
        assert_eq!(outcome.applied, 20);
        assert!(matches!(
            item.consume(&outcome.target),
            Err(ItemError::UsageLimitExceeded { .. })
        ));
    }

    #[test]
    fn test_heal_clamps_to_max() {
        let mut item = herb();
        let target = Vitals { hp: 95, max_hp: 100, ..Default::default() };
        let outcome = item.consume(&target).unwrap();
        assert_eq!(outcome.target.hp, 100);
        assert_eq!(outcome.applied, 5);
    }

    #[test]
    fn test_full_target_rejected_without_spending_use() {
        let mut item = herb();
        let full = Vitals { hp: 100, max_hp: 100, ..Default::default() };
        assert!(!item.can_use_on(&full));
        assert!(matches!(item.consume(&full), Err(ItemError::UseConditionNotMet(_))));
        assert_eq!(item.remaining_uses(), Some(1));
    }

    #[test]
    fn test_use_cost_paid_from_sp() {
        let mut tonic = Consumable::new(
            ItemBase::new(2, "Mana Tonic", ItemCategory::Potion),
            EffectType::HealMp,
            30,
        )
        .with_use_cost(5);
        let broke = Vitals { mp: 0, max_mp: 50, sp: 2, max_sp: 20, ..Default::default() };
        assert!(matches!(tonic.consume(&broke), Err(ItemError::UseConditionNotMet(_))));

        let ready = Vitals { sp: 10, ..broke };
        let outcome = tonic.consume(&ready).unwrap();
        assert_eq!(outcome.target.mp, 30);
        assert_eq!(outcome.target.sp, 5);
    }

    #[test]
    fn test_use_cost_beyond_any_sp() {
        let mut relic = herb().with_use_cost(3_000_000_000);
        let target = Vitals { hp: 10, max_hp: 100, sp: 0, max_sp: 20, ..Default::default() };
        assert!(!relic.can_use_on(&target));
        assert!(matches!(relic.consume(&target), Err(ItemError::UseConditionNotMet(_))));
        assert_eq!(relic.remaining_uses(), Some(1));

        let rich = Vitals { sp: i32::MAX, max_sp: i32::MAX, ..target };
        assert!(matches!(relic.consume(&rich), Err(ItemError::UseConditionNotMet(_))));
    }

    #[test]
    fn test_unlimited_never_exhausts() {
        let mut spring = herb().with_usage_limit(UsageLimit::Unlimited);
        for _ in 0..50 {
            spring.consume(&wounded()).unwrap();
        }
        assert_eq!(spring.remaining_uses(), None);
        assert!(spring.is_usable());
    }

    #[test]
    fn test_remaining_uses_clamped_to_limit() {
        let item = herb().with_usage_limit(UsageLimit::Limited(3)).with_remaining_uses(10);
        assert_eq!(item.remaining_uses(), Some(3));
    }
}
