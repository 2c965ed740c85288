//! Crafting materials

use serde_json::{Map, Value};

use super::category::ItemType;
use super::item::{ItemBase, ItemBehavior};

/// Default stack size for materials
pub const MATERIAL_STACK_LIMIT: u32 = 999;

/// A ledger entry with a value and a rarity, nothing more
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Material {
    base: ItemBase,
    stack_limit: u32,
}

impl Material {
    pub fn new(base: ItemBase) -> Self {
        Self { base, stack_limit: MATERIAL_STACK_LIMIT }
    }

    pub fn with_stack_limit(mut self, stack_limit: u32) -> Self {
        self.stack_limit = stack_limit.max(1);
        self
    }
}

impl ItemBehavior for Material {
    fn base(&self) -> &ItemBase {
        &self.base
    }

    fn item_type(&self) -> ItemType {
        ItemType::Material
    }

    fn can_stack(&self) -> bool {
        true
    }

    fn stack_limit(&self) -> u32 {
        self.stack_limit
    }

    fn item_info(&self) -> Map<String, Value> {
        let mut info = Map::new();
        info.insert("type".into(), Value::from("material"));
        info.insert("stack_limit".into(), Value::from(self.stack_limit));
        info
    }
}
