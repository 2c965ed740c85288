//! Error types
//!
//! Every business condition the embedding layer has to show to a user is an
//! `ItemError`. None of them are fatal to the process.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::items::{EquipmentSlot, ItemId};

/// Recoverable failures raised by the item, equipment and inventory layers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    #[error("UnknownItemType: {0}")]
    UnknownItemType(String),

    #[error("UnknownCategory: {0}")]
    UnknownCategory(String),

    #[error("UsageLimitExceeded: {name} has no uses left")]
    UsageLimitExceeded { name: String },

    #[error("UseConditionNotMet: {0}")]
    UseConditionNotMet(String),

    #[error("InvalidEquipSlot: {0}")]
    InvalidEquipSlot(String),

    #[error("NoMatchingItems: {0}")]
    NoMatchingItems(String),

    #[error("invalid item data for `{field}`: {reason}")]
    InvalidItemData { field: &'static str, reason: String },

    #[error("{name} cannot be equipped")]
    NotEquippable { name: String },

    #[error("item {id} is already equipped in the {slot} slot")]
    AlreadyEquipped { id: ItemId, slot: EquipmentSlot },

    #[error("{0}")]
    EquipConditionNotMet(String),

    #[error("inventory is full ({capacity} slots)")]
    InventoryFull { capacity: usize },

    #[error("item {0} not found")]
    ItemNotFound(ItemId),
}

/// Machine-readable error tag sent across the boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    UnknownItemType,
    UnknownCategory,
    UsageLimitExceeded,
    UseConditionNotMet,
    InvalidEquipSlot,
    NoMatchingItems,
    InvalidItemData,
    NotEquippable,
    AlreadyEquipped,
    EquipConditionNotMet,
    InventoryFull,
    ItemNotFound,
}

impl ItemError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ItemError::UnknownItemType(_) => ErrorKind::UnknownItemType,
            ItemError::UnknownCategory(_) => ErrorKind::UnknownCategory,
            ItemError::UsageLimitExceeded { .. } => ErrorKind::UsageLimitExceeded,
            ItemError::UseConditionNotMet(_) => ErrorKind::UseConditionNotMet,
            ItemError::InvalidEquipSlot(_) => ErrorKind::InvalidEquipSlot,
            ItemError::NoMatchingItems(_) => ErrorKind::NoMatchingItems,
            ItemError::InvalidItemData { .. } => ErrorKind::InvalidItemData,
            ItemError::NotEquippable { .. } => ErrorKind::NotEquippable,
            ItemError::AlreadyEquipped { .. } => ErrorKind::AlreadyEquipped,
            ItemError::EquipConditionNotMet(_) => ErrorKind::EquipConditionNotMet,
            ItemError::InventoryFull { .. } => ErrorKind::InventoryFull,
            ItemError::ItemNotFound(_) => ErrorKind::ItemNotFound,
        }
    }

    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ItemError::InvalidItemData { field, reason: reason.into() }
    }
}

pub type ItemResult<T> = Result<T, ItemError>;
