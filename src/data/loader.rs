//! RON data loader
//!
//! Loads data from external RON files, with fallback to built-in defaults
//! for any file that is missing.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::combat::{DamageConfig, SkillBook};
use crate::error::ItemError;
use crate::items::samples::standard_samples;
use crate::items::{ItemData, ItemFactory, ItemId, TypeRegistry};

pub const ITEMS_FILE: &str = "items.ron";
pub const SKILLS_FILE: &str = "skills.ron";
pub const COMBAT_FILE: &str = "combat.ron";

/// Failures while reading or writing data files
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("failed to serialize {file}: {source}")]
    Serialize {
        file: &'static str,
        #[source]
        source: ron::Error,
    },

    #[error("invalid catalog entry `{name}`: {source}")]
    InvalidEntry {
        name: String,
        #[source]
        source: ItemError,
    },

    #[error("duplicate item id {0} in catalog")]
    DuplicateId(ItemId),
}

/// Everything loaded from the data directory
#[derive(Debug, Clone, PartialEq)]
pub struct DataManager {
    /// Sample catalog fed to `ItemFactory::with_samples`
    pub items: Vec<ItemData>,
    pub skills: SkillBook,
    pub combat: DamageConfig,
}

impl DataManager {
    /// Load from the default data directory, or use defaults on failure
    pub fn new() -> Self {
        let dir = default_data_dir();
        Self::load_from_dir(&dir).unwrap_or_else(|e| {
            log::warn!("Failed to load data from {}: {}. Using defaults.", dir.display(), e);
            Self::default()
        })
    }

    /// Load every data file from `dir`, checking the catalog against the
    /// standard registry
    ///
    /// A missing file falls back to its default. A file that exists but
    /// does not parse, or a catalog entry the factory rejects, is an error.
    pub fn load_from_dir(dir: &Path) -> Result<Self, DataError> {
        Self::load_with_registry(dir, &TypeRegistry::standard())
    }

    /// Same as `load_from_dir`, with catalog entries typed by `registry`
    pub fn load_with_registry(dir: &Path, registry: &TypeRegistry) -> Result<Self, DataError> {
        let items = load_file(dir, ITEMS_FILE, standard_samples)?;
        let skills = load_file(dir, SKILLS_FILE, SkillBook::standard)?;
        let combat = load_file(dir, COMBAT_FILE, DamageConfig::default)?;

        validate_catalog(&items, registry)?;
        for skill_id in items.iter().filter_map(|data| data.battle_skill_id) {
            if skills.find(skill_id).is_none() {
                log::warn!("Catalog references battle skill {} which is not in the skill book", skill_id);
            }
        }

        log::info!(
            "Loaded {} items, {} skills from {}",
            items.len(),
            skills.len(),
            dir.display()
        );
        Ok(Self { items, skills, combat })
    }

    /// Get the item catalog
    pub fn item_catalog(&self) -> &[ItemData] {
        &self.items
    }

    /// Get the skill book
    pub fn skill_book(&self) -> &SkillBook {
        &self.skills
    }

    /// Get the damage tuning
    pub fn damage_config(&self) -> &DamageConfig {
        &self.combat
    }
}

impl Default for DataManager {
    fn default() -> Self {
        Self {
            items: standard_samples(),
            skills: SkillBook::standard(),
            combat: DamageConfig::default(),
        }
    }
}

/// `assets/data` when present, else the platform data directory
pub fn default_data_dir() -> PathBuf {
    let local = PathBuf::from("assets/data");
    if local.is_dir() {
        return local;
    }
    ProjectDirs::from("com", "armory", "Armory")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or(local)
}

/// Write the built-in defaults to `dir` for easy editing
pub fn export_default_data(dir: &Path) -> Result<(), DataError> {
    fs::create_dir_all(dir).map_err(|source| DataError::Io { path: dir.to_path_buf(), source })?;

    write_file(dir, ITEMS_FILE, &standard_samples())?;
    write_file(dir, SKILLS_FILE, &SkillBook::standard())?;
    write_file(dir, COMBAT_FILE, &DamageConfig::default())?;

    log::info!("Exported default data to {}", dir.display());
    Ok(())
}

fn load_file<T: DeserializeOwned>(dir: &Path, file: &str, fallback: impl FnOnce() -> T) -> Result<T, DataError> {
    let path = dir.join(file);
    if !path.exists() {
        log::debug!("{} not found; using defaults", path.display());
        return Ok(fallback());
    }
    let content = fs::read_to_string(&path).map_err(|source| DataError::Io { path: path.clone(), source })?;
    ron::from_str(&content).map_err(|source| DataError::Parse { path, source })
}

fn write_file<T: Serialize>(dir: &Path, file: &'static str, value: &T) -> Result<(), DataError> {
    let content = ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())
        .map_err(|source| DataError::Serialize { file, source })?;
    let path = dir.join(file);
    fs::write(&path, content).map_err(|source| DataError::Io { path, source })
}

/// Every entry must build through `registry`, and ids must be unique
pub fn validate_catalog(items: &[ItemData], registry: &TypeRegistry) -> Result<(), DataError> {
    let factory = ItemFactory::with_samples(registry, Vec::new());
    let mut seen = HashSet::new();
    for data in items {
        if !seen.insert(data.id) {
            return Err(DataError::DuplicateId(data.id));
        }
        factory
            .create(data)
            .map_err(|source| DataError::InvalidEntry { name: data.name.clone(), source })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{ItemCategory, ItemType};

    #[test]
    fn test_export_then_load() {
        let dir = tempfile::tempdir().unwrap();
        export_default_data(dir.path()).unwrap();

        assert!(dir.path().join(ITEMS_FILE).exists(), "items.ron not created");
        assert!(dir.path().join(SKILLS_FILE).exists(), "skills.ron not created");
        assert!(dir.path().join(COMBAT_FILE).exists(), "combat.ron not created");

        let manager = DataManager::load_from_dir(dir.path()).unwrap();
        assert_eq!(manager.items, standard_samples());
        assert_eq!(manager.skills.len(), SkillBook::standard().len());
        assert_eq!(manager.combat.unarmed_power, DamageConfig::default().unarmed_power);
    }

    #[test]
    fn test_missing_files_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = DataManager::load_from_dir(dir.path()).unwrap();
        assert_eq!(manager, DataManager::default());
    }

    #[test]
    fn test_partial_override() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(COMBAT_FILE), "(unarmed_power: 9)").unwrap();
        fs::write(
            dir.path().join(ITEMS_FILE),
            r#"[(id: 1, name: "Pebble", category: "material", value: 1)]"#,
        )
        .unwrap();

        let manager = DataManager::load_from_dir(dir.path()).unwrap();
        assert_eq!(manager.combat.unarmed_power, 9);
        assert_eq!(manager.combat.critical_multiplier, DamageConfig::default().critical_multiplier);
        assert_eq!(manager.items.len(), 1);
        assert_eq!(manager.items[0].category, ItemCategory::Material.as_str());
        assert_eq!(manager.skills, SkillBook::standard());
    }

    #[test]
    fn test_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SKILLS_FILE), "not ron at all {").unwrap();
        assert!(matches!(DataManager::load_from_dir(dir.path()), Err(DataError::Parse { .. })));
    }

    #[test]
    fn test_invalid_entry() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(ITEMS_FILE),
            r#"[(id: 1, name: "Gizmo", category: "gadget")]"#,
        )
        .unwrap();
        match DataManager::load_from_dir(dir.path()) {
            Err(DataError::InvalidEntry { name, source }) => {
                assert_eq!(name, "Gizmo");
                assert_eq!(source, ItemError::UnknownCategory("gadget".to_string()));
            }
            other => panic!("expected invalid entry, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_ids() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(ITEMS_FILE),
            r#"[(id: 7, name: "Ore", category: "material"), (id: 7, name: "Silk", category: "material")]"#,
        )
        .unwrap();
        assert!(matches!(DataManager::load_from_dir(dir.path()), Err(DataError::DuplicateId(7))));
    }

    #[test]
    fn test_catalog_checked_against_given_registry() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(ITEMS_FILE), r#"[(id: 1, name: "Empty Vial", category: "potion")]"#).unwrap();

        // the standard registry makes potions consumables, which need an effect
        assert!(matches!(
            DataManager::load_from_dir(dir.path()),
            Err(DataError::InvalidEntry { .. })
        ));

        let trade_goods = TypeRegistry::from_routes([(ItemCategory::Potion, ItemType::Material)]);
        let manager = DataManager::load_with_registry(dir.path(), &trade_goods).unwrap();
        assert_eq!(manager.items.len(), 1);
        assert!(validate_catalog(&manager.items, &trade_goods).is_ok());
        assert!(validate_catalog(&manager.items, &TypeRegistry::standard()).is_err());
    }
}
