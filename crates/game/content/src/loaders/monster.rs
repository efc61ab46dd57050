//! Monster bestiary loader.

use std::path::Path;

use rpg_core::NewMonsterTemplate;
use serde::{Deserialize, Serialize};

use crate::loaders::{ContentFormat, LoadResult, load_as};

/// Bestiary file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonsterCatalog {
    #[serde(default)]
    pub monsters: Vec<NewMonsterTemplate>,
}

/// Loader for monster templates.
pub struct MonsterLoader;

impl MonsterLoader {
    /// Load and validate a bestiary from a RON or TOML file.
    pub fn load(path: &Path) -> LoadResult<Vec<NewMonsterTemplate>> {
        let catalog: MonsterCatalog = load_as(path, "monster catalog")?;
        Self::validated(catalog.monsters)
    }

    /// Parse a bestiary from an in-memory string.
    pub fn parse(content: &str, format: ContentFormat) -> LoadResult<Vec<NewMonsterTemplate>> {
        let catalog: MonsterCatalog = format.parse(content, "monster catalog")?;
        Self::validated(catalog.monsters)
    }

    fn validated(monsters: Vec<NewMonsterTemplate>) -> LoadResult<Vec<NewMonsterTemplate>> {
        for (index, monster) in monsters.iter().enumerate() {
            if monster.name.trim().is_empty() {
                anyhow::bail!("Monster #{} has an empty name", index);
            }
            monster
                .validate()
                .map_err(|e| anyhow::anyhow!("Invalid monster '{}': {}", monster.name, e))?;
        }
        Ok(monsters)
    }
}
