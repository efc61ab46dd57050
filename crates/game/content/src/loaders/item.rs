//! Item catalogue loader.

use std::path::Path;

use rpg_core::NewItemDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{ContentFormat, LoadResult, load_as};

/// Item catalogue file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemCatalog {
    #[serde(default)]
    pub items: Vec<NewItemDefinition>,
}

/// Loader for item definitions.
pub struct ItemLoader;

impl ItemLoader {
    /// Load item definitions from a RON or TOML file.
    ///
    /// Rarity and type use the platform's lowercase names (`verycommon`,
    /// `ultrarare`, `potion`, ...).
    pub fn load(path: &Path) -> LoadResult<Vec<NewItemDefinition>> {
        let catalog: ItemCatalog = load_as(path, "item catalog")?;
        Self::validated(catalog.items)
    }

    pub fn parse(content: &str, format: ContentFormat) -> LoadResult<Vec<NewItemDefinition>> {
        let catalog: ItemCatalog = format.parse(content, "item catalog")?;
        Self::validated(catalog.items)
    }

    fn validated(items: Vec<NewItemDefinition>) -> LoadResult<Vec<NewItemDefinition>> {
        if let Some(index) = items.iter().position(|item| item.name.trim().is_empty()) {
            anyhow::bail!("Item #{} has an empty name", index);
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpg_core::{ItemType, Rarity};

    #[test]
    fn toml_reads_platform_names() {
        let items = ItemLoader::parse(
            r#"
[[items]]
name = "Elixir"
rarity = "ultrarare"
type = "potion"
stackable = true

[[items]]
name = "Pebble"
"#,
            ContentFormat::Toml,
        )
        .unwrap();

        assert_eq!(items[0].rarity, Rarity::UltraRare);
        assert_eq!(items[0].item_type, ItemType::Potion);
        assert!(items[0].stackable);
        assert_eq!(items[1].rarity, Rarity::Common);
        assert_eq!(items[1].item_type, ItemType::Other);
        assert!(!items[1].stackable);
    }

    #[test]
    fn unknown_rarity_fails_to_parse() {
        let result = ItemLoader::parse(
            "[[items]]\nname = \"Crown\"\nrarity = \"mythic\"\n",
            ContentFormat::Toml,
        );
        assert!(result.is_err());
    }
}
