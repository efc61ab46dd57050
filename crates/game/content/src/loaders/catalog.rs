//! Combined monster and item catalogue.

use std::path::Path;

use rpg_core::{NewItemDefinition, NewMonsterTemplate};

use crate::loaders::{ContentFormat, ItemLoader, LoadResult, MonsterLoader};

/// Everything needed to seed an empty store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub monsters: Vec<NewMonsterTemplate>,
    pub items: Vec<NewItemDefinition>,
}

impl Catalog {
    /// The starter catalogue embedded in this crate.
    pub fn builtin() -> LoadResult<Self> {
        let monsters =
            MonsterLoader::parse(include_str!("../../data/monsters.ron"), ContentFormat::Ron)?;
        let items = ItemLoader::parse(include_str!("../../data/items.toml"), ContentFormat::Toml)?;
        Ok(Self { monsters, items })
    }

    /// Load a catalogue from separate bestiary and item files.
    pub fn load(monsters: &Path, items: &Path) -> LoadResult<Self> {
        Ok(Self {
            monsters: MonsterLoader::load(monsters)?,
            items: ItemLoader::load(items)?,
        })
    }

    /// Load `monsters.{ron,toml}` and `items.{ron,toml}` from a directory.
    ///
    /// RON wins when both formats are present.
    pub fn load_dir(dir: &Path) -> LoadResult<Self> {
        let monsters = find_file(dir, "monsters")?;
        let items = find_file(dir, "items")?;
        Self::load(&monsters, &items)
    }

    pub fn is_empty(&self) -> bool {
        self.monsters.is_empty() && self.items.is_empty()
    }
}

fn find_file(dir: &Path, stem: &str) -> LoadResult<std::path::PathBuf> {
    ["ron", "toml"]
        .iter()
        .map(|ext| dir.join(format!("{stem}.{ext}")))
        .find(|path| path.is_file())
        .ok_or_else(|| anyhow::anyhow!("No {stem}.ron or {stem}.toml found in {}", dir.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = Catalog::builtin().unwrap();
        assert!(!catalog.monsters.is_empty());
        assert!(!catalog.items.is_empty());
        assert!(catalog.monsters.iter().all(|m| m.validate().is_ok()));
    }

    #[test]
    fn load_dir_mixes_formats() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("monsters.toml"),
            "[[monsters]]\nname = \"Bat\"\nmax_hp = 12\nlevel = 1\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("items.ron"),
            r#"(items: [(name: "Torch", type: tool, stackable: true)])"#,
        )
        .unwrap();

        let catalog = Catalog::load_dir(dir.path()).unwrap();
        assert_eq!(catalog.monsters[0].name, "Bat");
        assert_eq!(catalog.items[0].name, "Torch");
    }

    #[test]
    fn load_dir_requires_both_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("items.toml"), "").unwrap();
        let err = Catalog::load_dir(dir.path()).unwrap_err();
        assert!(err.to_string().contains("monsters"));
    }
}
