//! JSON snapshot store.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rpg_core::{Battle, Character, InventoryItem, ItemDefinition, MonsterTemplate};
use serde::{Deserialize, Serialize};

use crate::repository::memory::{InMemoryStore, Table};
use crate::repository::{
    BattleRepository, CharacterRepository, InventoryRepository, ItemRepository,
    MonsterRepository, RepositoryError, Result, Store,
};

/// On-disk layout of `store.json`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    #[serde(default)]
    characters: Vec<Character>,
    #[serde(default)]
    battles: Vec<Battle>,
    #[serde(default)]
    monsters: Vec<MonsterTemplate>,
    #[serde(default)]
    items: Vec<ItemDefinition>,
    #[serde(default)]
    inventory: Vec<InventoryItem>,
}

/// Store that keeps every table in memory and writes a JSON snapshot of all
/// of them on [`Store::flush`].
///
/// # File Format
///
/// A single `store.json` in the data directory. Writes go to
/// `store.json.tmp` first and are renamed over the previous snapshot, so a
/// crash mid-write leaves the last complete snapshot in place.
pub struct FileStore {
    path: PathBuf,
    tables: InMemoryStore,
    flush_lock: Mutex<()>,
}

impl FileStore {
    pub const FILE_NAME: &'static str = "store.json";

    /// Open (or create) the store rooted at `data_dir`.
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self> {
        let data_dir = data_dir.as_ref();
        fs::create_dir_all(data_dir).map_err(RepositoryError::Io)?;
        let path = data_dir.join(Self::FILE_NAME);

        let snapshot = if path.exists() {
            let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
            let snapshot: Snapshot =
                serde_json::from_slice(&bytes).map_err(|e| RepositoryError::Json(e.to_string()))?;
            tracing::debug!("Loaded store snapshot from {}", path.display());
            snapshot
        } else {
            Snapshot::default()
        };

        let tables = InMemoryStore {
            characters: Table::from_rows(snapshot.characters),
            battles: Table::from_rows(snapshot.battles),
            monsters: Table::from_rows(snapshot.monsters),
            items: Table::from_rows(snapshot.items),
            inventory: Table::from_rows(snapshot.inventory),
        };

        Ok(Self {
            path,
            tables,
            flush_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn snapshot(&self) -> Result<Snapshot> {
        Ok(Snapshot {
            characters: self.tables.characters.all_rows()?,
            battles: self.tables.battles.all_rows()?,
            monsters: self.tables.monsters.all_rows()?,
            items: self.tables.items.all_rows()?,
            inventory: self.tables.inventory.all_rows()?,
        })
    }
}

impl Store for FileStore {
    fn characters(&self) -> &dyn CharacterRepository {
        self.tables.characters()
    }

    fn battles(&self) -> &dyn BattleRepository {
        self.tables.battles()
    }

    fn monsters(&self) -> &dyn MonsterRepository {
        self.tables.monsters()
    }

    fn items(&self) -> &dyn ItemRepository {
        self.tables.items()
    }

    fn inventory(&self) -> &dyn InventoryRepository {
        self.tables.inventory()
    }

    fn flush(&self) -> Result<()> {
        let _guard = self
            .flush_lock
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        let snapshot = self.snapshot()?;
        let bytes = serde_json::to_vec_pretty(&snapshot)
            .map_err(|e| RepositoryError::Json(e.to_string()))?;

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, &self.path).map_err(RepositoryError::Io)?;

        tracing::debug!("Flushed store snapshot to {}", self.path.display());
        Ok(())
    }
}
