//! Generic id-keyed table backing every in-memory repository.

use std::collections::BTreeMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

use rpg_core::{Battle, Character, InventoryItem, ItemDefinition, MonsterTemplate};

use crate::repository::{RepositoryError, Result};

/// A persisted row that knows its own id.
pub trait Record: Clone + Send + Sync {
    const TABLE: &'static str;

    fn record_id(&self) -> u64;
}

impl Record for Character {
    const TABLE: &'static str = "character";

    fn record_id(&self) -> u64 {
        self.id().get()
    }
}

impl Record for Battle {
    const TABLE: &'static str = "battle";

    fn record_id(&self) -> u64 {
        self.id().get()
    }
}

impl Record for MonsterTemplate {
    const TABLE: &'static str = "monster";

    fn record_id(&self) -> u64 {
        self.id.get()
    }
}

impl Record for ItemDefinition {
    const TABLE: &'static str = "item";

    fn record_id(&self) -> u64 {
        self.id.get()
    }
}

impl Record for InventoryItem {
    const TABLE: &'static str = "item_instance";

    fn record_id(&self) -> u64 {
        self.id().get()
    }
}

/// Rows ordered by id with a monotonically increasing id sequence.
///
/// Ids start at 1; 0 is reserved for "unset".
pub struct Table<T> {
    rows: RwLock<BTreeMap<u64, T>>,
    next_id: AtomicU64,
}

impl<T: Record> Table<T> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Rebuild a table from previously persisted rows.
    pub fn from_rows(rows: impl IntoIterator<Item = T>) -> Self {
        let rows: BTreeMap<u64, T> = rows
            .into_iter()
            .map(|row| (row.record_id(), row))
            .collect();
        let next_id = rows.keys().next_back().map_or(1, |max| max + 1);
        Self {
            rows: RwLock::new(rows),
            next_id: AtomicU64::new(next_id),
        }
    }

    pub fn get_row(&self, id: u64) -> Result<Option<T>> {
        let rows = self.rows.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(rows.get(&id).cloned())
    }

    /// First row (by id) matching `predicate`.
    pub fn find_row(&self, predicate: impl Fn(&T) -> bool) -> Result<Option<T>> {
        let rows = self.rows.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(rows.values().find(|row| predicate(row)).cloned())
    }

    /// Every row (by id) matching `predicate`.
    pub fn filter_rows(&self, predicate: impl Fn(&T) -> bool) -> Result<Vec<T>> {
        let rows = self.rows.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(rows.values().filter(|row| predicate(row)).cloned().collect())
    }

    pub fn all_rows(&self) -> Result<Vec<T>> {
        self.filter_rows(|_| true)
    }

    /// Allocate the next id and store the row `build` makes from it.
    ///
    /// Nothing is stored when `build` fails; the id is burned.
    pub fn insert_with<E>(&self, build: impl FnOnce(u64) -> std::result::Result<T, E>) -> Result<T>
    where
        E: std::fmt::Display,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let row = build(id).map_err(|e| RepositoryError::InvalidRecord(e.to_string()))?;

        let mut rows = self.rows.write().map_err(|_| RepositoryError::LockPoisoned)?;
        rows.insert(id, row.clone());
        Ok(row)
    }

    /// Overwrite an existing row.
    pub fn update_row(&self, row: &T) -> Result<()> {
        let id = row.record_id();
        let mut rows = self.rows.write().map_err(|_| RepositoryError::LockPoisoned)?;
        match rows.get_mut(&id) {
            Some(slot) => {
                *slot = row.clone();
                Ok(())
            }
            None => Err(RepositoryError::MissingRow { table: T::TABLE, id }),
        }
    }

    pub fn delete_row(&self, id: u64) -> Result<bool> {
        let mut rows = self.rows.write().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(rows.remove(&id).is_some())
    }

    pub fn len(&self) -> usize {
        self.rows.read().map(|rows| rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Record> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpg_core::{ItemId, ItemType, NewItemDefinition, Rarity};

    fn item(name: &str) -> NewItemDefinition {
        NewItemDefinition {
            name: name.into(),
            rarity: Rarity::Rare,
            item_type: ItemType::Tool,
            stackable: false,
        }
    }

    #[test]
    fn ids_start_at_one_and_increase() {
        let table: Table<ItemDefinition> = Table::new();
        let first = table
            .insert_with(|id| Ok::<_, String>(item("Rope").into_persisted(ItemId(id))))
            .unwrap();
        let second = table
            .insert_with(|id| Ok::<_, String>(item("Lamp").into_persisted(ItemId(id))))
            .unwrap();
        assert_eq!(first.id, ItemId(1));
        assert_eq!(second.id, ItemId(2));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn failed_build_stores_nothing() {
        let table: Table<ItemDefinition> = Table::new();
        let result = table.insert_with(|_| Err::<ItemDefinition, _>("bad row"));
        assert!(matches!(result, Err(RepositoryError::InvalidRecord(_))));
        assert!(table.is_empty());
    }

    #[test]
    fn update_requires_existing_row() {
        let table: Table<ItemDefinition> = Table::new();
        let ghost = item("Ghost").into_persisted(ItemId(9));
        assert!(matches!(
            table.update_row(&ghost),
            Err(RepositoryError::MissingRow { table: "item", id: 9 })
        ));
    }

    #[test]
    fn from_rows_continues_the_sequence() {
        let table = Table::from_rows([
            item("A").into_persisted(ItemId(3)),
            item("B").into_persisted(ItemId(7)),
        ]);
        let next = table
            .insert_with(|id| Ok::<_, String>(item("C").into_persisted(ItemId(id))))
            .unwrap();
        assert_eq!(next.id, ItemId(8));
        assert!(table.delete_row(3).unwrap());
        assert!(!table.delete_row(3).unwrap());
    }
}
