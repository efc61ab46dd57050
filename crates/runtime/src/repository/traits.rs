//! Repository contracts for the five persisted tables.
//!
//! Rows are keyed by integer id. Every `insert` takes the unsaved `New*`
//! shape and hands back the persisted record with its assigned id; every
//! `update` requires the row to exist already.

use rpg_core::{
    Battle, BattleId, BattleState, Character, CharacterId, InventoryItem, InventoryItemId,
    ItemDefinition, ItemId, MonsterId, MonsterTemplate, NewBattle, NewCharacter, NewInventoryItem,
    NewItemDefinition, NewMonsterTemplate, UserId,
};

use super::Result;

/// Characters, one per external user.
pub trait CharacterRepository: Send + Sync {
    fn get(&self, id: CharacterId) -> Result<Option<Character>>;

    fn find_by_user(&self, userid: UserId) -> Result<Option<Character>>;

    fn insert(&self, character: NewCharacter) -> Result<Character>;

    fn update(&self, character: &Character) -> Result<()>;
}

/// Battles between a character and a spawned monster.
pub trait BattleRepository: Send + Sync {
    fn get(&self, id: BattleId) -> Result<Option<Battle>>;

    /// The lowest-id battle of `character_id` in `state`.
    ///
    /// Callers keep at most one `NotStarted` and one `Ongoing` battle per
    /// character, so for those states this is "the" battle.
    fn find_for_character(
        &self,
        character_id: CharacterId,
        state: BattleState,
    ) -> Result<Option<Battle>>;

    fn insert(&self, battle: NewBattle) -> Result<Battle>;

    fn update(&self, battle: &Battle) -> Result<()>;
}

/// Monster templates.
pub trait MonsterRepository: Send + Sync {
    fn get(&self, id: MonsterId) -> Result<Option<MonsterTemplate>>;

    /// Every template, ordered by id.
    fn all(&self) -> Result<Vec<MonsterTemplate>>;

    fn insert(&self, monster: NewMonsterTemplate) -> Result<MonsterTemplate>;

    fn update(&self, monster: &MonsterTemplate) -> Result<()>;

    /// Returns whether a row was removed.
    fn delete(&self, id: MonsterId) -> Result<bool>;
}

/// Item definitions.
pub trait ItemRepository: Send + Sync {
    fn get(&self, id: ItemId) -> Result<Option<ItemDefinition>>;

    /// Every definition, ordered by id.
    fn all(&self) -> Result<Vec<ItemDefinition>>;

    /// Definitions for the given ids, ordered by id. Unknown ids are skipped.
    fn find_list(&self, ids: &[ItemId]) -> Result<Vec<ItemDefinition>> {
        Ok(self
            .all()?
            .into_iter()
            .filter(|item| ids.contains(&item.id))
            .collect())
    }

    fn insert(&self, item: NewItemDefinition) -> Result<ItemDefinition>;

    fn update(&self, item: &ItemDefinition) -> Result<()>;

    fn delete(&self, id: ItemId) -> Result<bool>;
}

/// Inventory rows.
pub trait InventoryRepository: Send + Sync {
    fn get(&self, id: InventoryItemId) -> Result<Option<InventoryItem>>;

    /// Every row held by `character_id`, ordered by id.
    fn for_character(&self, character_id: CharacterId) -> Result<Vec<InventoryItem>>;

    /// The row holding `item_id` for `character_id`, if any.
    fn find(&self, character_id: CharacterId, item_id: ItemId) -> Result<Option<InventoryItem>>;

    fn insert(&self, row: NewInventoryItem) -> Result<InventoryItem>;

    fn update(&self, row: &InventoryItem) -> Result<()>;

    fn delete(&self, id: InventoryItemId) -> Result<bool>;
}

/// Bundle of every table the runtime reads and writes.
pub trait Store: Send + Sync {
    fn characters(&self) -> &dyn CharacterRepository;

    fn battles(&self) -> &dyn BattleRepository;

    fn monsters(&self) -> &dyn MonsterRepository;

    fn items(&self) -> &dyn ItemRepository;

    fn inventory(&self) -> &dyn InventoryRepository;

    /// Make all writes so far durable. No-op for purely in-memory stores.
    fn flush(&self) -> Result<()> {
        Ok(())
    }
}
