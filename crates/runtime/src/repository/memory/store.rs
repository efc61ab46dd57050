//! In-memory [`Store`] built from one [`Table`] per record type.

use rpg_core::{
    Battle, BattleId, BattleState, Character, CharacterId, InventoryItem, InventoryItemId,
    ItemDefinition, ItemId, MonsterId, MonsterTemplate, NewBattle, NewCharacter, NewInventoryItem,
    NewItemDefinition, NewMonsterTemplate, StateError, UserId,
};

use super::table::Table;
use crate::repository::{
    BattleRepository, CharacterRepository, InventoryRepository, ItemRepository, MonsterRepository,
    RepositoryError, Result, Store,
};

/// Process-local store. Nothing survives the process.
#[derive(Default)]
pub struct InMemoryStore {
    pub(crate) characters: Table<Character>,
    pub(crate) battles: Table<Battle>,
    pub(crate) monsters: Table<MonsterTemplate>,
    pub(crate) items: Table<ItemDefinition>,
    pub(crate) inventory: Table<InventoryItem>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for InMemoryStore {
    fn characters(&self) -> &dyn CharacterRepository {
        &self.characters
    }

    fn battles(&self) -> &dyn BattleRepository {
        &self.battles
    }

    fn monsters(&self) -> &dyn MonsterRepository {
        &self.monsters
    }

    fn items(&self) -> &dyn ItemRepository {
        &self.items
    }

    fn inventory(&self) -> &dyn InventoryRepository {
        &self.inventory
    }
}

impl CharacterRepository for Table<Character> {
    fn get(&self, id: CharacterId) -> Result<Option<Character>> {
        self.get_row(id.get())
    }

    fn find_by_user(&self, userid: UserId) -> Result<Option<Character>> {
        self.find_row(|character| character.userid() == userid)
    }

    fn insert(&self, character: NewCharacter) -> Result<Character> {
        self.insert_with(|id| {
            Ok::<_, std::convert::Infallible>(character.into_persisted(CharacterId(id)))
        })
    }

    fn update(&self, character: &Character) -> Result<()> {
        self.update_row(character)
    }
}

impl BattleRepository for Table<Battle> {
    fn get(&self, id: BattleId) -> Result<Option<Battle>> {
        self.get_row(id.get())
    }

    fn find_for_character(
        &self,
        character_id: CharacterId,
        state: BattleState,
    ) -> Result<Option<Battle>> {
        self.find_row(|battle| battle.character_id() == character_id && battle.state() == state)
    }

    fn insert(&self, battle: NewBattle) -> Result<Battle> {
        self.insert_with(|id| battle.into_persisted(BattleId(id)))
    }

    fn update(&self, battle: &Battle) -> Result<()> {
        self.update_row(battle)
    }
}

impl MonsterRepository for Table<MonsterTemplate> {
    fn get(&self, id: MonsterId) -> Result<Option<MonsterTemplate>> {
        self.get_row(id.get())
    }

    fn all(&self) -> Result<Vec<MonsterTemplate>> {
        self.all_rows()
    }

    fn insert(&self, monster: NewMonsterTemplate) -> Result<MonsterTemplate> {
        self.insert_with(|id| {
            monster.validate()?;
            Ok::<_, StateError>(monster.into_persisted(MonsterId(id)))
        })
    }

    fn update(&self, monster: &MonsterTemplate) -> Result<()> {
        monster
            .validate()
            .map_err(|e| RepositoryError::InvalidRecord(e.to_string()))?;
        self.update_row(monster)
    }

    fn delete(&self, id: MonsterId) -> Result<bool> {
        self.delete_row(id.get())
    }
}

impl ItemRepository for Table<ItemDefinition> {
    fn get(&self, id: ItemId) -> Result<Option<ItemDefinition>> {
        self.get_row(id.get())
    }

    fn all(&self) -> Result<Vec<ItemDefinition>> {
        self.all_rows()
    }

    fn find_list(&self, ids: &[ItemId]) -> Result<Vec<ItemDefinition>> {
        self.filter_rows(|item| ids.contains(&item.id))
    }

    fn insert(&self, item: NewItemDefinition) -> Result<ItemDefinition> {
        self.insert_with(|id| Ok::<_, std::convert::Infallible>(item.into_persisted(ItemId(id))))
    }

    fn update(&self, item: &ItemDefinition) -> Result<()> {
        self.update_row(item)
    }

    fn delete(&self, id: ItemId) -> Result<bool> {
        self.delete_row(id.get())
    }
}

impl InventoryRepository for Table<InventoryItem> {
    fn get(&self, id: InventoryItemId) -> Result<Option<InventoryItem>> {
        self.get_row(id.get())
    }

    fn for_character(&self, character_id: CharacterId) -> Result<Vec<InventoryItem>> {
        self.filter_rows(|row| row.character_id() == character_id)
    }

    fn find(&self, character_id: CharacterId, item_id: ItemId) -> Result<Option<InventoryItem>> {
        self.find_row(|row| row.character_id() == character_id && row.item_id() == item_id)
    }

    fn insert(&self, row: NewInventoryItem) -> Result<InventoryItem> {
        self.insert_with(|id| row.into_persisted(InventoryItemId(id)))
    }

    fn update(&self, row: &InventoryItem) -> Result<()> {
        self.update_row(row)
    }

    fn delete(&self, id: InventoryItemId) -> Result<bool> {
        self.delete_row(id.get())
    }
}
