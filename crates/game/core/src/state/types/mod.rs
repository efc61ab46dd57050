mod battle;
mod character;
mod common;
mod item;
mod monster;

pub use battle::{Battle, BattleState, NewBattle};
pub use character::{Character, NewCharacter};
pub use common::{BattleId, CharacterId, InventoryItemId, ItemId, MonsterId, UserId};
pub use item::{
    InventoryItem, ItemDefinition, ItemType, NewInventoryItem, NewItemDefinition, Rarity,
};
pub use monster::{MonsterTemplate, NewMonsterTemplate};
