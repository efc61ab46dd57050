//! Records tracked by the RPG layer.
//!
//! Every mutable entity comes in two shapes: a `New*` value that has never
//! been persisted and the persisted record carrying its id. Repositories turn
//! the former into the latter on insert, so "has an id" is a type-level fact
//! rather than a nullable field.
mod error;
pub mod types;

pub use error::StateError;
pub use types::{
    Battle, BattleId, BattleState, Character, CharacterId, InventoryItem, InventoryItemId,
    ItemDefinition, ItemId, ItemType, MonsterId, MonsterTemplate, NewBattle, NewCharacter,
    NewInventoryItem, NewItemDefinition, NewMonsterTemplate, Rarity, UserId,
};
