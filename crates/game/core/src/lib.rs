//! Battle and progression rules for the learning-platform RPG layer.
//!
//! `rpg-core` defines the canonical rules (level table, character vitals,
//! battle state machine, inventory penalties) as pure types and functions.
//! It performs no I/O: persistence, event dispatch and clocks live in
//! `rpg-runtime`, which drives the state transitions exposed here.
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod events;
pub mod progression;
pub mod state;

pub use combat::{DamageRange, StackLoss, apply_damage, monster_counter_range, player_attack_range};
pub use config::RpgConfig;
pub use env::{PcgRng, RngOracle, ScriptedRng, choose};
pub use error::{ErrorSeverity, GameError};
pub use events::{BattleEnded, EventError, EventKind, RpgEvent, XpGained};
pub use progression::{LevelTable, MAX_LEVEL};
pub use state::{
    Battle, BattleId, BattleState, Character, CharacterId, InventoryItem, InventoryItemId,
    ItemDefinition, ItemId, ItemType, MonsterId, MonsterTemplate, NewBattle, NewCharacter,
    NewInventoryItem, NewItemDefinition, NewMonsterTemplate, Rarity, StateError, UserId,
};
