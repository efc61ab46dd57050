//! Read models returned by runtime operations.

use rpg_core::{Battle, InventoryItem, ItemDefinition, MonsterTemplate};
use serde::Serialize;

/// One inventory row joined with its item definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryLine {
    pub row: InventoryItem,
    pub item: ItemDefinition,
}

/// A battle together with the template its monster was spawned from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncounterView {
    pub battle: Battle,
    pub monster: MonsterTemplate,
}

/// Flavour line shown under the adventure summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailPrompt {
    FollowThePathFurther,
    LookForTrouble,
}

/// Everything the adventure page shows for one user.
///
/// At most one of `ongoing` and `offered` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdventureView {
    pub xp: u64,
    pub level: u32,
    pub remaining_xp: u64,
    /// XP required for the next level, `None` at the level cap.
    pub target_xp: Option<u64>,
    pub hp: u32,
    pub max_hp: u32,
    pub inventory: Vec<InventoryLine>,
    pub ongoing: Option<EncounterView>,
    pub offered: Option<EncounterView>,
    pub prompt: TrailPrompt,
}

/// Outcome of one attack turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttackReport {
    pub player_damage: u32,
    /// `None` when the player's blow ended the battle.
    pub monster_damage: Option<u32>,
    /// The battle as persisted after the turn.
    pub battle: Battle,
}
