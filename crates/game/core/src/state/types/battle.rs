use crate::combat::apply_damage;
use crate::state::StateError;

use super::common::{BattleId, CharacterId, MonsterId};
use super::monster::MonsterTemplate;

/// Lifecycle of a battle.
///
/// ```text
/// NOT_STARTED ──start──▶ ONGOING ──▶ VICTORY | DEFEAT
///      │                    │
///      └──────decline───────┴──────▶ RETREATED
/// ```
///
/// The discriminants are the raw values stored by the host platform.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::FromRepr,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum BattleState {
    /// Provoked, waiting for the character to accept or decline.
    NotStarted = 0,
    Ongoing = 1,
    Victory = 2,
    Defeat = 3,
    Retreated = 4,
}

impl BattleState {
    /// Decode a raw stored value, rejecting anything outside `0..=4`.
    pub fn from_raw(raw: i64) -> Result<Self, StateError> {
        u8::try_from(raw)
            .ok()
            .and_then(Self::from_repr)
            .ok_or(StateError::InvalidBattleState(raw))
    }

    pub const fn as_raw(self) -> u8 {
        self as u8
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Victory | Self::Defeat | Self::Retreated)
    }
}

/// A battle that has not been persisted yet.
///
/// Starts empty; [`NewBattle::setup`] wires it to a character and monster
/// exactly once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewBattle {
    character_id: CharacterId,
    monster_id: MonsterId,
    monster_hp: u32,
    timecreated: i64,
    state: Option<BattleState>,
}

impl NewBattle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign the character and spawn the monster at full hitpoints.
    pub fn setup(
        &mut self,
        character_id: CharacterId,
        monster: &MonsterTemplate,
        timecreated: i64,
    ) -> Result<(), StateError> {
        if self.is_setup() || !self.character_id.is_unset() || !self.monster_id.is_unset() {
            return Err(StateError::BattleAlreadySetup);
        }

        self.character_id = character_id;
        self.monster_id = monster.id;
        self.monster_hp = monster.max_hp;
        self.timecreated = timecreated;
        self.state = Some(BattleState::NotStarted);
        Ok(())
    }

    pub fn is_setup(&self) -> bool {
        self.state.is_some()
    }

    pub fn character_id(&self) -> CharacterId {
        self.character_id
    }

    pub fn into_persisted(self, id: BattleId) -> Result<Battle, StateError> {
        let state = self.state.ok_or(StateError::BattleNotSetup)?;
        Ok(Battle {
            id,
            character_id: self.character_id,
            monster_id: self.monster_id,
            monster_hp: self.monster_hp,
            timecreated: self.timecreated,
            state,
        })
    }
}

/// One encounter between a character and a spawned monster.
///
/// The battle owns the monster's current hitpoints; the template it was
/// spawned from is never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Battle {
    id: BattleId,
    character_id: CharacterId,
    monster_id: MonsterId,
    monster_hp: u32,
    timecreated: i64,
    state: BattleState,
}

impl Battle {
    #[inline]
    pub fn id(&self) -> BattleId {
        self.id
    }

    #[inline]
    pub fn character_id(&self) -> CharacterId {
        self.character_id
    }

    #[inline]
    pub fn monster_id(&self) -> MonsterId {
        self.monster_id
    }

    #[inline]
    pub fn monster_hp(&self) -> u32 {
        self.monster_hp
    }

    #[inline]
    pub fn timecreated(&self) -> i64 {
        self.timecreated
    }

    #[inline]
    pub fn state(&self) -> BattleState {
        self.state
    }

    pub fn is_setup(&self) -> bool {
        !self.character_id.is_unset()
    }

    pub fn can_retreat(&self) -> bool {
        matches!(self.state, BattleState::NotStarted | BattleState::Ongoing)
    }

    pub fn has_ended(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn is_ongoing(&self) -> bool {
        self.state == BattleState::Ongoing
    }

    /// Overwrite the state. Causal legality is the caller's responsibility.
    pub fn change_state(&mut self, state: BattleState) {
        self.state = state;
    }

    /// Like [`Battle::change_state`] for a raw stored value.
    pub fn change_state_raw(&mut self, raw: i64) -> Result<(), StateError> {
        self.state = BattleState::from_raw(raw)?;
        Ok(())
    }

    /// Subtract hitpoints from the monster, clamping at zero.
    ///
    /// When the blow is lethal the battle moves to `Victory` and the state it
    /// left is returned.
    pub fn damage_monster(&mut self, amount: u32) -> Option<BattleState> {
        self.monster_hp = apply_damage(self.monster_hp, amount);
        if self.monster_hp > 0 {
            return None;
        }

        let old_state = self.state;
        self.change_state(BattleState::Victory);
        Some(old_state)
    }
}
