//! Domain events emitted by progression and battle resolution.
//!
//! Payloads validate themselves on construction: an event that contradicts
//! itself is a programming error and never reaches an observer.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{Battle, BattleId, BattleState, Character, CharacterId, UserId};

/// Discriminant used by observers to filter events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EventKind {
    XpGained,
    BattleEnded,
}

/// Event wrapper carried through the runtime's dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RpgEvent {
    XpGained(XpGained),
    BattleEnded(BattleEnded),
}

impl RpgEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            RpgEvent::XpGained(_) => EventKind::XpGained,
            RpgEvent::BattleEnded(_) => EventKind::BattleEnded,
        }
    }

    /// The user the event concerns.
    pub fn userid(&self) -> UserId {
        match self {
            RpgEvent::XpGained(event) => event.userid,
            RpgEvent::BattleEnded(event) => event.userid,
        }
    }
}

/// A character gained experience.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct XpGained {
    pub character_id: CharacterId,
    pub userid: UserId,
    pub old_level: u32,
    pub new_level: u32,
    pub leveled_up: bool,
    pub xp_gained: u64,
    pub old_xp: u64,
    pub new_xp: u64,
    /// The character record before the grant was applied.
    pub snapshot: Character,
}

impl XpGained {
    pub fn new(
        snapshot: Character,
        old_level: u32,
        new_level: u32,
        xp_gained: u64,
        new_xp: u64,
    ) -> Result<Self, EventError> {
        let event = Self {
            character_id: snapshot.id(),
            userid: snapshot.userid(),
            old_level,
            new_level,
            leveled_up: new_level > old_level,
            xp_gained,
            old_xp: snapshot.xp(),
            new_xp,
            snapshot,
        };
        event.validate()?;
        Ok(event)
    }

    pub fn validate(&self) -> Result<(), EventError> {
        if self.xp_gained == 0 {
            return Err(EventError::NonPositiveXp);
        }
        if self.old_level > self.new_level {
            return Err(EventError::LevelDecreased {
                old: self.old_level,
                new: self.new_level,
            });
        }
        if self.old_xp > self.new_xp {
            return Err(EventError::XpDecreased {
                old: self.old_xp,
                new: self.new_xp,
            });
        }
        if self.leveled_up != (self.new_level > self.old_level) {
            return Err(EventError::LevelUpMismatch);
        }
        Ok(())
    }
}

/// A battle reached a terminal state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleEnded {
    pub battle_id: BattleId,
    pub character_id: CharacterId,
    pub userid: UserId,
    pub old_state: BattleState,
    pub new_state: BattleState,
    /// The battle record as it was before the terminal transition.
    pub record: Battle,
}

impl BattleEnded {
    /// `record` is the battle taken before it was mutated; its state becomes
    /// `old_state`.
    pub fn new(record: Battle, userid: UserId, new_state: BattleState) -> Result<Self, EventError> {
        let event = Self {
            battle_id: record.id(),
            character_id: record.character_id(),
            userid,
            old_state: record.state(),
            new_state,
            record,
        };
        event.validate()?;
        Ok(event)
    }

    pub fn validate(&self) -> Result<(), EventError> {
        if !matches!(
            self.old_state,
            BattleState::NotStarted | BattleState::Ongoing
        ) {
            return Err(EventError::InvalidOldState(self.old_state));
        }
        if !self.new_state.is_terminal() {
            return Err(EventError::InvalidNewState(self.new_state));
        }
        Ok(())
    }
}

/// Malformed event payloads.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventError {
    #[error("The 'xpgained' value cannot be less than or equal to 0")]
    NonPositiveXp,

    #[error("The 'oldlevel' value ({old}) cannot be greater than 'newlevel' ({new})")]
    LevelDecreased { old: u32, new: u32 },

    #[error("The 'oldxp' value ({old}) cannot be greater than 'newxp' ({new})")]
    XpDecreased { old: u64, new: u64 },

    #[error("The 'leveledup' flag does not match the level change")]
    LevelUpMismatch,

    #[error("oldstate must be either not_started or ongoing, got {0}")]
    InvalidOldState(BattleState),

    #[error("newstate must be either victory, defeat or retreated, got {0}")]
    InvalidNewState(BattleState),
}

impl GameError for EventError {
    fn severity(&self) -> ErrorSeverity {
        // Every malformed payload is a bug in the emitting code
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        use EventError::*;
        match self {
            NonPositiveXp => "EVENT_NON_POSITIVE_XP",
            LevelDecreased { .. } => "EVENT_LEVEL_DECREASED",
            XpDecreased { .. } => "EVENT_XP_DECREASED",
            LevelUpMismatch => "EVENT_LEVEL_UP_MISMATCH",
            InvalidOldState(_) => "EVENT_INVALID_OLD_STATE",
            InvalidNewState(_) => "EVENT_INVALID_NEW_STATE",
        }
    }
}
