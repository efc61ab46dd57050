//! State management errors.
//!
//! Errors raised while building or transitioning records: battle setup,
//! raw state decoding and reference-data validation.

use crate::error::{ErrorSeverity, GameError};

/// Errors that occur during record construction or state transitions.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    /// Raw battle state outside `NOT_STARTED..=RETREATED`.
    #[error("Invalid battle state {0}")]
    InvalidBattleState(i64),

    /// `setup` was called on a battle that already has a character, monster or state.
    #[error("Battle has already been set up")]
    BattleAlreadySetup,

    /// A battle was used before `setup` assigned it a character and monster.
    #[error("Battle has not been set up")]
    BattleNotSetup,

    /// Monster templates need positive hitpoints and a positive level.
    #[error("Invalid monster template (max_hp: {max_hp}, level: {level})")]
    InvalidMonsterTemplate {
        /// Provided hitpoints.
        max_hp: u32,
        /// Provided level.
        level: u32,
    },

    /// Inventory stacks never drop below one unit.
    #[error("Invalid inventory stack {0}")]
    InvalidStack(u32),
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        use StateError::*;
        match self {
            // Corrupted stored state
            InvalidBattleState(_) => ErrorSeverity::Fatal,

            // Caller skipped a precondition check
            BattleAlreadySetup | BattleNotSetup => ErrorSeverity::Internal,

            InvalidMonsterTemplate { .. } | InvalidStack(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use StateError::*;
        match self {
            InvalidBattleState(_) => "STATE_INVALID_BATTLE_STATE",
            BattleAlreadySetup => "STATE_BATTLE_ALREADY_SETUP",
            BattleNotSetup => "STATE_BATTLE_NOT_SETUP",
            InvalidMonsterTemplate { .. } => "STATE_INVALID_MONSTER_TEMPLATE",
            InvalidStack(_) => "STATE_INVALID_STACK",
        }
    }
}
