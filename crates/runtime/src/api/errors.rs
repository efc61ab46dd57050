//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from repositories, rule validation and event dispatch so
//! callers can bubble them up with consistent context, and classifies each
//! failure for the web boundary through [`RuntimeError::status`].
use thiserror::Error;

use rpg_core::{
    BattleId, BattleState, CharacterId, ErrorSeverity, EventError, GameError, ItemId, MonsterId,
    StateError, UserId,
};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("no battle exists with this id: {0}")]
    BattleNotFound(BattleId),

    #[error("no character exists with this id: {0}")]
    CharacterNotFound(CharacterId),

    #[error("no character exists for {0}")]
    UserCharacterNotFound(UserId),

    #[error("no monster exists with this id: {0}")]
    MonsterNotFound(MonsterId),

    #[error("no item exists with this id: {0}")]
    ItemNotFound(ItemId),

    #[error("{battle} is {actual}, expected {expected}")]
    InvalidBattleState {
        battle: BattleId,
        actual: BattleState,
        expected: &'static str,
    },

    #[error("cannot add unknown {0} to an inventory")]
    UnknownItem(ItemId),

    #[error("the {0} has not been saved yet")]
    Unsaved(&'static str),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Event(#[from] EventError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("entity lock was poisoned")]
    LockPoisoned,

    #[error("event observer '{observer}' failed")]
    Observer {
        observer: &'static str,
        #[source]
        source: Box<RuntimeError>,
    },
}

/// How a failure is presented to the end user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorStatus {
    /// The addressed record does not exist (HTTP 404).
    NotFound,
    /// Anything else; shown as a generic "operation failed" message.
    OperationFailed,
}

impl RuntimeError {
    pub fn is_not_found(&self) -> bool {
        match self {
            RuntimeError::BattleNotFound(_)
            | RuntimeError::CharacterNotFound(_)
            | RuntimeError::UserCharacterNotFound(_)
            | RuntimeError::MonsterNotFound(_)
            | RuntimeError::ItemNotFound(_) => true,
            RuntimeError::Observer { source, .. } => source.is_not_found(),
            _ => false,
        }
    }

    pub fn status(&self) -> ErrorStatus {
        if self.is_not_found() {
            ErrorStatus::NotFound
        } else {
            ErrorStatus::OperationFailed
        }
    }
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::State(e) => e.severity(),
            RuntimeError::Event(e) => e.severity(),
            RuntimeError::Observer { source, .. } => source.severity(),
            RuntimeError::Repository(_) | RuntimeError::LockPoisoned => ErrorSeverity::Fatal,
            RuntimeError::InvalidBattleState { .. }
            | RuntimeError::UnknownItem(_)
            | RuntimeError::Unsaved(_) => ErrorSeverity::Internal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::BattleNotFound(_) => "RUNTIME_BATTLE_NOT_FOUND",
            RuntimeError::CharacterNotFound(_) => "RUNTIME_CHARACTER_NOT_FOUND",
            RuntimeError::UserCharacterNotFound(_) => "RUNTIME_USER_CHARACTER_NOT_FOUND",
            RuntimeError::MonsterNotFound(_) => "RUNTIME_MONSTER_NOT_FOUND",
            RuntimeError::ItemNotFound(_) => "RUNTIME_ITEM_NOT_FOUND",
            RuntimeError::InvalidBattleState { .. } => "RUNTIME_INVALID_BATTLE_STATE",
            RuntimeError::UnknownItem(_) => "RUNTIME_UNKNOWN_ITEM",
            RuntimeError::Unsaved(_) => "RUNTIME_UNSAVED_ENTITY",
            RuntimeError::State(e) => e.error_code(),
            RuntimeError::Event(e) => e.error_code(),
            RuntimeError::Repository(_) => "RUNTIME_REPOSITORY",
            RuntimeError::LockPoisoned => "RUNTIME_LOCK_POISONED",
            RuntimeError::Observer { source, .. } => source.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_records_map_to_not_found() {
        let err = RuntimeError::BattleNotFound(BattleId(3));
        assert!(err.is_not_found());
        assert_eq!(err.status(), ErrorStatus::NotFound);
        assert_eq!(err.to_string(), "no battle exists with this id: battle#3");
    }

    #[test]
    fn invariant_errors_map_to_operation_failed() {
        let err = RuntimeError::InvalidBattleState {
            battle: BattleId(1),
            actual: BattleState::Victory,
            expected: "ongoing",
        };
        assert_eq!(err.status(), ErrorStatus::OperationFailed);
        assert_eq!(err.severity(), ErrorSeverity::Internal);

        let err = RuntimeError::from(EventError::NonPositiveXp);
        assert_eq!(err.status(), ErrorStatus::OperationFailed);
        assert_eq!(err.error_code(), "EVENT_NON_POSITIVE_XP");
    }

    #[test]
    fn observer_failures_keep_the_inner_classification() {
        let err = RuntimeError::Observer {
            observer: "reward_policy",
            source: Box::new(RuntimeError::CharacterNotFound(CharacterId(2))),
        };
        assert!(err.is_not_found());
    }
}
