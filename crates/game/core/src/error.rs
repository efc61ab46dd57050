//! Common error infrastructure for rpg-core.
//!
//! Domain-specific errors (`StateError`, `EventError`) live next to the types
//! they guard. This module only provides the classification shared by all of
//! them so the runtime can map failures onto user-facing responses.

/// Severity level of an error, used for categorization and response mapping.
///
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: a caller broke a precondition (programming error)
/// - **Fatal**: a stored record violates an invariant and cannot be used
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input data, e.g. a monster template with zero hitpoints.
    Validation,

    /// Precondition violated by the caller.
    ///
    /// Examples: setting up a battle twice, emitting an event whose payload
    /// contradicts itself. These indicate bugs and should be investigated.
    Internal,

    /// Stored data is corrupted, e.g. an out-of-range battle state.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all rpg-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity by who is at fault, not by impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
