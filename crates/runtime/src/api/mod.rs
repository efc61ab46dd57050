//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate:
//! errors and the read models returned by [`crate::Runtime`] operations.

pub mod errors;
pub mod views;

pub use errors::{ErrorStatus, Result, RuntimeError};
pub use views::{AdventureView, AttackReport, EncounterView, InventoryLine, TrailPrompt};
