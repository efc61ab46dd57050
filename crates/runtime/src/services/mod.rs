//! Operations over persisted records.
//!
//! Services load, mutate and persist records through the [`RpgContext`] and
//! emit domain events. They assume the caller already holds the entity locks
//! for the records they touch; [`crate::Runtime`] takes care of that.
//!
//! [`RpgContext`]: crate::context::RpgContext

pub mod battle;
pub mod character;
pub mod quiz;
pub mod reward;

pub use quiz::{QuizOutcome, QuizRewards};
pub use reward::RewardPolicy;
