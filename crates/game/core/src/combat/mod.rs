//! Combat and penalty arithmetic.
//!
//! Pure functions shared by the battle state machine and the reward policy.
//!
//! # Core Functions
//!
//! - `player_attack_range` / `monster_counter_range`: inclusive damage rolls
//! - `apply_damage`: HP reduction (clamped to 0)
//! - `StackLoss::for_stack`: inventory units lost on defeat

pub mod damage;
pub mod penalty;

pub use damage::{DamageRange, apply_damage, monster_counter_range, player_attack_range};
pub use penalty::StackLoss;
