//! Damage ranges and application.

use crate::env::RngOracle;

/// Inclusive range a damage roll is drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageRange {
    pub min: u32,
    pub max: u32,
}

impl DamageRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Draw one value uniformly from `[min, max]`.
    pub fn roll(&self, rng: &(impl RngOracle + ?Sized)) -> u32 {
        rng.range(self.min, self.max)
    }

    pub const fn contains(&self, value: u32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// The player's attack scales with the character's level.
///
/// ```text
/// damage ∈ [2 * level, 4 * level]
/// ```
pub fn player_attack_range(character_level: u32) -> DamageRange {
    DamageRange::new(
        character_level.saturating_mul(2),
        character_level.saturating_mul(4),
    )
}

/// The monster's counter-attack scales with the template's level.
///
/// ```text
/// damage ∈ [3 * level, 4 * level]
/// ```
pub fn monster_counter_range(monster_level: u32) -> DamageRange {
    DamageRange::new(
        monster_level.saturating_mul(3),
        monster_level.saturating_mul(4),
    )
}

/// Apply damage to current HP.
///
/// # Returns
///
/// New HP value (clamped to 0)
pub fn apply_damage(current_hp: u32, damage: u32) -> u32 {
    current_hp.saturating_sub(damage)
}
