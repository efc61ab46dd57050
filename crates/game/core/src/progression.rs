//! XP ↔ level ↔ max-HP mapping.
//!
//! The level table is a plain value computed once from [`RpgConfig`]. There is
//! no process-wide cache: when the configuration changes, build a new table.

use crate::config::RpgConfig;

/// The highest level a character can reach.
pub const MAX_LEVEL: u32 = 100;

/// XP requirements indexed by level, derived from the XP curve parameters.
///
/// # Formula
///
/// ```text
/// required(1)     = 0
/// required(L)     = trunc(base * multiplier^(L-2))   for 2 <= L <= MAX_LEVEL
/// required(L)     = none                              for L > MAX_LEVEL
/// ```
///
/// The power is accumulated as a running floating-point product and each
/// entry is truncated independently.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelTable {
    /// `requirements[i]` is the XP required for level `i + 1`.
    requirements: Vec<u64>,
}

impl LevelTable {
    pub fn new(base_xp_target: u64, growth_multiplier: f64) -> Self {
        let mut requirements = Vec::with_capacity(MAX_LEVEL as usize);
        requirements.push(0);

        let mut xp = base_xp_target as f64;
        for _level in 2..=MAX_LEVEL {
            requirements.push(xp as u64);
            xp *= growth_multiplier;
        }

        Self { requirements }
    }

    pub fn from_config(config: &RpgConfig) -> Self {
        Self::new(config.base_xp_target, config.growth_multiplier)
    }

    /// XP required to reach `level`, or `None` outside `1..=MAX_LEVEL`.
    pub fn xp_required_for_level(&self, level: u32) -> Option<u64> {
        let index = (level as usize).checked_sub(1)?;
        self.requirements.get(index).copied()
    }

    /// Smallest level whose XP requirement is at least `xp`.
    ///
    /// Levels are scanned in increasing order and the first level with
    /// `required >= xp` wins, so XP exactly equal to a requirement belongs to
    /// that level. Falls back to [`MAX_LEVEL`].
    pub fn level_from_xp(&self, xp: u64) -> u32 {
        self.requirements
            .iter()
            .position(|&required| required >= xp)
            .map(|index| index as u32 + 1)
            .unwrap_or(MAX_LEVEL)
    }

    /// XP still needed to reach the level after the one `xp` maps to.
    pub fn remaining_xp_until_next_level(&self, xp: u64) -> u64 {
        let level = self.level_from_xp(xp);
        match self.xp_required_for_level(level + 1) {
            Some(target) => target.saturating_sub(xp),
            None => 0,
        }
    }

    /// Hitpoints for a character or monster of the given level.
    ///
    /// `(40 + level * 16)` compounded by 5% once per level, truncated only
    /// after the last step.
    pub fn max_hp_from_level(level: u32) -> u32 {
        let mut hp = 40.0 + f64::from(level) * 16.0;
        for _ in 1..=level {
            hp *= 1.05;
        }
        hp as u32
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        Self::from_config(&RpgConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_levels_follow_default_curve() {
        let table = LevelTable::default();
        assert_eq!(table.xp_required_for_level(1), Some(0));
        assert_eq!(table.xp_required_for_level(2), Some(120));
        assert_eq!(table.xp_required_for_level(3), Some(132));
        assert_eq!(table.xp_required_for_level(4), Some(145));
        assert_eq!(table.xp_required_for_level(0), None);
        assert_eq!(table.xp_required_for_level(MAX_LEVEL + 1), None);
        assert!(table.xp_required_for_level(MAX_LEVEL).is_some());
    }

    #[test]
    fn exact_requirement_belongs_to_that_level() {
        let table = LevelTable::default();
        assert_eq!(table.level_from_xp(0), 1);
        assert_eq!(table.level_from_xp(1), 2);
        assert_eq!(table.level_from_xp(120), 2);
        assert_eq!(table.level_from_xp(121), 3);
        assert_eq!(table.level_from_xp(132), 3);
        assert_eq!(table.level_from_xp(200), 8);
    }

    #[test]
    fn level_is_always_in_range() {
        let table = LevelTable::default();
        for xp in [0, 1, 119, 120, 5_000, 1_000_000, u64::MAX] {
            let level = table.level_from_xp(xp);
            assert!((1..=MAX_LEVEL).contains(&level), "xp {xp} -> level {level}");
        }
        assert_eq!(table.level_from_xp(u64::MAX), MAX_LEVEL);
    }

    #[test]
    fn level_brackets_xp_below_max_level() {
        let table = LevelTable::default();
        for xp in (0..3_000).step_by(7) {
            let level = table.level_from_xp(xp);
            if level < MAX_LEVEL {
                let required = table.xp_required_for_level(level).unwrap();
                let next = table.xp_required_for_level(level + 1).unwrap();
                assert!(required >= xp);
                assert!(next > required);
                if level > 1 {
                    assert!(table.xp_required_for_level(level - 1).unwrap() < xp);
                }
            }
        }
    }

    #[test]
    fn remaining_xp_counts_towards_next_level() {
        let table = LevelTable::default();
        assert_eq!(table.remaining_xp_until_next_level(0), 120);
        assert_eq!(table.remaining_xp_until_next_level(50), 82);
        assert_eq!(table.remaining_xp_until_next_level(u64::MAX), 0);
    }

    #[test]
    fn max_hp_matches_reference_values() {
        assert_eq!(LevelTable::max_hp_from_level(1), 58);
        assert_eq!(LevelTable::max_hp_from_level(2), 79);
    }

    #[test]
    fn max_hp_strictly_increases() {
        let mut previous = LevelTable::max_hp_from_level(1);
        for level in 2..=MAX_LEVEL {
            let hp = LevelTable::max_hp_from_level(level);
            assert!(hp > previous, "level {level}: {hp} <= {previous}");
            previous = hp;
        }
    }

    #[test]
    fn custom_curve_rebuilds_requirements() {
        let table = LevelTable::from_config(&RpgConfig::with_xp_curve(100, 2.0));
        assert_eq!(table.xp_required_for_level(2), Some(100));
        assert_eq!(table.xp_required_for_level(3), Some(200));
        assert_eq!(table.xp_required_for_level(4), Some(400));
        assert_eq!(table.level_from_xp(150), 3);
    }
}
