/// Tunable parameters of the progression system.
///
/// Owned by an external configuration store; the rules only ever read it.
/// Changing any value means building a new [`crate::LevelTable`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RpgConfig {
    /// Display title used in headers and navigation.
    pub title: String,
    /// XP required to reach level 2.
    pub base_xp_target: u64,
    /// Multiplicative step between consecutive level requirements.
    pub growth_multiplier: f64,
}

impl RpgConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TITLE: &'static str = "RPG";
    pub const DEFAULT_BASE_XP_TARGET: u64 = 120;
    pub const DEFAULT_GROWTH_MULTIPLIER: f64 = 1.1;

    pub fn new() -> Self {
        Self {
            title: Self::DEFAULT_TITLE.to_owned(),
            base_xp_target: Self::DEFAULT_BASE_XP_TARGET,
            growth_multiplier: Self::DEFAULT_GROWTH_MULTIPLIER,
        }
    }

    pub fn with_xp_curve(base_xp_target: u64, growth_multiplier: f64) -> Self {
        Self {
            base_xp_target,
            growth_multiplier,
            ..Self::new()
        }
    }
}

impl Default for RpgConfig {
    fn default() -> Self {
        Self::new()
    }
}
