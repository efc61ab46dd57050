//! Runtime configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use rpg_core::RpgConfig;

use crate::services::QuizRewards;

/// Configuration required to assemble a [`crate::Runtime`].
#[derive(Clone, Debug, Default)]
pub struct RuntimeConfig {
    pub rpg: RpgConfig,
    pub quiz: QuizRewards,
    /// Where the file-backed store lives; `None` keeps everything in memory.
    pub data_dir: Option<PathBuf>,
    /// Seed for a reproducible random source; `None` seeds from the OS.
    pub rng_seed: Option<u64>,
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// - `RPG_TITLE`
    /// - `RPG_XP_TARGET_BASE` / `RPG_XP_MULTIPLIER`
    /// - `RPG_DATA_DIR` (default: platform data directory)
    /// - `RPG_RNG_SEED`
    /// - `RPG_QUIZ_XP_PER_ANSWER` / `RPG_QUIZ_XP_PER_CORRECT`
    ///
    /// Unparseable values are ignored and keep their default.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(title) = env::var("RPG_TITLE")
            && !title.trim().is_empty()
        {
            config.rpg.title = title;
        }

        if let Some(base) = read_env::<u64>("RPG_XP_TARGET_BASE") {
            config.rpg.base_xp_target = base.max(1);
        }

        if let Some(multiplier) = read_env::<f64>("RPG_XP_MULTIPLIER")
            && multiplier.is_finite()
            && multiplier > 1.0
        {
            config.rpg.growth_multiplier = multiplier;
        }

        config.data_dir = env::var("RPG_DATA_DIR")
            .ok()
            .map(PathBuf::from)
            .or_else(default_data_dir);

        config.rng_seed = read_env::<u64>("RPG_RNG_SEED");

        if let Some(xp) = read_env::<u64>("RPG_QUIZ_XP_PER_ANSWER") {
            config.quiz.xp_per_answer = xp;
        }

        if let Some(xp) = read_env::<u64>("RPG_QUIZ_XP_PER_CORRECT") {
            config.quiz.xp_per_correct = xp;
        }

        config
    }
}

/// Platform data directory for the store.
///
/// - Linux: `~/.local/share/rpg` (or `$XDG_DATA_HOME/rpg`)
/// - macOS: `~/Library/Application Support/rpg`
/// - Windows: `%APPDATA%\rpg`
pub fn default_data_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "rpg").map(|dirs| dirs.data_dir().to_path_buf())
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_platform_settings() {
        let config = RuntimeConfig::default();
        assert_eq!(config.rpg.title, "RPG");
        assert_eq!(config.rpg.base_xp_target, 120);
        assert_eq!(config.quiz.xp_per_answer, 4);
        assert_eq!(config.quiz.xp_per_correct, 19);
        assert!(config.data_dir.is_none());
        assert!(config.rng_seed.is_none());
    }
}
