//! Progression configuration loader.

use std::path::Path;

use rpg_core::RpgConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`RpgConfig`] from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<RpgConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<RpgConfig> {
        let config: RpgConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.base_xp_target == 0 {
            anyhow::bail!("base_xp_target must be positive");
        }
        if !(config.growth_multiplier.is_finite() && config.growth_multiplier > 1.0) {
            anyhow::bail!(
                "growth_multiplier must be greater than 1.0, got {}",
                config.growth_multiplier
            );
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("title = \"Quest\"\n").unwrap();
        assert_eq!(config.title, "Quest");
        assert_eq!(config.base_xp_target, RpgConfig::DEFAULT_BASE_XP_TARGET);
        assert_eq!(config.growth_multiplier, RpgConfig::DEFAULT_GROWTH_MULTIPLIER);
    }

    #[test]
    fn flat_curve_is_rejected() {
        assert!(ConfigLoader::parse("growth_multiplier = 1.0\n").is_err());
        assert!(ConfigLoader::parse("base_xp_target = 0\n").is_err());
    }
}
