//! Content loaders for reading catalogue data from files.
//!
//! Every loader accepts RON or TOML, chosen by file extension.

pub mod catalog;
pub mod config;
pub mod item;
pub mod monster;

pub use catalog::Catalog;
pub use config::ConfigLoader;
pub use item::ItemLoader;
pub use monster::MonsterLoader;

use std::path::Path;

use serde::de::DeserializeOwned;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Serialization formats understood by the loaders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentFormat {
    Ron,
    Toml,
}

impl ContentFormat {
    /// Pick the format from a path's extension.
    pub fn from_path(path: &Path) -> LoadResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("ron") => Ok(Self::Ron),
            Some("toml") => Ok(Self::Toml),
            other => Err(anyhow::anyhow!(
                "Unsupported content file {} (extension {:?}, expected .ron or .toml)",
                path.display(),
                other
            )),
        }
    }

    pub(crate) fn parse<T: DeserializeOwned>(self, content: &str, what: &str) -> LoadResult<T> {
        match self {
            Self::Ron => ron::from_str(content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {} RON: {}", what, e)),
            Self::Toml => toml::from_str(content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {} TOML: {}", what, e)),
        }
    }
}

/// Read and parse `path` in the format its extension names.
pub(crate) fn load_as<T: DeserializeOwned>(path: &Path, what: &str) -> LoadResult<T> {
    let format = ContentFormat::from_path(path)?;
    let content = read_file(path)?;
    format.parse(&content, what)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            ContentFormat::from_path(Path::new("a/monsters.ron")).unwrap(),
            ContentFormat::Ron
        );
        assert_eq!(
            ContentFormat::from_path(Path::new("items.toml")).unwrap(),
            ContentFormat::Toml
        );
        assert!(ContentFormat::from_path(Path::new("items.json")).is_err());
        assert!(ContentFormat::from_path(Path::new("items")).is_err());
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = read_file(Path::new("/nonexistent/rpg/items.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/rpg/items.toml"));
    }
}
