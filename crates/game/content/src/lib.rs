//! Data-driven catalogue content and loaders.
//!
//! Monster templates, item definitions and progression settings can be
//! authored as RON or TOML files and seeded into a runtime store:
//! - Monster bestiary (`monsters` list)
//! - Item catalogue (`items` list)
//! - Progression configuration (TOML)
//!
//! A starter catalogue is embedded in the crate so a fresh installation has
//! something to fight.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{Catalog, ConfigLoader, ContentFormat, ItemLoader, MonsterLoader};
