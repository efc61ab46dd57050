//! Populate the catalogue from content files.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rpg_content::Catalog;
use rpg_runtime::Runtime;

/// Load monsters and items into the store
#[derive(Parser)]
pub struct Seed {
    /// Directory holding `monsters.{ron,toml}` and `items.{ron,toml}`.
    /// Uses the bundled catalogue when omitted.
    #[arg(long, value_name = "DIR")]
    dir: Option<PathBuf>,
}

impl Seed {
    pub fn execute(self, runtime: &Runtime) -> Result<()> {
        let catalog = match &self.dir {
            Some(dir) => Catalog::load_dir(dir)
                .with_context(|| format!("Failed to load catalogue from {}", dir.display()))?,
            None => Catalog::builtin()?,
        };

        if catalog.is_empty() {
            println!("Catalogue is empty, nothing to seed");
            return Ok(());
        }

        let (monsters, items) = runtime.seed(&catalog)?;
        println!("Seeded {monsters} monsters and {items} items");
        Ok(())
    }
}
