//! Command-line driver for the RPG runtime.
//!
//! Every subcommand opens the store, performs one runtime operation and
//! prints the result. Settings come from the environment (and a `.env`
//! file when present); see [`rpg_runtime::RuntimeConfig::from_env`].
//!
//! ```bash
//! rpg seed
//! rpg explore 7
//! rpg start 1
//! rpg attack 1 --format json
//! rpg --config rpg.toml explore 7
//! ```

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use commands::{Catalogue, Command, OutputFormat};
use rpg_content::ConfigLoader;
use rpg_runtime::{Runtime, RuntimeConfig};

/// Battles and progression for learning-platform users
#[derive(Parser)]
#[command(name = "rpg")]
#[command(about = "Drive the RPG runtime from the command line", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Store directory (overrides RPG_DATA_DIR)
    #[arg(short, long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Progression settings TOML (overrides RPG_TITLE and the XP curve variables)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seed for reproducible rolls (overrides RPG_RNG_SEED)
    #[arg(long, global = true, value_name = "SEED")]
    seed: Option<u64>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "summary")]
    format: OutputFormat,
}

fn main() -> Result<()> {
    // Load .env file if it exists (for RPG_DATA_DIR and other env vars)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = runtime_config(&cli)?;

    tracing::debug!(data_dir = ?config.data_dir, "Building runtime");
    let runtime = Runtime::builder().config(config).build()?;

    match cli.command {
        Command::Seed(cmd) => cmd.execute(&runtime),
        Command::Catalogue(Catalogue::Monsters) => commands::list_monsters(&runtime, cli.format),
        Command::Catalogue(Catalogue::Items) => commands::list_items(&runtime, cli.format),
        Command::Explore(cmd) => cmd.execute(&runtime, cli.format),
        Command::Show(cmd) => cmd.execute(&runtime, cli.format),
        Command::Start(cmd) => cmd.start(&runtime, cli.format),
        Command::Decline(cmd) => cmd.decline(&runtime, cli.format),
        Command::Attack(cmd) => cmd.attack(&runtime, cli.format),
        Command::QuizUpdate(cmd) => cmd.execute(&runtime, cli.format),
        Command::QuizSubmit(cmd) => cmd.execute(&runtime, cli.format),
    }
}

/// Environment settings with the command-line overrides applied.
fn runtime_config(cli: &Cli) -> Result<RuntimeConfig> {
    let mut config = RuntimeConfig::from_env();
    if let Some(path) = &cli.config {
        config.rpg = ConfigLoader::load(path)?;
        tracing::info!(
            path = %path.display(),
            title = %config.rpg.title,
            "Loaded progression config"
        );
    }
    if let Some(dir) = &cli.data_dir {
        config.data_dir = Some(dir.clone());
    }
    if let Some(seed) = cli.seed {
        config.rng_seed = Some(seed);
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_file_replaces_the_progression_curve() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rpg.toml");
        std::fs::write(&path, "title = \"Quest\"\nbase_xp_target = 50\n").unwrap();

        let path = path.to_string_lossy().into_owned();
        let cli = Cli::try_parse_from([
            "rpg", "--config", path.as_str(), "--seed", "3", "catalogue", "monsters",
        ])
        .unwrap();
        let config = runtime_config(&cli).unwrap();

        assert_eq!(config.rpg.title, "Quest");
        assert_eq!(config.rpg.base_xp_target, 50);
        assert_eq!(config.rng_seed, Some(3));
    }

    #[test]
    fn invalid_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rpg.toml");
        std::fs::write(&path, "growth_multiplier = 0.5\n").unwrap();

        let path = path.to_string_lossy().into_owned();
        let cli =
            Cli::try_parse_from(["rpg", "--config", path.as_str(), "catalogue", "items"]).unwrap();
        assert!(runtime_config(&cli).is_err());
    }
}
