//! Subcommands of the `rpg` binary.

mod play;
mod quiz;
mod seed;

use anyhow::Result;
use clap::Parser;
use rpg_runtime::Runtime;
use serde::Serialize;

pub use play::{BattleArgs, Explore, Show};
pub use quiz::{QuizSubmit, QuizUpdate};
pub use seed::Seed;

#[derive(Parser)]
pub enum Command {
    /// Load monsters and items into the store
    Seed(Seed),

    /// List catalogue entries
    #[command(subcommand)]
    Catalogue(Catalogue),

    /// Open the adventure page for a user
    Explore(Explore),

    /// Show a user's character and inventory
    Show(Show),

    /// Accept an offered battle
    Start(BattleArgs),

    /// Walk away from a battle
    Decline(BattleArgs),

    /// Play one attack turn
    Attack(BattleArgs),

    /// Report question slots saved in an unfinished quiz attempt
    QuizUpdate(QuizUpdate),

    /// Report a submitted quiz attempt
    QuizSubmit(QuizSubmit),
}

#[derive(Parser)]
pub enum Catalogue {
    Monsters,
    Items,
}

#[derive(Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines
    Summary,
    /// Pretty-printed JSON
    Json,
}

/// Print `value` as JSON or as the lines produced by `summary`.
pub(crate) fn emit<T: Serialize>(
    format: OutputFormat,
    value: &T,
    summary: impl FnOnce() -> Vec<String>,
) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Summary => {
            for line in summary() {
                println!("{line}");
            }
        }
    }
    Ok(())
}

pub fn list_monsters(runtime: &Runtime, format: OutputFormat) -> Result<()> {
    let monsters = runtime.monsters()?;
    emit(format, &monsters, || {
        if monsters.is_empty() {
            return vec!["No monsters. Run `rpg seed` first.".to_owned()];
        }
        monsters
            .iter()
            .map(|m| {
                format!(
                    "{:>4}  {:<20} level {:<3} {} HP",
                    m.id.get(),
                    m.name,
                    m.level,
                    m.max_hp
                )
            })
            .collect()
    })
}

pub fn list_items(runtime: &Runtime, format: OutputFormat) -> Result<()> {
    let items = runtime.items()?;
    emit(format, &items, || {
        if items.is_empty() {
            return vec!["No items. Run `rpg seed` first.".to_owned()];
        }
        items
            .iter()
            .map(|item| {
                format!(
                    "{:>4}  {:<20} {:<10} {:<8}{}",
                    item.id.get(),
                    item.name,
                    item.rarity,
                    item.item_type,
                    if item.stackable { " stackable" } else { "" }
                )
            })
            .collect()
    })
}
