//! Adventure page and battle actions.

use anyhow::Result;
use clap::Parser;
use rpg_core::{Battle, BattleId, Character, UserId};
use rpg_runtime::{AdventureView, EncounterView, InventoryLine, Runtime, TrailPrompt};
use serde::Serialize;

use super::{OutputFormat, emit};

/// Open the adventure page for a user
#[derive(Parser)]
pub struct Explore {
    /// Platform user id
    #[arg(value_name = "USERID")]
    userid: u64,
}

impl Explore {
    pub fn execute(self, runtime: &Runtime, format: OutputFormat) -> Result<()> {
        let view = runtime.explore(UserId(self.userid))?;
        emit(format, &view, || adventure_lines(&view))
    }
}

/// Show a user's character and inventory
#[derive(Parser)]
pub struct Show {
    /// Platform user id
    #[arg(value_name = "USERID")]
    userid: u64,
}

#[derive(Serialize)]
struct CharacterSheet {
    character: Character,
    level: u32,
    max_hp: u32,
    inventory: Vec<InventoryLine>,
}

impl Show {
    pub fn execute(self, runtime: &Runtime, format: OutputFormat) -> Result<()> {
        let userid = UserId(self.userid);
        let character = runtime.find_user_character(userid)?;
        let sheet = CharacterSheet {
            level: character.level(runtime.levels()),
            max_hp: character.max_hp(runtime.levels()),
            inventory: runtime.inventory(userid)?,
            character,
        };

        emit(format, &sheet, || {
            let mut lines = vec![format!(
                "{}: level {}, {} XP, {}/{} HP",
                sheet.character.id(),
                sheet.level,
                sheet.character.xp(),
                sheet.character.hp(),
                sheet.max_hp
            )];
            lines.extend(inventory_lines(&sheet.inventory));
            lines
        })
    }
}

/// Battle to act on
#[derive(Parser)]
pub struct BattleArgs {
    #[arg(value_name = "BATTLE")]
    battle: u64,
}

impl BattleArgs {
    pub fn start(self, runtime: &Runtime, format: OutputFormat) -> Result<()> {
        let battle = runtime.start_battle(BattleId(self.battle))?;
        emit(format, &battle, || vec![battle_line(&battle)])
    }

    pub fn decline(self, runtime: &Runtime, format: OutputFormat) -> Result<()> {
        let battle = runtime.decline_battle(BattleId(self.battle))?;
        emit(format, &battle, || vec![battle_line(&battle)])
    }

    pub fn attack(self, runtime: &Runtime, format: OutputFormat) -> Result<()> {
        let report = runtime.attack_monster(BattleId(self.battle))?;
        emit(format, &report, || {
            let mut lines = vec![format!("You hit for {} damage.", report.player_damage)];
            if let Some(damage) = report.monster_damage {
                lines.push(format!("The monster hits back for {damage} damage."));
            }
            lines.push(battle_line(&report.battle));
            lines
        })
    }
}

fn battle_line(battle: &Battle) -> String {
    format!(
        "{} is {} (monster at {} HP)",
        battle.id(),
        battle.state(),
        battle.monster_hp()
    )
}

fn encounter_line(label: &str, encounter: &EncounterView) -> String {
    format!(
        "{label}: {} (level {}, {}/{} HP) in {}",
        encounter.monster.name,
        encounter.monster.level,
        encounter.battle.monster_hp(),
        encounter.monster.max_hp,
        encounter.battle.id()
    )
}

fn inventory_lines(inventory: &[InventoryLine]) -> Vec<String> {
    if inventory.is_empty() {
        return vec!["Inventory is empty".to_owned()];
    }
    inventory
        .iter()
        .map(|line| format!("  {} x{} ({})", line.item.name, line.row.stack(), line.item.rarity))
        .collect()
}

fn adventure_lines(view: &AdventureView) -> Vec<String> {
    let mut lines = vec![
        format!("Level {} with {} XP", view.level, view.xp),
        format!("HP {}/{}", view.hp, view.max_hp),
    ];
    match view.target_xp {
        Some(target) => lines.push(format!(
            "{} XP until level {} ({target} XP)",
            view.remaining_xp,
            view.level + 1
        )),
        None => lines.push("Maximum level reached".to_owned()),
    }
    lines.extend(inventory_lines(&view.inventory));

    if let Some(ongoing) = &view.ongoing {
        lines.push(encounter_line("Fighting", ongoing));
    } else if let Some(offered) = &view.offered {
        lines.push(encounter_line("A monster blocks the way", offered));
    }

    lines.push(
        match view.prompt {
            TrailPrompt::FollowThePathFurther => "Follow the path further",
            TrailPrompt::LookForTrouble => "Look for trouble",
        }
        .to_owned(),
    );
    lines
}
