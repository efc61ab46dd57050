//! Rewards and penalties applied when a battle ends.

use rpg_core::{
    BattleState, Character, CharacterId, EventKind, InventoryItem, RpgEvent, StackLoss, choose,
};
use tracing::{debug, info};

use super::character::{add_item_to_inventory, find_character};
use crate::api::Result;
use crate::context::RpgContext;
use crate::events::{EventObserver, ObserverCriticality};

/// Grants a random item on victory and takes part of a random inventory
/// stack on defeat. Retreats change nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct RewardPolicy;

impl EventObserver for RewardPolicy {
    fn name(&self) -> &'static str {
        "reward_policy"
    }

    fn priority(&self) -> i32 {
        -10
    }

    fn criticality(&self) -> ObserverCriticality {
        // A lost reward or penalty would leave the inventory inconsistent
        // with the battle outcome
        ObserverCriticality::Critical
    }

    fn interested_in(&self, kind: EventKind) -> bool {
        kind == EventKind::BattleEnded
    }

    fn on_event(&self, event: &RpgEvent, ctx: &RpgContext) -> Result<()> {
        let RpgEvent::BattleEnded(ended) = event else {
            return Ok(());
        };

        match ended.new_state {
            BattleState::Victory => {
                let character = find_character(ctx, ended.character_id)?;
                grant_random_item(ctx, &character)?;
            }
            BattleState::Defeat => {
                lose_random_item(ctx, ended.character_id)?;
            }
            _ => {}
        }
        Ok(())
    }
}

/// Give `character` one uniformly chosen item definition.
///
/// Returns `None` when the catalogue is empty.
pub fn grant_random_item(ctx: &RpgContext, character: &Character) -> Result<Option<InventoryItem>> {
    let items = ctx.store.items().all()?;
    let Some(item) = choose(ctx.rng.as_ref(), &items) else {
        debug!(target: "runtime::reward", "No item definitions, nothing to grant");
        return Ok(None);
    };

    let row = add_item_to_inventory(ctx, character, item.id)?;
    info!(
        target: "runtime::reward",
        character = %character.id(),
        item = %item.id,
        name = %item.name,
        "Granted item"
    );
    Ok(Some(row))
}

/// Take units from one uniformly chosen inventory row of `character_id`.
///
/// Rows with more than one unit shrink per [`StackLoss::for_stack`]; single
/// units are deleted. Returns `None` when the inventory is empty.
pub fn lose_random_item(ctx: &RpgContext, character_id: CharacterId) -> Result<Option<StackLoss>> {
    let rows = ctx.store.inventory().for_character(character_id)?;
    let Some(row) = choose(ctx.rng.as_ref(), &rows) else {
        debug!(
            target: "runtime::reward",
            character = %character_id,
            "Empty inventory, nothing to lose"
        );
        return Ok(None);
    };

    let mut row = row.clone();
    let loss = row.defeat_loss();
    match loss {
        StackLoss::Reduce { .. } => {
            row.apply_loss(loss)?;
            ctx.store.inventory().update(&row)?;
        }
        StackLoss::Remove => {
            ctx.store.inventory().delete(row.id())?;
        }
    }

    info!(
        target: "runtime::reward",
        character = %character_id,
        item = %row.item_id(),
        ?loss,
        "Lost item"
    );
    Ok(Some(loss))
}
