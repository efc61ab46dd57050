//! Character lookup, progression and inventory.

use std::collections::HashMap;

use rpg_core::{
    Character, CharacterId, InventoryItem, ItemId, NewCharacter, NewInventoryItem, RpgEvent,
    UserId, XpGained,
};
use tracing::{debug, info};

use crate::api::{InventoryLine, Result, RuntimeError};
use crate::context::RpgContext;

pub fn find_character(ctx: &RpgContext, id: CharacterId) -> Result<Character> {
    ctx.store
        .characters()
        .get(id)?
        .ok_or(RuntimeError::CharacterNotFound(id))
}

/// The user's character, created at full level-1 health when missing.
pub fn get_user_character(ctx: &RpgContext, userid: UserId) -> Result<Character> {
    if let Some(character) = ctx.store.characters().find_by_user(userid)? {
        return Ok(character);
    }

    let character = ctx
        .store
        .characters()
        .insert(NewCharacter::for_user(userid, ctx.now()))?;
    info!(
        target: "runtime::character",
        %userid,
        character = %character.id(),
        "Created character"
    );
    Ok(character)
}

/// Add XP to `character`, persist it and emit `XpGained`.
///
/// A zero grant does nothing and returns `None`.
pub fn grant_xp(
    ctx: &RpgContext,
    character: &mut Character,
    amount: u64,
) -> Result<Option<XpGained>> {
    let Some(event) = character.gain_xp(amount, &ctx.levels)? else {
        return Ok(None);
    };
    ctx.store.characters().update(character)?;

    if event.leveled_up {
        info!(
            target: "runtime::character",
            character = %event.character_id,
            old_level = event.old_level,
            new_level = event.new_level,
            "Level up"
        );
    } else {
        debug!(
            target: "runtime::character",
            character = %event.character_id,
            xp = event.new_xp,
            gained = event.xp_gained,
            "XP granted"
        );
    }

    ctx.emit(RpgEvent::XpGained(event.clone()))?;
    Ok(Some(event))
}

/// Give `character` one unit of `item_id`.
///
/// Stackable items already held grow their existing row; anything else gets
/// a new row with a single unit.
pub fn add_item_to_inventory(
    ctx: &RpgContext,
    character: &Character,
    item_id: ItemId,
) -> Result<InventoryItem> {
    if character.id().is_unset() {
        return Err(RuntimeError::Unsaved("character"));
    }
    let item = ctx
        .store
        .items()
        .get(item_id)?
        .ok_or(RuntimeError::UnknownItem(item_id))?;

    if item.stackable
        && let Some(mut row) = ctx.store.inventory().find(character.id(), item_id)?
    {
        row.increment_stack();
        ctx.store.inventory().update(&row)?;
        debug!(
            target: "runtime::inventory",
            character = %character.id(),
            item = %item_id,
            stack = row.stack(),
            "Stacked item"
        );
        return Ok(row);
    }

    let row = ctx.store.inventory().insert(NewInventoryItem::single(
        item_id,
        character.id(),
        ctx.now(),
    ))?;
    debug!(
        target: "runtime::inventory",
        character = %character.id(),
        item = %item_id,
        "Added item"
    );
    Ok(row)
}

/// Inventory rows joined with their definitions, ordered by row id.
///
/// Rows whose definition has been deleted are left out.
pub fn inventory(ctx: &RpgContext, character_id: CharacterId) -> Result<Vec<InventoryLine>> {
    let rows = ctx.store.inventory().for_character(character_id)?;
    let ids: Vec<ItemId> = rows.iter().map(InventoryItem::item_id).collect();
    let items: HashMap<ItemId, _> = ctx
        .store
        .items()
        .find_list(&ids)?
        .into_iter()
        .map(|item| (item.id, item))
        .collect();

    Ok(rows
        .into_iter()
        .filter_map(|row| {
            let item = items.get(&row.item_id())?.clone();
            Some(InventoryLine { row, item })
        })
        .collect())
}
