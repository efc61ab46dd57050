//! Battle lifecycle and the attack turn.

use rpg_core::{
    Battle, BattleEnded, BattleId, BattleState, CharacterId, NewBattle, RpgEvent, StateError,
    choose, monster_counter_range, player_attack_range,
};
use tracing::{debug, info, warn};

use super::character::{find_character, grant_xp};
use crate::api::{AttackReport, Result, RuntimeError};
use crate::context::RpgContext;

pub fn find_battle(ctx: &RpgContext, id: BattleId) -> Result<Battle> {
    ctx.store
        .battles()
        .get(id)?
        .ok_or(RuntimeError::BattleNotFound(id))
}

pub fn find_for_character(
    ctx: &RpgContext,
    character_id: CharacterId,
    state: BattleState,
) -> Result<Option<Battle>> {
    Ok(ctx
        .store
        .battles()
        .find_for_character(character_id, state)?)
}

/// Spawn a uniformly chosen monster against `character_id` and persist the
/// battle in `NotStarted`.
///
/// Returns `None` when there are no monster templates.
pub fn setup_battle(ctx: &RpgContext, character_id: CharacterId) -> Result<Option<Battle>> {
    let monsters = ctx.store.monsters().all()?;
    let Some(monster) = choose(ctx.rng.as_ref(), &monsters) else {
        warn!(
            target: "runtime::battle",
            character = %character_id,
            "No monster templates, skipping battle setup"
        );
        return Ok(None);
    };

    let mut battle = NewBattle::new();
    battle.setup(character_id, monster, ctx.now())?;
    let battle = ctx.store.battles().insert(battle)?;

    debug!(
        target: "runtime::battle",
        battle = %battle.id(),
        character = %character_id,
        monster = %monster.id,
        "Battle set up"
    );
    Ok(Some(battle))
}

/// Move `battle` to `state` and persist it. Emits nothing.
pub fn change_state(ctx: &RpgContext, battle: &mut Battle, state: BattleState) -> Result<()> {
    let old_state = battle.state();
    battle.change_state(state);
    ctx.store.battles().update(battle)?;
    debug!(
        target: "runtime::battle",
        battle = %battle.id(),
        from = %old_state,
        to = %state,
        "Battle state changed"
    );
    Ok(())
}

/// Hit the monster for `amount`.
///
/// A lethal blow moves the battle to `Victory`, grants the character XP equal
/// to the full blow (overkill included) and emits `BattleEnded` carrying the
/// battle as it was before the blow. The battle is persisted either way.
pub fn damage_monster(
    ctx: &RpgContext,
    battle: &mut Battle,
    amount: u32,
) -> Result<Option<BattleEnded>> {
    let before = battle.clone();
    let killed = battle.damage_monster(amount);
    ctx.store.battles().update(battle)?;

    if killed.is_none() {
        return Ok(None);
    }

    let mut character = find_character(ctx, battle.character_id())?;
    grant_xp(ctx, &mut character, u64::from(amount))?;

    let event = BattleEnded::new(before, character.userid(), battle.state())?;
    info!(
        target: "runtime::battle",
        battle = %battle.id(),
        character = %character.id(),
        "Monster defeated"
    );
    ctx.emit(RpgEvent::BattleEnded(event.clone()))?;
    Ok(Some(event))
}

/// Hit the character for `amount`.
///
/// When the character drops to 0 HP they respawn at full health, the battle
/// moves to `Defeat` and `BattleEnded` is emitted with the battle as it was
/// before the transition. Character and battle are persisted either way.
pub fn damage_character(
    ctx: &RpgContext,
    battle: &mut Battle,
    amount: u32,
) -> Result<Option<BattleEnded>> {
    if !battle.is_setup() {
        return Err(StateError::BattleNotSetup.into());
    }
    let mut character = find_character(ctx, battle.character_id())?;
    character.take_damage(amount);

    let mut ended = None;
    if character.is_dead() {
        character.restore_max_hp(&ctx.levels);
        let before = battle.clone();
        battle.change_state(BattleState::Defeat);
        ended = Some(BattleEnded::new(before, character.userid(), BattleState::Defeat)?);
    }

    ctx.store.characters().update(&character)?;
    ctx.store.battles().update(battle)?;

    if let Some(event) = &ended {
        info!(
            target: "runtime::battle",
            battle = %battle.id(),
            character = %character.id(),
            "Character defeated"
        );
        ctx.emit(RpgEvent::BattleEnded(event.clone()))?;
    }
    Ok(ended)
}

/// One attack turn: the player strikes and, unless that ends the battle, the
/// monster strikes back.
pub fn attack_turn(ctx: &RpgContext, battle: &mut Battle) -> Result<AttackReport> {
    if !battle.is_ongoing() {
        return Err(RuntimeError::InvalidBattleState {
            battle: battle.id(),
            actual: battle.state(),
            expected: "ongoing",
        });
    }

    let character = find_character(ctx, battle.character_id())?;
    let level = character.level(&ctx.levels);
    let player_damage = player_attack_range(level).roll(ctx.rng.as_ref());
    damage_monster(ctx, battle, player_damage)?;

    let mut monster_damage = None;
    if !battle.has_ended() {
        let monster = ctx
            .store
            .monsters()
            .get(battle.monster_id())?
            .ok_or(RuntimeError::MonsterNotFound(battle.monster_id()))?;
        let damage = monster_counter_range(monster.level).roll(ctx.rng.as_ref());
        damage_character(ctx, battle, damage)?;
        monster_damage = Some(damage);
    }

    Ok(AttackReport {
        player_damage,
        monster_damage,
        battle: battle.clone(),
    })
}
