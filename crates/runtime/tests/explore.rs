//! Adventure page: pending battles, encounter rolls and character summary.

mod common;

use common::{Harness, USER};
use rpg_core::BattleState;
use rpg_runtime::TrailPrompt;

#[test]
fn fresh_character_summary() {
    let h = Harness::new();
    // no encounter, low prompt roll
    h.roll(&[50, 2]);
    let view = h.runtime.explore(USER).unwrap();

    assert_eq!(view.xp, 0);
    assert_eq!(view.level, 1);
    assert_eq!(view.remaining_xp, 120);
    assert_eq!(view.target_xp, Some(120));
    assert_eq!(view.hp, 58);
    assert_eq!(view.max_hp, 58);
    assert!(view.inventory.is_empty());
    assert!(view.ongoing.is_none());
    assert!(view.offered.is_none());
    assert_eq!(view.prompt, TrailPrompt::FollowThePathFurther);
}

#[test]
fn encounter_roll_offers_a_battle() {
    let h = Harness::new();
    let rat = h.monster("Rat", 4, 1);

    h.roll(&[51, 0, 3]);
    let view = h.runtime.explore(USER).unwrap();
    let offered = view.offered.expect("roll above 50 provokes a battle");
    assert_eq!(offered.monster.id, rat.id);
    assert_eq!(offered.battle.state(), BattleState::NotStarted);
    assert_eq!(offered.battle.monster_hp(), 4);
    assert_eq!(view.prompt, TrailPrompt::LookForTrouble);
}

#[test]
fn pending_battle_is_offered_again_without_rolling() {
    let h = Harness::new();
    h.monster("Rat", 4, 1);
    h.monster("Troll", 100, 3);

    h.roll(&[90, 1, 9]);
    let first = h.runtime.explore(USER).unwrap().offered.unwrap();
    assert_eq!(first.monster.name, "Troll");

    // only the prompt roll is consumed
    h.roll(&[0]);
    let again = h.runtime.explore(USER).unwrap();
    assert_eq!(again.offered.unwrap().battle.id(), first.battle.id());
    assert_eq!(again.prompt, TrailPrompt::FollowThePathFurther);
}

#[test]
fn ongoing_battle_is_shown_instead_of_an_offer() {
    let h = Harness::new();
    h.monster("Rat", 4, 1);

    h.roll(&[90, 0, 9]);
    let offered = h.runtime.explore(USER).unwrap().offered.unwrap();
    h.runtime.start_battle(offered.battle.id()).unwrap();

    h.roll(&[9]);
    let view = h.runtime.explore(USER).unwrap();
    assert!(view.offered.is_none());
    let ongoing = view.ongoing.expect("started battle is ongoing");
    assert_eq!(ongoing.battle.id(), offered.battle.id());
    assert_eq!(ongoing.battle.state(), BattleState::Ongoing);
}

#[test]
fn finished_battles_allow_a_new_encounter() {
    let h = Harness::new();
    h.monster("Rat", 4, 1);

    h.roll(&[90, 0, 9]);
    let first = h.runtime.explore(USER).unwrap().offered.unwrap();
    h.runtime.decline_battle(first.battle.id()).unwrap();

    h.roll(&[90, 0, 9]);
    let second = h.runtime.explore(USER).unwrap().offered.unwrap();
    assert_ne!(second.battle.id(), first.battle.id());
}

#[test]
fn empty_bestiary_offers_nothing() {
    let h = Harness::new();

    // encounter roll passes but there is no monster to pick
    h.roll(&[99, 5]);
    let view = h.runtime.explore(USER).unwrap();
    assert!(view.offered.is_none());
    assert_eq!(view.prompt, TrailPrompt::LookForTrouble);
}

#[test]
fn offer_with_deleted_monster_is_hidden() {
    let h = Harness::new();
    let rat = h.monster("Rat", 4, 1);

    h.roll(&[90, 0, 9]);
    let offered = h.runtime.explore(USER).unwrap().offered.unwrap();
    h.runtime.delete_monster(rat.id).unwrap();

    h.roll(&[9]);
    let view = h.runtime.explore(USER).unwrap();
    assert!(view.offered.is_none());
    assert_eq!(
        h.runtime.find_battle(offered.battle.id()).unwrap().state(),
        BattleState::NotStarted
    );
}

#[test]
fn explore_creates_the_character_once() {
    let h = Harness::new();
    assert!(h.runtime.find_user_character(USER).unwrap_err().is_not_found());

    h.roll(&[0, 0]);
    h.runtime.explore(USER).unwrap();
    let created = h.runtime.find_user_character(USER).unwrap();

    h.roll(&[0, 0]);
    h.runtime.explore(USER).unwrap();
    assert_eq!(h.runtime.find_user_character(USER).unwrap().id(), created.id());
    assert_eq!(created.timecreated(), common::NOW);
}
