//! File-backed store, catalogue administration and concurrent access.

mod common;

use std::sync::Arc;
use std::thread;

use common::{Harness, USER};
use rpg_content::Catalog;
use rpg_core::{BattleState, EventKind, ItemId, NewMonsterTemplate, RpgConfig, UserId};
use rpg_runtime::{EventRecorder, Runtime, RuntimeConfig, RuntimeError};

fn file_runtime(dir: &std::path::Path) -> Runtime {
    Runtime::builder()
        .config(RuntimeConfig {
            data_dir: Some(dir.to_path_buf()),
            rng_seed: Some(7),
            ..RuntimeConfig::default()
        })
        .build()
        .expect("file runtime should build")
}

#[test]
fn progress_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();

    let (character_id, monster_id) = {
        let runtime = file_runtime(dir.path());
        let monster = runtime
            .create_monster(NewMonsterTemplate::new("Goblin", 30, 2).unwrap())
            .unwrap();
        runtime.grant_xp(USER, 150).unwrap();
        (runtime.find_user_character(USER).unwrap().id(), monster.id)
    };

    let runtime = file_runtime(dir.path());
    let hero = runtime.find_user_character(USER).unwrap();
    assert_eq!(hero.id(), character_id);
    assert_eq!(hero.xp(), 150);
    assert_eq!(runtime.find_monster(monster_id).unwrap().name, "Goblin");

    // ids keep counting after a reload
    let next = runtime
        .create_monster(NewMonsterTemplate::new("Rat", 5, 1).unwrap())
        .unwrap();
    assert!(next.id > monster_id);
}

#[test]
fn first_inventory_visit_persists_the_character() {
    let dir = tempfile::tempdir().unwrap();

    let character_id = {
        let runtime = file_runtime(dir.path());
        assert!(runtime.inventory(USER).unwrap().is_empty());
        runtime.find_user_character(USER).unwrap().id()
    };

    let runtime = file_runtime(dir.path());
    let hero = runtime.find_user_character(USER).unwrap();
    assert_eq!(hero.id(), character_id);
    assert_eq!(hero.hp(), 58);
}

#[test]
fn builtin_catalogue_seeds_the_store() {
    let h = Harness::new();
    let catalog = Catalog::builtin().unwrap();

    let (monsters, items) = h.runtime.seed(&catalog).unwrap();
    assert_eq!(monsters, catalog.monsters.len());
    assert_eq!(items, catalog.items.len());
    assert_eq!(h.runtime.monsters().unwrap().len(), monsters);
    assert_eq!(h.runtime.items().unwrap().len(), items);
}

#[test]
fn catalogue_administration() {
    let h = Harness::new();
    let mut troll = h.monster("Troll", 100, 3);
    troll.level = 4;
    h.runtime.update_monster(&troll).unwrap();
    assert_eq!(h.runtime.find_monster(troll.id).unwrap().level, 4);

    troll.max_hp = 0;
    assert!(matches!(
        h.runtime.update_monster(&troll),
        Err(RuntimeError::State(_))
    ));

    let bread = h.item("Bread", true);
    let potion = h.item("Healing Potion", false);
    let found = h
        .runtime
        .find_items(&[potion.id, ItemId(999), bread.id])
        .unwrap();
    assert_eq!(found.len(), 2);

    h.runtime.delete_item(bread.id).unwrap();
    assert!(h.runtime.delete_item(bread.id).unwrap_err().is_not_found());
    assert!(h.runtime.find_item(bread.id).unwrap_err().is_not_found());
    h.runtime.delete_monster(troll.id).unwrap();
    assert!(h.runtime.monsters().unwrap().is_empty());
}

#[test]
fn inventory_skips_deleted_definitions() {
    let h = Harness::new();
    let bread = h.item("Bread", true);
    h.item("Lockpick", false);

    // perfect attempt picks the first item
    h.roll(&[0]);
    h.runtime.quiz_attempt_submitted(USER, &[true]).unwrap();
    assert_eq!(h.runtime.inventory(USER).unwrap().len(), 1);

    h.runtime.delete_item(bread.id).unwrap();
    assert!(h.runtime.inventory(USER).unwrap().is_empty());
}

#[test]
fn changing_the_curve_rebuilds_levels() {
    let mut h = Harness::new();
    h.runtime.grant_xp(USER, 11).unwrap();
    let hero = h.runtime.find_user_character(USER).unwrap();
    assert_eq!(hero.level(h.runtime.levels()), 2);

    h.runtime.set_config(RpgConfig::with_xp_curve(10, 1.1));
    assert_eq!(h.runtime.levels().xp_required_for_level(2), Some(10));
    assert_eq!(hero.level(h.runtime.levels()), 3);
}

#[test]
fn concurrent_quiz_updates_lose_no_xp() {
    let recorder = Arc::new(EventRecorder::new());
    let runtime = Runtime::builder()
        .config(RuntimeConfig {
            rng_seed: Some(99),
            ..RuntimeConfig::default()
        })
        .observer(recorder.clone())
        .build()
        .unwrap();

    thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                for _ in 0..25 {
                    runtime.quiz_attempt_updated(USER, 1).unwrap();
                }
            });
        }
    });

    assert_eq!(runtime.find_user_character(USER).unwrap().xp(), 8 * 25 * 4);
    assert_eq!(recorder.count(EventKind::XpGained), 200);
}

#[test]
fn concurrent_first_visits_create_one_character_each() {
    let runtime = Runtime::builder().build().unwrap();

    thread::scope(|scope| {
        for user in 1..=4 {
            for _ in 0..4 {
                let runtime = &runtime;
                scope.spawn(move || runtime.get_user_character(UserId(user)).unwrap());
            }
        }
    });

    let ids: std::collections::HashSet<_> = (1..=4)
        .map(|user| runtime.find_user_character(UserId(user)).unwrap().id())
        .collect();
    assert_eq!(ids.len(), 4);
}

#[test]
fn concurrent_attacks_end_a_battle_once() {
    let h = Harness::new();
    h.monster("Rat", 4, 1);
    h.item("Bread", true);

    h.roll(&[75, 0, 5]);
    let offered = h.runtime.explore(USER).unwrap().offered.unwrap().battle;
    let battle = h.runtime.start_battle(offered.id()).unwrap();

    // only the winning attack rolls: a lethal 4, then the reward pick
    h.roll(&[4, 0]);
    let (runtime, id) = (&h.runtime, battle.id());
    let results: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(move |_| scope.spawn(move || runtime.attack_monster(id)))
            .collect();
        handles.into_iter().map(|handle| handle.join().unwrap()).collect()
    });

    let wins: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
    assert_eq!(wins.len(), 1);
    assert_eq!(wins[0].battle.state(), BattleState::Victory);
    for err in results.iter().filter_map(|r| r.as_ref().err()) {
        assert!(matches!(
            err,
            RuntimeError::InvalidBattleState {
                actual: BattleState::Victory,
                ..
            }
        ));
    }

    assert_eq!(h.recorder.count(EventKind::BattleEnded), 1);
    assert_eq!(h.recorder.count(EventKind::XpGained), 1);
    assert_eq!(h.runtime.find_user_character(USER).unwrap().xp(), 4);
    let inventory = h.runtime.inventory(USER).unwrap();
    assert_eq!(inventory.len(), 1);
    assert_eq!(inventory[0].row.stack(), 1);
}
