//! Shared fixtures for runtime integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use rpg_core::{
    ItemDefinition, ItemType, MonsterTemplate, NewItemDefinition, NewMonsterTemplate, Rarity,
    ScriptedRng, UserId,
};
use rpg_runtime::{EventRecorder, FixedClock, InMemoryStore, Runtime, RuntimeConfig};

pub const NOW: i64 = 1_700_000_000;
pub const USER: UserId = UserId(7);

/// Runtime over an in-memory store with scripted rolls and a recorder.
pub struct Harness {
    pub runtime: Runtime,
    pub rng: Arc<ScriptedRng>,
    pub recorder: Arc<EventRecorder>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    pub fn with_config(config: RuntimeConfig) -> Self {
        let rng = Arc::new(ScriptedRng::default());
        let recorder = Arc::new(EventRecorder::new());
        let runtime = Runtime::builder()
            .config(config)
            .store(Arc::new(InMemoryStore::new()))
            .rng(rng.clone())
            .clock(Arc::new(FixedClock::new(NOW)))
            .observer(recorder.clone())
            .build()
            .expect("runtime should build");

        Self {
            runtime,
            rng,
            recorder,
        }
    }

    /// Queue rolls consumed by the next operations, in order.
    pub fn roll(&self, rolls: &[u32]) {
        for &roll in rolls {
            self.rng.push(roll);
        }
    }

    pub fn monster(&self, name: &str, max_hp: u32, level: u32) -> MonsterTemplate {
        let template = NewMonsterTemplate::new(name, max_hp, level).expect("valid template");
        self.runtime
            .create_monster(template)
            .expect("monster should be created")
    }

    pub fn item(&self, name: &str, stackable: bool) -> ItemDefinition {
        self.runtime
            .create_item(NewItemDefinition {
                name: name.to_owned(),
                rarity: Rarity::Common,
                item_type: ItemType::Food,
                stackable,
            })
            .expect("item should be created")
    }
}
