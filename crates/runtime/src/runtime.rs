//! High-level runtime orchestrator.
//!
//! [`Runtime`] is the entry point for the host platform: it owns the store,
//! random source, clock, level table and event bus, takes the entity locks
//! for each operation and flushes the store once the operation succeeds.

use std::sync::Arc;

use rpg_content::Catalog;
use rpg_core::{
    Battle, BattleId, BattleState, Character, ItemDefinition, ItemId, LevelTable, MonsterId,
    MonsterTemplate, NewItemDefinition, NewMonsterTemplate, PcgRng, RngOracle, RpgConfig, UserId,
    XpGained,
};
use tracing::{debug, info, warn};

use crate::api::{
    AdventureView, AttackReport, EncounterView, InventoryLine, Result, RuntimeError, TrailPrompt,
};
use crate::clock::{Clock, SystemClock};
use crate::config::RuntimeConfig;
use crate::context::RpgContext;
use crate::events::{EventBus, EventObserver};
use crate::locks::{EntityGuard, LockKey};
use crate::repository::{FileStore, InMemoryStore, Store};
use crate::rng::OsRngOracle;
use crate::services::{QuizOutcome, QuizRewards, RewardPolicy, battle, character};

/// Chance out of 100 (exclusive) that exploring without a pending battle
/// provokes a new one: an encounter happens when a roll in `0..=100` exceeds it.
const ENCOUNTER_THRESHOLD: u32 = 50;

/// Main runtime driving battles and progression.
pub struct Runtime {
    ctx: RpgContext,
    rpg: RpgConfig,
    quiz: QuizRewards,
}

/// A user's character with its `User` and `Character` keys held.
struct UserScope<'a> {
    character: Character,
    _user: EntityGuard<'a>,
    _character: EntityGuard<'a>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn config(&self) -> &RpgConfig {
        &self.rpg
    }

    pub fn levels(&self) -> &LevelTable {
        &self.ctx.levels
    }

    pub fn context(&self) -> &RpgContext {
        &self.ctx
    }

    /// Replace the progression settings and rebuild the level table.
    pub fn set_config(&mut self, rpg: RpgConfig) {
        self.ctx.levels = LevelTable::from_config(&rpg);
        info!(
            target: "runtime",
            base_xp_target = rpg.base_xp_target,
            growth_multiplier = rpg.growth_multiplier,
            "Progression settings changed"
        );
        self.rpg = rpg;
    }

    // ===== battle operations =====

    pub fn find_battle(&self, id: BattleId) -> Result<Battle> {
        battle::find_battle(&self.ctx, id)
    }

    /// Accept an offered battle: `NotStarted` → `Ongoing`.
    pub fn start_battle(&self, id: BattleId) -> Result<Battle> {
        let (_guard, mut battle) = self.lock_battle(id)?;
        if battle.state() != BattleState::NotStarted {
            return Err(RuntimeError::InvalidBattleState {
                battle: id,
                actual: battle.state(),
                expected: "not_started",
            });
        }

        battle::change_state(&self.ctx, &mut battle, BattleState::Ongoing)?;
        self.ctx.store.flush()?;
        Ok(battle)
    }

    /// Walk away from a battle that has not ended: → `Retreated`.
    pub fn decline_battle(&self, id: BattleId) -> Result<Battle> {
        let (_guard, mut battle) = self.lock_battle(id)?;
        if !battle.can_retreat() {
            return Err(RuntimeError::InvalidBattleState {
                battle: id,
                actual: battle.state(),
                expected: "not_started or ongoing",
            });
        }

        battle::change_state(&self.ctx, &mut battle, BattleState::Retreated)?;
        self.ctx.store.flush()?;
        Ok(battle)
    }

    /// Play one attack turn in an ongoing battle.
    pub fn attack_monster(&self, id: BattleId) -> Result<AttackReport> {
        let (_guard, mut battle) = self.lock_battle(id)?;
        let report = battle::attack_turn(&self.ctx, &mut battle)?;
        debug!(
            target: "runtime",
            battle = %id,
            player_damage = report.player_damage,
            monster_damage = ?report.monster_damage,
            state = %report.battle.state(),
            "Attack turn"
        );
        self.ctx.store.flush()?;
        Ok(report)
    }

    // ===== character operations =====

    pub fn get_user_character(&self, userid: UserId) -> Result<Character> {
        let _guard = self.ctx.locks.acquire([LockKey::User(userid)])?;
        let character = character::get_user_character(&self.ctx, userid)?;
        self.ctx.store.flush()?;
        Ok(character)
    }

    /// The user's character without creating one.
    pub fn find_user_character(&self, userid: UserId) -> Result<Character> {
        self.ctx
            .store
            .characters()
            .find_by_user(userid)?
            .ok_or(RuntimeError::UserCharacterNotFound(userid))
    }

    pub fn grant_xp(&self, userid: UserId, amount: u64) -> Result<Option<XpGained>> {
        let mut scope = self.lock_user(userid)?;
        let event = character::grant_xp(&self.ctx, &mut scope.character, amount)?;
        self.ctx.store.flush()?;
        Ok(event)
    }

    /// Inventory lines for the user, creating their character on first visit.
    pub fn inventory(&self, userid: UserId) -> Result<Vec<InventoryLine>> {
        let scope = self.lock_user(userid)?;
        let lines = character::inventory(&self.ctx, scope.character.id())?;
        self.ctx.store.flush()?;
        Ok(lines)
    }

    /// The adventure page: character summary plus the ongoing or offered
    /// battle.
    ///
    /// Without a pending battle there is a fair chance of provoking one.
    pub fn explore(&self, userid: UserId) -> Result<AdventureView> {
        let scope = self.lock_user(userid)?;
        let hero = &scope.character;

        let mut ongoing = None;
        let mut offered = None;
        if let Some(current) =
            battle::find_for_character(&self.ctx, hero.id(), BattleState::Ongoing)?
        {
            ongoing = self.encounter(current)?;
        } else {
            let pending =
                match battle::find_for_character(&self.ctx, hero.id(), BattleState::NotStarted)? {
                    Some(pending) => Some(pending),
                    None if self.ctx.rng.range(0, 100) > ENCOUNTER_THRESHOLD => {
                        battle::setup_battle(&self.ctx, hero.id())?
                    }
                    None => None,
                };
            if let Some(pending) = pending {
                offered = self.encounter(pending)?;
            }
        }

        let prompt = match self.ctx.rng.range(0, 10) {
            0..=2 => TrailPrompt::FollowThePathFurther,
            _ => TrailPrompt::LookForTrouble,
        };

        let levels = &self.ctx.levels;
        let level = hero.level(levels);
        let view = AdventureView {
            xp: hero.xp(),
            level,
            remaining_xp: levels.remaining_xp_until_next_level(hero.xp()),
            target_xp: levels.xp_required_for_level(level + 1),
            hp: hero.hp(),
            max_hp: hero.max_hp(levels),
            inventory: character::inventory(&self.ctx, hero.id())?,
            ongoing,
            offered,
            prompt,
        };

        self.ctx.store.flush()?;
        Ok(view)
    }

    // ===== quiz hooks =====

    /// Quiz page saved with `answered_slots` question slots filled in.
    pub fn quiz_attempt_updated(
        &self,
        userid: UserId,
        answered_slots: usize,
    ) -> Result<Option<XpGained>> {
        let mut scope = self.lock_user(userid)?;
        let event = self
            .quiz
            .attempt_updated(&self.ctx, &mut scope.character, answered_slots)?;
        self.ctx.store.flush()?;
        Ok(event)
    }

    /// Quiz attempt submitted; one entry per question, `true` when correct.
    pub fn quiz_attempt_submitted(&self, userid: UserId, answers: &[bool]) -> Result<QuizOutcome> {
        let mut scope = self.lock_user(userid)?;
        let outcome = self
            .quiz
            .attempt_submitted(&self.ctx, &mut scope.character, answers)?;
        self.ctx.store.flush()?;
        Ok(outcome)
    }

    // ===== catalogue administration =====

    pub fn monsters(&self) -> Result<Vec<MonsterTemplate>> {
        Ok(self.ctx.store.monsters().all()?)
    }

    pub fn find_monster(&self, id: MonsterId) -> Result<MonsterTemplate> {
        self.ctx
            .store
            .monsters()
            .get(id)?
            .ok_or(RuntimeError::MonsterNotFound(id))
    }

    pub fn create_monster(&self, monster: NewMonsterTemplate) -> Result<MonsterTemplate> {
        monster.validate()?;
        let monster = self.ctx.store.monsters().insert(monster)?;
        self.ctx.store.flush()?;
        Ok(monster)
    }

    pub fn update_monster(&self, monster: &MonsterTemplate) -> Result<()> {
        monster.validate()?;
        self.find_monster(monster.id)?;
        self.ctx.store.monsters().update(monster)?;
        self.ctx.store.flush()?;
        Ok(())
    }

    /// Battles already spawned from the template keep their own hitpoints.
    pub fn delete_monster(&self, id: MonsterId) -> Result<()> {
        if !self.ctx.store.monsters().delete(id)? {
            return Err(RuntimeError::MonsterNotFound(id));
        }
        self.ctx.store.flush()?;
        Ok(())
    }

    pub fn items(&self) -> Result<Vec<ItemDefinition>> {
        Ok(self.ctx.store.items().all()?)
    }

    pub fn find_item(&self, id: ItemId) -> Result<ItemDefinition> {
        self.ctx
            .store
            .items()
            .get(id)?
            .ok_or(RuntimeError::ItemNotFound(id))
    }

    pub fn find_items(&self, ids: &[ItemId]) -> Result<Vec<ItemDefinition>> {
        Ok(self.ctx.store.items().find_list(ids)?)
    }

    pub fn create_item(&self, item: NewItemDefinition) -> Result<ItemDefinition> {
        let item = self.ctx.store.items().insert(item)?;
        self.ctx.store.flush()?;
        Ok(item)
    }

    pub fn update_item(&self, item: &ItemDefinition) -> Result<()> {
        self.find_item(item.id)?;
        self.ctx.store.items().update(item)?;
        self.ctx.store.flush()?;
        Ok(())
    }

    /// Inventory rows referencing the item are left in place.
    pub fn delete_item(&self, id: ItemId) -> Result<()> {
        if !self.ctx.store.items().delete(id)? {
            return Err(RuntimeError::ItemNotFound(id));
        }
        self.ctx.store.flush()?;
        Ok(())
    }

    /// Insert every monster and item of `catalog`.
    ///
    /// Returns the number of monsters and items added.
    pub fn seed(&self, catalog: &Catalog) -> Result<(usize, usize)> {
        for monster in &catalog.monsters {
            self.ctx.store.monsters().insert(monster.clone())?;
        }
        for item in &catalog.items {
            self.ctx.store.items().insert(item.clone())?;
        }
        self.ctx.store.flush()?;

        info!(
            target: "runtime",
            monsters = catalog.monsters.len(),
            items = catalog.items.len(),
            "Seeded catalogue"
        );
        Ok((catalog.monsters.len(), catalog.items.len()))
    }

    // ===== helpers =====

    /// Hold the battle and its character, then load the battle.
    fn lock_battle(&self, id: BattleId) -> Result<(EntityGuard<'_>, Battle)> {
        let character_id = battle::find_battle(&self.ctx, id)?.character_id();
        let guard = self
            .ctx
            .locks
            .acquire([LockKey::Character(character_id), LockKey::Battle(id)])?;
        let battle = battle::find_battle(&self.ctx, id)?;
        Ok((guard, battle))
    }

    /// Hold the user, load or create their character, then hold it too.
    fn lock_user(&self, userid: UserId) -> Result<UserScope<'_>> {
        let user = self.ctx.locks.acquire([LockKey::User(userid)])?;
        let character_id = character::get_user_character(&self.ctx, userid)?.id();
        let guard = self.ctx.locks.acquire([LockKey::Character(character_id)])?;
        let character = character::find_character(&self.ctx, character_id)?;
        Ok(UserScope {
            character,
            _user: user,
            _character: guard,
        })
    }

    fn encounter(&self, battle: Battle) -> Result<Option<EncounterView>> {
        match self.ctx.store.monsters().get(battle.monster_id())? {
            Some(monster) => Ok(Some(EncounterView { battle, monster })),
            None => {
                warn!(
                    target: "runtime",
                    battle = %battle.id(),
                    monster = %battle.monster_id(),
                    "Battle references a deleted monster"
                );
                Ok(None)
            }
        }
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    store: Option<Arc<dyn Store>>,
    rng: Option<Arc<dyn RngOracle>>,
    clock: Option<Arc<dyn Clock>>,
    observers: Vec<Arc<dyn EventObserver>>,
    default_observers: bool,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            store: None,
            rng: None,
            clock: None,
            observers: Vec::new(),
            default_observers: true,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a specific store instead of the one `config.data_dir` implies.
    pub fn store(mut self, store: Arc<dyn Store>) -> Self {
        self.store = Some(store);
        self
    }

    /// Use a specific random source instead of the one `config.rng_seed` implies.
    pub fn rng(mut self, rng: Arc<dyn RngOracle>) -> Self {
        self.rng = Some(rng);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Register an additional event observer.
    pub fn observer(mut self, observer: Arc<dyn EventObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Do not register the [`RewardPolicy`].
    pub fn without_default_observers(mut self) -> Self {
        self.default_observers = false;
        self
    }

    pub fn build(self) -> Result<Runtime> {
        let store: Arc<dyn Store> = match (self.store, &self.config.data_dir) {
            (Some(store), _) => store,
            (None, Some(dir)) => {
                info!(target: "runtime", data_dir = %dir.display(), "Opening file store");
                Arc::new(FileStore::open(dir)?)
            }
            (None, None) => Arc::new(InMemoryStore::new()),
        };

        let rng: Arc<dyn RngOracle> = match (self.rng, self.config.rng_seed) {
            (Some(rng), _) => rng,
            (None, Some(seed)) => Arc::new(PcgRng::new(seed)),
            (None, None) => Arc::new(OsRngOracle::new()),
        };

        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));

        let mut observers = self.observers;
        if self.default_observers {
            observers.push(Arc::new(RewardPolicy));
        }

        let ctx = RpgContext {
            store,
            rng,
            clock,
            levels: LevelTable::from_config(&self.config.rpg),
            bus: EventBus::new(observers),
            locks: Default::default(),
        };

        Ok(Runtime {
            ctx,
            rpg: self.config.rpg,
            quiz: self.config.quiz,
        })
    }
}
