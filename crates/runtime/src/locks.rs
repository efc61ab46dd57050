//! Per-entity mutual exclusion for read-modify-write cycles.
//!
//! Every external operation acquires the keys of the records it mutates
//! before loading them and releases them when its guard drops. A set of keys
//! is acquired all at once, so two operations never hold half of each
//! other's keys.
//!
//! Nested acquisition follows `User` → `Character` → `Battle`: an operation
//! holding a `Character` key never waits for a `User` key.

use std::collections::HashSet;
use std::sync::{Condvar, Mutex};

use rpg_core::{BattleId, CharacterId, UserId};

use crate::api::{Result, RuntimeError};

/// Identity of a lockable record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LockKey {
    /// Guards lookup-or-create of a user's character.
    User(UserId),
    Character(CharacterId),
    Battle(BattleId),
}

/// Table of currently held keys.
#[derive(Debug, Default)]
pub struct EntityLocks {
    held: Mutex<HashSet<LockKey>>,
    released: Condvar,
}

impl EntityLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block until none of `keys` is held, then hold all of them.
    pub fn acquire(&self, keys: impl IntoIterator<Item = LockKey>) -> Result<EntityGuard<'_>> {
        let mut keys: Vec<LockKey> = keys.into_iter().collect();
        keys.sort_unstable();
        keys.dedup();

        let mut held = self.held.lock().map_err(|_| RuntimeError::LockPoisoned)?;
        while keys.iter().any(|key| held.contains(key)) {
            held = self
                .released
                .wait(held)
                .map_err(|_| RuntimeError::LockPoisoned)?;
        }
        held.extend(keys.iter().copied());
        tracing::trace!(target: "runtime::locks", ?keys, "acquired");

        Ok(EntityGuard { locks: self, keys })
    }

    pub fn is_held(&self, key: LockKey) -> bool {
        self.held
            .lock()
            .map(|held| held.contains(&key))
            .unwrap_or(false)
    }
}

/// Releases its keys on drop.
#[must_use = "the keys are released as soon as the guard is dropped"]
#[derive(Debug)]
pub struct EntityGuard<'a> {
    locks: &'a EntityLocks,
    keys: Vec<LockKey>,
}

impl Drop for EntityGuard<'_> {
    fn drop(&mut self) {
        let mut held = self
            .locks
            .held
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        for key in &self.keys {
            held.remove(key);
        }
        drop(held);
        self.locks.released.notify_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::thread;

    #[test]
    fn guard_releases_on_drop() {
        let locks = EntityLocks::new();
        let key = LockKey::Battle(BattleId(1));
        {
            let _guard = locks.acquire([key, key]).unwrap();
            assert!(locks.is_held(key));
        }
        assert!(!locks.is_held(key));
    }

    #[test]
    fn disjoint_keys_do_not_block() {
        let locks = EntityLocks::new();
        let _a = locks.acquire([LockKey::Character(CharacterId(1))]).unwrap();
        let _b = locks.acquire([LockKey::Character(CharacterId(2))]).unwrap();
    }

    #[test]
    fn same_key_serialises_read_modify_write() {
        let locks = Arc::new(EntityLocks::new());
        let value = Arc::new(AtomicU32::new(0));

        let workers: Vec<_> = (0..8)
            .map(|_| {
                let locks = Arc::clone(&locks);
                let value = Arc::clone(&value);
                thread::spawn(move || {
                    for _ in 0..50 {
                        let _guard = locks.acquire([LockKey::Character(CharacterId(7))]).unwrap();
                        let read = value.load(Ordering::SeqCst);
                        thread::yield_now();
                        value.store(read + 1, Ordering::SeqCst);
                    }
                })
            })
            .collect();

        for worker in workers {
            worker.join().unwrap();
        }
        assert_eq!(value.load(Ordering::SeqCst), 400);
    }
}
