//! Runtime orchestration for the learning-platform RPG layer.
//!
//! This crate wires the pure rules of `rpg-core` to persistence, randomness,
//! clocks and event dispatch. The host platform embeds [`Runtime`] and calls
//! its operations from page handlers and quiz callbacks.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the errors and read models clients interact with
//! - [`services`] implements the battle, character, reward and quiz operations
//! - [`events`] dispatches domain events to registered observers
//! - [`repository`] provides the in-memory and file-backed stores
//! - [`locks`] serializes concurrent operations on the same records
pub mod api;
pub mod clock;
pub mod config;
pub mod context;
pub mod events;
pub mod locks;
pub mod repository;
pub mod rng;
pub mod runtime;
pub mod services;

pub use api::{
    AdventureView, AttackReport, EncounterView, ErrorStatus, InventoryLine, Result, RuntimeError,
    TrailPrompt,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::RuntimeConfig;
pub use context::RpgContext;
pub use events::{EventBus, EventObserver, EventRecorder, ObserverCriticality};
pub use locks::{EntityGuard, EntityLocks, LockKey};
pub use repository::{FileStore, InMemoryStore, RepositoryError, Store};
pub use rng::OsRngOracle;
pub use runtime::{Runtime, RuntimeBuilder};
pub use services::{QuizOutcome, QuizRewards, RewardPolicy};
