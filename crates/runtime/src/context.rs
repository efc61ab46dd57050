//! Collaborators shared by every service.

use std::sync::Arc;

use rpg_core::{LevelTable, RngOracle, RpgEvent};

use crate::api::Result;
use crate::clock::Clock;
use crate::events::EventBus;
use crate::locks::EntityLocks;
use crate::repository::Store;

/// Store, random source, clock, level table and event bus.
///
/// Services take `&RpgContext` and never hold on to it; the [`crate::Runtime`]
/// owns the only instance.
pub struct RpgContext {
    pub store: Arc<dyn Store>,
    pub rng: Arc<dyn RngOracle>,
    pub clock: Arc<dyn Clock>,
    pub levels: LevelTable,
    pub bus: EventBus,
    pub locks: EntityLocks,
}

impl RpgContext {
    /// Dispatch `event` to every observer on the bus.
    pub fn emit(&self, event: RpgEvent) -> Result<()> {
        self.bus.publish(&event, self)
    }

    pub fn now(&self) -> i64 {
        self.clock.now()
    }
}
