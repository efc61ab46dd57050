//! Observer that keeps every event it sees.

use std::sync::Mutex;

use rpg_core::{EventKind, RpgEvent};

use super::{EventObserver, ObserverCriticality};
use crate::api::{Result, RuntimeError};
use crate::context::RpgContext;

/// In-memory event sink for tests and diagnostics.
///
/// Register an `Arc<EventRecorder>` with the builder and keep a clone to
/// inspect what was emitted.
#[derive(Debug, Default)]
pub struct EventRecorder {
    events: Mutex<Vec<RpgEvent>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far, in dispatch order.
    pub fn events(&self) -> Vec<RpgEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Drain the recording.
    pub fn take(&self) -> Vec<RpgEvent> {
        self.events
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default()
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.events
            .lock()
            .map(|events| events.iter().filter(|e| e.kind() == kind).count())
            .unwrap_or(0)
    }
}

impl EventObserver for EventRecorder {
    fn name(&self) -> &'static str {
        "event_recorder"
    }

    fn priority(&self) -> i32 {
        100
    }

    fn criticality(&self) -> ObserverCriticality {
        ObserverCriticality::Optional
    }

    fn on_event(&self, event: &RpgEvent, _ctx: &RpgContext) -> Result<()> {
        self.events
            .lock()
            .map_err(|_| RuntimeError::LockPoisoned)?
            .push(event.clone());
        Ok(())
    }
}
