//! Priority-ordered observer list.

use std::sync::Arc;

use rpg_core::RpgEvent;
use tracing::{debug, error};

use super::{EventObserver, ObserverCriticality};
use crate::api::{Result, RuntimeError};
use crate::context::RpgContext;

/// Delivers each event to every interested observer in priority order.
#[derive(Clone, Default)]
pub struct EventBus {
    observers: Arc<[Arc<dyn EventObserver>]>,
}

impl EventBus {
    /// Build a bus; observers are sorted by priority (lower values first).
    pub fn new(mut observers: Vec<Arc<dyn EventObserver>>) -> Self {
        observers.sort_by_key(|observer| observer.priority());
        Self {
            observers: observers.into(),
        }
    }

    /// Dispatch `event` synchronously.
    ///
    /// # Error Handling
    ///
    /// - `Critical`: the first failure is returned and dispatch stops
    /// - `Important`: logged as an error, dispatch continues
    /// - `Optional`: logged at debug level, dispatch continues
    pub fn publish(&self, event: &RpgEvent, ctx: &RpgContext) -> Result<()> {
        let kind = event.kind();
        debug!(target: "runtime::events", %kind, userid = %event.userid(), "Dispatching event");

        for observer in self.observers.iter() {
            if !observer.interested_in(kind) {
                continue;
            }
            if let Err(e) = observer.on_event(event, ctx) {
                Self::handle_observer_error(observer.as_ref(), e)?;
            }
        }

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Observer names and priorities in dispatch order (for debugging).
    pub fn observers(&self) -> impl Iterator<Item = (&'static str, i32)> + '_ {
        self.observers.iter().map(|o| (o.name(), o.priority()))
    }

    fn handle_observer_error(observer: &dyn EventObserver, error: RuntimeError) -> Result<()> {
        let criticality = observer.criticality();
        match criticality {
            ObserverCriticality::Critical => {
                error!(
                    target: "runtime::events",
                    observer = observer.name(),
                    criticality = criticality.as_str(),
                    error = %error,
                    "Critical observer failed, aborting operation"
                );
                Err(RuntimeError::Observer {
                    observer: observer.name(),
                    source: Box::new(error),
                })
            }
            ObserverCriticality::Important => {
                error!(
                    target: "runtime::events",
                    observer = observer.name(),
                    criticality = criticality.as_str(),
                    error = %error,
                    "Observer failed, continuing"
                );
                Ok(())
            }
            ObserverCriticality::Optional => {
                debug!(
                    target: "runtime::events",
                    observer = observer.name(),
                    criticality = criticality.as_str(),
                    error = %error,
                    "Optional observer failed"
                );
                Ok(())
            }
        }
    }
}
