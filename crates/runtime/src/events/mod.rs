//! Synchronous dispatch of domain events to observers.
//!
//! Observers are registered in the [`crate::RuntimeBuilder`] and sorted by
//! priority. Every event is delivered to every interested observer before the
//! operation that emitted it returns, so side effects such as the reward
//! policy are part of the same operation.

mod bus;
mod recorder;

pub use bus::EventBus;
pub use recorder::EventRecorder;

use rpg_core::{EventKind, RpgEvent};

use crate::api::Result;
use crate::context::RpgContext;

/// Defines how an observer failure is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserverCriticality {
    /// Failure fails the operation that emitted the event.
    Critical,

    /// Failure is logged as an error and dispatch continues. Default.
    Important,

    /// Failure is logged at debug level and ignored.
    Optional,
}

impl ObserverCriticality {
    pub fn as_str(self) -> &'static str {
        match self {
            ObserverCriticality::Critical => "critical",
            ObserverCriticality::Important => "important",
            ObserverCriticality::Optional => "optional",
        }
    }
}

/// Reacts to domain events.
///
/// # Execution Order
///
/// Observers run in ascending priority:
/// - Negative priorities: observers that maintain game state
/// - Zero: default
/// - Positive priorities: recording and other passive observers
pub trait EventObserver: Send + Sync {
    /// Human-readable name used in logs and errors.
    fn name(&self) -> &'static str;

    fn priority(&self) -> i32 {
        0
    }

    fn criticality(&self) -> ObserverCriticality {
        ObserverCriticality::Important
    }

    /// Filter applied before `on_event`; defaults to every kind.
    fn interested_in(&self, _kind: EventKind) -> bool {
        true
    }

    fn on_event(&self, event: &RpgEvent, ctx: &RpgContext) -> Result<()>;
}
