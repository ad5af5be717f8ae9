//! Event dispatch to host observers.
//!
//! Systems append `SimEvent`s to a per-tick buffer; the engine hands the
//! whole buffer to every observer once, at the end of the tick.

use arena_core::events::SimEvent;

/// Receives simulation events. Any `FnMut(&SimEvent)` closure qualifies.
pub trait EventObserver {
    fn on_event(&mut self, event: &SimEvent);
}

impl<F> EventObserver for F
where
    F: FnMut(&SimEvent),
{
    fn on_event(&mut self, event: &SimEvent) {
        self(event)
    }
}

/// Registered observers, notified in subscription order.
#[derive(Default)]
pub struct Observers {
    observers: Vec<Box<dyn EventObserver + Send>>,
}

impl Observers {
    pub fn subscribe(&mut self, observer: impl EventObserver + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Deliver every event, in order, to every observer.
    pub fn dispatch(&mut self, events: &[SimEvent]) {
        for observer in &mut self.observers {
            for event in events {
                observer.on_event(event);
            }
        }
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.observers.len())
            .finish()
    }
}
