use crate::{input::events::MapEvent, prelude::HashMap};
use std::collections::VecDeque;

/// Event listener callback type
pub type EventCallback = Box<dyn Fn(&MapEvent) + Send + Sync>;

/// Outgoing event dispatch for the map
///
/// Emitted events are queued; `process_events` drains the queue, hands every
/// event to the listeners registered under its name, and returns the batch.
#[derive(Default)]
pub struct EventManager {
    /// Event listeners by event type
    listeners: HashMap<&'static str, Vec<EventCallback>>,
    /// Event queue for processing
    event_queue: VecDeque<MapEvent>,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event listener
    pub fn on<F>(&mut self, event_type: &'static str, callback: F)
    where
        F: Fn(&MapEvent) + Send + Sync + 'static,
    {
        self.listeners
            .entry(event_type)
            .or_default()
            .push(Box::new(callback));
    }

    /// Emit an event to the queue
    pub fn emit(&mut self, event: MapEvent) {
        self.event_queue.push_back(event);
    }

    /// Process all queued events
    pub fn process_events(&mut self) -> Vec<MapEvent> {
        let events: Vec<_> = self.event_queue.drain(..).collect();

        for event in &events {
            if let Some(callbacks) = self.listeners.get(event.name()) {
                for callback in callbacks {
                    callback(event);
                }
            }
        }

        events
    }

    /// Clear all events from the queue
    pub fn clear_events(&mut self) {
        self.event_queue.clear();
    }

    /// Get number of pending events
    pub fn pending_events(&self) -> usize {
        self.event_queue.len()
    }
}

impl std::fmt::Debug for EventManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventManager")
            .field("listeners", &self.listeners.len())
            .field("pending", &self.event_queue.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    #[test]
    fn test_listeners_fire_by_name() {
        let mut manager = EventManager::new();
        let redraws = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&redraws);
        manager.on("redrawn", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        manager.emit(MapEvent::Redrawn { frame: 1 });
        manager.emit(MapEvent::SelectionCleared);
        manager.emit(MapEvent::Redrawn { frame: 2 });
        assert_eq!(manager.pending_events(), 3);

        let events = manager.process_events();
        assert_eq!(events.len(), 3);
        assert_eq!(redraws.load(Ordering::SeqCst), 2);
        assert_eq!(manager.pending_events(), 0);
    }

    #[test]
    fn test_clear_events() {
        let mut manager = EventManager::new();
        manager.emit(MapEvent::SelectionCleared);
        manager.clear_events();
        assert!(manager.process_events().is_empty());
    }
}
