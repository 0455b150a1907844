//! Event system following Game Engine Architecture Ch 16.8
//! Key principles:
//! - Key-value arguments (no order dependency)
//! - Handler returns bool (true = consumed, stops forwarding)
//! - Registration system (only notify interested handlers)
//! - Queuing support (immediate + deferred delivery)
//!
//! The physics step sends one [`EventType::CollisionOccurred`] event per
//! participant of every resolved pair.

use std::collections::HashMap;

use crate::ecs::Entity;

/// Event type identification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// A body took part in a resolved collision
    CollisionOccurred,
}

/// Variant for type-safe event arguments
/// Uses key-value pairs to avoid order dependency problems
#[derive(Debug, Clone, PartialEq)]
pub enum EventArg {
    /// Entity identifier
    Entity(Entity),
    /// Contact normal
    Normal(f32, f32),
    /// Time of impact along the step
    Time(f32),
}

/// Argument key of the notified entity
pub const ARG_ENTITY: &str = "entity";
/// Argument key of the other participant
pub const ARG_OTHER: &str = "other";
/// Argument key of the contact normal recorded on the rolled-back body
pub const ARG_NORMAL: &str = "normal";
/// Argument key of the time of impact
pub const ARG_TIME: &str = "time";

/// Event with type ID and key-value arguments
#[derive(Debug, Clone)]
pub struct Event {
    /// Type of event
    pub event_type: EventType,
    /// Timestamp when event was created (seconds)
    pub timestamp: f64,
    args: HashMap<&'static str, EventArg>,
}

impl Event {
    /// Create a new event with the given type and timestamp
    pub fn new(event_type: EventType, timestamp: f64) -> Self {
        Self {
            event_type,
            timestamp,
            args: HashMap::new(),
        }
    }

    /// Collision notification for `entity`, which collided with `other`
    pub fn collision(timestamp: f64, entity: Entity, other: Entity, time: f32, normal: (f32, f32)) -> Self {
        Self::new(EventType::CollisionOccurred, timestamp)
            .with_arg(ARG_ENTITY, EventArg::Entity(entity))
            .with_arg(ARG_OTHER, EventArg::Entity(other))
            .with_arg(ARG_TIME, EventArg::Time(time))
            .with_arg(ARG_NORMAL, EventArg::Normal(normal.0, normal.1))
    }

    /// Add an argument to the event (builder pattern)
    pub fn with_arg(mut self, key: &'static str, value: EventArg) -> Self {
        self.args.insert(key, value);
        self
    }

    /// Get an argument by key
    pub fn get_arg(&self, key: &str) -> Option<&EventArg> {
        self.args.get(key)
    }

    /// Get the notified entity if present
    pub fn get_entity(&self) -> Option<Entity> {
        if let Some(EventArg::Entity(entity)) = self.get_arg(ARG_ENTITY) {
            Some(*entity)
        } else {
            None
        }
    }

    /// Get the other participant if present
    pub fn get_other(&self) -> Option<Entity> {
        if let Some(EventArg::Entity(entity)) = self.get_arg(ARG_OTHER) {
            Some(*entity)
        } else {
            None
        }
    }

    /// Get the contact normal if present
    pub fn get_normal(&self) -> Option<(f32, f32)> {
        if let Some(EventArg::Normal(x, y)) = self.get_arg(ARG_NORMAL) {
            Some((*x, *y))
        } else {
            None
        }
    }

    /// Get the time of impact if present
    pub fn get_time(&self) -> Option<f32> {
        if let Some(EventArg::Time(time)) = self.get_arg(ARG_TIME) {
            Some(*time)
        } else {
            None
        }
    }
}

/// Event handler trait
/// Returns true if event was consumed (stops forwarding)
/// Returns false to allow forwarding to other handlers
pub trait EventHandler {
    /// Handle an event, return true if consumed
    fn on_event(&mut self, event: &Event) -> bool;
}

/// Event system with registration and queuing
/// Follows chain of responsibility pattern
pub struct EventSystem {
    immediate_queue: Vec<Event>,
    deferred_queue: Vec<(f64, Event)>,
    handlers: HashMap<EventType, Vec<Box<dyn EventHandler>>>,
    current_time: f64,
}

impl EventSystem {
    /// Create a new empty event system
    pub fn new() -> Self {
        Self {
            immediate_queue: Vec::new(),
            deferred_queue: Vec::new(),
            handlers: HashMap::new(),
            current_time: 0.0,
        }
    }

    /// Update current time (seconds since start)
    pub fn update_time(&mut self, time: f64) {
        self.current_time = time;
    }

    /// Current time (seconds since start)
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Register a handler for a specific event type
    /// Only handlers registered for this type will be notified
    pub fn register_handler(&mut self, event_type: EventType, handler: Box<dyn EventHandler>) {
        self.handlers.entry(event_type).or_default().push(handler);
    }

    /// Send event for immediate handling this frame
    pub fn send(&mut self, event: Event) {
        self.immediate_queue.push(event);
    }

    /// Post event for deferred delivery at specified time
    pub fn post(&mut self, delivery_time: f64, event: Event) {
        self.deferred_queue.push((delivery_time, event));
    }

    /// Number of events waiting for dispatch
    pub fn pending(&self) -> usize {
        self.immediate_queue.len() + self.deferred_queue.len()
    }

    /// Dispatch all pending events
    /// Processes immediate queue first, then due deferred events
    pub fn dispatch(&mut self) {
        let immediate = std::mem::take(&mut self.immediate_queue);
        for event in immediate {
            self.dispatch_event(&event);
        }

        let mut i = 0;
        while i < self.deferred_queue.len() {
            if self.deferred_queue[i].0 <= self.current_time {
                let (_, event) = self.deferred_queue.remove(i);
                self.dispatch_event(&event);
            } else {
                i += 1;
            }
        }
    }

    /// Dispatch single event to registered handlers
    /// Stops on first handler that returns true (consumed)
    fn dispatch_event(&mut self, event: &Event) {
        if let Some(handlers) = self.handlers.get_mut(&event.event_type) {
            for handler in handlers.iter_mut() {
                if handler.on_event(event) {
                    break;
                }
            }
        }
    }

    /// Clear all queued events (useful for state transitions)
    pub fn clear(&mut self) {
        self.immediate_queue.clear();
        self.deferred_queue.clear();
    }
}

impl Default for EventSystem {
    fn default() -> Self {
        Self::new()
    }
}
