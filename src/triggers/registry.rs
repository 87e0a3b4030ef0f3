//! Trigger registry.
//!
//! The registry stores handlers indexed by event kind and produces the
//! invocation order for one dispatch. The dispatcher itself lives on
//! `GameLogic`, which clones the ordered handlers out before calling them so
//! that handlers may register, unregister or fire events re-entrantly.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::event::{EventData, EventType};
use crate::core::PlayerId;
use crate::error::EngineResult;
use crate::rules::GameLogic;

/// Unique identifier for a registered handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TriggerId(pub u32);

impl TriggerId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TriggerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Trigger({})", self.0)
    }
}

/// A rule or skill that reacts to events.
pub trait TriggerHandler: Send + Sync {
    /// Name for logs.
    fn name(&self) -> &str;

    /// Event kinds this handler listens to.
    fn events(&self) -> &[EventType];

    /// Player whose skill this is. `None` for global rules.
    fn owner(&self) -> Option<PlayerId> {
        None
    }

    /// Higher priority runs first within the same owner group.
    fn priority(&self) -> i32 {
        0
    }

    /// React to an event. Returning `true` consumes it: no further handler
    /// runs for this dispatch and the dispatcher reports it as handled.
    fn on_event(
        &self,
        logic: &mut GameLogic,
        event: EventType,
        player: Option<PlayerId>,
        data: &mut EventData<'_>,
    ) -> EngineResult<bool>;
}

#[derive(Clone)]
struct Entry {
    id: TriggerId,
    handler: Arc<dyn TriggerHandler>,
}

/// Handlers indexed by event kind.
#[derive(Clone, Default)]
pub struct TriggerRegistry {
    by_event: FxHashMap<EventType, Vec<Entry>>,
    next_id: u32,
}

impl TriggerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for every event it lists.
    pub fn register(&mut self, handler: Arc<dyn TriggerHandler>) -> TriggerId {
        self.next_id += 1;
        let id = TriggerId::new(self.next_id);
        for &event in handler.events() {
            self.by_event.entry(event).or_default().push(Entry {
                id,
                handler: Arc::clone(&handler),
            });
        }
        id
    }

    /// Remove a handler. Returns `false` if it was not registered.
    pub fn unregister(&mut self, id: TriggerId) -> bool {
        let mut found = false;
        for entries in self.by_event.values_mut() {
            let before = entries.len();
            entries.retain(|e| e.id != id);
            found |= entries.len() != before;
        }
        found
    }

    /// Remove every handler owned by `player`.
    pub fn unregister_owner(&mut self, player: PlayerId) {
        for entries in self.by_event.values_mut() {
            entries.retain(|e| e.handler.owner() != Some(player));
        }
    }

    /// Handlers for `event` in invocation order.
    ///
    /// `turn_order` lists players starting with the context player and then
    /// forward through seats. Owned handlers run grouped by their owner's
    /// position in that list; owners not listed follow, then global
    /// handlers. Inside a group, higher priority first, then registration
    /// order.
    #[must_use]
    pub fn ordered(&self, event: EventType, turn_order: &[PlayerId]) -> Vec<Arc<dyn TriggerHandler>> {
        let Some(entries) = self.by_event.get(&event) else {
            return Vec::new();
        };

        let group = |handler: &dyn TriggerHandler| match handler.owner() {
            Some(owner) => turn_order
                .iter()
                .position(|&p| p == owner)
                .unwrap_or(turn_order.len()),
            None => turn_order.len() + 1,
        };

        let mut ordered: Vec<&Entry> = entries.iter().collect();
        ordered.sort_by_key(|e| (group(e.handler.as_ref()), -i64::from(e.handler.priority()), e.id));
        ordered.into_iter().map(|e| Arc::clone(&e.handler)).collect()
    }

    /// Number of distinct registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        let mut ids: Vec<_> = self.by_event.values().flatten().map(|e| e.id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_event.values().all(Vec::is_empty)
    }

    pub fn clear(&mut self) {
        self.by_event.clear();
    }
}

impl std::fmt::Debug for TriggerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriggerRegistry")
            .field("handlers", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named {
        name: &'static str,
        owner: Option<PlayerId>,
        priority: i32,
    }

    impl TriggerHandler for Named {
        fn name(&self) -> &str {
            self.name
        }

        fn events(&self) -> &[EventType] {
            &[EventType::PhaseStart]
        }

        fn owner(&self) -> Option<PlayerId> {
            self.owner
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn on_event(
            &self,
            _logic: &mut GameLogic,
            _event: EventType,
            _player: Option<PlayerId>,
            _data: &mut EventData<'_>,
        ) -> EngineResult<bool> {
            Ok(false)
        }
    }

    fn named(name: &'static str, owner: Option<u32>, priority: i32) -> Arc<dyn TriggerHandler> {
        Arc::new(Named {
            name,
            owner: owner.map(PlayerId::new),
            priority,
        })
    }

    fn names(handlers: &[Arc<dyn TriggerHandler>]) -> Vec<&str> {
        handlers.iter().map(|h| h.name()).collect()
    }

    #[test]
    fn test_context_player_first_then_turn_order_then_global() {
        let mut registry = TriggerRegistry::new();
        registry.register(named("global", None, 100));
        registry.register(named("p1", Some(1), 0));
        registry.register(named("p3", Some(3), 0));
        registry.register(named("p2", Some(2), 0));

        let order = [PlayerId::new(2), PlayerId::new(3), PlayerId::new(1)];
        let handlers = registry.ordered(EventType::PhaseStart, &order);

        assert_eq!(names(&handlers), vec!["p2", "p3", "p1", "global"]);
    }

    #[test]
    fn test_priority_then_registration_order() {
        let mut registry = TriggerRegistry::new();
        registry.register(named("low", Some(1), 0));
        registry.register(named("high", Some(1), 5));
        registry.register(named("low-late", Some(1), 0));

        let handlers = registry.ordered(EventType::PhaseStart, &[PlayerId::new(1)]);
        assert_eq!(names(&handlers), vec!["high", "low", "low-late"]);
    }

    #[test]
    fn test_unregister() {
        let mut registry = TriggerRegistry::new();
        let id = registry.register(named("a", None, 0));
        registry.register(named("b", Some(4), 0));

        assert_eq!(registry.len(), 2);
        assert!(registry.unregister(id));
        assert!(!registry.unregister(id));

        registry.unregister_owner(PlayerId::new(4));
        assert!(registry.is_empty());
        assert!(registry.ordered(EventType::PhaseStart, &[]).is_empty());
    }
}
