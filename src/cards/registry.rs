//! Card catalog.
//!
//! The `CardRegistry` holds every concrete card of a session and the
//! scripts keyed by card name. Concrete cards receive sequential ids at
//! registration, starting at 1; cards without a real suit or with a rank
//! outside 1..=13 have no identity and are rejected.

use std::sync::Arc;

use log::warn;
use rustc_hash::FxHashMap;

use super::attributes::Suit;
use super::definition::{Card, CardId, MAX_NUMBER};
use super::script::CardScript;

/// Registry of concrete cards and card scripts.
///
/// ## Example
///
/// ```
/// use kingdoms_engine::cards::{Card, CardRegistry, Suit};
///
/// let mut registry = CardRegistry::new();
/// let id = registry.register(Card::basic("slash", Suit::Spade, 7));
///
/// assert_eq!(registry.get(id).unwrap().name(), "slash");
/// assert_eq!(registry.get(id).unwrap().id(), id);
/// ```
#[derive(Clone, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, Card>,
    /// Ids in registration order.
    order: Vec<CardId>,
    scripts: FxHashMap<String, Arc<dyn CardScript>>,
    next_id: u32,
}

impl CardRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a concrete card and assign its id.
    ///
    /// Returns `CardId::NONE` if the card cannot carry an identity.
    pub fn register(&mut self, mut card: Card) -> CardId {
        if card.suit() == Suit::NoSuit || !(1..=MAX_NUMBER).contains(&card.number()) {
            warn!("card '{}' has no suit or rank; not registered", card.name());
            return CardId::NONE;
        }

        self.next_id += 1;
        let id = CardId::new(self.next_id);
        card.set_id(id);
        self.cards.insert(id, card);
        self.order.push(id);
        id
    }

    /// Register the script for a card name, replacing any previous one.
    pub fn register_script(&mut self, name: impl Into<String>, script: Arc<dyn CardScript>) {
        self.scripts.insert(name.into(), script);
    }

    /// Get a card by id.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }

    /// Check if a card id is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Script for a card name.
    #[must_use]
    pub fn script(&self, name: &str) -> Option<Arc<dyn CardScript>> {
        self.scripts.get(name).cloned()
    }

    /// Number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// All ids in registration order.
    #[must_use]
    pub fn ids(&self) -> &[CardId] {
        &self.order
    }

    /// Iterate over cards in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.order.iter().filter_map(|id| self.cards.get(id))
    }
}

impl std::fmt::Debug for CardRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardRegistry")
            .field("cards", &self.cards.len())
            .field("scripts", &self.scripts.len())
            .finish()
    }
}
