//! Zone manager for card locations.
//!
//! The `ZoneManager` is the single source of truth for where every concrete
//! card is. It keeps two indexes in step:
//! - per-zone card lists (front = top for ordered zones)
//! - per-card location
//!
//! A card id is in at most one zone at a time. Only the move pipeline in
//! `rules` mutates it during play.

use im::Vector;
use log::warn;
use rustc_hash::FxHashMap;

use super::area::{Direction, ZoneKey};
use crate::cards::CardId;
use crate::core::rng::GameRng;

/// Tracks card membership across zones.
///
/// ## Usage
///
/// ```
/// use kingdoms_engine::cards::CardId;
/// use kingdoms_engine::zones::{AreaType, Direction, ZoneKey, ZoneManager};
///
/// let mut zones = ZoneManager::new();
/// let pile = ZoneKey::table(AreaType::DrawPile);
///
/// zones.insert(CardId::new(1), &pile, Direction::Bottom);
/// zones.insert(CardId::new(2), &pile, Direction::Top);
///
/// assert_eq!(zones.first(&pile, 1), vec![CardId::new(2)]);
/// assert_eq!(zones.location(CardId::new(1)), Some(&pile));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ZoneManager {
    /// Card lists by zone. Front is the top.
    zones: FxHashMap<ZoneKey, Vector<CardId>>,

    /// Card locations: card -> zone
    locations: FxHashMap<CardId, ZoneKey>,
}

impl ZoneManager {
    /// Create an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a card into a zone.
    ///
    /// A card that is already located somewhere is taken out of its old zone
    /// first, so exclusivity holds even for careless callers. Returns the
    /// zone it was taken from.
    pub fn insert(&mut self, card: CardId, zone: &ZoneKey, direction: Direction) -> Option<ZoneKey> {
        let previous = self.remove(card);
        if let Some(ref old) = previous {
            warn!("{card} was still in {old} when inserted into {zone}");
        }

        let list = self.zones.entry(zone.clone()).or_default();
        match direction {
            Direction::Top => list.push_front(card),
            Direction::Bottom | Direction::Undefined => list.push_back(card),
        }
        self.locations.insert(card, zone.clone());
        previous
    }

    /// Remove a card from a specific zone.
    ///
    /// Returns `false` (and leaves everything untouched) if the card is not
    /// in that zone.
    pub fn remove_from(&mut self, card: CardId, zone: &ZoneKey) -> bool {
        if self.locations.get(&card) != Some(zone) {
            return false;
        }
        self.remove(card).is_some()
    }

    /// Remove a card from whatever zone holds it.
    pub fn remove(&mut self, card: CardId) -> Option<ZoneKey> {
        let zone = self.locations.remove(&card)?;
        if let Some(list) = self.zones.get_mut(&zone) {
            if let Some(index) = list.index_of(&card) {
                list.remove(index);
            }
        }
        Some(zone)
    }

    /// Get the zone a card is in.
    #[must_use]
    pub fn location(&self, card: CardId) -> Option<&ZoneKey> {
        self.locations.get(&card)
    }

    /// Check if a card is in a specific zone.
    #[must_use]
    pub fn contains(&self, zone: &ZoneKey, card: CardId) -> bool {
        self.locations.get(&card) == Some(zone)
    }

    /// Snapshot of a zone's cards, top first.
    #[must_use]
    pub fn cards(&self, zone: &ZoneKey) -> Vector<CardId> {
        self.zones.get(zone).cloned().unwrap_or_default()
    }

    /// The first `n` cards from the top of a zone.
    #[must_use]
    pub fn first(&self, zone: &ZoneKey, n: usize) -> Vec<CardId> {
        self.zones
            .get(zone)
            .map(|list| list.iter().take(n).copied().collect())
            .unwrap_or_default()
    }

    /// Number of cards in a zone.
    #[must_use]
    pub fn len(&self, zone: &ZoneKey) -> usize {
        self.zones.get(zone).map_or(0, Vector::len)
    }

    /// Check whether a zone is empty.
    #[must_use]
    pub fn is_empty(&self, zone: &ZoneKey) -> bool {
        self.len(zone) == 0
    }

    /// Shuffle a zone in place.
    pub fn shuffle(&mut self, zone: &ZoneKey, rng: &mut GameRng) {
        if let Some(list) = self.zones.get_mut(zone) {
            let mut cards: Vec<_> = list.iter().copied().collect();
            rng.shuffle(&mut cards);
            *list = cards.into_iter().collect();
        }
    }

    /// Total number of located cards.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.locations.len()
    }

    /// Iterate over every located card and its zone.
    pub fn iter(&self) -> impl Iterator<Item = (CardId, &ZoneKey)> {
        self.locations.iter().map(|(&card, zone)| (card, zone))
    }

    /// Forget every card (table restart).
    pub fn clear(&mut self) {
        self.zones.clear();
        self.locations.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;
    use crate::zones::AreaType;

    fn pile() -> ZoneKey {
        ZoneKey::table(AreaType::DrawPile)
    }

    #[test]
    fn test_insert_and_locate() {
        let mut zones = ZoneManager::new();
        let hand = ZoneKey::owned(AreaType::Hand, PlayerId::new(1));

        zones.insert(CardId::new(10), &hand, Direction::Undefined);
        zones.insert(CardId::new(11), &hand, Direction::Undefined);

        assert_eq!(zones.location(CardId::new(10)), Some(&hand));
        assert!(zones.contains(&hand, CardId::new(11)));
        assert_eq!(zones.location(CardId::new(99)), None);
        assert_eq!(zones.len(&hand), 2);
    }

    #[test]
    fn test_ordered_insertion() {
        let mut zones = ZoneManager::new();
        let pile = pile();

        zones.insert(CardId::new(1), &pile, Direction::Top);
        zones.insert(CardId::new(2), &pile, Direction::Bottom);
        zones.insert(CardId::new(3), &pile, Direction::Top);

        let order: Vec<_> = zones.cards(&pile).into_iter().collect();
        assert_eq!(order, vec![CardId::new(3), CardId::new(1), CardId::new(2)]);
        assert_eq!(zones.first(&pile, 2), vec![CardId::new(3), CardId::new(1)]);
        assert_eq!(zones.first(&pile, 10).len(), 3);
    }

    #[test]
    fn test_reinsert_keeps_exclusivity() {
        let mut zones = ZoneManager::new();
        let table = ZoneKey::table(AreaType::Table);
        let discard = ZoneKey::table(AreaType::DiscardPile);

        zones.insert(CardId::new(5), &table, Direction::Undefined);
        let previous = zones.insert(CardId::new(5), &discard, Direction::Undefined);

        assert_eq!(previous, Some(table.clone()));
        assert!(zones.is_empty(&table));
        assert_eq!(zones.len(&discard), 1);
        assert_eq!(zones.total_cards(), 1);
    }

    #[test]
    fn test_remove_from_wrong_zone() {
        let mut zones = ZoneManager::new();
        let table = ZoneKey::table(AreaType::Table);
        zones.insert(CardId::new(5), &table, Direction::Undefined);

        assert!(!zones.remove_from(CardId::new(5), &pile()));
        assert!(zones.contains(&table, CardId::new(5)));

        assert!(zones.remove_from(CardId::new(5), &table));
        assert_eq!(zones.location(CardId::new(5)), None);
    }

    #[test]
    fn test_shuffle() {
        let mut zones = ZoneManager::new();
        let pile = pile();
        for i in 1..=20 {
            zones.insert(CardId::new(i), &pile, Direction::Bottom);
        }

        let before = zones.cards(&pile);
        let mut rng = GameRng::new(42);
        zones.shuffle(&pile, &mut rng);
        let after = zones.cards(&pile);

        assert_eq!(before.len(), after.len());
        assert_ne!(before, after);
        for card in before {
            assert!(zones.contains(&pile, card));
        }
    }
}
