//! Table state: players, seating, zones, catalog and RNG.
//!
//! `GameState` is plain data owned by exactly one `GameLogic`. It has no
//! interior mutability and never crosses table boundaries, so no locking is
//! needed: all mutation happens on the table's own logic thread.

use std::sync::Arc;

use im::Vector;

use super::player::{Controller, Player, PlayerId};
use super::rng::GameRng;
use crate::cards::{Card, CardId, CardRegistry};
use crate::zones::{AreaType, ZoneKey, ZoneManager};

/// Complete authoritative state of one table.
#[derive(Clone, Debug)]
pub struct GameState {
    /// Players in creation order.
    players: Vec<Player>,

    /// Zone manager for card locations.
    pub zones: ZoneManager,

    /// Catalog shared with observers.
    cards: Arc<CardRegistry>,

    /// Deterministic RNG.
    pub rng: GameRng,

    /// Completed rounds.
    pub round: u32,

    /// Whose turn it is.
    pub current: Option<PlayerId>,

    next_player_id: u32,
}

impl GameState {
    /// Create an empty table over a catalog.
    #[must_use]
    pub fn new(cards: Arc<CardRegistry>, seed: u64) -> Self {
        Self {
            players: Vec::new(),
            zones: ZoneManager::new(),
            cards,
            rng: GameRng::new(seed),
            round: 0,
            current: None,
            next_player_id: 1,
        }
    }

    // === Players ===

    /// Add a player and return its id. Seats are not arranged yet.
    pub fn add_player(&mut self, controller: Controller) -> PlayerId {
        let id = PlayerId::new(self.next_player_id);
        self.next_player_id += 1;
        self.players.push(Player::new(id, controller));
        id
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id() == id)
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_alive(&self, id: PlayerId) -> bool {
        self.player(id).is_some_and(|p| p.alive)
    }

    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.players.iter().filter(|p| p.alive).count()
    }

    // === Seating ===

    /// Seat players in the given order: seats 1..=N and a circular `next`
    /// chain. Players missing from `order` keep no seat and no link.
    pub fn arrange_seats(&mut self, order: &[PlayerId]) {
        for player in &mut self.players {
            player.seat = 0;
            player.next = None;
        }
        for (index, &id) in order.iter().enumerate() {
            let next = order[(index + 1) % order.len()];
            if let Some(player) = self.player_mut(id) {
                player.seat = index as u32 + 1;
                player.next = Some(next);
            }
        }
    }

    /// Seated players by seat number.
    #[must_use]
    pub fn seat_order(&self) -> Vec<PlayerId> {
        let mut seated: Vec<_> = self.players.iter().filter(|p| p.seat > 0).collect();
        seated.sort_by_key(|p| p.seat);
        seated.into_iter().map(Player::id).collect()
    }

    /// Next living player after `from` in turn order.
    #[must_use]
    pub fn next_alive(&self, from: PlayerId) -> Option<PlayerId> {
        let mut cursor = self.player(from)?.next?;
        for _ in 0..self.players.len() {
            if self.is_alive(cursor) {
                return Some(cursor);
            }
            cursor = self.player(cursor)?.next?;
        }
        None
    }

    /// Distance from `actor` to `other` walking forward through seats.
    /// `actor` itself is the furthest (a full lap).
    fn action_distance(&self, actor_seat: u32, other: PlayerId) -> u32 {
        let n = self.seat_order().len() as u32;
        let seat = self.player(other).map_or(0, |p| p.seat);
        if n == 0 || seat == 0 {
            return u32::MAX;
        }
        (seat + n - actor_seat - 1) % n
    }

    /// Sort players by turn order starting right after `actor`.
    pub fn sort_by_action_order(&self, actor: PlayerId, players: &mut [PlayerId]) {
        let Some(actor_seat) = self.player(actor).map(|p| p.seat) else {
            return;
        };
        if actor_seat == 0 {
            return;
        }
        players.sort_by_key(|&p| self.action_distance(actor_seat, p));
    }

    /// Every other living player, in action order from `actor`.
    #[must_use]
    pub fn other_players(&self, actor: PlayerId) -> Vec<PlayerId> {
        let mut others: Vec<_> = self
            .players
            .iter()
            .filter(|p| p.alive && p.id() != actor)
            .map(Player::id)
            .collect();
        self.sort_by_action_order(actor, &mut others);
        others
    }

    // === Cards ===

    #[must_use]
    pub fn cards(&self) -> &Arc<CardRegistry> {
        &self.cards
    }

    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id)
    }

    /// Cards in one of a player's zones.
    #[must_use]
    pub fn player_cards(&self, player: PlayerId, area_type: AreaType) -> Vector<CardId> {
        self.zones.cards(&ZoneKey::owned(area_type, player))
    }

    /// Cards in a table-wide zone.
    #[must_use]
    pub fn table_cards(&self, area_type: AreaType) -> Vector<CardId> {
        self.zones.cards(&ZoneKey::table(area_type))
    }
}
