//! The table's rule engine.
//!
//! `GameLogic` owns everything one table needs: state, configuration,
//! trigger handlers and the room of remote agents. It is driven by exactly
//! one thread; every pipeline (moves, card use, damage, phases) is a method
//! on it and every event goes through [`GameLogic::trigger`].

use std::sync::Arc;

use im::Vector;
use log::{debug, trace};

use super::game_rule::GameRule;
use crate::cards::{Card, CardId, CardRegistry};
use crate::core::{Controller, GameState, PlayerId, RoomConfig};
use crate::error::EngineResult;
use crate::server::{Agent, Room, RoomHandle};
use crate::triggers::{EventData, EventType, TriggerHandler, TriggerId, TriggerRegistry};
use crate::zones::AreaType;

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// One player left standing.
    Winner(PlayerId),
    /// The round cap was reached with several players alive, or nobody
    /// survived.
    Draw,
    /// The table was abandoned before the game ended.
    Abandoned,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

/// Authoritative engine for one table.
///
/// ## Example
///
/// ```
/// use kingdoms_engine::cards::{Card, CardRegistry, Suit};
/// use kingdoms_engine::core::{Controller, RoomConfig};
/// use kingdoms_engine::rules::{GameLogic, GameResult};
///
/// let mut cards = CardRegistry::new();
/// for number in 1..=13 {
///     cards.register(Card::basic("jink", Suit::Heart, number));
/// }
///
/// let config = RoomConfig::new().with_max_rounds(2).with_seed(7);
/// let mut logic = GameLogic::new(config, cards);
/// logic.add_player(Controller::Robot(1));
/// logic.add_player(Controller::Robot(2));
///
/// // Robots without agents always pass, so nobody gets hurt.
/// assert_eq!(logic.run().unwrap(), GameResult::Draw);
/// ```
pub struct GameLogic {
    pub(crate) state: GameState,
    pub(crate) config: RoomConfig,
    pub(crate) triggers: TriggerRegistry,
    pub(crate) room: Room,
}

impl GameLogic {
    /// Create a table over a catalog. The default game rule is installed.
    #[must_use]
    pub fn new(config: RoomConfig, cards: CardRegistry) -> Self {
        let mut triggers = TriggerRegistry::new();
        triggers.register(Arc::new(GameRule));
        Self {
            state: GameState::new(Arc::new(cards), config.seed),
            config,
            triggers,
            room: Room::new(),
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for setup and tests. Zone membership should
    /// still change only through `move_cards`.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[must_use]
    pub fn config(&self) -> &RoomConfig {
        &self.config
    }

    #[must_use]
    pub fn room(&self) -> &Room {
        &self.room
    }

    /// Handle that can abandon this table from another thread.
    #[must_use]
    pub fn room_handle(&self) -> RoomHandle {
        self.room.handle()
    }

    #[must_use]
    pub fn cards(&self) -> &Arc<CardRegistry> {
        self.state.cards()
    }

    /// A catalog card by id.
    #[must_use]
    pub fn find_card(&self, id: CardId) -> Option<Card> {
        self.state.card(id).cloned()
    }

    // === Players ===

    /// Add a player driven by `controller`. Seats are arranged at start.
    pub fn add_player(&mut self, controller: Controller) -> PlayerId {
        self.state.add_player(controller)
    }

    /// Add a player with a remote agent behind it.
    pub fn add_player_with_agent(&mut self, controller: Controller, agent: Box<dyn Agent>) -> PlayerId {
        let id = self.state.add_player(controller);
        self.room.attach(id, agent);
        id
    }

    /// Attach or replace the agent behind an existing player.
    pub fn attach_agent(&mut self, player: PlayerId, agent: Box<dyn Agent>) {
        self.room.attach(player, agent);
    }

    /// Detach the agent behind `player`; the seat keeps playing as a robot.
    pub fn detach_agent(&mut self, player: PlayerId) -> Option<Box<dyn Agent>> {
        self.room.detach(player)
    }

    /// Every other living player, in action order from `actor`.
    #[must_use]
    pub fn other_players(&self, actor: PlayerId) -> Vec<PlayerId> {
        self.state.other_players(actor)
    }

    /// Sort players by turn order starting right after `actor`.
    pub fn sort_by_action_order(&self, actor: PlayerId, players: &mut [PlayerId]) {
        self.state.sort_by_action_order(actor, players);
    }

    // === Shared zones ===

    #[must_use]
    pub fn draw_pile(&self) -> Vector<CardId> {
        self.state.table_cards(AreaType::DrawPile)
    }

    #[must_use]
    pub fn discard_pile(&self) -> Vector<CardId> {
        self.state.table_cards(AreaType::DiscardPile)
    }

    /// Cards on the shared table surface.
    #[must_use]
    pub fn table(&self) -> Vector<CardId> {
        self.state.table_cards(AreaType::Table)
    }

    // === Triggers ===

    /// Register a rule or skill.
    pub fn register_trigger(&mut self, handler: Arc<dyn TriggerHandler>) -> TriggerId {
        self.triggers.register(handler)
    }

    pub fn unregister_trigger(&mut self, id: TriggerId) -> bool {
        self.triggers.unregister(id)
    }

    /// Dispatch `event` with `player` as context.
    ///
    /// Handlers run in order: those owned by the context player, then
    /// owners forward through turn order, then global rules. Handlers of
    /// dead owners are skipped except for `Died`. The first handler that
    /// returns `true` consumes the event and ends the dispatch.
    ///
    /// Nested dispatches from inside a handler run to completion before the
    /// outer dispatch continues. An abandoned table fails with
    /// `GameFinished` before any handler runs.
    pub fn trigger(
        &mut self,
        event: EventType,
        player: Option<PlayerId>,
        data: &mut EventData<'_>,
    ) -> EngineResult<bool> {
        self.room.ensure_active()?;

        let turn_order = self.dispatch_order(player);
        let handlers = self.triggers.ordered(event, &turn_order);
        for handler in handlers {
            if let Some(owner) = handler.owner() {
                if event != EventType::Died && !self.state.is_alive(owner) {
                    continue;
                }
            }
            trace!("{:?} -> {}", event, handler.name());
            if handler.on_event(self, event, player, data)? {
                debug!("{:?} consumed by {}", event, handler.name());
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Seats starting from the context player (or the current player).
    fn dispatch_order(&self, context: Option<PlayerId>) -> Vec<PlayerId> {
        let mut seats = self.state.seat_order();
        if let Some(start) = context.or(self.state.current) {
            if let Some(index) = seats.iter().position(|&p| p == start) {
                seats.rotate_left(index);
            }
        }
        seats
    }
}

impl std::fmt::Debug for GameLogic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameLogic")
            .field("players", &self.state.player_count())
            .field("round", &self.state.round)
            .field("triggers", &self.triggers)
            .field("room", &self.room)
            .finish()
    }
}
