//! Game lifecycle: setup and the round loop.

use log::info;

use super::engine::{GameLogic, GameResult};
use crate::core::PlayerId;
use crate::error::{EngineError, EngineResult};
use crate::protocol::{Command, SeatInfo};
use crate::triggers::{EventData, EventType};
use crate::zones::{AreaType, Direction, ZoneKey};

impl GameLogic {
    /// Play a whole game.
    ///
    /// Turns go round the table over living players until one is left or
    /// `max_rounds` full rounds have been played. An abandoned table ends
    /// the game with `GameResult::Abandoned`; this is the only place the
    /// `GameFinished` unwind is caught.
    pub fn run(&mut self) -> EngineResult<GameResult> {
        info!("table starting with {} players", self.state.player_count());
        match self.run_game() {
            Err(EngineError::GameFinished) => {
                info!("table abandoned after {} rounds", self.state.round);
                Ok(GameResult::Abandoned)
            }
            Ok(result) => {
                info!("table finished after {} rounds: {:?}", self.state.round, result);
                Ok(result)
            }
            Err(e) => Err(e),
        }
    }

    fn run_game(&mut self) -> EngineResult<GameResult> {
        self.start_game()?;
        let Some(&first) = self.state.seat_order().first() else {
            return Ok(self.result());
        };
        let mut current = first;
        if !self.state.is_alive(current) {
            match self.state.next_alive(current) {
                Some(next) => current = next,
                None => return Ok(self.result()),
            }
        }

        loop {
            if self.state.alive_count() <= 1 {
                return Ok(self.result());
            }
            self.take_turn(current)?;

            let Some(next) = self.state.next_alive(current) else {
                return Ok(self.result());
            };
            // Passing back over the first seat completes a round.
            if self.seat_of(next) <= self.seat_of(current) {
                self.state.round += 1;
                if self.config.max_rounds.is_some_and(|max| self.state.round >= max) {
                    return Ok(self.result());
                }
            }
            current = next;
        }
    }

    fn seat_of(&self, player: PlayerId) -> u32 {
        self.state.player(player).map_or(0, |p| p.seat)
    }

    fn result(&self) -> GameResult {
        let alive: Vec<_> = self.state.players().iter().filter(|p| p.alive).collect();
        match alive.as_slice() {
            [winner] => GameResult::Winner(winner.id()),
            _ => GameResult::Draw,
        }
    }

    /// Seat players, load the draw pile, pick generals and deal.
    pub fn start_game(&mut self) -> EngineResult<()> {
        let mut order: Vec<_> = self.state.players().iter().map(|p| p.id()).collect();
        self.state.rng.shuffle(&mut order);
        self.arrange_seats(&order);
        self.prepare_cards();

        let max_hp = self.config.max_hp;
        for &player in &order {
            if let Some(record) = self.state.player_mut(player) {
                record.max_hp = max_hp;
                record.hp = max_hp;
            }
            self.broadcast_property(player, "max_hp");
            self.broadcast_property(player, "hp");
        }

        self.choose_generals(&order)?;

        let hand_size = self.config.initial_hand_size;
        for &player in &order {
            self.draw_cards(player, hand_size)?;
        }
        self.trigger(EventType::GameStart, None, &mut EventData::None)?;
        Ok(())
    }

    /// Seat players in `order` and announce it.
    pub fn arrange_seats(&mut self, order: &[PlayerId]) {
        self.state.arrange_seats(order);
        let seats = order
            .iter()
            .filter_map(|&id| self.state.player(id))
            .map(|p| SeatInfo {
                player: p.id(),
                controller: p.controller(),
            })
            .collect();
        self.room.broadcast(&Command::ArrangeSeat(seats));
    }

    /// Put the whole catalog into the shuffled draw pile and announce it.
    fn prepare_cards(&mut self) {
        let pile = ZoneKey::table(AreaType::DrawPile);
        let ids = self.state.cards().ids().to_vec();
        self.state.zones.clear();
        for &id in &ids {
            self.state.zones.insert(id, &pile, Direction::Bottom);
        }
        let state = &mut self.state;
        state.zones.shuffle(&pile, &mut state.rng);
        self.room.broadcast(&Command::PrepareCards(ids));
    }

    fn choose_generals(&mut self, order: &[PlayerId]) -> EngineResult<()> {
        let per_player = self.config.general_candidates;
        if per_player == 0 || self.config.general_pool.is_empty() {
            return Ok(());
        }

        let mut pool = self.config.general_pool.clone();
        self.state.rng.for_context("generals").shuffle(&mut pool);
        for (index, &player) in order.iter().enumerate() {
            let candidates: Vec<_> = pool
                .iter()
                .cycle()
                .skip(index * per_player)
                .take(per_player)
                .cloned()
                .collect();
            let general = self.choose_general(player, candidates)?;
            if let Some(record) = self.state.player_mut(player) {
                record.general = general;
            }
            self.broadcast_property(player, "general");
        }
        Ok(())
    }

    /// Play one turn for `player`.
    pub fn take_turn(&mut self, player: PlayerId) -> EngineResult<()> {
        self.state.current = Some(player);
        self.play(player)?;
        self.clear_card_history(player);
        Ok(())
    }
}
