//! Player actor operations: what the table does on behalf of one seat.
//!
//! Decisions come from the seat's agent through the room. Whatever comes
//! back is untrusted: intents are checked against the player's actual hand
//! and the card's targeting rules before they become a `CardUseStruct`.

use log::{info, warn};

use crate::core::{PlayerId, PropertyValue};
use crate::effects;
use crate::error::{EngineResult, RuleViolation};
use crate::protocol::{Command, Reply, UseCardIntent};
use crate::rules::GameLogic;
use crate::triggers::{CardUseStruct, CardsMoveStruct, UseReason};
use crate::zones::{Area, AreaType, Direction, ZoneKey};

impl GameLogic {
    // === Properties ===

    fn property_command(&self, player: PlayerId, name: &str) -> Option<Command> {
        let value = self.state.player(player)?.property(name);
        if value.is_none() {
            warn!("{} has no property '{}'", player, name);
        }
        Some(Command::UpdatePlayerProperty {
            player,
            name: name.to_string(),
            value: value?,
        })
    }

    /// Announce a player's property to every observer.
    pub fn broadcast_property(&mut self, player: PlayerId, name: &str) {
        if let Some(command) = self.property_command(player, name) {
            self.room.broadcast(&command);
        }
    }

    /// Announce `value` for a property to everyone except `except`.
    pub fn broadcast_property_except(
        &mut self,
        player: PlayerId,
        name: &str,
        value: PropertyValue,
        except: PlayerId,
    ) {
        let command = Command::UpdatePlayerProperty {
            player,
            name: name.to_string(),
            value,
        };
        self.room.broadcast_except(&command, Some(except));
    }

    /// Send a player's property to one observer only.
    pub fn notify_property_to(&mut self, player: PlayerId, name: &str, receiver: PlayerId) {
        if let Some(command) = self.property_command(player, name) {
            self.room.notify(receiver, &command);
        }
    }

    // === Usage history ===

    /// Count a use of `name`. Only the player is told.
    pub fn add_card_history(&mut self, player: PlayerId, name: &str, times: u32) {
        let Some(record) = self.state.player_mut(player) else {
            return;
        };
        record.add_card_history(name, times);
        self.room
            .notify(player, &Command::AddCardHistory(Some((name.to_string(), times))));
    }

    /// Reset every usage counter. Only the player is told.
    pub fn clear_card_history(&mut self, player: PlayerId) {
        let Some(record) = self.state.player_mut(player) else {
            return;
        };
        record.clear_card_history();
        self.room.notify(player, &Command::AddCardHistory(None));
    }

    // === Cards ===

    /// Draw `n` cards from the top of the draw pile into the hand.
    ///
    /// A short pile is refilled from the shuffled discard pile first. Only
    /// the drawing player sees which cards were drawn.
    pub fn draw_cards(&mut self, player: PlayerId, n: usize) -> EngineResult<()> {
        if n == 0 {
            return Ok(());
        }
        let pile = ZoneKey::table(AreaType::DrawPile);
        if self.state.zones.len(&pile) < n {
            self.refill_draw_pile()?;
        }

        let cards = self.state.zones.first(&pile, n);
        if cards.len() < n {
            warn!("draw pile exhausted: {} wanted {}, got {}", player, n, cards.len());
        }
        if cards.is_empty() {
            return Ok(());
        }
        let mv = CardsMoveStruct::new(cards, Area::owned(AreaType::Hand, player))
            .with_from(Area::new(AreaType::DrawPile).with_direction(Direction::Top));
        self.move_card(mv)
    }

    fn refill_draw_pile(&mut self) -> EngineResult<()> {
        let discarded: Vec<_> = self.discard_pile().into_iter().collect();
        if discarded.is_empty() {
            return Ok(());
        }
        info!("reshuffling {} discarded cards into the draw pile", discarded.len());
        let mv = CardsMoveStruct::new(discarded, Area::new(AreaType::DrawPile).with_direction(Direction::Bottom))
            .with_from(Area::new(AreaType::DiscardPile));
        self.move_card(mv)?;

        let state = &mut self.state;
        state.zones.shuffle(&ZoneKey::table(AreaType::DrawPile), &mut state.rng);
        Ok(())
    }

    // === Decisions ===

    /// Ask `player` what to use. Timeouts, disconnects and seats without an
    /// agent yield the empty intent.
    pub fn request_card_use(&mut self, player: PlayerId) -> EngineResult<UseCardIntent> {
        let timeout = self.config.request_timeout;
        match self.room.request(player, &Command::UseCard, timeout)? {
            Some(Reply::UseCard(intent)) => Ok(intent),
            Some(other) => {
                warn!("{} answered a card request with {:?}", player, other);
                Ok(UseCardIntent::pass())
            }
            None => Ok(UseCardIntent::pass()),
        }
    }

    /// Ask `player` for a card use and validate it. `None` means pass;
    /// rejected intents are logged and treated as a pass.
    pub fn activate(&mut self, player: PlayerId) -> EngineResult<Option<CardUseStruct>> {
        let intent = self.request_card_use(player)?;
        if intent.is_pass() {
            return Ok(None);
        }
        match self.validate_intent(player, &intent) {
            Ok(card_use) => Ok(Some(card_use)),
            Err(violation) => {
                warn!("rejected intent from {}: {}", player, violation);
                Ok(None)
            }
        }
    }

    /// Turn an untrusted intent into a use, or explain why it is illegal.
    pub fn validate_intent(
        &self,
        player: PlayerId,
        intent: &UseCardIntent,
    ) -> Result<CardUseStruct, RuleViolation> {
        if !self.state.is_alive(player) {
            return Err(RuleViolation::UnknownPlayer(player));
        }
        let card = self
            .state
            .card(intent.card)
            .ok_or(RuleViolation::UnknownCard(intent.card))?;
        let hand = ZoneKey::owned(AreaType::Hand, player);
        if !self.state.zones.contains(&hand, intent.card) {
            return Err(RuleViolation::CardNotOwned {
                card: intent.card,
                player,
            });
        }

        let mut selected = Vec::with_capacity(intent.targets.len());
        for &target in &intent.targets {
            let seated = self.state.player(target).is_some_and(|p| p.seat > 0);
            if !seated {
                return Err(RuleViolation::UnknownPlayer(target));
            }
            if !self.state.is_alive(target) || !effects::target_filter(card, &selected, target, player) {
                return Err(RuleViolation::IllegalTarget(target));
            }
            selected.push(target);
        }
        if !effects::target_feasible(card, &selected, player) {
            return Err(RuleViolation::InfeasibleTargets);
        }
        if let Some(script) = self.cards().script(card.name()) {
            if !script.is_available(self, player) {
                return Err(RuleViolation::Unavailable);
            }
        }

        Ok(CardUseStruct::new(player, card.clone())
            .with_targets(selected)
            .with_reason(UseReason::Play))
    }

    /// Offer `candidates` to `player` and return the pick.
    ///
    /// No answer, or an answer outside the offer, picks the first
    /// candidate.
    pub fn choose_general(&mut self, player: PlayerId, candidates: Vec<String>) -> EngineResult<Option<String>> {
        let Some(first) = candidates.first().cloned() else {
            return Ok(None);
        };
        let command = Command::ChooseGeneral {
            candidates: candidates.clone(),
            banned_pairs: Vec::new(),
        };
        let timeout = self.config.request_timeout;
        let picked = match self.room.request(player, &command, timeout)? {
            Some(Reply::ChooseGeneral(name)) if candidates.contains(&name) => name,
            Some(reply) => {
                warn!("{} made an invalid general choice {:?}", player, reply);
                first
            }
            None => first,
        };
        Ok(Some(picked))
    }
}
