//! Card movement.
//!
//! A batch of moves is applied in two sweeps: every listed card is removed
//! first, then every card is inserted. Observers get the whole batch as one
//! `MoveCards` command, with identities hidden where they may not see them.

use log::warn;

use super::engine::GameLogic;
use crate::cards::CardId;
use crate::error::EngineResult;
use crate::protocol::{Command, MoveDescriptor};
use crate::triggers::{CardsMoveStruct, EventData, EventType};
use crate::zones::{Area, AreaType, Direction, ZoneKey};

impl GameLogic {
    /// Apply a single move.
    pub fn move_card(&mut self, mv: CardsMoveStruct) -> EngineResult<()> {
        self.move_cards(vec![mv])
    }

    /// Apply a batch of moves.
    ///
    /// Fires `BeforeCardsMove` (handlers may rewrite the batch), relocates
    /// the cards, notifies observers, then fires `AfterCardsMove`.
    ///
    /// A card missing from its declared source is a desync: it is logged,
    /// taken from wherever it actually is, and still inserted at the
    /// destination. Moves to a zone that cannot be resolved, and card ids
    /// unknown to the catalog, are logged and skipped before anything
    /// changes.
    pub fn move_cards(&mut self, moves: Vec<CardsMoveStruct>) -> EngineResult<()> {
        let mut moves = self.resolve_moves(moves);
        if moves.is_empty() {
            return Ok(());
        }

        let context = self.state.current;
        self.trigger(EventType::BeforeCardsMove, context, &mut EventData::CardsMove(&mut moves))?;
        let mut moves = self.resolve_moves(moves);
        if moves.is_empty() {
            return Ok(());
        }

        for mv in &moves {
            for &card in &mv.cards {
                self.take_out(card, &mv.from);
            }
        }
        for mv in &moves {
            self.put_in(mv);
        }

        self.notify_moves(&moves);
        self.trigger(EventType::AfterCardsMove, context, &mut EventData::CardsMove(&mut moves))?;
        Ok(())
    }

    /// Validate a batch and fill in undeclared sources.
    ///
    /// A move without a declared source is split by the cards' actual
    /// locations, so every resulting move names where its cards come from.
    fn resolve_moves(&self, moves: Vec<CardsMoveStruct>) -> Vec<CardsMoveStruct> {
        let mut resolved = Vec::with_capacity(moves.len());
        for mut mv in moves {
            if mv.to.key().is_none() {
                warn!("dropping move of {} cards to unresolvable zone {:?}", mv.cards.len(), mv.to);
                continue;
            }
            mv.cards.retain(|&card| {
                let known = self.state.cards().contains(card);
                if !known {
                    warn!("dropping unknown {} from move", card);
                }
                known
            });
            if mv.cards.is_empty() {
                continue;
            }

            if mv.from.area_type == AreaType::Unknown {
                resolved.extend(self.split_by_source(mv));
            } else {
                resolved.push(mv);
            }
        }

        for mv in &mut resolved {
            mv.is_last_hand_card = self.empties_hand(mv);
        }
        resolved
    }

    fn split_by_source(&self, mv: CardsMoveStruct) -> Vec<CardsMoveStruct> {
        let mut groups: Vec<(Option<ZoneKey>, Vec<CardId>)> = Vec::new();
        for &card in &mv.cards {
            let location = self.state.zones.location(card).cloned();
            match groups.iter_mut().find(|(zone, _)| *zone == location) {
                Some((_, cards)) => cards.push(card),
                None => groups.push((location, vec![card])),
            }
        }

        groups
            .into_iter()
            .map(|(zone, cards)| CardsMoveStruct {
                from: zone.as_ref().map(Area::from).unwrap_or_default(),
                cards,
                ..mv.clone()
            })
            .collect()
    }

    fn empties_hand(&self, mv: &CardsMoveStruct) -> bool {
        if mv.from.area_type != AreaType::Hand {
            return false;
        }
        let Some(hand) = mv.from.key() else {
            return false;
        };
        let cards = self.state.zones.cards(&hand);
        !cards.is_empty() && cards.iter().all(|card| mv.cards.contains(card))
    }

    fn take_out(&mut self, card: CardId, from: &Area) {
        let declared = from.key();
        if let Some(zone) = &declared {
            if self.state.zones.remove_from(card, zone) {
                return;
            }
        }

        let actual = self.state.zones.remove(card);
        if let Some(zone) = declared {
            match actual {
                Some(actual) => warn!("{} expected in {} but was in {}", card, zone, actual),
                None => warn!("{} expected in {} but was in no zone", card, zone),
            }
        }
    }

    fn put_in(&mut self, mv: &CardsMoveStruct) {
        let Some(zone) = mv.to.key() else {
            return;
        };
        // Direction only means something where order is kept.
        let direction = if zone.area_type.is_ordered() {
            mv.to.direction
        } else {
            Direction::Undefined
        };
        if direction == Direction::Top {
            // Insert in reverse so the first listed card ends on top.
            for &card in mv.cards.iter().rev() {
                self.state.zones.insert(card, &zone, Direction::Top);
            }
        } else {
            for &card in &mv.cards {
                self.state.zones.insert(card, &zone, direction);
            }
        }
    }

    fn notify_moves(&mut self, moves: &[CardsMoveStruct]) {
        for player in self.room.agent_players() {
            let descriptors = moves
                .iter()
                .map(|mv| MoveDescriptor::describe(mv, mv.is_visible_to(player)))
                .collect();
            self.room.notify(player, &Command::MoveCards(descriptors));
        }
    }
}
