//! Client-side mirror of a table.
//!
//! The mirror applies server commands to a local copy of what one observer
//! may know: seats, properties, usage history and the contents of
//! player-owned zones. Cards whose identity was hidden are kept as `None`
//! placeholders. Inconsistent payloads are logged and skipped.

use std::collections::VecDeque;
use std::sync::Arc;

use log::warn;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::cards::{Card, CardId, CardRegistry};
use crate::core::{Controller, PlayerId, PropertyValue};
use crate::protocol::{
    CardSet, Command, Envelope, MoveDescriptor, Reply, ReplyEnvelope, SeatInfo, UseCardIntent,
};
use crate::triggers::DamageNature;
use crate::zones::{Area, AreaType};

/// A card slot as seen by this observer. `None` is a face-down card.
pub type Slot = Option<CardId>;

/// Presentation events for the local user interface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientEvent {
    SeatArranged,
    CardsMoved(Vec<MoveDescriptor>),
    PropertyChanged {
        player: PlayerId,
        name: String,
    },
    DamageDone {
        target: PlayerId,
        nature: DamageNature,
        amount: i32,
    },
    ChooseGeneralRequested {
        candidates: Vec<String>,
    },
    UseCardRequested,
}

/// Mirror of one player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientPlayer {
    id: PlayerId,
    controller: Controller,
    pub seat: u32,
    pub next: Option<PlayerId>,
    properties: FxHashMap<String, PropertyValue>,
    hand: Vec<Slot>,
    equips: Vec<Slot>,
    delayed_tricks: Vec<Slot>,
    judge: Vec<Slot>,
}

impl ClientPlayer {
    fn new(info: SeatInfo, seat: u32) -> Self {
        Self {
            id: info.player,
            controller: info.controller,
            seat,
            next: None,
            properties: FxHashMap::default(),
            hand: Vec::new(),
            equips: Vec::new(),
            delayed_tricks: Vec::new(),
            judge: Vec::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn controller(&self) -> Controller {
        self.controller
    }

    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    #[must_use]
    pub fn hp(&self) -> Option<i64> {
        self.property("hp").and_then(PropertyValue::as_int)
    }

    /// Players count as alive until told otherwise.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.property("alive").and_then(PropertyValue::as_bool).unwrap_or(true)
    }

    #[must_use]
    pub fn general(&self) -> Option<&str> {
        self.property("general").and_then(PropertyValue::as_text)
    }

    /// Cards in one of this player's zones. Other areas are not mirrored.
    #[must_use]
    pub fn zone(&self, area_type: AreaType) -> &[Slot] {
        match area_type {
            AreaType::Hand => &self.hand,
            AreaType::Equip => &self.equips,
            AreaType::DelayedTrick => &self.delayed_tricks,
            AreaType::Judge => &self.judge,
            _ => &[],
        }
    }

    fn zone_mut(&mut self, area_type: AreaType) -> Option<&mut Vec<Slot>> {
        match area_type {
            AreaType::Hand => Some(&mut self.hand),
            AreaType::Equip => Some(&mut self.equips),
            AreaType::DelayedTrick => Some(&mut self.delayed_tricks),
            AreaType::Judge => Some(&mut self.judge),
            _ => None,
        }
    }
}

/// One observer's view of a table.
#[derive(Debug)]
pub struct ClientMirror {
    catalog: Arc<CardRegistry>,
    me: Controller,
    /// Players in seat order.
    players: Vec<ClientPlayer>,
    prepared: FxHashSet<CardId>,
    card_history: FxHashMap<String, u32>,
    events: VecDeque<ClientEvent>,
    pending_request: Option<u64>,
}

impl ClientMirror {
    /// Mirror for the observer controlling `me`, using a local catalog copy.
    #[must_use]
    pub fn new(catalog: Arc<CardRegistry>, me: Controller) -> Self {
        Self {
            catalog,
            me,
            players: Vec::new(),
            prepared: FxHashSet::default(),
            card_history: FxHashMap::default(),
            events: VecDeque::new(),
            pending_request: None,
        }
    }

    // === Queries ===

    #[must_use]
    pub fn players(&self) -> &[ClientPlayer] {
        &self.players
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&ClientPlayer> {
        self.players.iter().find(|p| p.id == id)
    }

    /// The player this observer controls.
    #[must_use]
    pub fn me(&self) -> Option<&ClientPlayer> {
        self.players.iter().find(|p| p.controller == self.me)
    }

    /// A prepared card.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        if self.prepared.contains(&id) {
            self.catalog.get(id)
        } else {
            None
        }
    }

    /// Own usage counter for a card name.
    #[must_use]
    pub fn card_history(&self, name: &str) -> u32 {
        self.card_history.get(name).copied().unwrap_or(0)
    }

    /// Next queued presentation event.
    pub fn pop_event(&mut self) -> Option<ClientEvent> {
        self.events.pop_front()
    }

    /// Whether the server is waiting for a decision.
    #[must_use]
    pub fn has_pending_request(&self) -> bool {
        self.pending_request.is_some()
    }

    // === Replies ===

    /// Answer the pending card request.
    pub fn reply_use_card(&mut self, card: CardId, targets: &[PlayerId]) -> Option<ReplyEnvelope> {
        let intent = UseCardIntent::new(card, targets.iter().copied());
        self.reply(Reply::UseCard(intent))
    }

    /// Answer the pending general offer.
    pub fn reply_choose_general(&mut self, general: impl Into<String>) -> Option<ReplyEnvelope> {
        self.reply(Reply::ChooseGeneral(general.into()))
    }

    fn reply(&mut self, reply: Reply) -> Option<ReplyEnvelope> {
        let request = self.pending_request.take()?;
        Some(ReplyEnvelope { request, reply })
    }

    // === Commands ===

    /// Apply one envelope from the server.
    pub fn handle(&mut self, envelope: Envelope) {
        if let Some(request) = envelope.request {
            self.pending_request = Some(request);
        }
        self.apply(envelope.command);
    }

    /// Apply one command.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::ArrangeSeat(seats) => self.arrange_seats(&seats),
            Command::PrepareCards(ids) => self.prepare_cards(ids),
            Command::UpdatePlayerProperty { player, name, value } => {
                self.update_property(player, name, value);
            }
            Command::MoveCards(moves) => {
                for mv in &moves {
                    self.move_cards(mv);
                }
                self.events.push_back(ClientEvent::CardsMoved(moves));
            }
            Command::UseCard => self.events.push_back(ClientEvent::UseCardRequested),
            Command::ChooseGeneral { candidates, .. } => {
                self.events
                    .push_back(ClientEvent::ChooseGeneralRequested { candidates });
            }
            Command::AddCardHistory(Some((name, times))) => {
                *self.card_history.entry(name).or_default() += times;
            }
            Command::AddCardHistory(None) => self.card_history.clear(),
            Command::Damage {
                target,
                nature,
                amount,
            } => self.events.push_back(ClientEvent::DamageDone {
                target,
                nature,
                amount,
            }),
        }
    }

    fn arrange_seats(&mut self, seats: &[SeatInfo]) {
        self.players = seats
            .iter()
            .enumerate()
            .map(|(index, &info)| ClientPlayer::new(info, index as u32 + 1))
            .collect();
        let count = self.players.len();
        for index in 0..count {
            let next = self.players[(index + 1) % count].id;
            self.players[index].next = Some(next);
        }
        self.events.push_back(ClientEvent::SeatArranged);
    }

    fn prepare_cards(&mut self, ids: Vec<CardId>) {
        for id in ids {
            if self.catalog.contains(id) {
                self.prepared.insert(id);
            } else {
                warn!("server prepared {} which is not in the local catalog", id);
            }
        }
    }

    fn update_property(&mut self, player: PlayerId, name: String, value: PropertyValue) {
        let Some(record) = self.players.iter_mut().find(|p| p.id == player) else {
            warn!("property '{}' for unseated {}", name, player);
            return;
        };
        if name == "seat" {
            if let Some(seat) = value.as_int().and_then(|s| u32::try_from(s).ok()) {
                record.seat = seat;
            }
        }
        record.properties.insert(name.clone(), value);
        self.events.push_back(ClientEvent::PropertyChanged { player, name });
    }

    fn zone_mut(&mut self, area: &Area) -> Option<&mut Vec<Slot>> {
        let owner = area.owner?;
        self.players
            .iter_mut()
            .find(|p| p.id == owner)?
            .zone_mut(area.area_type)
    }

    fn move_cards(&mut self, mv: &MoveDescriptor) {
        let slots: Vec<Slot> = match &mv.cards {
            CardSet::Known(ids) => ids
                .iter()
                .copied()
                .filter(|&id| {
                    let known = self.prepared.contains(&id);
                    if !known {
                        warn!("dropping unknown {} from move", id);
                    }
                    known
                })
                .map(Some)
                .collect(),
            CardSet::Hidden(count) if *count <= self.prepared.len() => vec![None; *count],
            CardSet::Hidden(count) => {
                warn!("skipping move of {} hidden cards, only {} exist", count, self.prepared.len());
                return;
            }
        };

        if let Some(source) = self.zone_mut(&mv.from) {
            for slot in &slots {
                take_slot(source, *slot);
            }
        }
        if let Some(destination) = self.zone_mut(&mv.to) {
            destination.extend(slots);
        }
    }
}

/// Remove one slot matching `slot` from `zone`: the card itself if known,
/// otherwise a placeholder, otherwise anything.
fn take_slot(zone: &mut Vec<Slot>, slot: Slot) {
    let position = zone
        .iter()
        .position(|s| *s == slot && slot.is_some())
        .or_else(|| zone.iter().position(Option::is_none))
        .or_else(|| (!zone.is_empty()).then_some(0));
    match position {
        Some(index) => {
            zone.remove(index);
        }
        None => warn!("removing {:?} from an empty mirrored zone", slot),
    }
}
