//! Event kinds and the mutable payloads they carry.
//!
//! Every dispatch hands handlers one `EventData` that borrows the in-flight
//! payload exclusively. A handler that raises a nested event builds a fresh
//! payload for it; it never aliases the outer one.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Card, CardId};
use crate::core::{Phase, PlayerId};
use crate::zones::{Area, AreaType};

/// Ordered target list of a play. Most plays name a handful of players.
pub type Targets = SmallVec<[PlayerId; 4]>;

/// Points in the rule pipeline where handlers may run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    GameStart,

    // === Turn ===
    PhaseChanging,
    PhaseSkipping,
    PhaseStart,
    PhaseProceeding,
    PhaseEnd,

    // === Movement ===
    BeforeCardsMove,
    AfterCardsMove,

    // === Card use ===
    PreCardUsed,
    CardUsed,
    CardFinished,
    CardEffect,
    CardEffected,

    // === Damage ===
    DamageCaused,
    DamageInflicted,
    Damaged,
    DamageComplete,
    Died,
}

/// A phase transition. Handlers may rewrite `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseChangeStruct {
    pub from: Phase,
    pub to: Phase,
}

/// Relocation of cards from one zone descriptor to another.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardsMoveStruct {
    pub from: Area,
    pub to: Area,
    pub cards: Vec<CardId>,
    /// Identities are revealed to every observer.
    pub is_open: bool,
    /// The move empties the source hand.
    pub is_last_hand_card: bool,
    /// The move that caused this one.
    pub origin: Option<Box<CardsMoveStruct>>,
}

impl CardsMoveStruct {
    /// Move `cards` to `to` from wherever they are.
    #[must_use]
    pub fn new(cards: Vec<CardId>, to: Area) -> Self {
        Self {
            to,
            cards,
            ..Self::default()
        }
    }

    /// Declare the source zone (builder pattern).
    #[must_use]
    pub fn with_from(mut self, from: Area) -> Self {
        self.from = from;
        self
    }

    /// Reveal identities to all observers (builder pattern).
    #[must_use]
    pub fn open(mut self) -> Self {
        self.is_open = true;
        self
    }

    /// Chain this move to the one that caused it (builder pattern).
    #[must_use]
    pub fn with_origin(mut self, origin: CardsMoveStruct) -> Self {
        self.origin = Some(Box::new(origin));
        self
    }

    /// Whether `player` owns either end of the move.
    #[must_use]
    pub fn is_relevant(&self, player: PlayerId) -> bool {
        self.from.owner == Some(player) || self.to.owner == Some(player)
    }

    /// Whether `player` may see the identities of the moved cards.
    ///
    /// Cards leaving or entering a hand are private to that hand's owner
    /// unless the move is open; moves between public zones are always
    /// visible.
    #[must_use]
    pub fn is_visible_to(&self, player: PlayerId) -> bool {
        if self.is_open || self.is_relevant(player) {
            return true;
        }
        let hidden = |area: &Area| matches!(area.area_type, AreaType::Hand | AreaType::DrawPile);
        !hidden(&self.from) && !hidden(&self.to)
    }
}

/// Why a card is being used.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UseReason {
    #[default]
    Unknown,
    Play,
    Response,
    ResponseUse,
}

/// One use of a card, from intent to resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardUseStruct {
    pub from: PlayerId,
    pub to: Targets,
    /// The card used. May be virtual.
    pub card: Card,
    /// Targets whose effect is nullified.
    pub nullified_list: Vec<PlayerId>,
    /// Used on the owner's own initiative rather than forced.
    pub is_owner_use: bool,
    /// Count this use in the per-turn history.
    pub add_history: bool,
    pub is_handcard: bool,
    pub reason: UseReason,
}

impl CardUseStruct {
    /// A plain use of `card` by `from` with no targets yet.
    #[must_use]
    pub fn new(from: PlayerId, card: Card) -> Self {
        Self {
            from,
            to: Targets::new(),
            card,
            nullified_list: Vec::new(),
            is_owner_use: true,
            add_history: true,
            is_handcard: true,
            reason: UseReason::Unknown,
        }
    }

    /// Set the targets (builder pattern).
    #[must_use]
    pub fn with_targets(mut self, targets: impl IntoIterator<Item = PlayerId>) -> Self {
        self.to = targets.into_iter().collect();
        self
    }

    /// Set the reason (builder pattern).
    #[must_use]
    pub fn with_reason(mut self, reason: UseReason) -> Self {
        self.reason = reason;
        self
    }
}

/// The effect of a used card on one target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardEffectStruct {
    pub card: Card,
    /// `None` for effects with no user, such as a resolving delayed trick.
    pub from: Option<PlayerId>,
    pub to: PlayerId,
    /// The use had more than one target.
    pub multiple: bool,
    pub nullified: bool,
}

impl CardEffectStruct {
    #[must_use]
    pub fn new(card: Card, from: Option<PlayerId>, to: PlayerId) -> Self {
        Self {
            card,
            from,
            to,
            multiple: false,
            nullified: false,
        }
    }
}

/// Damage nature.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageNature {
    #[default]
    Normal,
    Fire,
    Thunder,
}

/// Damage in flight. Handlers may redirect, amplify or prevent it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DamageStruct {
    /// `None` for damage without a player source.
    pub from: Option<PlayerId>,
    pub to: PlayerId,
    pub card: Option<Card>,
    pub damage: i32,
    pub nature: DamageNature,
    pub chain: bool,
    pub transfer: bool,
    pub by_user: bool,
    pub reason: String,
    pub transfer_reason: String,
    pub prevented: bool,
}

impl DamageStruct {
    /// One point of normal damage to `to`.
    #[must_use]
    pub fn new(from: Option<PlayerId>, to: PlayerId) -> Self {
        Self {
            from,
            to,
            card: None,
            damage: 1,
            nature: DamageNature::Normal,
            chain: false,
            transfer: false,
            by_user: true,
            reason: String::new(),
            transfer_reason: String::new(),
            prevented: false,
        }
    }

    /// Set the amount (builder pattern).
    #[must_use]
    pub fn with_amount(mut self, damage: i32) -> Self {
        self.damage = damage;
        self
    }

    /// Set the nature (builder pattern).
    #[must_use]
    pub fn with_nature(mut self, nature: DamageNature) -> Self {
        self.nature = nature;
        self
    }

    /// Attribute the damage to a card (builder pattern).
    #[must_use]
    pub fn with_card(mut self, card: Card) -> Self {
        self.card = Some(card);
        self
    }
}

/// Exclusive borrow of the payload of one dispatch.
#[derive(Debug)]
pub enum EventData<'a> {
    None,
    PhaseChange(&'a mut PhaseChangeStruct),
    CardsMove(&'a mut Vec<CardsMoveStruct>),
    CardUse(&'a mut CardUseStruct),
    CardEffect(&'a mut CardEffectStruct),
    Damage(&'a mut DamageStruct),
}

impl EventData<'_> {
    pub fn phase_change(&mut self) -> Option<&mut PhaseChangeStruct> {
        match self {
            EventData::PhaseChange(change) => Some(change),
            _ => None,
        }
    }

    pub fn cards_moves(&mut self) -> Option<&mut Vec<CardsMoveStruct>> {
        match self {
            EventData::CardsMove(moves) => Some(moves),
            _ => None,
        }
    }

    pub fn card_use(&mut self) -> Option<&mut CardUseStruct> {
        match self {
            EventData::CardUse(card_use) => Some(card_use),
            _ => None,
        }
    }

    pub fn card_effect(&mut self) -> Option<&mut CardEffectStruct> {
        match self {
            EventData::CardEffect(effect) => Some(effect),
            _ => None,
        }
    }

    pub fn damage(&mut self) -> Option<&mut DamageStruct> {
        match self {
            EventData::Damage(damage) => Some(damage),
            _ => None,
        }
    }
}
