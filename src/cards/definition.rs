//! Card values.
//!
//! A `Card` is either concrete (created once when the catalog loads, with a
//! nonzero id) or virtual (id 0, built for a single play out of zero or more
//! subcards). Virtual cards never sit in a zone; only their real subcards
//! do.
//!
//! Effective attributes of a virtual card follow its subcards:
//!
//! | subcards | suit | number | effective id |
//! |---|---|---|---|
//! | none | own | own | own |
//! | one | delegated | delegated | delegated |
//! | several | no suit | sum, capped at 13 | 0 |

use serde::{Deserialize, Serialize};

use super::attributes::{CardSubtype, CardType, Color, Suit};

/// Highest rank a card can carry.
pub const MAX_NUMBER: u8 = 13;

/// Card identity. Zero means "no concrete identity".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// The id carried by virtual cards.
    pub const NONE: CardId = CardId(0);

    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// A card, concrete or virtual.
///
/// ## Example
///
/// ```
/// use kingdoms_engine::cards::{Card, CardId, Suit};
///
/// let mut five = Card::basic("slash", Suit::Spade, 5);
/// five.set_id(CardId::new(1));
/// let mut nine = Card::basic("jink", Suit::Heart, 9);
/// nine.set_id(CardId::new(2));
///
/// let mut combo = Card::virtual_basic("slash");
/// combo.add_subcard(five);
/// combo.add_subcard(nine);
///
/// assert_eq!(combo.number(), 13);
/// assert_eq!(combo.suit(), Suit::NoSuit);
/// assert_eq!(combo.effective_id(), CardId::NONE);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    name: String,
    suit: Suit,
    number: u8,
    /// Explicit color; `NoColor` means "derive from suit".
    color: Color,
    card_type: CardType,
    subtype: CardSubtype,
    target_fixed: bool,
    cancelable: bool,
    subcards: Vec<Card>,
}

impl Card {
    fn with_category(name: impl Into<String>, card_type: CardType, suit: Suit, number: u8) -> Self {
        Self {
            id: CardId::NONE,
            name: name.into(),
            suit,
            number: number.min(MAX_NUMBER),
            color: Color::NoColor,
            card_type,
            subtype: CardSubtype::None,
            target_fixed: false,
            cancelable: false,
            subcards: Vec::new(),
        }
    }

    /// A basic card.
    #[must_use]
    pub fn basic(name: impl Into<String>, suit: Suit, number: u8) -> Self {
        Self::with_category(name, CardType::Basic, suit, number)
    }

    /// A trick card. Tricks are cancelable unless marked otherwise.
    ///
    /// Global and area-of-effect tricks have fixed targets.
    #[must_use]
    pub fn trick(name: impl Into<String>, subtype: CardSubtype, suit: Suit, number: u8) -> Self {
        let mut card = Self::with_category(name, CardType::Trick, suit, number);
        card.subtype = subtype;
        card.cancelable = true;
        card.target_fixed = matches!(subtype, CardSubtype::GlobalEffect | CardSubtype::AreaOfEffect);
        card
    }

    /// An equipment card for the given slot. Equipment goes to its user
    /// unless a target is named, so its targets are fixed.
    #[must_use]
    pub fn equip(name: impl Into<String>, slot: CardSubtype, suit: Suit, number: u8) -> Self {
        debug_assert!(slot.is_equip_slot(), "equipment needs a slot subtype");
        let mut card = Self::with_category(name, CardType::Equip, suit, number);
        card.subtype = slot;
        card.target_fixed = true;
        card
    }

    /// A virtual basic card with no subcards yet.
    #[must_use]
    pub fn virtual_basic(name: impl Into<String>) -> Self {
        Self::basic(name, Suit::NoSuit, 0)
    }

    /// A virtual card shaped like `template` (same name, category and
    /// subtype) but without identity, suit or number.
    #[must_use]
    pub fn virtual_of(template: &Card) -> Self {
        Self {
            id: CardId::NONE,
            suit: Suit::NoSuit,
            number: 0,
            color: Color::NoColor,
            subcards: Vec::new(),
            ..template.clone()
        }
    }

    /// Mark this trick as not cancelable (builder pattern).
    #[must_use]
    pub fn uncancelable(mut self) -> Self {
        self.cancelable = false;
        self
    }

    /// Override the derived color (builder pattern).
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Assign the catalog identity.
    pub fn set_id(&mut self, id: CardId) {
        self.id = id;
    }

    /// Add a subcard, turning this into a composite card.
    pub fn add_subcard(&mut self, card: Card) {
        self.subcards.push(card);
    }

    // === Identity ===

    /// The card's own id (0 for virtual cards).
    #[must_use]
    pub fn id(&self) -> CardId {
        self.id
    }

    #[must_use]
    pub fn is_virtual(&self) -> bool {
        self.id.is_none()
    }

    /// The id that stands for this card in zones.
    #[must_use]
    pub fn effective_id(&self) -> CardId {
        if !self.is_virtual() {
            return self.id;
        }
        match self.subcards.as_slice() {
            [only] => only.effective_id(),
            _ => CardId::NONE,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn subcards(&self) -> &[Card] {
        &self.subcards
    }

    // === Attributes ===

    #[must_use]
    pub fn suit(&self) -> Suit {
        match self.subcards.as_slice() {
            [] => self.suit,
            [only] => only.suit(),
            _ => Suit::NoSuit,
        }
    }

    #[must_use]
    pub fn number(&self) -> u8 {
        if self.number > 0 {
            return self.number;
        }
        let sum: u32 = self.subcards.iter().map(|c| u32::from(c.number())).sum();
        sum.min(u32::from(MAX_NUMBER)) as u8
    }

    #[must_use]
    pub fn color(&self) -> Color {
        if self.color != Color::NoColor {
            return self.color;
        }
        self.suit().color()
    }

    #[must_use]
    pub fn card_type(&self) -> CardType {
        self.card_type
    }

    #[must_use]
    pub fn subtype(&self) -> CardSubtype {
        self.subtype
    }

    #[must_use]
    pub fn is_target_fixed(&self) -> bool {
        self.target_fixed
    }

    /// Whether effects of this card can be nullified by a countering effect.
    #[must_use]
    pub fn is_cancelable(&self) -> bool {
        self.card_type == CardType::Trick && self.cancelable
    }

    // === Real cards ===

    /// The single concrete card this stands for, if any.
    #[must_use]
    pub fn real_card(&self) -> Option<&Card> {
        if !self.is_virtual() {
            return Some(self);
        }
        match self.subcards.as_slice() {
            [only] => only.real_card(),
            _ => None,
        }
    }

    /// Every concrete card making up this card, depth first.
    #[must_use]
    pub fn real_cards(&self) -> Vec<&Card> {
        if !self.is_virtual() {
            return vec![self];
        }
        self.subcards.iter().flat_map(Card::real_cards).collect()
    }

    /// Ids of every concrete card making up this card.
    #[must_use]
    pub fn real_ids(&self) -> Vec<CardId> {
        self.real_cards().into_iter().map(Card::id).collect()
    }
}
