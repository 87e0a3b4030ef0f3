//! Card attributes: suit, color, category and subtype.
//!
//! Each enum has a stable wire/string form. Parsing an unknown string
//! degrades to the "none" variant instead of failing.

use serde::{Deserialize, Serialize};

/// Card suit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Spade,
    Heart,
    Club,
    Diamond,
    #[default]
    NoSuit,
}

impl Suit {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Suit::Spade => "spade",
            Suit::Heart => "heart",
            Suit::Club => "club",
            Suit::Diamond => "diamond",
            Suit::NoSuit => "no_suit",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "spade" => Suit::Spade,
            "heart" => Suit::Heart,
            "club" => Suit::Club,
            "diamond" => Suit::Diamond,
            _ => Suit::NoSuit,
        }
    }

    /// Color implied by the suit.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Suit::Spade | Suit::Club => Color::Black,
            Suit::Heart | Suit::Diamond => Color::Red,
            Suit::NoSuit => Color::NoColor,
        }
    }
}

/// Card color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Black,
    #[default]
    NoColor,
}

impl Color {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Black => "black",
            Color::NoColor => "no_color",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "red" => Color::Red,
            "black" => Color::Black,
            _ => Color::NoColor,
        }
    }
}

/// Card category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    #[default]
    Basic,
    Trick,
    Equip,
    /// Granted by a skill; has no printed counterpart.
    Skill,
}

impl CardType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            CardType::Basic => "basic",
            CardType::Trick => "trick",
            CardType::Equip => "equip",
            CardType::Skill => "skill",
        }
    }
}

/// Subtype: targeting family for tricks, slot for equipment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardSubtype {
    #[default]
    None,
    SingleTarget,
    AreaOfEffect,
    GlobalEffect,
    Delayed,
    Weapon,
    Armor,
    DefensiveHorse,
    OffensiveHorse,
    Treasure,
}

impl CardSubtype {
    /// Does this subtype name an equipment slot?
    #[must_use]
    pub const fn is_equip_slot(self) -> bool {
        matches!(
            self,
            CardSubtype::Weapon
                | CardSubtype::Armor
                | CardSubtype::DefensiveHorse
                | CardSubtype::OffensiveHorse
                | CardSubtype::Treasure
        )
    }
}
