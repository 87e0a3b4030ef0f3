//! Players: identity, seating, turn phase and replicated properties.
//!
//! ## PlayerId
//!
//! Stable identifier assigned when the table is formed. It is not the seat:
//! seats are 1..=N and are reassigned whenever seating changes.
//!
//! ## Turn order
//!
//! Each player holds a `next` link. Links form a circle rebuilt by
//! `GameState::arrange_seats`; dead players stay in the circle and are
//! skipped by the turn loop.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::property::PropertyValue;

/// Stable player identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Turn phases, in default play order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    RoundStart,
    Start,
    Judge,
    Draw,
    Play,
    Discard,
    Finish,
    /// Not this player's turn.
    #[default]
    NotActive,
}

impl Phase {
    /// The default sequence of a full turn.
    pub const TURN: [Phase; 7] = [
        Phase::RoundStart,
        Phase::Start,
        Phase::Judge,
        Phase::Draw,
        Phase::Play,
        Phase::Discard,
        Phase::Finish,
    ];

    /// Wire name used in property updates.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Phase::RoundStart => "round_start",
            Phase::Start => "start",
            Phase::Judge => "judge",
            Phase::Draw => "draw",
            Phase::Play => "play",
            Phase::Discard => "discard",
            Phase::Finish => "finish",
            Phase::NotActive => "not_active",
        }
    }

    /// Parse a wire name. Unknown names map to `NotActive`.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name {
            "round_start" => Phase::RoundStart,
            "start" => Phase::Start,
            "judge" => Phase::Judge,
            "draw" => Phase::Draw,
            "play" => Phase::Play,
            "discard" => Phase::Discard,
            "finish" => Phase::Finish,
            _ => Phase::NotActive,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who drives a seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Controller {
    /// A connected user.
    User(u32),
    /// A robot slot.
    Robot(u32),
}

/// Server-side player record.
#[derive(Clone, Debug)]
pub struct Player {
    id: PlayerId,
    controller: Controller,

    /// Seat index, 1..=N. Zero until seats are arranged.
    pub seat: u32,

    /// Next player in turn order.
    pub next: Option<PlayerId>,

    pub phase: Phase,
    pub hp: i32,
    pub max_hp: i32,
    pub alive: bool,
    pub general: Option<String>,

    /// Per-card-name usage counters for the current turn.
    card_history: FxHashMap<String, u32>,
}

impl Player {
    /// Create an unseated player.
    #[must_use]
    pub fn new(id: PlayerId, controller: Controller) -> Self {
        Self {
            id,
            controller,
            seat: 0,
            next: None,
            phase: Phase::NotActive,
            hp: 0,
            max_hp: 0,
            alive: true,
            general: None,
            card_history: FxHashMap::default(),
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

    /// Read a replicated property by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<PropertyValue> {
        match name {
            "seat" => Some(PropertyValue::Int(i64::from(self.seat))),
            "phase" => Some(self.phase.as_str().into()),
            "hp" => Some(self.hp.into()),
            "max_hp" | "maxHp" => Some(self.max_hp.into()),
            "alive" => Some(self.alive.into()),
            "general" => self.general.clone().map(PropertyValue::Text),
            _ => None,
        }
    }

    /// How many times a card name was used this turn.
    #[must_use]
    pub fn card_history(&self, name: &str) -> u32 {
        self.card_history.get(name).copied().unwrap_or(0)
    }

    /// Add to a card name's usage counter.
    pub fn add_card_history(&mut self, name: &str, times: u32) {
        *self.card_history.entry(name.to_string()).or_default() += times;
    }

    /// Reset all usage counters.
    pub fn clear_card_history(&mut self) {
        self.card_history.clear();
    }
}
