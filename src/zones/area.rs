//! Zone descriptors.
//!
//! An `Area` is the descriptor carried by a move: zone type, owning player,
//! insertion direction and a symbolic name. A `ZoneKey` is the resolved
//! identity of a concrete zone inside the `ZoneManager`.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Kinds of zone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AreaType {
    /// Unresolved. The engine locates the card itself.
    #[default]
    Unknown,
    Hand,
    Equip,
    DelayedTrick,
    Judge,
    DrawPile,
    DiscardPile,
    /// Shared surface where cards sit while they resolve.
    Table,
    /// Named pile, table-wide or owned by a player.
    Special,
}

impl AreaType {
    /// Does this zone type belong to one player?
    #[must_use]
    pub const fn is_player_scoped(self) -> bool {
        matches!(
            self,
            AreaType::Hand | AreaType::Equip | AreaType::DelayedTrick | AreaType::Judge
        )
    }

    /// Is card order significant in this zone?
    #[must_use]
    pub const fn is_ordered(self) -> bool {
        matches!(self, AreaType::DrawPile | AreaType::DiscardPile | AreaType::Judge)
    }
}

/// Where to insert into an ordered zone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Zone default: appended.
    #[default]
    Undefined,
    Top,
    Bottom,
}

/// Zone descriptor as carried by a move.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub area_type: AreaType,
    pub direction: Direction,
    pub owner: Option<PlayerId>,
    pub name: String,
}

impl Area {
    /// A table-scoped zone.
    #[must_use]
    pub fn new(area_type: AreaType) -> Self {
        Self {
            area_type,
            ..Self::default()
        }
    }

    /// A player-scoped zone.
    #[must_use]
    pub fn owned(area_type: AreaType, owner: PlayerId) -> Self {
        Self {
            area_type,
            owner: Some(owner),
            ..Self::default()
        }
    }

    /// A named special pile.
    #[must_use]
    pub fn special(name: impl Into<String>, owner: Option<PlayerId>) -> Self {
        Self {
            area_type: AreaType::Special,
            owner,
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set insertion direction (builder pattern).
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Resolve this descriptor to a concrete zone.
    ///
    /// Returns `None` for `Unknown` and for player-scoped types without an
    /// owner.
    #[must_use]
    pub fn key(&self) -> Option<ZoneKey> {
        match self.area_type {
            AreaType::Unknown => None,
            t if t.is_player_scoped() => self.owner.map(|owner| ZoneKey::owned(t, owner)),
            AreaType::Special => Some(ZoneKey {
                area_type: AreaType::Special,
                owner: self.owner,
                name: self.name.clone(),
            }),
            t => Some(ZoneKey::table(t)),
        }
    }
}

impl From<&ZoneKey> for Area {
    fn from(key: &ZoneKey) -> Self {
        Self {
            area_type: key.area_type,
            direction: Direction::Undefined,
            owner: key.owner,
            name: key.name.clone(),
        }
    }
}

/// Identity of one concrete zone.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZoneKey {
    pub area_type: AreaType,
    pub owner: Option<PlayerId>,
    pub name: String,
}

impl ZoneKey {
    /// A table-wide zone (draw pile, discard pile, table).
    #[must_use]
    pub fn table(area_type: AreaType) -> Self {
        Self {
            area_type,
            owner: None,
            name: String::new(),
        }
    }

    /// A zone owned by one player.
    #[must_use]
    pub fn owned(area_type: AreaType, owner: PlayerId) -> Self {
        Self {
            area_type,
            owner: Some(owner),
            name: String::new(),
        }
    }
}

impl std::fmt::Display for ZoneKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.owner {
            Some(owner) => write!(f, "{:?}({})", self.area_type, owner)?,
            None => write!(f, "{:?}", self.area_type)?,
        }
        if !self.name.is_empty() {
            write!(f, "[{}]", self.name)?;
        }
        Ok(())
    }
}
