//! Command vocabulary between a table and its observers.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::{Controller, PlayerId, PropertyValue};
use crate::triggers::{CardsMoveStruct, DamageNature, Targets};
use crate::zones::Area;

/// One seat as announced by `ArrangeSeat`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatInfo {
    pub player: PlayerId,
    pub controller: Controller,
}

/// Moved cards as one observer sees them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardSet {
    /// Identities are visible to the receiver.
    Known(Vec<CardId>),
    /// Only the number of cards is visible.
    Hidden(usize),
}

impl CardSet {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            CardSet::Known(ids) => ids.len(),
            CardSet::Hidden(count) => *count,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Wire shape of one `CardsMoveStruct`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveDescriptor {
    pub from: Area,
    pub to: Area,
    pub is_open: bool,
    pub is_last_hand_card: bool,
    pub cards: CardSet,
}

impl MoveDescriptor {
    /// Describe `mv` for an observer, revealing ids only when `visible`.
    #[must_use]
    pub fn describe(mv: &CardsMoveStruct, visible: bool) -> Self {
        let cards = if visible {
            CardSet::Known(mv.cards.clone())
        } else {
            CardSet::Hidden(mv.cards.len())
        };
        Self {
            from: mv.from.clone(),
            to: mv.to.clone(),
            is_open: mv.is_open,
            is_last_hand_card: mv.is_last_hand_card,
            cards,
        }
    }
}

/// Server to client commands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Seat order. Each player's `next` is the following entry, wrapping.
    ArrangeSeat(Vec<SeatInfo>),
    /// Catalog cards the client should mirror.
    PrepareCards(Vec<CardId>),
    UpdatePlayerProperty {
        player: PlayerId,
        name: String,
        value: PropertyValue,
    },
    MoveCards(Vec<MoveDescriptor>),
    /// Ask the receiver for a card to use. Answered with `Reply::UseCard`.
    UseCard,
    /// Offer generals. Answered with `Reply::ChooseGeneral`.
    ChooseGeneral {
        candidates: Vec<String>,
        banned_pairs: Vec<(String, String)>,
    },
    /// Add to a usage counter, or clear every counter when `None`.
    AddCardHistory(Option<(String, u32)>),
    /// Presentation only. Hp is sent separately.
    Damage {
        target: PlayerId,
        nature: DamageNature,
        amount: i32,
    },
}

impl Command {
    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Command::ArrangeSeat(_) => "arrange_seat",
            Command::PrepareCards(_) => "prepare_cards",
            Command::UpdatePlayerProperty { .. } => "update_player_property",
            Command::MoveCards(_) => "move_cards",
            Command::UseCard => "use_card",
            Command::ChooseGeneral { .. } => "choose_general",
            Command::AddCardHistory(_) => "add_card_history",
            Command::Damage { .. } => "damage",
        }
    }
}

/// A card-use intent. No card means pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseCardIntent {
    pub card: CardId,
    pub targets: Targets,
}

impl UseCardIntent {
    #[must_use]
    pub fn new(card: CardId, targets: impl IntoIterator<Item = PlayerId>) -> Self {
        Self {
            card,
            targets: targets.into_iter().collect(),
        }
    }

    /// The empty intent.
    #[must_use]
    pub fn pass() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_pass(&self) -> bool {
        self.card.is_none()
    }
}

/// Client to server replies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reply {
    UseCard(UseCardIntent),
    ChooseGeneral(String),
}

/// A command on the wire. Requests carry the id their reply must echo.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub request: Option<u64>,
    pub command: Command,
}

/// A reply on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyEnvelope {
    pub request: u64,
    pub reply: Reply,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zones::AreaType;

    #[test]
    fn test_hidden_descriptor_keeps_count_only() {
        let mv = CardsMoveStruct::new(
            vec![CardId::new(4), CardId::new(9)],
            Area::owned(AreaType::Hand, PlayerId::new(1)),
        )
        .with_from(Area::new(AreaType::DrawPile));

        let hidden = MoveDescriptor::describe(&mv, false);
        assert_eq!(hidden.cards, CardSet::Hidden(2));

        let shown = MoveDescriptor::describe(&mv, true);
        assert_eq!(shown.cards, CardSet::Known(vec![CardId::new(4), CardId::new(9)]));
        assert_eq!(shown.to.owner, Some(PlayerId::new(1)));
    }

    #[test]
    fn test_pass_intent() {
        assert!(UseCardIntent::pass().is_pass());
        assert!(!UseCardIntent::new(CardId::new(2), [PlayerId::new(3)]).is_pass());
    }

    #[test]
    fn test_command_json_shape() {
        let command = Command::UpdatePlayerProperty {
            player: PlayerId::new(2),
            name: "hp".into(),
            value: PropertyValue::Int(3),
        };
        let json = serde_json::to_string(&command).unwrap();
        let back: Command = serde_json::from_str(&json).unwrap();

        assert_eq!(back, command);
        assert_eq!(back.name(), "update_player_property");
    }
}
