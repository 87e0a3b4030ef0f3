//! Card movement integration tests.
//!
//! Batches are atomic from a handler's point of view, desyncs are repaired
//! instead of failing, and every card stays in exactly one zone whatever
//! sequence of moves is applied.

use std::sync::{Arc, Mutex};

use kingdoms_engine::cards::{Card, CardId, CardRegistry, Suit};
use kingdoms_engine::core::{Controller, PlayerId, RoomConfig};
use kingdoms_engine::error::EngineResult;
use kingdoms_engine::rules::GameLogic;
use kingdoms_engine::triggers::{CardsMoveStruct, EventData, EventType, TriggerHandler};
use kingdoms_engine::zones::{Area, AreaType, Direction, ZoneKey};
use proptest::prelude::*;

fn table_with_cards(n: u8) -> (GameLogic, Vec<CardId>, Vec<PlayerId>) {
    let mut registry = CardRegistry::new();
    let ids: Vec<_> = (1..=n)
        .map(|number| registry.register(Card::basic("peach", Suit::Heart, number)))
        .collect();
    let mut logic = GameLogic::new(RoomConfig::default(), registry);
    let players = vec![logic.add_player(Controller::Robot(1)), logic.add_player(Controller::Robot(2))];
    logic.state_mut().arrange_seats(&players);
    logic
        .move_card(CardsMoveStruct::new(ids.clone(), Area::new(AreaType::DrawPile)))
        .unwrap();
    (logic, ids, players)
}

/// Snapshots where two cards are at each move event.
struct Observer {
    watched: (CardId, CardId),
    seen: Arc<Mutex<Vec<(EventType, Option<ZoneKey>, Option<ZoneKey>)>>>,
}

impl TriggerHandler for Observer {
    fn name(&self) -> &str {
        "observer"
    }

    fn events(&self) -> &[EventType] {
        &[EventType::BeforeCardsMove, EventType::AfterCardsMove]
    }

    fn on_event(
        &self,
        logic: &mut GameLogic,
        event: EventType,
        _player: Option<PlayerId>,
        _data: &mut EventData<'_>,
    ) -> EngineResult<bool> {
        let zones = &logic.state().zones;
        let a = zones.location(self.watched.0).cloned();
        let b = zones.location(self.watched.1).cloned();
        self.seen.lock().unwrap().push((event, a, b));
        Ok(false)
    }
}

#[test]
fn test_batch_is_atomic_to_handlers() {
    let (mut logic, ids, p) = table_with_cards(2);
    let seen = Arc::new(Mutex::new(Vec::new()));
    logic.register_trigger(Arc::new(Observer {
        watched: (ids[0], ids[1]),
        seen: Arc::clone(&seen),
    }));

    logic
        .move_cards(vec![
            CardsMoveStruct::new(vec![ids[0]], Area::owned(AreaType::Hand, p[0])).with_from(Area::new(AreaType::DrawPile)),
            CardsMoveStruct::new(vec![ids[1]], Area::owned(AreaType::Hand, p[1])).with_from(Area::new(AreaType::DrawPile)),
        ])
        .unwrap();

    let pile = ZoneKey::table(AreaType::DrawPile);
    let seen = seen.lock().unwrap();
    assert_eq!(
        *seen,
        vec![
            (EventType::BeforeCardsMove, Some(pile.clone()), Some(pile)),
            (
                EventType::AfterCardsMove,
                Some(ZoneKey::owned(AreaType::Hand, p[0])),
                Some(ZoneKey::owned(AreaType::Hand, p[1]))
            ),
        ]
    );
}

/// A card can be swapped between two zones in one batch.
#[test]
fn test_batch_swaps_cards() {
    let (mut logic, ids, p) = table_with_cards(2);
    logic
        .move_card(CardsMoveStruct::new(vec![ids[0]], Area::owned(AreaType::Hand, p[0])))
        .unwrap();
    logic
        .move_card(CardsMoveStruct::new(vec![ids[1]], Area::owned(AreaType::Hand, p[1])))
        .unwrap();

    logic
        .move_cards(vec![
            CardsMoveStruct::new(vec![ids[0]], Area::owned(AreaType::Hand, p[1])).with_from(Area::owned(AreaType::Hand, p[0])),
            CardsMoveStruct::new(vec![ids[1]], Area::owned(AreaType::Hand, p[0])).with_from(Area::owned(AreaType::Hand, p[1])),
        ])
        .unwrap();

    assert_eq!(logic.state().player_cards(p[0], AreaType::Hand).len(), 1);
    assert!(logic.state().player_cards(p[0], AreaType::Hand).contains(&ids[1]));
    assert!(logic.state().player_cards(p[1], AreaType::Hand).contains(&ids[0]));
}

#[test]
fn test_desynced_source_still_lands() {
    let (mut logic, ids, p) = table_with_cards(3);

    // ids[0] is really in the draw pile, not in p[1]'s hand.
    logic
        .move_card(
            CardsMoveStruct::new(vec![ids[0]], Area::new(AreaType::DiscardPile))
                .with_from(Area::owned(AreaType::Hand, p[1])),
        )
        .unwrap();

    assert_eq!(logic.discard_pile().iter().copied().collect::<Vec<_>>(), vec![ids[0]]);
    assert!(!logic.draw_pile().contains(&ids[0]));
    assert_eq!(logic.state().zones.total_cards(), 3);
}

#[test]
fn test_card_in_no_zone_is_placed() {
    let mut registry = CardRegistry::new();
    let id = registry.register(Card::basic("wine", Suit::Spade, 9));
    let mut logic = GameLogic::new(RoomConfig::default(), registry);
    let p = logic.add_player(Controller::Robot(1));

    logic
        .move_card(
            CardsMoveStruct::new(vec![id], Area::owned(AreaType::Hand, p))
                .with_from(Area::new(AreaType::Table)),
        )
        .unwrap();

    assert!(logic.state().player_cards(p, AreaType::Hand).contains(&id));
}

#[test]
fn test_top_and_bottom_of_draw_pile() {
    let (mut logic, ids, _p) = table_with_cards(4);

    logic
        .move_card(
            CardsMoveStruct::new(vec![ids[3]], Area::new(AreaType::DrawPile).with_direction(Direction::Top))
                .with_from(Area::new(AreaType::DrawPile)),
        )
        .unwrap();
    logic
        .move_card(
            CardsMoveStruct::new(vec![ids[0]], Area::new(AreaType::DrawPile).with_direction(Direction::Bottom))
                .with_from(Area::new(AreaType::DrawPile)),
        )
        .unwrap();

    let pile: Vec<_> = logic.draw_pile().iter().copied().collect();
    assert_eq!(pile, vec![ids[3], ids[1], ids[2], ids[0]]);
}

#[test]
fn test_direction_is_ignored_by_unordered_zones() {
    let (mut logic, ids, p) = table_with_cards(3);
    logic
        .move_card(CardsMoveStruct::new(vec![ids[0]], Area::owned(AreaType::Hand, p[0])))
        .unwrap();

    logic
        .move_card(
            CardsMoveStruct::new(vec![ids[1], ids[2]], Area::owned(AreaType::Hand, p[0]).with_direction(Direction::Top))
                .with_from(Area::new(AreaType::DrawPile)),
        )
        .unwrap();

    let hand: Vec<_> = logic.state().player_cards(p[0], AreaType::Hand).iter().copied().collect();
    assert_eq!(hand, vec![ids[0], ids[1], ids[2]]);
}

#[test]
fn test_special_piles_are_zones() {
    let (mut logic, ids, p) = table_with_cards(2);

    logic
        .move_card(CardsMoveStruct::new(vec![ids[0]], Area::special("fields", Some(p[0]))))
        .unwrap();

    let key = ZoneKey {
        area_type: AreaType::Special,
        owner: Some(p[0]),
        name: "fields".to_string(),
    };
    assert!(logic.state().zones.contains(&key, ids[0]));
    assert_eq!(logic.draw_pile().len(), 1);
}

// === Zone exclusivity ===

const CARDS: u8 = 6;

fn area(index: u8, p: &[PlayerId]) -> Area {
    match index {
        0 => Area::owned(AreaType::Hand, p[0]),
        1 => Area::owned(AreaType::Hand, p[1]),
        2 => Area::owned(AreaType::Equip, p[0]),
        3 => Area::new(AreaType::Table),
        4 => Area::new(AreaType::DrawPile).with_direction(Direction::Top),
        5 => Area::new(AreaType::DiscardPile),
        6 => Area::special("exile", None),
        _ => Area::default(),
    }
}

fn move_strategy() -> impl Strategy<Value = (Vec<u8>, u8, u8)> {
    (
        prop::collection::vec(0..CARDS, 1..4),
        0u8..7,
        0u8..8,
    )
}

proptest! {
    #[test]
    fn test_every_card_in_exactly_one_zone(
        batches in prop::collection::vec(prop::collection::vec(move_strategy(), 1..3), 1..20)
    ) {
        let (mut logic, ids, p) = table_with_cards(CARDS);

        for batch in batches {
            let moves = batch
                .into_iter()
                .map(|(cards, to, from)| {
                    let cards = cards.into_iter().map(|i| ids[usize::from(i)]).collect();
                    CardsMoveStruct::new(cards, area(to, &p)).with_from(area(from, &p))
                })
                .collect();
            logic.move_cards(moves).unwrap();

            let zones = &logic.state().zones;
            prop_assert_eq!(zones.total_cards(), ids.len());
            for &id in &ids {
                let location = zones.location(id);
                prop_assert!(location.is_some(), "{} lost", id);
                prop_assert!(zones.contains(location.unwrap(), id));
            }
            let listed: usize = (0..7)
                .filter_map(|i| area(i, &p).key())
                .map(|key| zones.len(&key))
                .sum();
            prop_assert_eq!(listed, ids.len(), "a card is listed twice");
        }
    }
}
