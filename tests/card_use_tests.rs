//! Card use integration tests.
//!
//! These cover the per-category behavior of a use: equipment replacement,
//! delayed tricks through the judge phase, composite cards and target
//! ordering for multi-target tricks.

use std::sync::{Arc, Mutex};

use kingdoms_engine::cards::{Card, CardId, CardRegistry, CardScript, CardSubtype, Suit};
use kingdoms_engine::core::{Controller, Phase, PlayerId, RoomConfig};
use kingdoms_engine::error::EngineResult;
use kingdoms_engine::rules::GameLogic;
use kingdoms_engine::triggers::{
    CardEffectStruct, CardUseStruct, CardsMoveStruct, DamageStruct, EventData, EventType,
    TriggerHandler,
};
use kingdoms_engine::zones::{Area, AreaType};

// === Fixtures ===

/// Deals three damage to whoever it lands on.
struct Lightning;

impl CardScript for Lightning {
    fn on_effect(&self, logic: &mut GameLogic, effect: &mut CardEffectStruct) -> EngineResult<()> {
        logic.damage(DamageStruct::new(None, effect.to).with_amount(3))
    }
}

/// Hands the judged card to the first seat instead of letting it be
/// discarded.
struct Boomerang;

impl CardScript for Boomerang {
    fn on_effect(&self, logic: &mut GameLogic, effect: &mut CardEffectStruct) -> EngineResult<()> {
        let first = logic.state().seat_order()[0];
        let mv = CardsMoveStruct::new(vec![effect.card.id()], Area::owned(AreaType::Hand, first));
        logic.move_card(mv)
    }
}

/// Records every batch of moves after it lands.
struct MoveLog {
    batches: Arc<Mutex<Vec<Vec<CardsMoveStruct>>>>,
}

impl TriggerHandler for MoveLog {
    fn name(&self) -> &str {
        "move_log"
    }

    fn events(&self) -> &[EventType] {
        &[EventType::AfterCardsMove]
    }

    fn on_event(
        &self,
        _logic: &mut GameLogic,
        _event: EventType,
        _player: Option<PlayerId>,
        data: &mut EventData<'_>,
    ) -> EngineResult<bool> {
        if let Some(moves) = data.cards_moves() {
            self.batches.lock().unwrap().push(moves.clone());
        }
        Ok(false)
    }
}

/// Records effect targets in the order they are resolved.
struct EffectLog {
    targets: Arc<Mutex<Vec<PlayerId>>>,
}

impl TriggerHandler for EffectLog {
    fn name(&self) -> &str {
        "effect_log"
    }

    fn events(&self) -> &[EventType] {
        &[EventType::CardEffect]
    }

    fn on_event(
        &self,
        _logic: &mut GameLogic,
        _event: EventType,
        _player: Option<PlayerId>,
        data: &mut EventData<'_>,
    ) -> EngineResult<bool> {
        if let Some(effect) = data.card_effect() {
            self.targets.lock().unwrap().push(effect.to);
        }
        Ok(false)
    }
}

fn seated(registry: CardRegistry, players: u32) -> (GameLogic, Vec<PlayerId>) {
    let mut logic = GameLogic::new(RoomConfig::default(), registry);
    let ids: Vec<_> = (0..players).map(|i| logic.add_player(Controller::Robot(i))).collect();
    logic.state_mut().arrange_seats(&ids);
    for &id in &ids {
        let player = logic.state_mut().player_mut(id).unwrap();
        player.max_hp = 4;
        player.hp = 4;
    }
    (logic, ids)
}

fn give(logic: &mut GameLogic, player: PlayerId, cards: &[CardId]) {
    logic
        .move_card(CardsMoveStruct::new(cards.to_vec(), Area::owned(AreaType::Hand, player)))
        .unwrap();
}

fn use_card(logic: &mut GameLogic, from: PlayerId, id: CardId, targets: &[PlayerId]) {
    let card = logic.find_card(id).unwrap();
    let card_use = CardUseStruct::new(from, card).with_targets(targets.iter().copied());
    logic.use_card(card_use).unwrap();
}

// === Equipment ===

#[test]
fn test_equip_replaces_same_slot() {
    let mut registry = CardRegistry::new();
    let red_hare = registry.register(Card::equip("red_hare", CardSubtype::OffensiveHorse, Suit::Heart, 5));
    let shadow = registry.register(Card::equip("shadow", CardSubtype::OffensiveHorse, Suit::Spade, 5));
    let (mut logic, p) = seated(registry, 2);
    give(&mut logic, p[0], &[red_hare, shadow]);

    use_card(&mut logic, p[0], red_hare, &[]);
    assert_eq!(
        logic.state().player_cards(p[0], AreaType::Equip).iter().copied().collect::<Vec<_>>(),
        vec![red_hare]
    );

    let batches = Arc::new(Mutex::new(Vec::new()));
    logic.register_trigger(Arc::new(MoveLog {
        batches: Arc::clone(&batches),
    }));
    use_card(&mut logic, p[0], shadow, &[]);

    let batches = batches.lock().unwrap();
    assert_eq!(batches.len(), 2, "one batch to swap, one to discard");

    let swap = &batches[0];
    assert_eq!(swap.len(), 2);
    assert_eq!(swap[0].cards, vec![shadow]);
    assert_eq!(swap[0].to, Area::owned(AreaType::Equip, p[0]));
    assert_eq!(swap[1].cards, vec![red_hare]);
    assert_eq!(swap[1].from, Area::owned(AreaType::Equip, p[0]));
    assert_eq!(swap[1].to.area_type, AreaType::Table);
    assert_eq!(swap[1].origin.as_ref().unwrap().cards, vec![shadow]);

    let discard = &batches[1][0];
    assert_eq!(discard.cards, vec![red_hare]);
    assert_eq!(discard.to.area_type, AreaType::DiscardPile);
    assert!(discard.origin.is_some());

    assert_eq!(
        logic.state().player_cards(p[0], AreaType::Equip).iter().copied().collect::<Vec<_>>(),
        vec![shadow]
    );
    assert!(logic.discard_pile().contains(&red_hare));
    assert!(logic.table().is_empty());
}

/// Takes a displaced horse off the table before it can be discarded.
struct Scavenger {
    owner: PlayerId,
    prize: CardId,
}

impl TriggerHandler for Scavenger {
    fn name(&self) -> &str {
        "scavenger"
    }

    fn events(&self) -> &[EventType] {
        &[EventType::AfterCardsMove]
    }

    fn owner(&self) -> Option<PlayerId> {
        Some(self.owner)
    }

    fn on_event(
        &self,
        logic: &mut GameLogic,
        _event: EventType,
        _player: Option<PlayerId>,
        data: &mut EventData<'_>,
    ) -> EngineResult<bool> {
        let landed = data.cards_moves().is_some_and(|moves| {
            moves
                .iter()
                .any(|mv| mv.to.area_type == AreaType::Table && mv.cards.contains(&self.prize))
        });
        if landed {
            let grab = CardsMoveStruct::new(vec![self.prize], Area::owned(AreaType::Hand, self.owner))
                .with_from(Area::new(AreaType::Table))
                .open();
            logic.move_card(grab)?;
        }
        Ok(false)
    }
}

#[test]
fn test_claimed_equipment_is_not_discarded() {
    let mut registry = CardRegistry::new();
    let old = registry.register(Card::equip("blade", CardSubtype::Weapon, Suit::Spade, 5));
    let new = registry.register(Card::equip("halberd", CardSubtype::Weapon, Suit::Diamond, 12));
    let (mut logic, p) = seated(registry, 2);
    give(&mut logic, p[0], &[old, new]);
    use_card(&mut logic, p[0], old, &[]);

    logic.register_trigger(Arc::new(Scavenger { owner: p[1], prize: old }));
    use_card(&mut logic, p[0], new, &[]);

    assert!(logic.state().player_cards(p[1], AreaType::Hand).contains(&old));
    assert!(!logic.discard_pile().contains(&old));
    assert!(logic.table().is_empty());
}

#[test]
fn test_equip_in_other_slot_is_kept() {
    let mut registry = CardRegistry::new();
    let weapon = registry.register(Card::equip("blade", CardSubtype::Weapon, Suit::Spade, 5));
    let armor = registry.register(Card::equip("vine", CardSubtype::Armor, Suit::Club, 2));
    let (mut logic, p) = seated(registry, 2);
    give(&mut logic, p[0], &[weapon, armor]);

    use_card(&mut logic, p[0], weapon, &[]);
    use_card(&mut logic, p[0], armor, &[]);

    let equips = logic.state().player_cards(p[0], AreaType::Equip);
    assert!(equips.contains(&weapon));
    assert!(equips.contains(&armor));
    assert!(logic.discard_pile().is_empty());
}

// === Delayed tricks ===

#[test]
fn test_delayed_trick_waits_for_judge() {
    let mut registry = CardRegistry::new();
    let lightning = registry.register(Card::trick("lightning", CardSubtype::Delayed, Suit::Spade, 1));
    registry.register_script("lightning", Arc::new(Lightning));
    let (mut logic, p) = seated(registry, 2);
    give(&mut logic, p[0], &[lightning]);

    use_card(&mut logic, p[0], lightning, &[p[1]]);

    assert!(logic.state().player_cards(p[1], AreaType::DelayedTrick).contains(&lightning));
    assert_eq!(logic.state().player(p[1]).unwrap().hp, 4, "nothing happens on use");
    assert!(logic.table().is_empty());

    logic.play_phases(p[1], &[Phase::Judge]).unwrap();

    assert_eq!(logic.state().player(p[1]).unwrap().hp, 1);
    assert!(logic.state().player_cards(p[1], AreaType::DelayedTrick).is_empty());
    assert!(logic.state().player_cards(p[1], AreaType::Judge).is_empty());
    assert!(logic.discard_pile().contains(&lightning));
}

#[test]
fn test_judged_card_moved_by_effect_stays_put() {
    let mut registry = CardRegistry::new();
    let boomerang = registry.register(Card::trick("boomerang", CardSubtype::Delayed, Suit::Club, 3));
    registry.register_script("boomerang", Arc::new(Boomerang));
    let (mut logic, p) = seated(registry, 2);
    give(&mut logic, p[0], &[boomerang]);

    use_card(&mut logic, p[0], boomerang, &[p[1]]);
    logic.play_phases(p[1], &[Phase::Judge]).unwrap();

    assert!(logic.state().player_cards(p[0], AreaType::Hand).contains(&boomerang));
    assert!(!logic.discard_pile().contains(&boomerang));
}

#[test]
fn test_judge_resolves_newest_first() {
    let mut registry = CardRegistry::new();
    let older = registry.register(Card::trick("lightning", CardSubtype::Delayed, Suit::Spade, 1));
    let newer = registry.register(Card::trick("boomerang", CardSubtype::Delayed, Suit::Club, 3));
    registry.register_script("lightning", Arc::new(Lightning));
    registry.register_script("boomerang", Arc::new(Boomerang));
    let (mut logic, p) = seated(registry, 2);
    give(&mut logic, p[0], &[older, newer]);
    use_card(&mut logic, p[0], older, &[p[1]]);
    use_card(&mut logic, p[0], newer, &[p[1]]);

    let batches = Arc::new(Mutex::new(Vec::new()));
    logic.register_trigger(Arc::new(MoveLog {
        batches: Arc::clone(&batches),
    }));
    logic.play_phases(p[1], &[Phase::Judge]).unwrap();

    let batches = batches.lock().unwrap();
    let first_judged = batches
        .iter()
        .flatten()
        .find(|mv| mv.to.area_type == AreaType::Judge)
        .unwrap();
    assert_eq!(first_judged.cards, vec![newer]);
}

// === Composite cards ===

#[test]
fn test_composite_card_moves_every_subcard() {
    let mut registry = CardRegistry::new();
    let a = registry.register(Card::basic("jink", Suit::Heart, 2));
    let b = registry.register(Card::basic("jink", Suit::Club, 9));
    let (mut logic, p) = seated(registry, 2);
    give(&mut logic, p[0], &[a, b]);

    let staged = Arc::new(Mutex::new(Vec::new()));
    struct TableWatch {
        staged: Arc<Mutex<Vec<usize>>>,
    }
    impl TriggerHandler for TableWatch {
        fn name(&self) -> &str {
            "table_watch"
        }
        fn events(&self) -> &[EventType] {
            &[EventType::CardUsed]
        }
        fn on_event(
            &self,
            logic: &mut GameLogic,
            _event: EventType,
            _player: Option<PlayerId>,
            _data: &mut EventData<'_>,
        ) -> EngineResult<bool> {
            self.staged.lock().unwrap().push(logic.table().len());
            Ok(false)
        }
    }
    logic.register_trigger(Arc::new(TableWatch {
        staged: Arc::clone(&staged),
    }));

    let mut slash = Card::virtual_basic("slash");
    slash.add_subcard(logic.find_card(a).unwrap());
    slash.add_subcard(logic.find_card(b).unwrap());
    logic
        .use_card(CardUseStruct::new(p[0], slash).with_targets([p[1]]))
        .unwrap();

    assert_eq!(*staged.lock().unwrap(), vec![2], "both subcards staged together");
    assert!(logic.state().player_cards(p[0], AreaType::Hand).is_empty());
    assert!(logic.table().is_empty());
    let discard = logic.discard_pile();
    assert!(discard.contains(&a) && discard.contains(&b));
}

#[test]
fn test_virtual_card_without_subcards_touches_no_zone() {
    let (mut logic, p) = seated(CardRegistry::new(), 2);
    let batches = Arc::new(Mutex::new(Vec::new()));
    logic.register_trigger(Arc::new(MoveLog {
        batches: Arc::clone(&batches),
    }));

    logic
        .use_card(CardUseStruct::new(p[0], Card::virtual_basic("slash")).with_targets([p[1]]))
        .unwrap();

    assert!(batches.lock().unwrap().is_empty());
}

// === Table sweep ===

/// Shows the target's first hand card by putting it on the table.
struct Reveal;

impl CardScript for Reveal {
    fn on_effect(&self, logic: &mut GameLogic, effect: &mut CardEffectStruct) -> EngineResult<()> {
        let Some(&shown) = logic.state().player_cards(effect.to, AreaType::Hand).front() else {
            return Ok(());
        };
        let mv = CardsMoveStruct::new(vec![shown], Area::new(AreaType::Table))
            .with_from(Area::owned(AreaType::Hand, effect.to))
            .open();
        logic.move_card(mv)
    }
}

#[test]
fn test_cards_revealed_during_use_are_swept() {
    let mut registry = CardRegistry::new();
    let fire = registry.register(Card::trick("fire_attack", CardSubtype::SingleTarget, Suit::Heart, 3));
    let peach = registry.register(Card::basic("peach", Suit::Heart, 7));
    let stray = registry.register(Card::basic("wine", Suit::Spade, 9));
    registry.register_script("fire_attack", Arc::new(Reveal));
    let (mut logic, p) = seated(registry, 2);
    give(&mut logic, p[0], &[fire]);
    give(&mut logic, p[1], &[peach]);
    logic
        .move_card(CardsMoveStruct::new(vec![stray], Area::new(AreaType::Table)))
        .unwrap();

    use_card(&mut logic, p[0], fire, &[p[1]]);

    assert_eq!(logic.table().iter().copied().collect::<Vec<_>>(), vec![stray], "earlier cards stay");
    let discard = logic.discard_pile();
    assert!(discard.contains(&fire));
    assert!(discard.contains(&peach));
    assert!(logic.state().player_cards(p[1], AreaType::Hand).is_empty());
}

// === Targets ===

#[test]
fn test_area_trick_orders_targets_from_user() {
    let mut registry = CardRegistry::new();
    let barbarians = registry.register(Card::trick("barbarians", CardSubtype::AreaOfEffect, Suit::Spade, 7));
    let (mut logic, p) = seated(registry, 5);
    give(&mut logic, p[2], &[barbarians]);
    let targets = Arc::new(Mutex::new(Vec::new()));
    logic.register_trigger(Arc::new(EffectLog {
        targets: Arc::clone(&targets),
    }));

    use_card(&mut logic, p[2], barbarians, &[]);

    assert_eq!(*targets.lock().unwrap(), vec![p[3], p[4], p[0], p[1]]);
}

#[test]
fn test_area_trick_skips_dead_players() {
    let mut registry = CardRegistry::new();
    let barbarians = registry.register(Card::trick("barbarians", CardSubtype::AreaOfEffect, Suit::Spade, 7));
    let (mut logic, p) = seated(registry, 4);
    give(&mut logic, p[0], &[barbarians]);
    logic.kill(p[2]).unwrap();
    let targets = Arc::new(Mutex::new(Vec::new()));
    logic.register_trigger(Arc::new(EffectLog {
        targets: Arc::clone(&targets),
    }));

    use_card(&mut logic, p[0], barbarians, &[]);

    assert_eq!(*targets.lock().unwrap(), vec![p[1], p[3]]);
}

#[test]
fn test_named_targets_are_sorted_by_action_order() {
    let mut registry = CardRegistry::new();
    let harvest = registry.register(Card::trick("harvest", CardSubtype::GlobalEffect, Suit::Heart, 3));
    let (mut logic, p) = seated(registry, 5);
    give(&mut logic, p[2], &[harvest]);
    let targets = Arc::new(Mutex::new(Vec::new()));
    logic.register_trigger(Arc::new(EffectLog {
        targets: Arc::clone(&targets),
    }));

    use_card(&mut logic, p[2], harvest, &[p[1], p[4], p[0]]);

    assert_eq!(*targets.lock().unwrap(), vec![p[4], p[0], p[1]]);
}
