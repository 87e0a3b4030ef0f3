//! Default phase behavior.
//!
//! `GameRule` is the global handler behind `PhaseProceeding`. Skills that
//! replace a phase's default behavior answer `PhaseStart` (or
//! `PhaseProceeding` themselves) before it runs.

use log::{debug, warn};

use super::engine::GameLogic;
use crate::core::{Phase, PlayerId};
use crate::error::{EngineError, EngineResult};
use crate::triggers::{CardEffectStruct, CardsMoveStruct, EventData, EventType, TriggerHandler};
use crate::zones::{Area, AreaType, ZoneKey};

/// Built-in phase rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct GameRule;

impl TriggerHandler for GameRule {
    fn name(&self) -> &str {
        "game_rule"
    }

    fn events(&self) -> &[EventType] {
        &[EventType::PhaseProceeding]
    }

    fn on_event(
        &self,
        logic: &mut GameLogic,
        _event: EventType,
        player: Option<PlayerId>,
        _data: &mut EventData<'_>,
    ) -> EngineResult<bool> {
        let Some(player) = player else {
            return Ok(false);
        };
        let Some(phase) = logic.state().player(player).map(|p| p.phase) else {
            return Ok(false);
        };

        match phase {
            Phase::Judge => judge(logic, player)?,
            Phase::Draw => {
                let count = logic.config().draw_per_phase;
                logic.draw_cards(player, count)?;
            }
            Phase::Play => play(logic, player)?,
            Phase::Discard => discard(logic, player)?,
            _ => {}
        }
        Ok(false)
    }
}

/// Resolve delayed tricks, newest first. Each moves to the judge zone,
/// takes effect, and is discarded if it is still there.
fn judge(logic: &mut GameLogic, player: PlayerId) -> EngineResult<()> {
    let delayed_zone = ZoneKey::owned(AreaType::DelayedTrick, player);
    let judge_zone = ZoneKey::owned(AreaType::Judge, player);
    let mut pending: Vec<_> = logic.state().zones.cards(&delayed_zone).into_iter().collect();
    pending.reverse();

    for card_id in pending {
        if !logic.state().is_alive(player) {
            break;
        }
        // An earlier trick may have moved this one.
        if !logic.state().zones.contains(&delayed_zone, card_id) {
            continue;
        }
        let Some(card) = logic.find_card(card_id) else {
            continue;
        };

        let reveal = CardsMoveStruct::new(vec![card_id], Area::from(&judge_zone))
            .with_from(Area::from(&delayed_zone))
            .open();
        logic.move_card(reveal)?;

        let mut effect = CardEffectStruct::new(card, None, player);
        logic.take_card_effect(&mut effect)?;

        if logic.state().zones.contains(&judge_zone, card_id) {
            let discard = CardsMoveStruct::new(vec![card_id], Area::new(AreaType::DiscardPile))
                .with_from(Area::from(&judge_zone))
                .open();
            logic.move_card(discard)?;
        }
    }
    Ok(())
}

/// Ask for card uses until the player passes, dies, or wins.
fn play(logic: &mut GameLogic, player: PlayerId) -> EngineResult<()> {
    while logic.state().is_alive(player) && logic.state().alive_count() > 1 {
        let Some(card_use) = logic.activate(player)? else {
            debug!("{} passes", player);
            break;
        };
        match logic.use_card(card_use) {
            Err(EngineError::RuleViolation(violation)) => {
                warn!("use by {} rejected: {}", player, violation);
                break;
            }
            result => result?,
        }
    }
    Ok(())
}

/// Trim the hand down to hp, discarding the most recently gained cards.
fn discard(logic: &mut GameLogic, player: PlayerId) -> EngineResult<()> {
    let Some(hp) = logic.state().player(player).map(|p| p.hp) else {
        return Ok(());
    };
    let keep = usize::try_from(hp).unwrap_or(0);
    let hand = logic.state().player_cards(player, AreaType::Hand);
    if hand.len() <= keep {
        return Ok(());
    }

    let excess: Vec<_> = hand.into_iter().skip(keep).collect();
    debug!("{} discards {} cards", player, excess.len());
    let mv = CardsMoveStruct::new(excess, Area::new(AreaType::DiscardPile))
        .with_from(Area::owned(AreaType::Hand, player))
        .open();
    logic.move_card(mv)
}
