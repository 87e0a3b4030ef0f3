//! Category behavior of a card use.
//!
//! Behavior is chosen by matching on category and subtype:
//!
//! | card | `on_use` | `resolve_use` |
//! |---|---|---|
//! | equipment | targets default to the user | install, displacing the same slot |
//! | delayed trick | move into the target's delayed-trick zone | nothing |
//! | global / area trick | targets default to everyone else, then as below | as below |
//! | anything else | order targets, stage real cards on the table | one effect per target, sweep what this use left on the table |

use log::warn;

use crate::cards::{CardId, CardSubtype, CardType};
use crate::error::EngineResult;
use crate::rules::GameLogic;
use crate::triggers::{CardEffectStruct, CardUseStruct, CardsMoveStruct, EventData, EventType, Targets};
use crate::zones::{Area, AreaType};

/// Prepare a use: settle targets, fire `PreCardUsed`, stage the cards.
pub fn on_use(logic: &mut GameLogic, card_use: &mut CardUseStruct) -> EngineResult<()> {
    let card_type = card_use.card.card_type();
    let subtype = card_use.card.subtype();

    match (card_type, subtype) {
        (CardType::Equip, _) => {
            if card_use.to.is_empty() {
                card_use.to.push(card_use.from);
            }
            pre_card_used(logic, card_use)
        }
        (CardType::Trick, CardSubtype::Delayed) => {
            pre_card_used(logic, card_use)?;
            let Some(&target) = card_use.to.first() else {
                warn!("delayed trick {} used without a target", card_use.card.name());
                return Ok(());
            };
            let mv = CardsMoveStruct::new(card_use.card.real_ids(), Area::owned(AreaType::DelayedTrick, target)).open();
            logic.move_card(mv)
        }
        (_, CardSubtype::GlobalEffect | CardSubtype::AreaOfEffect) => {
            if card_use.to.is_empty() {
                card_use.to = logic.other_players(card_use.from).into_iter().collect();
            }
            stage_on_table(logic, card_use)
        }
        _ => stage_on_table(logic, card_use),
    }
}

/// Carry out a prepared use.
///
/// `table_before` is the table as it was before `on_use`. Cards that reached
/// the table since then and are still there are discarded afterwards.
pub fn resolve_use(
    logic: &mut GameLogic,
    card_use: &mut CardUseStruct,
    table_before: &[CardId],
) -> EngineResult<()> {
    match (card_use.card.card_type(), card_use.card.subtype()) {
        (CardType::Equip, _) => install_equip(logic, card_use),
        (CardType::Trick, CardSubtype::Delayed) => Ok(()),
        _ => {
            apply_to_targets(logic, card_use)?;
            sweep_table(logic, table_before)
        }
    }
}

fn pre_card_used(logic: &mut GameLogic, card_use: &mut CardUseStruct) -> EngineResult<()> {
    let from = card_use.from;
    logic.trigger(EventType::PreCardUsed, Some(from), &mut EventData::CardUse(card_use))?;
    Ok(())
}

fn stage_on_table(logic: &mut GameLogic, card_use: &mut CardUseStruct) -> EngineResult<()> {
    let mut targets: Vec<_> = card_use.to.to_vec();
    logic.sort_by_action_order(card_use.from, &mut targets);
    card_use.to = targets.into_iter().collect::<Targets>();

    pre_card_used(logic, card_use)?;

    let real = card_use.card.real_ids();
    if real.is_empty() {
        return Ok(());
    }
    logic.move_card(CardsMoveStruct::new(real, Area::new(AreaType::Table)).open())
}

fn apply_to_targets(logic: &mut GameLogic, card_use: &CardUseStruct) -> EngineResult<()> {
    let multiple = card_use.to.len() > 1;
    for &target in &card_use.to {
        if !logic.state().is_alive(target) {
            continue;
        }
        let mut effect = CardEffectStruct::new(card_use.card.clone(), Some(card_use.from), target);
        effect.multiple = multiple;
        effect.nullified = card_use.nullified_list.contains(&target);
        logic.take_card_effect(&mut effect)?;
    }
    Ok(())
}

/// Discard every card on the table that is not in `keep`.
fn sweep_table(logic: &mut GameLogic, keep: &[CardId]) -> EngineResult<()> {
    let leftovers: Vec<_> = logic.table().into_iter().filter(|card| !keep.contains(card)).collect();
    if leftovers.is_empty() {
        return Ok(());
    }
    let mv = CardsMoveStruct::new(leftovers, Area::new(AreaType::DiscardPile))
        .with_from(Area::new(AreaType::Table))
        .open();
    logic.move_card(mv)
}

/// Install equipment on the first target.
///
/// The install and the removal of any same-slot item go out as one batch.
/// The removed item is discarded afterwards only if nothing else claimed it
/// from the table in between.
fn install_equip(logic: &mut GameLogic, card_use: &CardUseStruct) -> EngineResult<()> {
    let real = card_use.card.real_ids();
    let Some(&target) = card_use.to.first() else {
        let discard = CardsMoveStruct::new(real, Area::new(AreaType::DiscardPile)).open();
        return logic.move_card(discard);
    };

    let slot = card_use.card.subtype();
    let displaced = logic
        .state()
        .player_cards(target, AreaType::Equip)
        .iter()
        .copied()
        .find(|&id| logic.state().card(id).is_some_and(|card| card.subtype() == slot));

    let install = CardsMoveStruct::new(real, Area::owned(AreaType::Equip, target)).open();
    let mut moves = vec![install.clone()];
    let uninstall = displaced.map(|old| {
        CardsMoveStruct::new(vec![old], Area::new(AreaType::Table))
            .with_from(Area::owned(AreaType::Equip, target))
            .open()
            .with_origin(install)
    });
    if let Some(uninstall) = &uninstall {
        moves.push(uninstall.clone());
    }
    logic.move_cards(moves)?;

    if let (Some(old), Some(uninstall)) = (displaced, uninstall) {
        if logic.table().contains(&old) {
            let discard = CardsMoveStruct::new(vec![old], Area::new(AreaType::DiscardPile))
                .with_from(Area::new(AreaType::Table))
                .open()
                .with_origin(uninstall);
            logic.move_card(discard)?;
        }
    }
    Ok(())
}
