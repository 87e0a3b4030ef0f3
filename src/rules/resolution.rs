//! Card use, card effect and damage pipelines.

use log::{debug, info};

use super::engine::GameLogic;
use crate::core::PlayerId;
use crate::effects;
use crate::error::{EngineResult, RuleViolation};
use crate::protocol::Command;
use crate::triggers::{
    CardEffectStruct, CardUseStruct, CardsMoveStruct, DamageStruct, EventData, EventType,
};
use crate::zones::{Area, AreaType};

impl GameLogic {
    /// Resolve one use of a card.
    ///
    /// The target list is checked before anything changes; an infeasible
    /// use is a `RuleViolation`. Then: usage history, `on_use`, `CardUsed`,
    /// per-target resolution, `CardFinished`.
    pub fn use_card(&mut self, mut card_use: CardUseStruct) -> EngineResult<()> {
        let from = card_use.from;
        if !self.state.is_alive(from) {
            return Err(RuleViolation::UnknownPlayer(from).into());
        }
        if !effects::target_feasible(&card_use.card, &card_use.to, from) {
            return Err(RuleViolation::InfeasibleTargets.into());
        }

        debug!("{} uses {} on {:?}", from, card_use.card.name(), card_use.to);
        if card_use.add_history {
            let name = card_use.card.name().to_string();
            self.add_card_history(from, &name, 1);
        }

        let table_before: Vec<_> = self.table().into_iter().collect();
        effects::on_use(self, &mut card_use)?;
        self.trigger(EventType::CardUsed, Some(from), &mut EventData::CardUse(&mut card_use))?;
        effects::resolve_use(self, &mut card_use, &table_before)?;
        self.trigger(EventType::CardFinished, Some(from), &mut EventData::CardUse(&mut card_use))?;
        Ok(())
    }

    /// Apply one card effect to its target.
    ///
    /// `CardEffect` handlers may answer the effect outright or mark it
    /// nullified. A nullified cancelable effect runs the script's
    /// `on_nullified`; anything else fires `CardEffected` and runs
    /// `on_effect`.
    pub fn take_card_effect(&mut self, effect: &mut CardEffectStruct) -> EngineResult<()> {
        if self.trigger(EventType::CardEffect, Some(effect.to), &mut EventData::CardEffect(&mut *effect))? {
            return Ok(());
        }

        let script = self.cards().script(effect.card.name());
        if effect.card.is_cancelable() && effect.nullified {
            debug!("{} nullified on {}", effect.card.name(), effect.to);
            if let Some(script) = script {
                script.on_nullified(self, effect.to)?;
            }
            return Ok(());
        }

        if self.trigger(EventType::CardEffected, Some(effect.to), &mut EventData::CardEffect(&mut *effect))? {
            return Ok(());
        }
        if let Some(script) = script {
            script.on_effect(self, effect)?;
        }
        Ok(())
    }

    /// Deal damage.
    ///
    /// `DamageCaused` (source's view) and `DamageInflicted` (target's view)
    /// may rewrite or prevent it. Applied damage lowers hp, is announced,
    /// fires `Damaged` and `DamageComplete`, and kills at zero hp.
    pub fn damage(&mut self, mut damage: DamageStruct) -> EngineResult<()> {
        if let Some(from) = damage.from {
            self.trigger(EventType::DamageCaused, Some(from), &mut EventData::Damage(&mut damage))?;
            if damage.prevented {
                return Ok(());
            }
        }

        let target = damage.to;
        self.trigger(EventType::DamageInflicted, Some(target), &mut EventData::Damage(&mut damage))?;
        if damage.prevented || damage.damage <= 0 {
            return Ok(());
        }

        let target = damage.to;
        let player = self
            .state
            .player_mut(target)
            .ok_or(RuleViolation::UnknownPlayer(target))?;
        if !player.alive {
            return Ok(());
        }
        player.hp = player.hp.saturating_sub(damage.damage);
        info!("{} takes {} {:?} damage (hp {})", target, damage.damage, damage.nature, player.hp);

        self.broadcast_property(target, "hp");
        self.room.broadcast(&Command::Damage {
            target,
            nature: damage.nature,
            amount: damage.damage,
        });

        self.trigger(EventType::Damaged, Some(target), &mut EventData::Damage(&mut damage))?;
        self.trigger(EventType::DamageComplete, Some(target), &mut EventData::Damage(&mut damage))?;

        let dying = self.state.player(target).is_some_and(|p| p.alive && p.hp <= 0);
        if dying {
            self.kill(target)?;
        }
        Ok(())
    }

    /// Kill a player: mark dead, announce, fire `Died`, discard their cards.
    pub fn kill(&mut self, player: PlayerId) -> EngineResult<()> {
        let record = self
            .state
            .player_mut(player)
            .ok_or(RuleViolation::UnknownPlayer(player))?;
        if !record.alive {
            return Ok(());
        }
        record.alive = false;
        info!("{} died", player);

        self.broadcast_property(player, "alive");
        self.trigger(EventType::Died, Some(player), &mut EventData::None)?;

        let moves: Vec<_> = [AreaType::Hand, AreaType::Equip, AreaType::DelayedTrick, AreaType::Judge]
            .into_iter()
            .filter_map(|area_type| {
                let cards = self.state.player_cards(player, area_type);
                (!cards.is_empty()).then(|| {
                    CardsMoveStruct::new(cards.into_iter().collect(), Area::new(AreaType::DiscardPile))
                        .with_from(Area::owned(area_type, player))
                        .open()
                })
            })
            .collect();
        self.move_cards(moves)
    }
}
