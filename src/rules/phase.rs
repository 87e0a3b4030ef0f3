//! Turn phase machine.

use log::debug;

use super::engine::GameLogic;
use crate::core::{Phase, PlayerId};
use crate::error::{EngineResult, RuleViolation};
use crate::triggers::{EventData, EventType, PhaseChangeStruct};

impl GameLogic {
    /// Play a full turn for `player`.
    pub fn play(&mut self, player: PlayerId) -> EngineResult<()> {
        self.play_phases(player, &Phase::TURN)
    }

    /// Play the given phases in order, then end the turn.
    ///
    /// Each phase fires `PhaseChanging` before the phase is set and
    /// announced. If that dispatch is handled the phase is to be skipped,
    /// unless `PhaseSkipping` is handled too. A phase that runs fires
    /// `PhaseStart`, `PhaseProceeding` unless the start was handled, and
    /// `PhaseEnd`.
    ///
    /// A `NotActive` entry ends the list early, as does the player dying.
    /// The turn always closes with a `PhaseChanging` to `NotActive`.
    pub fn play_phases(&mut self, player: PlayerId, phases: &[Phase]) -> EngineResult<()> {
        for &to in phases {
            if to == Phase::NotActive || !self.state.is_alive(player) {
                break;
            }

            let mut change = PhaseChangeStruct {
                from: self.phase_of(player)?,
                to,
            };
            let skip = self.trigger(EventType::PhaseChanging, Some(player), &mut EventData::PhaseChange(&mut change))?;
            self.set_phase(player, change.to)?;

            if skip
                && !self.trigger(EventType::PhaseSkipping, Some(player), &mut EventData::PhaseChange(&mut change))?
            {
                debug!("{} skips {}", player, change.to);
                continue;
            }

            if !self.trigger(EventType::PhaseStart, Some(player), &mut EventData::None)? {
                self.trigger(EventType::PhaseProceeding, Some(player), &mut EventData::None)?;
            }
            self.trigger(EventType::PhaseEnd, Some(player), &mut EventData::None)?;
        }

        let mut change = PhaseChangeStruct {
            from: self.phase_of(player)?,
            to: Phase::NotActive,
        };
        self.trigger(EventType::PhaseChanging, Some(player), &mut EventData::PhaseChange(&mut change))?;
        self.set_phase(player, Phase::NotActive)
    }

    fn phase_of(&self, player: PlayerId) -> EngineResult<Phase> {
        self.state
            .player(player)
            .map(|p| p.phase)
            .ok_or_else(|| RuleViolation::UnknownPlayer(player).into())
    }

    fn set_phase(&mut self, player: PlayerId, phase: Phase) -> EngineResult<()> {
        let record = self
            .state
            .player_mut(player)
            .ok_or(RuleViolation::UnknownPlayer(player))?;
        record.phase = phase;
        self.broadcast_property(player, "phase");
        Ok(())
    }
}
