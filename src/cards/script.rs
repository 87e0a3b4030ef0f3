//! Card scripts: the per-name hooks catalog content plugs into.
//!
//! The engine owns the generic pipeline (targeting, staging, moving,
//! dispatch). What a particular card actually *does* when its effect lands
//! lives in a `CardScript` registered under the card's name.

use crate::core::PlayerId;
use crate::error::EngineResult;
use crate::rules::GameLogic;
use crate::triggers::CardEffectStruct;

/// Hooks for one card name. Every hook defaults to doing nothing.
pub trait CardScript: Send + Sync {
    /// Apply the card's effect to `effect.to`.
    fn on_effect(&self, _logic: &mut GameLogic, _effect: &mut CardEffectStruct) -> EngineResult<()> {
        Ok(())
    }

    /// Called instead of `on_effect` when a cancelable effect was nullified.
    fn on_nullified(&self, _logic: &mut GameLogic, _target: PlayerId) -> EngineResult<()> {
        Ok(())
    }

    /// Whether `player` may use this card proactively right now.
    fn is_available(&self, _logic: &GameLogic, _player: PlayerId) -> bool {
        true
    }
}
