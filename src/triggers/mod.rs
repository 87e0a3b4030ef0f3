//! Trigger system: event kinds, payloads and handler registry.
//!
//! Rules and skills react to points in the pipeline by implementing
//! [`TriggerHandler`] and registering with [`GameLogic::register_trigger`].
//! A dispatch passes one exclusively borrowed [`EventData`] through every
//! interested handler in order; handlers may mutate it for the ones that
//! follow.
//!
//! ## Example Usage
//!
//! ```
//! use std::sync::Arc;
//!
//! use kingdoms_engine::cards::CardRegistry;
//! use kingdoms_engine::core::{Phase, PlayerId, RoomConfig};
//! use kingdoms_engine::error::EngineResult;
//! use kingdoms_engine::rules::GameLogic;
//! use kingdoms_engine::triggers::{EventData, EventType, TriggerHandler};
//!
//! // "Skip your draw phase."
//! struct NoDraw;
//!
//! impl TriggerHandler for NoDraw {
//!     fn name(&self) -> &str {
//!         "no_draw"
//!     }
//!
//!     fn events(&self) -> &[EventType] {
//!         &[EventType::PhaseChanging]
//!     }
//!
//!     fn on_event(
//!         &self,
//!         _logic: &mut GameLogic,
//!         _event: EventType,
//!         _player: Option<PlayerId>,
//!         data: &mut EventData<'_>,
//!     ) -> EngineResult<bool> {
//!         Ok(data.phase_change().is_some_and(|change| change.to == Phase::Draw))
//!     }
//! }
//!
//! let mut logic = GameLogic::new(RoomConfig::default(), CardRegistry::new());
//! logic.register_trigger(Arc::new(NoDraw));
//! ```
//!
//! [`GameLogic::register_trigger`]: crate::rules::GameLogic::register_trigger

mod event;
mod registry;

pub use event::{
    CardEffectStruct, CardUseStruct, CardsMoveStruct, DamageNature, DamageStruct, EventData,
    EventType, PhaseChangeStruct, Targets, UseReason,
};
pub use registry::{TriggerHandler, TriggerId, TriggerRegistry};
