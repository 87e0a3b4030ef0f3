//! # kingdoms-engine
//!
//! Authoritative rule engine for a Three Kingdoms style multiplayer card
//! game.
//!
//! ## Design Principles
//!
//! 1. **One Writer Per Table**: A table's `GameLogic` is driven by a single
//!    thread. Remote decisions are the only suspension point, so zones and
//!    events need no locking.
//!
//! 2. **Events Over Inheritance**: Card categories share one pipeline.
//!    Rules and skills hook into it as trigger handlers that observe and
//!    mutate exclusively borrowed event payloads.
//!
//! 3. **Moves Are The Only Way Cards Travel**: Every zone change is a
//!    batched `CardsMoveStruct`, mirrored to observers with identities
//!    hidden where they may not see them.
//!
//! 4. **Abandonment Unwinds**: A table that loses every agent fails all
//!    pending work with `EngineError::GameFinished`, caught only at the top
//!    of the game loop.
//!
//! ## Modules
//!
//! - `core`: Players, phases, properties, RNG, configuration, table state
//! - `zones`: Zone descriptors and card location tracking
//! - `cards`: Card values, composite cards, catalog, scripts
//! - `effects`: Targeting rules and category behavior of a use
//! - `triggers`: Event kinds, payloads, handler registry
//! - `rules`: `GameLogic`: dispatcher, moves, use/damage, phases, game loop
//! - `server`: Agents, rooms, per-seat operations, table runner
//! - `protocol`: Commands, replies, wire codec
//! - `client`: Observer-side mirror
//! - `error`: Engine error types

pub mod cards;
pub mod client;
pub mod core;
pub mod effects;
pub mod error;
pub mod protocol;
pub mod rules;
pub mod server;
pub mod triggers;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    Controller, GameRng, GameState, Phase, Player, PlayerId, PropertyValue,
    RoomConfig,
};

pub use crate::zones::{Area, AreaType, Direction, ZoneKey, ZoneManager};

pub use crate::cards::{
    Card, CardId, CardRegistry, CardScript, CardSubtype, CardType, Color, Suit,
};

pub use crate::rules::{GameLogic, GameResult, GameRule};

pub use crate::triggers::{
    CardEffectStruct, CardUseStruct, CardsMoveStruct, DamageNature, DamageStruct, EventData,
    EventType, PhaseChangeStruct, TriggerHandler, TriggerId, TriggerRegistry,
};

pub use crate::server::{Agent, ChannelAgent, RemoteEnd, Room, RoomHandle};

pub use crate::protocol::{Command, Envelope, MoveDescriptor, Reply, ReplyEnvelope, UseCardIntent};

pub use crate::client::{ClientEvent, ClientMirror};

pub use crate::error::{EngineError, EngineResult, RuleViolation};
