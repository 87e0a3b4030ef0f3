//! Core table types: players, properties, RNG, configuration and state.

pub mod config;
pub mod player;
pub mod property;
pub mod rng;
pub mod state;

pub use config::{RoomConfig, DEFAULT_REQUEST_TIMEOUT};
pub use player::{Controller, Phase, Player, PlayerId};
pub use property::PropertyValue;
pub use rng::GameRng;
pub use state::GameState;
