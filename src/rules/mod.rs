//! The rule engine.
//!
//! `GameLogic` is split by pipeline:
//! - `engine`: ownership, accessors and the trigger dispatcher
//! - `movement`: batched card moves and observer notification
//! - `resolution`: card use, card effect, damage and death
//! - `phase`: the turn phase machine
//! - `game_rule`: default phase behavior, installed as a global handler
//! - `round`: game setup and the round loop

pub mod engine;
mod game_rule;
mod movement;
mod phase;
mod resolution;
mod round;

pub use engine::{GameLogic, GameResult};
pub use game_rule::GameRule;
