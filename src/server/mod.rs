//! Server side of a table: remote agents, the room, per-seat operations
//! and the background runner.
//!
//! ## Key Types
//!
//! - `Agent`: a remote decision maker behind one seat
//! - `ChannelAgent`: an `Agent` over tokio channels, with per-request timeout
//! - `Room`: routes notifications and requests, owns abandonment
//! - `TableTask`: a table running on the blocking pool

mod actor;
pub mod agent;
pub mod room;
pub mod runner;

pub use agent::{Agent, ChannelAgent, RemoteEnd};
pub use room::{Room, RoomHandle};
pub use runner::{spawn_table, TableTask};
