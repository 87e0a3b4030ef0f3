//! Zone system for card locations.
//!
//! Zones are typed containers scoped to the table (draw pile, discard pile,
//! table surface) or to one player (hand, equipment, delayed tricks, judge
//! slots). Zones hold card ids only; the cards themselves live in the
//! catalog.
//!
//! ## Key Types
//!
//! - `AreaType`: Kind of zone
//! - `Area`: Zone descriptor carried by moves (type, owner, direction, name)
//! - `ZoneKey`: Resolved identity of a concrete zone
//! - `ZoneManager`: Card location tracking

pub mod area;
pub mod manager;

pub use area::{Area, AreaType, Direction, ZoneKey};
pub use manager::ZoneManager;
