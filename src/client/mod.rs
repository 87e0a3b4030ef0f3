//! Observer side of the protocol.

mod mirror;

pub use mirror::{ClientEvent, ClientMirror, ClientPlayer, Slot};
