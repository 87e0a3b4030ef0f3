//! Observer protocol.
//!
//! Commands replicate authoritative state to remote views. Replies carry
//! decisions back. Transport is external; `codec` supplies a default
//! binary encoding and stream framing.

pub mod codec;
mod command;

pub use codec::{decode, encode, read_frame, write_frame};
pub use command::{
    CardSet, Command, Envelope, MoveDescriptor, Reply, ReplyEnvelope, SeatInfo, UseCardIntent,
};
