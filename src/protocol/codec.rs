//! Binary wire codec.
//!
//! Values are bincode bodies. Stream transports send them as frames: a
//! little-endian `u32` length followed by the body.

use std::io::{Read, Write};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{EngineError, EngineResult};

/// Largest frame body accepted or produced.
pub const MAX_FRAME_SIZE: usize = 1024 * 1024;

/// Encode a protocol value with bincode.
pub fn encode<T: Serialize>(value: &T) -> EngineResult<Vec<u8>> {
    Ok(bincode::serialize(value)?)
}

/// Decode a protocol value with bincode.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> EngineResult<T> {
    Ok(bincode::deserialize(bytes)?)
}

/// Write one length-prefixed frame.
pub fn write_frame<T: Serialize, W: Write>(writer: &mut W, value: &T) -> EngineResult<()> {
    let body = encode(value)?;
    let len = frame_len(body.len())?;
    // Prefix and body in one write so readers never see a bare prefix.
    let mut frame = Vec::with_capacity(4 + body.len());
    frame.extend_from_slice(&len.to_le_bytes());
    frame.extend(body);
    writer.write_all(&frame)?;
    Ok(())
}

/// Read one length-prefixed frame.
pub fn read_frame<T: DeserializeOwned, R: Read>(reader: &mut R) -> EngineResult<T> {
    let mut prefix = [0; 4];
    reader.read_exact(&mut prefix)?;
    let len = u32::from_le_bytes(prefix) as usize;
    if len > MAX_FRAME_SIZE {
        return Err(EngineError::Protocol(format!(
            "frame of {len} bytes exceeds the {MAX_FRAME_SIZE} byte limit"
        )));
    }

    let mut body = vec![0; len];
    reader.read_exact(&mut body)?;
    decode(&body)
}

fn frame_len(len: usize) -> EngineResult<u32> {
    if len > MAX_FRAME_SIZE {
        return Err(EngineError::Protocol(format!(
            "encoded value of {len} bytes exceeds the {MAX_FRAME_SIZE} byte limit"
        )));
    }
    u32::try_from(len).map_err(|_| EngineError::Protocol(format!("frame length {len} overflows")))
}
