//! Frame payload codec.
//!
//! The container stores frames as opaque byte payloads. [`FrameCodec`] is the
//! seam between the two; [`BincodeCodec`] is the format written by this
//! workspace.

use crate::model::Frame;
use crate::Result;

/// Encodes frames to container payloads and back.
pub trait FrameCodec: Send + Sync {
    fn encode(&self, frame: &Frame) -> Result<Vec<u8>>;
    fn decode(&self, bytes: &[u8]) -> Result<Frame>;
}

/// serde + bincode payload encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct BincodeCodec;

impl FrameCodec for BincodeCodec {
    fn encode(&self, frame: &Frame) -> Result<Vec<u8>> {
        Ok(bincode::serialize(frame)?)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Frame> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl Frame {
    /// Encode with the default codec.
    pub fn to_bincode(&self) -> Result<Vec<u8>> {
        BincodeCodec.encode(self)
    }

    /// Decode with the default codec.
    pub fn from_bincode(bytes: &[u8]) -> Result<Self> {
        BincodeCodec.decode(bytes)
    }
}
