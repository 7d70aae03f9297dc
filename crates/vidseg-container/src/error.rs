//! Error types for vidseg-container.

use std::io;
use thiserror::Error;

/// Result type for vidseg-container operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for vidseg-container operations.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed header, footer or frame record.
    #[error("Invalid container: {0}")]
    Protocol(String),

    /// Requested frame index is outside the container.
    #[error("Invalid frame index: {index} (frame count: {count})")]
    FrameIndexOutOfRange { index: usize, count: usize },

    /// A frame size was requested after the last frame was consumed.
    #[error("Read past last frame (frame count: {count})")]
    EndOfFrames { count: usize },

    /// `read_frame_size` and `read_frame` were not called in alternation.
    #[error("Frame reads out of order: {0}")]
    ReadOrder(&'static str),

    /// Caller buffer does not match the announced payload size.
    #[error("Frame buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSize { expected: usize, actual: usize },
}

impl Error {
    /// Create a protocol error.
    pub fn protocol(msg: impl Into<String>) -> Self {
        Self::Protocol(msg.into())
    }
}
