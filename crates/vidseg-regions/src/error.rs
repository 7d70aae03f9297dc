//! Error types for vidseg-regions.

use thiserror::Error;

use crate::model::RegionId;

/// Result type for vidseg-regions operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for vidseg-regions operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Frame payload could not be encoded or decoded.
    #[error("Codec error: {0}")]
    Codec(String),

    /// A level above 0 was requested but no hierarchy is available.
    #[error("Hierarchy level {level} requested but no hierarchy was found")]
    MissingHierarchy { level: usize },

    /// A parent id points outside its hierarchy level.
    #[error("Corrupt hierarchy: id {id} out of range at level {level} ({len} entries)")]
    CorruptHierarchy {
        level: usize,
        id: RegionId,
        len: usize,
    },

    /// Region geometry does not fit the frame or target buffer.
    #[error("Invalid geometry: {0}")]
    Geometry(String),
}

impl Error {
    /// Create a geometry error.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }
}

impl From<bincode::Error> for Error {
    fn from(err: bincode::Error) -> Self {
        Self::Codec(err.to_string())
    }
}
