//! vidseg-container: random-access container for segmentation frames
//!
//! A container stores a sequence of opaque frame payloads together with a
//! trailing index of byte offsets and timestamps, so any frame can be located
//! with a single seek.
//!
//! # Modules
//!
//! - `format` - On-disk layout: fixed header and footer entries
//! - `writer` - Sequential writer that finalizes the trailing index
//! - `reader` - Index-loading reader with two-phase per-frame reads
//!
//! # Layout
//!
//! All integers are little-endian.
//!
//! ```text
//! Header (offset 0):   i32 frame_count, i64 footer_offset
//! Frame records:       i32 payload_size, payload bytes
//! Footer (at offset):  frame_count x (i64 frame_offset, i64 timestamp)
//! ```
//!
//! The header is written as a placeholder (`0`, `0`) when the file is opened
//! and patched in place once the footer has been appended.

pub mod error;
pub mod format;
pub mod reader;
pub mod writer;

pub use error::{Error, Result};
pub use format::{FooterEntry, Header};
pub use reader::ContainerReader;
pub use writer::ContainerWriter;
