//! On-disk layout of the container header and footer.

/// Size of the fixed header in bytes (`i32` frame count + `i64` footer offset).
pub const HEADER_LEN: u64 = 12;

/// Size of one footer entry in bytes (`i64` offset + `i64` timestamp).
pub const FOOTER_ENTRY_LEN: u64 = 16;

/// Size of the length prefix in front of every frame payload.
pub const SIZE_PREFIX_LEN: u64 = 4;

/// Fixed header at the start of every container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Header {
    /// Number of frames in the footer.
    pub frame_count: i32,
    /// Absolute file offset of the first footer entry.
    pub footer_offset: i64,
}

impl Header {
    /// Header written when a file is opened, before any frame is known.
    pub const PLACEHOLDER: Header = Header {
        frame_count: 0,
        footer_offset: 0,
    };

    /// Serialize to the little-endian on-disk form.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN as usize] {
        let mut buf = [0u8; HEADER_LEN as usize];
        buf[0..4].copy_from_slice(&self.frame_count.to_le_bytes());
        buf[4..12].copy_from_slice(&self.footer_offset.to_le_bytes());
        buf
    }

    /// Parse from the little-endian on-disk form.
    pub fn from_bytes(buf: &[u8; HEADER_LEN as usize]) -> Self {
        Self {
            frame_count: i32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]),
            footer_offset: i64::from_le_bytes([
                buf[4], buf[5], buf[6], buf[7], buf[8], buf[9], buf[10], buf[11],
            ]),
        }
    }

    /// Whether this header still carries the placeholder footer offset.
    pub fn is_placeholder(&self) -> bool {
        self.footer_offset == 0
    }
}

/// One index entry in the trailing footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FooterEntry {
    /// Absolute file offset of the frame's length prefix.
    pub offset: i64,
    /// Presentation timestamp supplied by the writer.
    pub timestamp: i64,
}

impl FooterEntry {
    pub fn to_bytes(&self) -> [u8; FOOTER_ENTRY_LEN as usize] {
        let mut buf = [0u8; FOOTER_ENTRY_LEN as usize];
        buf[0..8].copy_from_slice(&self.offset.to_le_bytes());
        buf[8..16].copy_from_slice(&self.timestamp.to_le_bytes());
        buf
    }

    pub fn from_bytes(buf: &[u8]) -> Self {
        let mut offset = [0u8; 8];
        let mut timestamp = [0u8; 8];
        offset.copy_from_slice(&buf[0..8]);
        timestamp.copy_from_slice(&buf[8..16]);
        Self {
            offset: i64::from_le_bytes(offset),
            timestamp: i64::from_le_bytes(timestamp),
        }
    }
}
