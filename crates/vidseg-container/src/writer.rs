//! Sequential container writer.

use crate::format::{FooterEntry, Header, HEADER_LEN};
use crate::{Error, Result};
use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Writes frame payloads in call order and finalizes the trailing index.
///
/// Frame index equals call order. All methods take `&mut self`, so writes to
/// one container are serialized by construction.
pub struct ContainerWriter<W: Write + Seek> {
    writer: W,
    /// Current write cursor, tracked to avoid a seek per frame.
    position: u64,
    entries: Vec<FooterEntry>,
    path: Option<PathBuf>,
}

impl ContainerWriter<BufWriter<File>> {
    /// Create (or truncate) a container file and write the placeholder header.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)?;
        let mut writer = Self::new(BufWriter::new(file))?;
        writer.path = Some(path.to_path_buf());
        tracing::debug!("Opened container for writing: {}", path.display());
        Ok(writer)
    }

    /// Finalize the current file and continue writing into `path`.
    ///
    /// Used to split a long video across several containers. The in-memory
    /// index is reset; frame numbering restarts at 0 in the new file.
    ///
    /// The new file is created before the current one is finalized. If that
    /// fails, the writer keeps appending to the current, still open file.
    pub fn flush_and_reopen<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let next = Self::create(path)?;
        self.write_index()?;
        // Dropping the previous writer closes the finished file.
        drop(std::mem::replace(self, next));
        Ok(())
    }
}

impl<W: Write + Seek> ContainerWriter<W> {
    /// Wrap a seekable writer positioned at the start of an empty container.
    pub fn new(mut writer: W) -> Result<Self> {
        writer.write_all(&Header::PLACEHOLDER.to_bytes())?;
        Ok(Self {
            writer,
            position: HEADER_LEN,
            entries: Vec::new(),
            path: None,
        })
    }

    /// Append one frame payload with its timestamp.
    pub fn write_frame(&mut self, payload: &[u8], timestamp: i64) -> Result<()> {
        let size = i32::try_from(payload.len()).map_err(|_| {
            Error::protocol(format!(
                "frame payload of {} bytes exceeds the i32 size prefix",
                payload.len()
            ))
        })?;

        let offset = i64::try_from(self.position)
            .map_err(|_| Error::protocol("container offset exceeds i64"))?;

        self.writer.write_all(&size.to_le_bytes())?;
        self.writer.write_all(payload)?;

        self.entries.push(FooterEntry { offset, timestamp });
        self.position += 4 + payload.len() as u64;

        tracing::trace!(
            "Wrote frame {} ({} bytes, ts {}) at offset {}",
            self.entries.len() - 1,
            payload.len(),
            timestamp,
            offset
        );
        Ok(())
    }

    /// Number of frames written so far.
    pub fn frame_count(&self) -> usize {
        self.entries.len()
    }

    /// Timestamps of the frames written so far, in write order.
    pub fn timestamps(&self) -> Vec<i64> {
        self.entries.iter().map(|e| e.timestamp).collect()
    }

    /// Write the footer, patch the header and return the inner writer.
    ///
    /// Dropping the returned writer closes the underlying file.
    pub fn finalize(mut self) -> Result<W> {
        self.write_index()?;
        Ok(self.writer)
    }

    fn write_index(&mut self) -> Result<()> {
        let frame_count = i32::try_from(self.entries.len())
            .map_err(|_| Error::protocol("frame count exceeds i32"))?;
        let footer_offset = i64::try_from(self.position)
            .map_err(|_| Error::protocol("container offset exceeds i64"))?;

        for entry in &self.entries {
            self.writer.write_all(&entry.to_bytes())?;
        }

        let header = Header {
            frame_count,
            footer_offset,
        };
        self.writer.seek(SeekFrom::Start(0))?;
        self.writer.write_all(&header.to_bytes())?;
        self.writer.flush()?;

        match &self.path {
            Some(path) => tracing::debug!(
                "Finalized container {}: {} frames, footer at {}",
                path.display(),
                frame_count,
                footer_offset
            ),
            None => tracing::debug!(
                "Finalized container: {} frames, footer at {}",
                frame_count,
                footer_offset
            ),
        }

        self.entries.clear();
        Ok(())
    }
}
