//! Container reader with in-memory frame index.

use crate::format::{FooterEntry, Header, FOOTER_ENTRY_LEN, HEADER_LEN, SIZE_PREFIX_LEN};
use crate::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// Reads frames from a finalized container.
///
/// Per frame, call [`read_frame_size`](Self::read_frame_size) and then
/// [`read_frame`](Self::read_frame) with a buffer of exactly that length.
/// After opening, the cursor sits on frame 0.
pub struct ContainerReader<R> {
    reader: R,
    footer_offset: u64,
    offsets: Vec<i64>,
    timestamps: Vec<i64>,
    /// Index of the frame whose record the cursor is positioned on.
    next_frame: usize,
    /// Size announced by the last `read_frame_size`, consumed by `read_frame`.
    pending_size: Option<usize>,
}

impl ContainerReader<BufReader<File>> {
    /// Open a container file and load its index.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let reader = Self::new(BufReader::new(file))?;
        tracing::debug!(
            "Opened container {}: {} frames",
            path.display(),
            reader.frame_count()
        );
        Ok(reader)
    }
}

impl<R: Read + Seek> ContainerReader<R> {
    /// Read the header and footer from `reader`.
    pub fn new(mut reader: R) -> Result<Self> {
        let file_len = reader.seek(SeekFrom::End(0))?;
        if file_len < HEADER_LEN {
            return Err(Error::protocol(format!(
                "file is {} bytes, shorter than the {}-byte header",
                file_len, HEADER_LEN
            )));
        }

        reader.seek(SeekFrom::Start(0))?;
        let mut header_buf = [0u8; HEADER_LEN as usize];
        reader.read_exact(&mut header_buf)?;
        let header = Header::from_bytes(&header_buf);

        let (frame_count, footer_offset) = validate_header(&header, file_len)?;

        reader.seek(SeekFrom::Start(footer_offset))?;
        let mut footer = vec![0u8; frame_count * FOOTER_ENTRY_LEN as usize];
        reader.read_exact(&mut footer)?;

        let mut offsets = Vec::with_capacity(frame_count);
        let mut timestamps = Vec::with_capacity(frame_count);
        for chunk in footer.chunks_exact(FOOTER_ENTRY_LEN as usize) {
            let entry = FooterEntry::from_bytes(chunk);
            offsets.push(entry.offset);
            timestamps.push(entry.timestamp);
        }

        validate_offsets(&offsets, footer_offset)?;

        // Sequential reading starts at frame 0 without an explicit seek.
        reader.seek(SeekFrom::Start(HEADER_LEN))?;

        Ok(Self {
            reader,
            footer_offset,
            offsets,
            timestamps,
            next_frame: 0,
            pending_size: None,
        })
    }

    /// Number of frames in the container.
    pub fn frame_count(&self) -> usize {
        self.offsets.len()
    }

    /// Timestamps of all frames, in write order.
    pub fn timestamps(&self) -> &[i64] {
        &self.timestamps
    }

    /// Byte offsets of all frame records.
    pub fn offsets(&self) -> &[i64] {
        &self.offsets
    }

    /// Index of the frame the next `read_frame_size` will read.
    pub fn current_frame(&self) -> usize {
        self.next_frame
    }

    /// Reposition the cursor on the record of frame `index`.
    pub fn seek_to_frame(&mut self, index: usize) -> Result<()> {
        let offset = *self
            .offsets
            .get(index)
            .ok_or(Error::FrameIndexOutOfRange {
                index,
                count: self.frame_count(),
            })?;
        self.reader.seek(SeekFrom::Start(offset as u64))?;
        self.next_frame = index;
        self.pending_size = None;
        Ok(())
    }

    /// Read the length prefix of the current frame.
    ///
    /// On a size that disagrees with the index, the cursor is moved back to
    /// the start of the record.
    pub fn read_frame_size(&mut self) -> Result<i32> {
        if self.pending_size.is_some() {
            return Err(Error::ReadOrder(
                "read_frame_size called twice without read_frame",
            ));
        }
        if self.next_frame >= self.frame_count() {
            return Err(Error::EndOfFrames {
                count: self.frame_count(),
            });
        }

        let mut buf = [0u8; SIZE_PREFIX_LEN as usize];
        self.reader.read_exact(&mut buf)?;
        let size = i32::from_le_bytes(buf);

        let record_start = self.offsets[self.next_frame] as u64;
        let record_end = self.record_end(self.next_frame);
        let payload_start = record_start + SIZE_PREFIX_LEN;
        if size < 0 || payload_start + size as u64 != record_end {
            self.reader.seek(SeekFrom::Start(record_start))?;
            return Err(Error::protocol(format!(
                "frame {} announces {} bytes but its record holds {}",
                self.next_frame,
                size,
                record_end.saturating_sub(payload_start)
            )));
        }

        self.pending_size = Some(size as usize);
        Ok(size)
    }

    /// Read the current frame's payload into `buf`.
    ///
    /// `buf` must be exactly as long as the size returned by the preceding
    /// [`read_frame_size`](Self::read_frame_size).
    pub fn read_frame(&mut self, buf: &mut [u8]) -> Result<()> {
        let expected = self
            .pending_size
            .ok_or(Error::ReadOrder("read_frame called before read_frame_size"))?;
        if buf.len() != expected {
            return Err(Error::BufferSize {
                expected,
                actual: buf.len(),
            });
        }

        self.reader.read_exact(buf)?;
        tracing::trace!("Read frame {} ({} bytes)", self.next_frame, expected);

        self.pending_size = None;
        self.next_frame += 1;
        Ok(())
    }

    /// Seek to frame `index` and return its payload.
    pub fn read_frame_at(&mut self, index: usize) -> Result<Vec<u8>> {
        self.seek_to_frame(index)?;
        self.read_next()
    }

    /// Read the payload of the frame under the cursor.
    pub fn read_next(&mut self) -> Result<Vec<u8>> {
        let size = self.read_frame_size()? as usize;
        let mut data = vec![0u8; size];
        self.read_frame(&mut data)?;
        Ok(data)
    }

    /// Fetch raw payloads for a batch of frame indices.
    ///
    /// Reads happen sequentially on this reader's cursor; the returned
    /// payloads can then be decoded independently.
    pub fn read_raw_batch<I>(&mut self, indices: I) -> Result<Vec<(usize, Vec<u8>)>>
    where
        I: IntoIterator<Item = usize>,
    {
        indices
            .into_iter()
            .map(|index| Ok((index, self.read_frame_at(index)?)))
            .collect()
    }

    /// Release the index and the underlying reader.
    pub fn close(self) {
        tracing::debug!("Closed container ({} frames)", self.frame_count());
    }

    /// End of frame `index`'s record: the next record or the footer.
    fn record_end(&self, index: usize) -> u64 {
        self.offsets
            .get(index + 1)
            .map(|&o| o as u64)
            .unwrap_or(self.footer_offset)
    }
}

fn validate_header(header: &Header, file_len: u64) -> Result<(usize, u64)> {
    if header.frame_count < 0 {
        return Err(Error::protocol(format!(
            "negative frame count {}",
            header.frame_count
        )));
    }
    if header.is_placeholder() {
        return Err(Error::protocol("container was never finalized"));
    }
    if header.footer_offset < HEADER_LEN as i64 {
        return Err(Error::protocol(format!(
            "footer offset {} points into the header",
            header.footer_offset
        )));
    }

    let frame_count = header.frame_count as usize;
    let footer_offset = header.footer_offset as u64;
    let footer_end = footer_offset + frame_count as u64 * FOOTER_ENTRY_LEN;
    if footer_end > file_len {
        return Err(Error::protocol(format!(
            "footer of {} entries at {} runs past end of file ({} bytes)",
            frame_count, footer_offset, file_len
        )));
    }

    Ok((frame_count, footer_offset))
}

fn validate_offsets(offsets: &[i64], footer_offset: u64) -> Result<()> {
    let mut previous: Option<i64> = None;
    for (i, &offset) in offsets.iter().enumerate() {
        let in_range = offset >= HEADER_LEN as i64
            && (offset as u64) + SIZE_PREFIX_LEN <= footer_offset;
        let ordered = previous.map_or(true, |p| offset > p);
        if !in_range || !ordered {
            return Err(Error::protocol(format!(
                "frame {} has invalid offset {}",
                i, offset
            )));
        }
        previous = Some(offset);
    }
    Ok(())
}
