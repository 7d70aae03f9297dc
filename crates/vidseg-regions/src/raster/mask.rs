//! Single-channel masks of selected regions.

use super::for_each_run;
use crate::hierarchy::LevelResolver;
use crate::model::{Frame, HierarchyLevel, RegionId};
use crate::{Error, Result};

/// Geometry of an interleaved 8-bit target buffer.
///
/// Pixel `(x, y)` of the painted channel lives at
/// `y * row_stride + x * channels + channel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskLayout {
    pub width: u32,
    pub height: u32,
    pub channels: usize,
    pub channel: usize,
    pub row_stride: usize,
}

impl MaskLayout {
    /// Tightly packed rows, painting channel 0.
    pub fn packed(width: u32, height: u32, channels: usize) -> Self {
        Self {
            width,
            height,
            channels,
            channel: 0,
            row_stride: width as usize * channels,
        }
    }

    /// Paint `channel` instead of channel 0.
    pub fn with_channel(mut self, channel: usize) -> Self {
        self.channel = channel;
        self
    }

    /// Smallest buffer length that holds every addressed byte.
    pub fn required_len(&self) -> usize {
        if self.width == 0 || self.height == 0 {
            return 0;
        }
        (self.height as usize - 1) * self.row_stride + self.width as usize * self.channels
    }

    fn validate(&self, buf_len: usize) -> Result<()> {
        if self.channels == 0 || self.channel >= self.channels {
            return Err(Error::geometry(format!(
                "mask channel {} not within {} channels",
                self.channel, self.channels
            )));
        }
        if self.row_stride < self.width as usize * self.channels {
            return Err(Error::geometry(format!(
                "row stride {} shorter than {} pixels of {} channels",
                self.row_stride, self.width, self.channels
            )));
        }
        let required = self.required_len();
        if buf_len < required {
            return Err(Error::geometry(format!(
                "mask buffer holds {} bytes, layout needs {}",
                buf_len, required
            )));
        }
        Ok(())
    }

    fn fill_run(&self, buf: &mut [u8], y: u32, left: u32, right: u32, value: u8) {
        let row = y as usize * self.row_stride + self.channel;
        for x in left as usize..=right as usize {
            buf[row + x * self.channels] = value;
        }
    }
}

/// Paint each region whose resolved id appears in `colors` with the paired
/// value. Other bytes of `buf` are left untouched.
///
/// If an id appears more than once, the first pair wins.
pub fn render_mask(
    frame: &Frame,
    colors: &[(RegionId, u8)],
    buf: &mut [u8],
    layout: MaskLayout,
    level: usize,
    external: Option<&[HierarchyLevel]>,
) -> Result<()> {
    layout.validate(buf.len())?;
    let resolver = LevelResolver::new(frame, level, external)?;

    let mut sorted = colors.to_vec();
    sorted.sort_by_key(|&(id, _)| id);

    for region in &frame.regions {
        let id = resolver.resolve(region)?;
        let pos = sorted.partition_point(|&(candidate, _)| candidate < id);
        let Some(&(found, value)) = sorted.get(pos) else {
            continue;
        };
        if found != id {
            continue;
        }
        for_each_run(region, layout.width, layout.height, |y, left, right| {
            layout.fill_run(buf, y, left, right, value)
        })?;
    }
    Ok(())
}

/// Paint each region whose resolved id appears in `ids` with `color`.
pub fn render_mask_uniform(
    frame: &Frame,
    ids: &[RegionId],
    color: u8,
    buf: &mut [u8],
    layout: MaskLayout,
    level: usize,
    external: Option<&[HierarchyLevel]>,
) -> Result<()> {
    layout.validate(buf.len())?;
    let resolver = LevelResolver::new(frame, level, external)?;

    let mut sorted = ids.to_vec();
    sorted.sort_unstable();

    for region in &frame.regions {
        let id = resolver.resolve(region)?;
        if sorted.binary_search(&id).is_err() {
            continue;
        }
        for_each_run(region, layout.width, layout.height, |y, left, right| {
            layout.fill_run(buf, y, left, right, color)
        })?;
    }
    Ok(())
}
