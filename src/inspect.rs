//! Container summaries and point queries.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use vidseg_container::ContainerReader;
use vidseg_regions::{region_id_at, Frame, RegionId};

/// Summary of a segmentation container.
#[derive(Debug, Clone, Serialize)]
pub struct ContainerInfo {
    pub frame_count: usize,
    /// Dimensions and hierarchy depth are taken from frame 0
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub hierarchy_levels: usize,
    pub first_frame_regions: usize,
    pub first_timestamp: Option<i64>,
    pub last_timestamp: Option<i64>,
}

pub fn container_info(path: &Path) -> Result<ContainerInfo> {
    let mut reader = ContainerReader::open(path)
        .with_context(|| format!("Failed to open container: {:?}", path))?;

    let timestamps = reader.timestamps();
    let first_timestamp = timestamps.first().copied();
    let last_timestamp = timestamps.last().copied();
    let frame_count = reader.frame_count();

    let first = if frame_count > 0 {
        Some(read_frame(&mut reader, 0)?)
    } else {
        None
    };

    Ok(ContainerInfo {
        frame_count,
        width: first.as_ref().map(|f| f.frame_width),
        height: first.as_ref().map(|f| f.frame_height),
        hierarchy_levels: first.as_ref().map_or(0, Frame::hierarchy_levels),
        first_frame_regions: first.as_ref().map_or(0, |f| f.regions.len()),
        first_timestamp,
        last_timestamp,
    })
}

/// Id of the region covering `(x, y)` in frame `index` at `level`.
///
/// Frame 0's hierarchy serves as the external hierarchy, as in export.
pub fn query_point(
    path: &Path,
    index: usize,
    x: u32,
    y: u32,
    level: usize,
) -> Result<Option<RegionId>> {
    let mut reader = ContainerReader::open(path)
        .with_context(|| format!("Failed to open container: {:?}", path))?;
    if index >= reader.frame_count() {
        anyhow::bail!(
            "Frame {} out of range, container holds {} frames",
            index,
            reader.frame_count()
        );
    }

    let hierarchy = read_frame(&mut reader, 0)?.hierarchy;
    let frame = read_frame(&mut reader, index)?;

    let id = region_id_at(&frame, x, y, level, Some(hierarchy.as_slice()))
        .with_context(|| format!("Failed to resolve ({}, {}) in frame {}", x, y, index))?;
    Ok(id)
}

fn read_frame<R: std::io::Read + std::io::Seek>(
    reader: &mut ContainerReader<R>,
    index: usize,
) -> Result<Frame> {
    let bytes = reader
        .read_frame_at(index)
        .with_context(|| format!("Failed to read frame {}", index))?;
    Frame::from_bincode(&bytes).with_context(|| format!("Failed to decode frame {}", index))
}
