//! Segmentation data model.
//!
//! Frames are produced upstream and treated as read-only here. Hierarchy
//! levels are stored as dense arrays indexed by region id, so parent links
//! are plain integers rather than references.

use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::{Error, Result};

/// Region identifier. Dense and 0-based at every hierarchy level.
pub type RegionId = u32;

/// One frame's complete region segmentation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Frame {
    pub frame_width: u32,
    pub frame_height: u32,
    /// Level-0 regions. Their intervals partition the frame.
    pub regions: Vec<Region>,
    /// Embedded hierarchy; empty unless this frame carries it (usually frame 0).
    pub hierarchy: Vec<HierarchyLevel>,
}

impl Frame {
    /// Create an empty frame of the given size.
    pub fn new(frame_width: u32, frame_height: u32) -> Self {
        Self {
            frame_width,
            frame_height,
            regions: Vec::new(),
            hierarchy: Vec::new(),
        }
    }

    /// Whether this frame embeds a non-empty hierarchy.
    pub fn has_hierarchy(&self) -> bool {
        !self.hierarchy.is_empty()
    }

    /// Number of embedded hierarchy levels.
    pub fn hierarchy_levels(&self) -> usize {
        self.hierarchy.len()
    }

    /// Number of pixels in the frame.
    pub fn pixel_count(&self) -> usize {
        self.frame_width as usize * self.frame_height as usize
    }

    /// Find a level-0 region by id.
    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == id)
    }

    /// Check that every region lies inside the frame and every scanline is
    /// sorted, non-overlapping and well-formed.
    pub fn validate(&self) -> Result<()> {
        for region in &self.regions {
            let rows = region.row_span()?;
            if rows.end > self.frame_height {
                return Err(Error::geometry(format!(
                    "region {} spans rows {}..{} beyond frame height {}",
                    region.id, rows.start, rows.end, self.frame_height
                )));
            }
            for (y, scanline) in rows.zip(&region.scanlines) {
                let mut prev_right: Option<u32> = None;
                for interval in &scanline.intervals {
                    if interval.left_x > interval.right_x {
                        return Err(Error::geometry(format!(
                            "region {} row {}: inverted interval {}..={}",
                            region.id, y, interval.left_x, interval.right_x
                        )));
                    }
                    if interval.right_x >= self.frame_width {
                        return Err(Error::geometry(format!(
                            "region {} row {}: interval ends at {} beyond frame width {}",
                            region.id, y, interval.right_x, self.frame_width
                        )));
                    }
                    if prev_right.is_some_and(|p| interval.left_x <= p) {
                        return Err(Error::geometry(format!(
                            "region {} row {}: intervals unsorted or overlapping",
                            region.id, y
                        )));
                    }
                    prev_right = Some(interval.right_x);
                }
            }
        }
        Ok(())
    }
}

/// One labeled area, encoded as one scanline per row starting at `top_y`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Region {
    /// Level-0 id, unique within the frame.
    pub id: RegionId,
    /// Id of the enclosing region at level 1.
    pub parent_id: RegionId,
    /// First row covered by this region.
    pub top_y: u32,
    /// One entry per consecutive row; empty rows keep an empty scanline.
    pub scanlines: Vec<Scanline>,
}

impl Region {
    /// Build a region from per-row `(left_x, right_x)` runs.
    pub fn from_rows(
        id: RegionId,
        parent_id: RegionId,
        top_y: u32,
        rows: &[&[(u32, u32)]],
    ) -> Self {
        Self {
            id,
            parent_id,
            top_y,
            scanlines: rows.iter().map(|runs| Scanline::from_runs(runs)).collect(),
        }
    }

    /// Rows covered by this region, `top_y .. top_y + scanline count`.
    ///
    /// Fails with [`Error::Geometry`] if the last row does not fit in `u32`.
    pub fn row_span(&self) -> Result<Range<u32>> {
        let end = u32::try_from(self.scanlines.len())
            .ok()
            .and_then(|rows| self.top_y.checked_add(rows))
            .ok_or_else(|| {
                Error::geometry(format!(
                    "region {}: {} rows from row {} overflow the row index",
                    self.id,
                    self.scanlines.len(),
                    self.top_y
                ))
            })?;
        Ok(self.top_y..end)
    }

    pub fn contains_row(&self, y: u32) -> bool {
        self.scanline_at(y).is_some()
    }

    /// Scanline for absolute row `y`, if the region spans it.
    pub fn scanline_at(&self, y: u32) -> Option<&Scanline> {
        y.checked_sub(self.top_y)
            .and_then(|offset| self.scanlines.get(offset as usize))
    }

    /// Number of pixels covered.
    pub fn area(&self) -> u64 {
        self.scanlines
            .iter()
            .flat_map(|s| &s.intervals)
            .map(|i| i.len() as u64)
            .sum()
    }
}

/// Horizontal runs of a region within one row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scanline {
    /// Sorted by `left_x`, non-overlapping.
    pub intervals: Vec<Interval>,
}

impl Scanline {
    pub fn from_runs(runs: &[(u32, u32)]) -> Self {
        Self {
            intervals: runs
                .iter()
                .map(|&(left_x, right_x)| Interval { left_x, right_x })
                .collect(),
        }
    }

    /// Interval containing column `x`, found by binary search.
    pub fn interval_containing(&self, x: u32) -> Option<&Interval> {
        let idx = self.intervals.partition_point(|i| i.right_x < x);
        self.intervals.get(idx).filter(|i| i.contains(x))
    }
}

/// Inclusive horizontal run `left_x..=right_x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub left_x: u32,
    pub right_x: u32,
}

impl Interval {
    /// Number of pixels in the run. Inverted runs are empty.
    pub fn len(&self) -> u32 {
        if self.right_x < self.left_x {
            0
        } else {
            self.right_x - self.left_x + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.right_x < self.left_x
    }

    pub fn contains(&self, x: u32) -> bool {
        x >= self.left_x && x <= self.right_x
    }
}

/// Parent links of one hierarchy level.
///
/// `Frame::hierarchy[k]` lists the regions of level `k + 1`: the index is the
/// region id at that level, the value its parent id at level `k + 2`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HierarchyLevel {
    pub parents: Vec<RegionId>,
}

impl HierarchyLevel {
    pub fn new(parents: Vec<RegionId>) -> Self {
        Self { parents }
    }

    /// Parent of `id`, or `None` if `id` is not part of this level.
    pub fn parent_of(&self, id: RegionId) -> Option<RegionId> {
        self.parents.get(id as usize).copied()
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}
