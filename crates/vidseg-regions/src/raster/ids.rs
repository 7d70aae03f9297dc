//! Id images and point queries.

use super::for_each_run;
use crate::hierarchy::LevelResolver;
use crate::model::{Frame, HierarchyLevel, RegionId};
use crate::{Error, Result};

/// Row-major `[height][width]` image of resolved region ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdImage {
    pub width: u32,
    pub height: u32,
    pub ids: Vec<RegionId>,
}

impl IdImage {
    /// Zero-filled image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ids: vec![0; width as usize * height as usize],
        }
    }

    pub fn get(&self, x: u32, y: u32) -> Option<RegionId> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.ids.get(y as usize * self.width as usize + x as usize).copied()
    }

    /// Iterate rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[RegionId]> {
        self.ids.chunks(self.width.max(1) as usize)
    }
}

/// Write every region's resolved id into `out` at its scanline intervals.
pub fn write_id_image(
    frame: &Frame,
    level: usize,
    external: Option<&[HierarchyLevel]>,
    out: &mut IdImage,
) -> Result<()> {
    let width = out.width as usize;
    let expected = width * out.height as usize;
    if out.ids.len() != expected {
        return Err(Error::geometry(format!(
            "id image holds {} ids, {}x{} needs {}",
            out.ids.len(),
            out.width,
            out.height,
            expected
        )));
    }
    let resolver = LevelResolver::new(frame, level, external)?;

    for region in &frame.regions {
        let id = resolver.resolve(region)?;
        for_each_run(region, out.width, out.height, |y, left, right| {
            let row = y as usize * width;
            out.ids[row + left as usize..=row + right as usize].fill(id);
        })?;
    }
    Ok(())
}

/// Id image of `frame` at `level`, sized to the frame.
pub fn id_image(
    frame: &Frame,
    level: usize,
    external: Option<&[HierarchyLevel]>,
) -> Result<IdImage> {
    let mut out = IdImage::new(frame.frame_width, frame.frame_height);
    write_id_image(frame, level, external, &mut out)?;
    Ok(out)
}

/// Resolved id of the region covering `(x, y)`, or `None` if no region does.
pub fn region_id_at(
    frame: &Frame,
    x: u32,
    y: u32,
    level: usize,
    external: Option<&[HierarchyLevel]>,
) -> Result<Option<RegionId>> {
    let resolver = LevelResolver::new(frame, level, external)?;

    for region in &frame.regions {
        let Some(scanline) = region.scanline_at(y) else {
            continue;
        };
        if scanline.interval_containing(x).is_some() {
            return resolver.resolve(region).map(Some);
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Region;

    /// Two regions interleaved as a 4x4 checkerboard.
    fn checkerboard() -> Frame {
        let even: &[(u32, u32)] = &[(0, 0), (2, 2)];
        let odd: &[(u32, u32)] = &[(1, 1), (3, 3)];
        let mut frame = Frame::new(4, 4);
        frame.regions = vec![
            Region::from_rows(7, 0, 0, &[even, odd, even, odd]),
            Region::from_rows(3, 1, 0, &[odd, even, odd, even]),
        ];
        frame
    }

    #[test]
    fn test_checkerboard_id_image() {
        let image = id_image(&checkerboard(), 0, None).unwrap();
        let expected: Vec<RegionId> = vec![
            7, 3, 7, 3, //
            3, 7, 3, 7, //
            7, 3, 7, 3, //
            3, 7, 3, 7,
        ];
        assert_eq!(image.ids, expected);
        assert_eq!(image.rows().count(), 4);
    }

    #[test]
    fn test_every_pixel_written_once() {
        let frame = checkerboard();
        let mut coverage = vec![0u32; frame.pixel_count()];
        for region in &frame.regions {
            for_each_run(region, 4, 4, |y, l, r| {
                for x in l..=r {
                    coverage[(y * 4 + x) as usize] += 1;
                }
            })
            .unwrap();
        }
        assert!(coverage.iter().all(|&c| c == 1));
    }

    #[test]
    fn test_id_image_at_level_one() {
        let hierarchy = vec![HierarchyLevel::new(vec![0, 0])];
        let image = id_image(&checkerboard(), 1, Some(hierarchy.as_slice())).unwrap();
        assert_eq!(image.get(0, 0), Some(0));
        assert_eq!(image.get(1, 0), Some(1));
        assert_eq!(image.get(4, 0), None);
    }

    #[test]
    fn test_id_image_requires_hierarchy_above_level_zero() {
        let result = id_image(&checkerboard(), 1, None);
        assert!(matches!(result, Err(Error::MissingHierarchy { .. })));
    }

    #[test]
    fn test_mismatched_id_buffer_rejected() {
        let mut out = IdImage::new(4, 4);
        out.ids.truncate(10);
        let result = write_id_image(&checkerboard(), 0, None, &mut out);
        assert!(matches!(result, Err(Error::Geometry(_))));
    }

    #[test]
    fn test_point_query_interval_edges() {
        let mut frame = Frame::new(6, 1);
        frame.regions = vec![
            Region::from_rows(0, 0, 0, &[&[(0, 2)]]),
            Region::from_rows(1, 0, 0, &[&[(3, 4)]]),
        ];

        assert_eq!(region_id_at(&frame, 2, 0, 0, None).unwrap(), Some(0));
        assert_eq!(region_id_at(&frame, 3, 0, 0, None).unwrap(), Some(1));
        assert_eq!(region_id_at(&frame, 4, 0, 0, None).unwrap(), Some(1));
        // Column 5 is not covered by any region.
        assert_eq!(region_id_at(&frame, 5, 0, 0, None).unwrap(), None);
        assert_eq!(region_id_at(&frame, 0, 1, 0, None).unwrap(), None);
    }

    #[test]
    fn test_point_query_resolves_level() {
        let hierarchy = vec![HierarchyLevel::new(vec![5, 6]), HierarchyLevel::new(vec![0; 7])];
        let frame = checkerboard();
        assert_eq!(
            region_id_at(&frame, 1, 0, 2, Some(hierarchy.as_slice())).unwrap(),
            Some(6)
        );
        assert_eq!(
            region_id_at(&frame, 0, 0, 9, Some(hierarchy.as_slice())).unwrap(),
            Some(5)
        );
    }
}
