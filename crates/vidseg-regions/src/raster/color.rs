//! Random-color rendering.

use image::{Rgb, RgbImage};
use sha2::{Digest, Sha256};

use super::for_each_run;
use crate::hierarchy::LevelResolver;
use crate::model::{Frame, HierarchyLevel, RegionId};
use crate::Result;

/// Display color for a resolved region id.
///
/// The first three bytes of SHA-256 over the id's little-endian bytes, each
/// reduced modulo 255. Identical on every platform and run, so a region keeps
/// its color across frames.
pub fn region_color(id: RegionId) -> [u8; 3] {
    let digest = Sha256::digest(id.to_le_bytes());
    [digest[0] % 255, digest[1] % 255, digest[2] % 255]
}

/// Render every region of `frame` in its [`region_color`] at `level`.
///
/// Pixels not covered by any region stay black. With `highlight_boundary`,
/// a pixel whose right or bottom neighbor has a different color is painted
/// black; neighbors are compared before any pixel is blackened.
pub fn render_random_color(
    frame: &Frame,
    level: usize,
    external: Option<&[HierarchyLevel]>,
    highlight_boundary: bool,
) -> Result<RgbImage> {
    let resolver = LevelResolver::new(frame, level, external)?;
    let (width, height) = (frame.frame_width, frame.frame_height);
    let mut image = RgbImage::new(width, height);

    {
        let buf: &mut [u8] = &mut image;
        let row_stride = width as usize * 3;
        for region in &frame.regions {
            let color = region_color(resolver.resolve(region)?);
            for_each_run(region, width, height, |y, left, right| {
                let row = y as usize * row_stride;
                let span = &mut buf[row + left as usize * 3..row + (right as usize + 1) * 3];
                for pixel in span.chunks_exact_mut(3) {
                    pixel.copy_from_slice(&color);
                }
            })?;
        }
    }

    if highlight_boundary {
        highlight_boundaries(&mut image);
    }
    Ok(image)
}

fn highlight_boundaries(image: &mut RgbImage) {
    let (width, height) = image.dimensions();
    let snapshot = image.clone();

    for y in 0..height {
        for x in 0..width {
            let here = snapshot.get_pixel(x, y);
            let right_differs =
                x + 1 < width && color_diff_l1(here, snapshot.get_pixel(x + 1, y)) != 0;
            let below_differs =
                y + 1 < height && color_diff_l1(here, snapshot.get_pixel(x, y + 1)) != 0;
            if right_differs || below_differs {
                image.put_pixel(x, y, Rgb([0, 0, 0]));
            }
        }
    }
}

fn color_diff_l1(a: &Rgb<u8>, b: &Rgb<u8>) -> u32 {
    a.0.iter()
        .zip(b.0.iter())
        .map(|(&p, &q)| (p as i32 - q as i32).unsigned_abs())
        .sum()
}
