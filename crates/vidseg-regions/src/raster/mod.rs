//! Rasterization of region scanlines into pixel buffers.
//!
//! - `ids` - Id images and point queries
//! - `color` - Random-color renders with optional boundary highlighting
//! - `mask` - Single-channel masks for selected region ids
//!
//! Every operation resolves ids through a [`LevelResolver`](crate::LevelResolver),
//! so level clamping and hierarchy source selection behave identically.
//! All functions are pure over their inputs and write only to the buffer
//! they are given.

mod color;
mod ids;
mod mask;

pub use color::{region_color, render_random_color};
pub use ids::{id_image, region_id_at, write_id_image, IdImage};
pub use mask::{render_mask, render_mask_uniform, MaskLayout};

use crate::model::Region;
use crate::{Error, Result};

/// Visit every run of `region` as `(row, left_x, right_x)`, checked against
/// a `width` x `height` target.
///
/// Rows advance one scanline at a time from `top_y`, including scanlines
/// without intervals.
fn for_each_run<F>(region: &Region, width: u32, height: u32, mut visit: F) -> Result<()>
where
    F: FnMut(u32, u32, u32),
{
    for (y, scanline) in region.row_span()?.zip(&region.scanlines) {
        if scanline.intervals.is_empty() {
            continue;
        }
        if y >= height {
            return Err(Error::geometry(format!(
                "region {} row {} outside target height {}",
                region.id, y, height
            )));
        }
        for interval in &scanline.intervals {
            if interval.left_x > interval.right_x || interval.right_x >= width {
                return Err(Error::geometry(format!(
                    "region {} row {}: interval {}..={} outside target width {}",
                    region.id, y, interval.left_x, interval.right_x, width
                )));
            }
            visit(y, interval.left_x, interval.right_x);
        }
    }
    Ok(())
}
