//! vidseg-regions: region model, hierarchy resolution and rasterization
//!
//! A segmentation [`Frame`] lists level-0 regions as run-length scanlines.
//! Coarser levels are reached by following parent links through a
//! video-wide hierarchy, either embedded in the frame or supplied by the
//! caller.
//!
//! # Modules
//!
//! - `model` - Frames, regions, scanlines, intervals and hierarchy levels
//! - `codec` - Frame payload encoding for container storage
//! - `hierarchy` - Level clamping, source selection and parent-link climbing
//! - `raster` - Id images, random-color renders, point queries and masks
//!
//! # Levels
//!
//! Level 0 is the over-segmentation stored in the frame itself. Level `n > 0`
//! starts from a region's `parent_id` and climbs `n - 1` hierarchy levels.
//! Requests beyond the available depth are clamped to the deepest level.

pub mod codec;
pub mod error;
pub mod hierarchy;
pub mod model;
pub mod raster;

pub use codec::{BincodeCodec, FrameCodec};
pub use error::{Error, Result};
pub use hierarchy::{resolve_id, LevelResolver};
pub use model::{Frame, HierarchyLevel, Interval, Region, RegionId, Scanline};
pub use raster::{
    id_image, region_color, region_id_at, render_mask, render_mask_uniform, render_random_color,
    write_id_image, IdImage, MaskLayout,
};
