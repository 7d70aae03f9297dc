//! Multi-level PNG export of a segmentation container.
//!
//! Raw payloads are fetched in batches on the reader's single cursor, then
//! decoded and rendered on a rayon pool. Every worker owns its image buffer;
//! the hierarchy taken from frame 0 is shared read-only.

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use vidseg_container::ContainerReader;
use vidseg_regions::{render_random_color, Frame, HierarchyLevel};

use crate::config::{ExportConfig, MAX_EXTRA_LEVELS};

/// Export settings after merging config file and CLI flags.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Highest level to export; defaults to hierarchy depth plus `extra_levels`
    pub max_level: Option<usize>,
    pub highlight_boundary: bool,
    pub batch_size: usize,
    pub threads: usize,
    pub frame_name_digits: usize,
    pub level_dir_prefix: String,
    pub extra_levels: usize,
}

impl From<&ExportConfig> for ExportOptions {
    fn from(config: &ExportConfig) -> Self {
        Self {
            max_level: None,
            highlight_boundary: config.highlight_boundary,
            batch_size: config.batch_size,
            threads: config.threads,
            frame_name_digits: config.frame_name_digits,
            level_dir_prefix: config.level_dir_prefix.clone(),
            extra_levels: config.extra_levels,
        }
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::from(&ExportConfig::default())
    }
}

impl ExportOptions {
    /// Directory holding the PNGs of `level`.
    pub fn level_dir(&self, output_dir: &Path, level: usize) -> PathBuf {
        output_dir.join(format!("{}{:02}", self.level_dir_prefix, level))
    }

    /// File name of the frame at zero-based `index`.
    pub fn frame_file_name(&self, index: usize) -> String {
        format!("{:0width$}.png", index + 1, width = self.frame_name_digits)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub frames: usize,
    /// Levels `0..=max_level` written per frame
    pub levels: usize,
    pub images: usize,
}

/// Render every frame of `input` at levels `0..=max_level` into `output_dir`.
pub fn export_levels(
    input: &Path,
    output_dir: &Path,
    options: &ExportOptions,
) -> Result<ExportSummary> {
    if options.batch_size == 0 {
        anyhow::bail!("Export batch size must be greater than 0");
    }

    let mut reader = ContainerReader::open(input)
        .with_context(|| format!("Failed to open container: {:?}", input))?;
    let frame_count = reader.frame_count();

    if frame_count == 0 {
        tracing::warn!("Container {:?} holds no frames, nothing to export", input);
        return Ok(ExportSummary {
            frames: 0,
            levels: 0,
            images: 0,
        });
    }

    let first = decode_frame(&reader.read_frame_at(0)?, 0)?;
    let depth = first.hierarchy_levels();
    let hierarchy: Arc<Vec<HierarchyLevel>> = Arc::new(first.hierarchy);
    // Levels above the depth render identically, so the range is capped.
    let level_cap = depth + MAX_EXTRA_LEVELS;
    let requested = options
        .max_level
        .unwrap_or(depth.saturating_add(options.extra_levels));
    let max_level = requested.min(level_cap);
    if max_level < requested {
        tracing::warn!(
            "Max level {} exceeds hierarchy depth {} by more than {}, exporting up to {}",
            requested,
            depth,
            MAX_EXTRA_LEVELS,
            max_level
        );
    }
    if max_level > depth {
        tracing::warn!(
            "Hierarchy has {} levels; levels above {} render clamped",
            depth,
            depth
        );
    }

    let level_dirs: Vec<PathBuf> = (0..=max_level)
        .map(|level| options.level_dir(output_dir, level))
        .collect();
    for dir in &level_dirs {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {:?}", dir))?;
    }

    tracing::info!(
        "Exporting {} frames at levels 0..={} to {:?}",
        frame_count,
        max_level,
        output_dir
    );

    let pool = build_thread_pool(options.threads)?;
    let mut images = 0;

    for start in (0..frame_count).step_by(options.batch_size) {
        let end = (start + options.batch_size).min(frame_count);
        let batch = reader
            .read_raw_batch(start..end)
            .with_context(|| format!("Failed to read frames {}..{}", start, end))?;

        let written = pool.install(|| {
            batch
                .par_iter()
                .map(|(index, bytes)| {
                    let frame = decode_frame(bytes, *index)?;
                    render_frame(&frame, *index, &hierarchy, &level_dirs, options)
                })
                .collect::<Result<Vec<usize>>>()
        })?;

        images += written.iter().sum::<usize>();
        tracing::debug!("Exported frames {}..{}", start, end);
    }

    reader.close();

    Ok(ExportSummary {
        frames: frame_count,
        levels: level_dirs.len(),
        images,
    })
}

fn decode_frame(bytes: &[u8], index: usize) -> Result<Frame> {
    Frame::from_bincode(bytes).with_context(|| format!("Failed to decode frame {}", index))
}

fn render_frame(
    frame: &Frame,
    index: usize,
    hierarchy: &[HierarchyLevel],
    level_dirs: &[PathBuf],
    options: &ExportOptions,
) -> Result<usize> {
    let file_name = options.frame_file_name(index);

    for (level, dir) in level_dirs.iter().enumerate() {
        let image = render_random_color(frame, level, Some(hierarchy), options.highlight_boundary)
            .with_context(|| format!("Failed to render frame {} at level {}", index, level))?;
        let path = dir.join(&file_name);
        image
            .save(&path)
            .with_context(|| format!("Failed to write image: {:?}", path))?;
    }

    tracing::trace!("Rendered frame {} at {} levels", index, level_dirs.len());
    Ok(level_dirs.len())
}

fn build_thread_pool(threads: usize) -> Result<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if threads > 0 {
        builder = builder.num_threads(threads);
    }
    builder
        .build()
        .context("Failed to build render thread pool")
}
