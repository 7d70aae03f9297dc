use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportConfig {
    /// Blacken pixels on region borders in exported PNGs
    #[serde(default = "default_highlight_boundary")]
    pub highlight_boundary: bool,

    /// Frames fetched from the container per batch (default: 16)
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Render threads, 0 lets rayon decide
    #[serde(default)]
    pub threads: usize,

    /// Zero padding of 1-based frame file names (default: 6, `000001.png`)
    #[serde(default = "default_frame_name_digits")]
    pub frame_name_digits: usize,

    /// Prefix of the per-level output directories
    #[serde(default = "default_level_dir_prefix")]
    pub level_dir_prefix: String,

    /// Levels exported beyond the hierarchy depth when no max level is given
    #[serde(default = "default_extra_levels")]
    pub extra_levels: usize,
}

fn default_highlight_boundary() -> bool {
    true
}

fn default_batch_size() -> usize {
    16
}

fn default_frame_name_digits() -> usize {
    6
}

fn default_level_dir_prefix() -> String {
    "hierarchy_level_".to_string()
}

fn default_extra_levels() -> usize {
    1
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            highlight_boundary: default_highlight_boundary(),
            batch_size: default_batch_size(),
            threads: 0,
            frame_name_digits: default_frame_name_digits(),
            level_dir_prefix: default_level_dir_prefix(),
            extra_levels: default_extra_levels(),
        }
    }
}
