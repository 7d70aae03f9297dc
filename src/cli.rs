use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vidseg")]
#[command(author, version, about = "Hierarchical video segmentation storage and rendering tool")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Display frame count, resolution and hierarchy depth of a container
    Info {
        /// Segmentation container to inspect
        #[arg(required = true)]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render every frame at each hierarchy level into PNG files
    Export {
        /// Segmentation container to export
        #[arg(required = true)]
        file: PathBuf,

        /// Directory receiving one subdirectory per level
        #[arg(required = true)]
        output_dir: PathBuf,

        /// Highest level to render (default: hierarchy depth plus extra levels)
        #[arg(long)]
        max_level: Option<usize>,

        /// Do not blacken region boundaries
        #[arg(long)]
        no_boundary: bool,

        /// Render threads (default: from config, 0 = all cores)
        #[arg(short, long)]
        threads: Option<usize>,
    },

    /// Print the region id covering a pixel
    Query {
        /// Segmentation container to query
        #[arg(required = true)]
        file: PathBuf,

        /// Zero-based frame index
        #[arg(long)]
        frame: usize,

        /// Pixel column
        #[arg(long)]
        x: u32,

        /// Pixel row
        #[arg(long)]
        y: u32,

        /// Hierarchy level
        #[arg(short, long, default_value = "0")]
        level: usize,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
