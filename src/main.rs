mod cli;

use vidseg::{config, export, inspect};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "vidseg=trace,vidseg_container=trace,vidseg_regions=trace".to_string()
        } else {
            "vidseg=info,vidseg_container=info,vidseg_regions=warn".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info { file, json } => show_info(&file, json),
        Commands::Export {
            file,
            output_dir,
            max_level,
            no_boundary,
            threads,
        } => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            let mut options = export::ExportOptions::from(&config.export);
            options.max_level = max_level;
            if no_boundary {
                options.highlight_boundary = false;
            }
            if let Some(threads) = threads {
                options.threads = threads;
            }
            run_export(&file, &output_dir, &options)
        }
        Commands::Query {
            file,
            frame,
            x,
            y,
            level,
        } => {
            match inspect::query_point(&file, frame, x, y, level)? {
                Some(id) => println!("{}", id),
                None => println!("not found"),
            }
            Ok(())
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("vidseg {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn show_info(file: &Path, json: bool) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {:?}", file);
    }

    let info = inspect::container_info(file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("File: {}", file.display());
    println!("Frames: {}", info.frame_count);
    if let (Some(width), Some(height)) = (info.width, info.height) {
        println!("Resolution: {}x{}", width, height);
    }
    println!("Hierarchy levels: {}", info.hierarchy_levels);
    println!("Regions in frame 0: {}", info.first_frame_regions);
    if let (Some(first), Some(last)) = (info.first_timestamp, info.last_timestamp) {
        println!("Timestamps: {} .. {}", first, last);
    }

    Ok(())
}

fn run_export(file: &Path, output_dir: &Path, options: &export::ExportOptions) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("Input file does not exist: {:?}", file);
    }

    let summary = export::export_levels(file, output_dir, options)?;

    println!(
        "Exported {} frames at {} levels ({} images) to {}",
        summary.frames,
        summary.levels,
        summary.images,
        output_dir.display()
    );
    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            print_export_config(&config.export);
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            println!("Default config:");
            print_export_config(&config.export);
        }
    }

    Ok(())
}

fn print_export_config(export: &config::ExportConfig) {
    println!("  Highlight boundary: {}", export.highlight_boundary);
    println!("  Batch size: {}", export.batch_size);
    println!("  Threads: {}", export.threads);
    println!("  Level directory prefix: {}", export.level_dir_prefix);
    println!("  Extra levels: {}", export.extra_levels);
}
