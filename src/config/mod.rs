mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Upper bound on levels exported past the hierarchy depth.
pub const MAX_EXTRA_LEVELS: usize = 16;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./vidseg.toml",
        "~/.config/vidseg/config.toml",
        "/etc/vidseg/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    let export = &config.export;

    if export.batch_size == 0 {
        anyhow::bail!("export.batch_size must be greater than 0");
    }

    if export.frame_name_digits == 0 || export.frame_name_digits > 20 {
        anyhow::bail!(
            "export.frame_name_digits must be between 1 and 20, got {}",
            export.frame_name_digits
        );
    }

    if export.extra_levels > MAX_EXTRA_LEVELS {
        anyhow::bail!(
            "export.extra_levels must be at most {}, got {}",
            MAX_EXTRA_LEVELS,
            export.extra_levels
        );
    }

    if export.level_dir_prefix.contains(['/', '\\']) {
        anyhow::bail!(
            "export.level_dir_prefix must not contain path separators: {:?}",
            export.level_dir_prefix
        );
    }

    if export.level_dir_prefix.is_empty() {
        tracing::warn!("export.level_dir_prefix is empty, level directories are bare numbers");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let file = write_config("");
        let config = load_config(file.path()).unwrap();
        assert!(config.export.highlight_boundary);
        assert_eq!(config.export.batch_size, 16);
        assert_eq!(config.export.threads, 0);
        assert_eq!(config.export.frame_name_digits, 6);
        assert_eq!(config.export.level_dir_prefix, "hierarchy_level_");
        assert_eq!(config.export.extra_levels, 1);
    }

    #[test]
    fn test_partial_export_section() {
        let file = write_config(
            r#"
[export]
highlight_boundary = false
threads = 4
"#,
        );
        let config = load_config(file.path()).unwrap();
        assert!(!config.export.highlight_boundary);
        assert_eq!(config.export.threads, 4);
        assert_eq!(config.export.batch_size, 16);
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let file = write_config("[export]\nbatch_size = 0\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("batch_size"));
    }

    #[test]
    fn test_prefix_with_separator_rejected() {
        let file = write_config("[export]\nlevel_dir_prefix = \"a/b\"\n");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_huge_extra_levels_rejected() {
        let file = write_config("[export]\nextra_levels = 9223372036854775807\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("extra_levels"));
    }

    #[test]
    fn test_malformed_toml() {
        let file = write_config("[export\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_missing_explicit_path() {
        let result = load_config_or_default(Some(Path::new("/nonexistent/vidseg.toml")));
        assert!(result.is_err());
    }
}
