//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use lineage::{
    LineageError,
    config::{AppConfig, LayoutConfig},
};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ConfigError> for LineageError {
    fn from(err: ConfigError) -> Self {
        LineageError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (lineage/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed or holds invalid layout values
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, LineageError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path:? = path; "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("lineage/config.toml");
    if local_config.exists() {
        info!(path:? = local_config; "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "lineage", "lineage") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path:? = system_config; "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path:? = system_config; "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load and validate configuration from a TOML file
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, LineageError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;

    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate_layout(config.layout())?;

    Ok(config)
}

/// Rejects geometry the layout cannot work with.
///
/// Box sizes must be positive, gaps and paddings must not be negative, and
/// every value must be finite.
fn validate_layout(layout: &LayoutConfig) -> Result<(), ConfigError> {
    let positive = [
        ("box_width", layout.box_width()),
        ("box_height", layout.box_height()),
    ];
    let non_negative = [
        ("vertical_gap", layout.vertical_gap()),
        ("pair_gap", layout.pair_gap()),
        ("min_child_gap", layout.min_child_gap()),
        ("platform_padding", layout.platform_padding()),
    ];

    if !layout.root_y().is_finite() {
        return Err(ConfigError::Validation(
            "layout.root_y must be a finite number".to_string(),
        ));
    }
    for (key, value) in positive {
        if !value.is_finite() || value <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "layout.{key} must be positive, got {value}"
            )));
        }
    }
    for (key, value) in non_negative {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::Validation(format!(
                "layout.{key} must not be negative, got {value}"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_explicit_path() {
        let file = config_file("[layout]\nbox_width = 120\n");
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.layout().box_width(), 120.0);
    }

    #[test]
    fn test_missing_explicit_path() {
        let err = load_config(Some("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, LineageError::Config(_)));
        assert!(err.to_string().contains("Missing configuration file"));
    }

    #[test]
    fn test_invalid_toml() {
        let file = config_file("[layout\nbox_width = ");
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML"));
    }

    #[test]
    fn test_negative_gap_is_rejected() {
        let file = config_file("[layout]\nmin_child_gap = -10\n");
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("layout.min_child_gap"));
    }

    #[test]
    fn test_zero_box_width_is_rejected() {
        let result = validate_layout(&LayoutConfig::default().with_box_width(0.0));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
        assert!(validate_layout(&LayoutConfig::default()).is_ok());
    }
}
