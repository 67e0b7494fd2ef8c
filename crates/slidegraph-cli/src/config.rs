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

use slidegraph::config::AppConfig;

use crate::CliError;

/// Project-relative configuration path checked when no path is given.
pub const LOCAL_CONFIG_PATH: &str = "slidegraph/config.toml";

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (`slidegraph/config.toml`)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns an error if an explicit path does not exist, or if a found
/// configuration file cannot be read or parsed.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, CliError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new(LOCAL_CONFIG_PATH);
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(system_config) = system_config_path() {
        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(&system_config);
        }
        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

fn system_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "slidegraph", "slidegraph")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

fn load_config_file(path: &Path) -> Result<AppConfig, CliError> {
    if !path.exists() {
        return Err(CliError::MissingConfig(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config(&content).map_err(|message| CliError::Config {
        path: path.to_path_buf(),
        message,
    })
}

/// Parses TOML configuration text.
pub fn parse_config(content: &str) -> Result<AppConfig, String> {
    toml::from_str(content).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use slidegraph::theme::ColorSchemeName;

    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
            [render]
            default_color_scheme = "ocean"
            font_family = "Inter, sans-serif"
            show_slot_frames = true

            [limits]
            max_elements = 6
            max_nesting_depth = 2
            "#,
        )
        .unwrap();
        assert_eq!(config.render().default_color_scheme(), ColorSchemeName::Ocean);
        assert_eq!(config.render().font_family(), "Inter, sans-serif");
        assert!(config.render().show_slot_frames());
        assert_eq!(config.limits().max_elements(), 6);
        assert_eq!(config.limits().max_nesting_depth(), 2);
        assert_eq!(config.limits().max_series(), 8);
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = parse_config("").unwrap();
        assert_eq!(
            config.render().default_color_scheme(),
            ColorSchemeName::Corporate
        );
        assert_eq!(config.limits().max_elements(), 12);
    }

    #[test]
    fn test_unknown_scheme_is_rejected() {
        let err = parse_config("[render]\ndefault_color_scheme = \"neon\"").unwrap_err();
        assert!(err.contains("neon") || err.contains("unknown variant"), "{err}");
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = load_config(Some("definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, CliError::MissingConfig(_)));
    }
}
