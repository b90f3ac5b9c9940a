//! Configuration loading and merging logic.
//!
//! Optional layers (user and project config) are skipped when the file does
//! not exist. An explicit `--config` file must exist. Parse errors in any
//! layer fail the load.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::errors::ConfigError;
use crate::config::types::{FeedConfig, PartialConfig};
use crate::config::validation::validate_config;

const CONFIG_DIR: &str = ".winfeed";
const CONFIG_FILE: &str = "config.toml";

/// Load configuration from the hierarchy of config files.
///
/// Merges, in order: defaults, `~/.winfeed/config.toml`,
/// `./.winfeed/config.toml`, the explicit file if given, and finally the
/// `overrides` built from command-line flags. The result is validated.
pub fn load_hierarchy(
    explicit: Option<&Path>,
    overrides: PartialConfig,
) -> Result<FeedConfig, ConfigError> {
    let optional_layers: Vec<PathBuf> = [user_config_path(), project_config_path()]
        .into_iter()
        .flatten()
        .collect();

    load_layers(&optional_layers, explicit, overrides)
}

/// Merge the given optional layers, then the explicit file, then overrides.
pub fn load_layers(
    optional_layers: &[PathBuf],
    explicit: Option<&Path>,
    overrides: PartialConfig,
) -> Result<FeedConfig, ConfigError> {
    let mut config = FeedConfig::default();

    for path in optional_layers {
        if !path.exists() {
            debug!(
                event = "core.config.layer_skipped",
                path = %path.display()
            );
            continue;
        }
        config.apply(load_file(path)?);
        info!(event = "core.config.layer_loaded", path = %path.display());
    }

    if let Some(path) = explicit {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        config.apply(load_file(path)?);
        info!(event = "core.config.layer_loaded", path = %path.display());
    }

    config.apply(overrides);
    validate_config(&config)?;

    Ok(config)
}

/// Parse one config file.
pub fn load_file(path: &Path) -> Result<PartialConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
        path: path.display().to_string(),
        source,
    })?;
    toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// `~/.winfeed/config.toml`, if a home directory is known.
fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// `./.winfeed/config.toml`, if the working directory is readable.
fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(CONFIG_DIR).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::PartialServerConfig;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_missing_optional_layers_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let config = load_layers(&[missing], None, PartialConfig::default()).unwrap();
        assert_eq!(config, FeedConfig::default());
    }

    #[test]
    fn test_later_layers_override_earlier() {
        let dir = tempfile::tempdir().unwrap();
        let user = write(
            dir.path(),
            "user.toml",
            "[server]\nport = 9000\n[capture]\njpeg_quality = 50\n",
        );
        let project = write(dir.path(), "project.toml", "[server]\nport = 9100\n");

        let config = load_layers(&[user, project], None, PartialConfig::default()).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.capture.jpeg_quality, 50);
    }

    #[test]
    fn test_overrides_win_over_files() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = write(dir.path(), "feed.toml", "[server]\nport = 9000\n");

        let overrides = PartialConfig {
            server: PartialServerConfig {
                port: Some(7000),
                ..Default::default()
            },
            ..Default::default()
        };

        let config = load_layers(&[], Some(&explicit), overrides).unwrap();
        assert_eq!(config.server.port, 7000);
    }

    #[test]
    fn test_explicit_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");

        let err = load_layers(&[], Some(&missing), PartialConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_parse_error_fails_load() {
        let dir = tempfile::tempdir().unwrap();
        let broken = write(dir.path(), "broken.toml", "[server\nport = ");

        let err = load_layers(&[broken], None, PartialConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
    }

    #[test]
    fn test_merged_config_is_validated() {
        let dir = tempfile::tempdir().unwrap();
        let bad = write(dir.path(), "bad.toml", "[capture]\njpeg_quality = 0\n");

        let err = load_layers(&[bad], None, PartialConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidConfiguration {
                field: "capture.jpeg_quality",
                ..
            }
        ));
    }
}
