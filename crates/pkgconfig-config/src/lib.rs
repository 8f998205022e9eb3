//! Generator settings
//!
//! Settings come from three layers, later layers winning:
//! built-in defaults, an optional TOML settings file, and command line flags.
//! There is no implicit per-user settings file.

use pkgconfig_manifest::DEFAULT_LANGUAGE_VERSION;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming a settings file when `--config` is not given
pub const CONFIG_ENV_VAR: &str = "DART_PKGCONFIG_CONFIG";

/// Stamp written into the `generator` field of the output
pub const DEFAULT_GENERATOR: &str = "gen-dart-package-config";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub default_language_version: String,
    pub generator: String,
    pub check_duplicate_roots: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            default_language_version: DEFAULT_LANGUAGE_VERSION.to_string(),
            generator: DEFAULT_GENERATOR.to_string(),
            check_duplicate_roots: false,
        }
    }
}

impl Settings {
    /// Resolve which settings file to read, if any.
    ///
    /// An explicit path wins; otherwise `DART_PKGCONFIG_CONFIG` is honored when
    /// set and non-empty.
    pub fn path(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }

        std::env::var(CONFIG_ENV_VAR)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    }

    /// Load settings.
    ///
    /// An explicitly requested file must exist. A file named only through the
    /// environment is skipped when missing.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = Self::path(explicit) else {
            return Ok(Settings::default());
        };

        if explicit.is_none() && !path.exists() {
            return Ok(Settings::default());
        }

        Self::load_from(&path)
    }

    /// Load settings from a specific TOML file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply command line overrides on top of loaded settings
    pub fn with_overrides(
        mut self,
        default_language_version: Option<String>,
        check_duplicate_roots: bool,
    ) -> Self {
        if let Some(version) = default_language_version {
            self.default_language_version = version;
        }
        // A flag can only turn the check on.
        if check_duplicate_roots {
            self.check_duplicate_roots = true;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.default_language_version, "2.8");
        assert_eq!(settings.generator, "gen-dart-package-config");
        assert!(!settings.check_duplicate_roots);
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let path = temp_dir.path().join("settings.toml");
        assert!(fs::write(&path, "check_duplicate_roots = true\n").is_ok());

        let settings = Settings::load(Some(path.as_path()));
        assert!(settings.is_ok());
        let settings = settings.unwrap_or_default();
        assert!(settings.check_duplicate_roots);
        assert_eq!(settings.default_language_version, "2.8");
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let path = temp_dir.path().join("missing.toml");
        let result = Settings::load(Some(path.as_path()));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let path = temp_dir.path().join("settings.toml");
        assert!(fs::write(&path, "check_duplicate_roots = [").is_ok());
        assert!(matches!(
            Settings::load_from(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::default().with_overrides(Some("3.0".to_string()), true);
        assert_eq!(settings.default_language_version, "3.0");
        assert!(settings.check_duplicate_roots);

        let settings = Settings {
            check_duplicate_roots: true,
            ..Settings::default()
        }
        .with_overrides(None, false);
        assert!(settings.check_duplicate_roots);
    }
}
