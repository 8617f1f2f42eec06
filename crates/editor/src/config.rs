//! Editor configuration
//!
//! Settings are read from a TOML file, every field has a default, and a few
//! can be overridden from the environment.

use pagecraft_core::{EditorError, EditorResult, Validatable};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;

/// Environment variable overriding `store_dir`
pub const ENV_STORE_DIR: &str = "PAGECRAFT_STORE_DIR";

/// Environment variable overriding `log_level`
pub const ENV_LOG_LEVEL: &str = "PAGECRAFT_LOG";

/// Editor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Title of a freshly created page
    pub default_title: String,

    /// Title used when a loaded page has none
    pub untitled_title: String,

    /// Status tag sent with every save
    pub default_status: String,

    /// Directory of the file-backed page store
    pub store_dir: Option<PathBuf>,

    /// Default log filter (`error`, `warn`, `info`, `debug`, `trace`, `off`)
    pub log_level: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_title: "My New Page".to_string(),
            untitled_title: "Untitled".to_string(),
            default_status: "draft".to_string(),
            store_dir: None,
            log_level: "info".to_string(),
        }
    }
}

impl EditorConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a configuration from TOML
    pub fn from_toml_str(toml_str: &str) -> EditorResult<Self> {
        let config: EditorConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file; a missing file yields the defaults
    pub fn load(path: impl AsRef<Path>) -> EditorResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| EditorError::FileRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dir) = lookup(ENV_STORE_DIR).filter(|d| !d.is_empty()) {
            self.store_dir = Some(PathBuf::from(dir));
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|l| !l.is_empty()) {
            self.log_level = level;
        }
        self
    }

    /// The configured log level as a filter
    pub fn level_filter(&self) -> EditorResult<LevelFilter> {
        self.log_level.parse::<LevelFilter>().map_err(|_| {
            EditorError::InvalidConfig(format!("unknown log level '{}'", self.log_level))
        })
    }
}

impl Validatable for EditorConfig {
    fn validate(&self) -> EditorResult<()> {
        if self.default_title.trim().is_empty() {
            return Err(EditorError::InvalidConfig(
                "default_title cannot be empty".to_string(),
            ));
        }
        if self.untitled_title.trim().is_empty() {
            return Err(EditorError::InvalidConfig(
                "untitled_title cannot be empty".to_string(),
            ));
        }
        if self.default_status.trim().is_empty() {
            return Err(EditorError::InvalidConfig(
                "default_status cannot be empty".to_string(),
            ));
        }
        self.level_filter()?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.default_title, "My New Page");
        assert_eq!(config.untitled_title, "Untitled");
        assert_eq!(config.default_status, "draft");
        assert!(config.store_dir.is_none());
        assert!(config.is_valid());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = EditorConfig::from_toml_str(
            r#"
            default_title = "Landing"
            store_dir = "/var/lib/pages"
            "#,
        )
        .unwrap();
        assert_eq!(config.default_title, "Landing");
        assert_eq!(config.store_dir, Some(PathBuf::from("/var/lib/pages")));
        assert_eq!(config.default_status, "draft");
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            EditorConfig::from_toml_str("default_status = \"\""),
            Err(EditorError::InvalidConfig(_))
        ));
        assert!(matches!(
            EditorConfig::from_toml_str("log_level = \"loud\""),
            Err(EditorError::InvalidConfig(_))
        ));
        assert!(matches!(
            EditorConfig::from_toml_str("default_title = 3"),
            Err(EditorError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = EditorConfig::load(temp_dir.path().join("pagecraft.toml")).unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_load_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("pagecraft.toml");
        std::fs::write(&path, "untitled_title = \"No name\"\nlog_level = \"debug\"\n").unwrap();

        let config = EditorConfig::load(&path).unwrap();
        assert_eq!(config.untitled_title, "No name");
        assert_eq!(config.level_filter().unwrap(), LevelFilter::DEBUG);
    }

    #[test]
    fn test_overrides() {
        let config = EditorConfig::default().with_overrides(|key| match key {
            ENV_STORE_DIR => Some("/tmp/pages".to_string()),
            ENV_LOG_LEVEL => Some("warn".to_string()),
            _ => None,
        });
        assert_eq!(config.store_dir, Some(PathBuf::from("/tmp/pages")));
        assert_eq!(config.log_level, "warn");

        let untouched = EditorConfig::default().with_overrides(|_| None);
        assert_eq!(untouched, EditorConfig::default());
    }
}
