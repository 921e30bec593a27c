//! Configuration management for quill.
//!
//! This crate provides configuration loading and saving with support for
//! TOML format and XDG directory conventions.

mod settings;
mod xdg;

pub use settings::{Config, EditorSettings, LoggingSettings};
pub use xdg::{get_config_dir, get_data_dir};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Default values as constants
pub mod defaults {
    pub const TAB_WIDTH: usize = 8;
    pub const FILL_COLUMN: usize = 70;
    pub const HIGHLIGHT_NONSELECTED_WINDOWS: bool = false;
    pub const MIN_LOG_LEVEL: &str = "info";
    pub const LOG_FILE_NAME: &str = "quill.log";
}

impl Config {
    /// Load configuration from the XDG config file.
    ///
    /// On first run, creates config file with default values.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load configuration from `path`.
    ///
    /// A missing file is created with default values. Missing keys fall
    /// back to their defaults and the file is rewritten in normalized form.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let original_content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;

            let config = Self::parse(&original_content)
                .with_context(|| format!("Invalid configuration in {}", path.display()))?;

            // Serialize back to get normalized content
            let normalized_content = toml::to_string_pretty(&config)?;

            // If content changed, save the updated config
            if original_content != normalized_content {
                config.save_to(path)?;
            }

            Ok(config)
        } else {
            // First run - create config file with default values
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get path to config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(get_config_dir()?.join("config.toml"))
    }

    /// Log file path: the configured one, or the default in the data dir.
    pub fn log_file_path(&self) -> Result<PathBuf> {
        match &self.logging.file_path {
            Some(path) => Ok(PathBuf::from(path)),
            None => Ok(get_data_dir()?.join(defaults::LOG_FILE_NAME)),
        }
    }

    fn parse(content: &str) -> Result<Config> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_run_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quill").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("tab_width = 8"));
        assert!(written.contains("fill_column = 70"));
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let config = Config::parse("[editor]\nfill_column = 60\n").unwrap();
        assert_eq!(config.editor.fill_column, 60);
        assert_eq!(config.editor.tab_width, defaults::TAB_WIDTH);
        assert!(!config.editor.highlight_nonselected_windows);
        assert_eq!(config.logging.min_level, "info");
        assert!(config.bindings.is_empty());
    }

    #[test]
    fn test_bindings_section() {
        let content = r#"
[bindings]
"C-x C-b" = "describe-bindings"
"M-g" = "goto-line"
"#;
        let config = Config::parse(content).unwrap();
        assert_eq!(config.bindings.len(), 2);
        assert_eq!(config.bindings["C-x C-b"], "describe-bindings");
    }

    #[test]
    fn test_load_normalizes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[editor]\ntab_width = 4\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.editor.tab_width, 4);

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("fill_column"));
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_content_is_error() {
        assert!(Config::parse("[editor]\ntab_width = \"wide\"\n").is_err());
    }

    #[test]
    fn test_explicit_log_path() {
        let mut config = Config::default();
        config.logging.file_path = Some("/tmp/q.log".to_string());
        assert_eq!(config.log_file_path().unwrap(), PathBuf::from("/tmp/q.log"));
    }
}
