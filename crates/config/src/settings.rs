//! Configuration structures for quill settings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::defaults;

/// Application configuration with nested sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Editor settings
    #[serde(default)]
    pub editor: EditorSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,

    /// User key bindings: chord literal -> command name
    #[serde(default)]
    pub bindings: BTreeMap<String, String>,
}

/// Editor settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Tab stop width used on display
    #[serde(default = "default_tab_width")]
    pub tab_width: usize,

    /// Column used by auto-fill
    #[serde(default = "default_fill_column")]
    pub fill_column: usize,

    /// Draw the region in windows that do not have focus
    #[serde(default)]
    pub highlight_nonselected_windows: bool,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log file path (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,

    /// Minimum log level (debug, info, warn, error)
    #[serde(default = "default_min_level")]
    pub min_level: String,
}

// Default value functions for serde
fn default_tab_width() -> usize {
    defaults::TAB_WIDTH
}

fn default_fill_column() -> usize {
    defaults::FILL_COLUMN
}

fn default_min_level() -> String {
    defaults::MIN_LOG_LEVEL.to_string()
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            tab_width: default_tab_width(),
            fill_column: default_fill_column(),
            highlight_nonselected_windows: defaults::HIGHLIGHT_NONSELECTED_WINDOWS,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file_path: None,
            min_level: default_min_level(),
        }
    }
}
