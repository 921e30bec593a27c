//! XDG base directories for quill.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "quill";

fn app_dir(base: Option<PathBuf>, kind: &str) -> Result<PathBuf> {
    base.map(|p| p.join(APP_NAME))
        .with_context(|| format!("Failed to determine {} directory", kind))
}

/// `$XDG_CONFIG_HOME/quill`, usually `~/.config/quill`.
pub fn get_config_dir() -> Result<PathBuf> {
    app_dir(dirs::config_dir(), "config")
}

/// `$XDG_DATA_HOME/quill`, usually `~/.local/share/quill`. The default
/// log file lives here.
pub fn get_data_dir() -> Result<PathBuf> {
    app_dir(dirs::data_dir(), "data")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_dir_appends_name() {
        let dir = app_dir(Some(PathBuf::from("/tmp/base")), "config").unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/base/quill"));
    }

    #[test]
    fn test_missing_base_is_an_error() {
        let err = app_dir(None, "data").unwrap_err();
        assert_eq!(err.to_string(), "Failed to determine data directory");
    }
}
