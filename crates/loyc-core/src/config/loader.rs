//! Configuration file discovery and loading

use super::LoycConfig;
use crate::error::LoycError;
use crate::result::Result;
use std::path::{Path, PathBuf};

/// File names searched in each directory, in priority order
pub const CONFIG_FILE_NAMES: [&str; 2] = ["loyc.toml", ".loycrc.toml"];

/// Configuration loader for discovering and loading config files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Auto-discover a config file by walking up from `start_path` until a
    /// file is found or the filesystem root is reached
    pub fn auto_discover(start_path: &Path) -> Result<Option<PathBuf>> {
        let mut current = start_path
            .canonicalize()
            .map_err(|e| LoycError::config_error(format!("Invalid path: {e}")))?;

        loop {
            for filename in CONFIG_FILE_NAMES {
                let config_path = current.join(filename);
                if config_path.is_file() {
                    tracing::debug!("Found config: {}", config_path.display());
                    return Ok(Some(config_path));
                }
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => break,
            }
        }

        Ok(None)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<LoycConfig> {
        let text = std::fs::read_to_string(path).map_err(|e| LoycError::io_error(path, e))?;
        LoycConfig::from_toml(&text).map_err(|e| {
            LoycError::config_error(format!(
                "Failed to load config from '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Load config from `custom_path`, or discover one from `start_dir`
    /// (default: the current directory).
    ///
    /// A missing `custom_path` is an error; finding nothing during discovery
    /// yields the defaults.
    pub fn load(custom_path: Option<&Path>, start_dir: Option<&Path>) -> Result<LoycConfig> {
        if let Some(path) = custom_path {
            if !path.exists() {
                return Err(LoycError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Self::load_from_file(path);
        }

        let search_dir = start_dir.unwrap_or_else(|| Path::new("."));
        match Self::auto_discover(search_dir)? {
            Some(path) => Self::load_from_file(&path),
            None => {
                tracing::debug!(
                    "No config file found from {}, using defaults",
                    search_dir.display()
                );
                Ok(LoycConfig::default())
            }
        }
    }
}
