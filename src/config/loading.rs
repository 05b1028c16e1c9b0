use std::{fs, path::Path};

use super::Config;
use crate::{Result, TunelinkError};

impl Config {
    /// Load configuration from the default path.
    ///
    /// Returns defaults when no configuration file exists.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Config> {
        let path = super::ConfigPaths::main_config();
        if !path.exists() {
            return Ok(Config::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from an explicit file path.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Config> {
        let file_content = fs::read_to_string(path)?;

        toml::from_str(&file_content).map_err(|e| TunelinkError::toml_parse(e, Some(path)))
    }
}
