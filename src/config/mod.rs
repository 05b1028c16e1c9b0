mod connection;
mod general;
mod loading;
mod paths;

use serde::{Deserialize, Serialize};

pub use connection::ConnectionConfig;
pub use general::GeneralConfig;
pub use paths::ConfigPaths;

/// Main configuration structure for Tunelink.
///
/// Contains all configuration settings including the remote host
/// connection parameters and general application settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Remote player host connection settings.
    #[serde(default)]
    pub connection: ConnectionConfig,

    /// General application settings.
    #[serde(default)]
    pub general: GeneralConfig,
}
