use std::path::Path;

use thiserror::Error;

/// Error types for the Tunelink application.
///
/// This enum represents errors that can occur during configuration
/// loading, parsing, and log setup. Service-level failures have their
/// own error types next to the service.
#[derive(Error, Debug)]
pub enum TunelinkError {
    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error with location context
    #[error("{0}")]
    TomlParse(String),
}

/// Result alias for crate-level fallible operations.
pub type Result<T> = std::result::Result<T, TunelinkError>;

impl TunelinkError {
    /// Build a TOML parse error, attaching the offending file path when known.
    pub fn toml_parse(error: impl std::fmt::Display, path: Option<&Path>) -> Self {
        match path {
            Some(p) => {
                let clean_path = p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
                TunelinkError::TomlParse(format!(
                    "Failed to parse TOML at {:?}: {}",
                    clean_path, error
                ))
            }
            None => TunelinkError::TomlParse(format!("Failed to parse TOML: {}", error)),
        }
    }
}
