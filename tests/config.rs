//! Integration tests for configuration loading.

use std::fs;

use tempfile::TempDir;
use tunelink::config::Config;

fn write_config(temp_dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, content).unwrap();
    path
}

mod defaults {
    use super::*;

    #[test]
    fn default_config_targets_localhost() {
        let config = Config::default();

        assert_eq!(config.connection.host, "127.0.0.1");
        assert_eq!(config.connection.port, 7766);
        assert_eq!(config.connection.pairing_key, None);
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        let path = write_config(
            &temp,
            r#"
[connection]
host = "10.0.0.5"
"#,
        );

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.connection.host, "10.0.0.5");
        assert_eq!(config.connection.port, 7766);
        assert_eq!(config.general.log_level, "info");
    }
}

mod loading {
    use super::*;

    #[test]
    fn loads_all_fields() {
        let temp = TempDir::new().unwrap();
        let path = write_config(
            &temp,
            r#"
[connection]
host = "music.local"
port = 9000
pairing_key = "abc123"

[general]
log_level = "debug"
"#,
        );

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.connection.host, "music.local");
        assert_eq!(config.connection.port, 9000);
        assert_eq!(config.connection.pairing_key.as_deref(), Some("abc123"));
        assert_eq!(config.general.log_level, "debug");
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, "connection = not toml");

        assert!(Config::load_from(&path).is_err());
    }
}
