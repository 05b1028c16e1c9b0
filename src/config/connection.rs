use serde::{Deserialize, Serialize};

/// Connection settings for the remote player host.
///
/// The channel itself is established by the embedding application; these
/// values tell it where to connect and which pairing key to present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConnectionConfig {
    /// Hostname or address of the player host.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port the player host listens on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Opaque pairing key sent with `ControllerConnect`.
    #[serde(default)]
    pub pairing_key: Option<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    7766
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            pairing_key: None,
        }
    }
}
