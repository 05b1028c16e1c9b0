use super::transport::ChannelError;

/// Errors that can occur during remote session operations
#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    /// Failed to initialize the session
    #[error("Failed to initialize session: {0}")]
    InitializationFailed(String),

    /// Channel operation failed
    #[error("Channel operation failed: {0}")]
    Channel(#[from] ChannelError),

    /// Outbound message could not be encoded
    #[error("Failed to encode outbound message: {0}")]
    Encode(#[from] serde_json::Error),
}
