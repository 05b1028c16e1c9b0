use async_trait::async_trait;
use thiserror::Error;

/// Inbound events surfaced by a message channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    /// One complete text frame from the host
    Message(String),
    /// The channel closed, normally or through a transport error
    Closed {
        /// Human-readable close reason, when the transport has one
        reason: Option<String>,
    },
}

/// Errors that can occur during channel operations
#[derive(Error, Debug)]
pub enum ChannelError {
    /// The channel is no longer open
    #[error("Channel is closed")]
    Closed,

    /// The underlying transport failed
    #[error("Transport failure: {0}")]
    Transport(String),
}

/// A persistent duplex text-message channel to the player host.
///
/// The concrete socket implementation is chosen by the embedding
/// application; the session only relies on this seam. Tests substitute an
/// in-memory double.
#[async_trait]
pub trait MessageChannel: Send + Sync + 'static {
    /// Queue one outbound text frame.
    ///
    /// Best-effort: an error means the channel is unusable, not that the
    /// caller should retry.
    ///
    /// # Errors
    /// Returns `ChannelError` if the channel is closed or the transport fails
    async fn send(&self, payload: String) -> Result<(), ChannelError>;

    /// Wait for the next inbound event.
    ///
    /// Suspends until a frame arrives or the channel finishes. `None`
    /// means no further events will ever arrive.
    async fn recv(&self) -> Option<ChannelEvent>;

    /// Close the underlying connection.
    async fn close(&self);
}
