/// Common utilities and abstractions for services
pub mod common;

/// Remote player synchronization service
pub mod remote;

pub use remote::{
    ChannelError, ChannelEvent, ConnectionPhase, Intent, MediaSessionHandler, MessageChannel,
    NoopMediaSession, PlaybackModes, PlaybackSnapshot, PlaylistEntry, PlaylistState, RemoteSession,
    RepeatMode, SessionError, TrackInfo, Volume,
};
