use super::types::{PlaybackModes, TrackInfo};

/// Capability surface of the OS-level "now playing" integration.
///
/// The session invokes these callbacks whenever a new playback snapshot or
/// mode change is applied. Exactly one live handler is bound per session;
/// it is passed in at construction rather than reached through a global.
/// An integration that needs to send intents back (media keys, lock-screen
/// controls) holds a clone of the `RemoteSession` and calls its intent
/// methods.
pub trait MediaSessionHandler: Send + Sync + 'static {
    /// Playback state changed: playing flag, position, length and modes.
    fn update_playback_state(
        &self,
        playing: bool,
        position_ms: u64,
        duration_ms: Option<u64>,
        modes: PlaybackModes,
    );

    /// The current track changed; `None` clears the notification.
    fn update_now_playing(&self, track: Option<&TrackInfo>);
}

/// Handler that ignores every update.
///
/// Useful for tests and headless embeddings without an OS media surface.
pub struct NoopMediaSession;

impl MediaSessionHandler for NoopMediaSession {
    fn update_playback_state(
        &self,
        _playing: bool,
        _position_ms: u64,
        _duration_ms: Option<u64>,
        _modes: PlaybackModes,
    ) {
    }

    fn update_now_playing(&self, _track: Option<&TrackInfo>) {}
}
