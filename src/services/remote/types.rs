use std::ops::Deref;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle phase of the synchronization session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionPhase {
    /// No channel; the entry point for a fresh connection
    #[default]
    Disconnected,

    /// Channel establishment and handshake in progress
    Connecting,

    /// Channel established; state updates flowing
    Connected,

    /// Session was shut down deliberately
    Closed,
}

/// Repeat mode for track or playlist repetition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RepeatMode {
    /// No repetition
    #[default]
    Off,

    /// Repeat the entire playlist
    All,

    /// Repeat the current track
    One,
}

/// Volume of the player
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Volume(f64);

impl Volume {
    /// Create a new instance of a volume with safeguarded values
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// Get the volume as a percentage
    pub fn as_percentage(&self) -> f64 {
        self.0 * 100.0
    }
}

impl Deref for Volume {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<f64> for Volume {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

/// Metadata of the track currently loaded on the host player.
///
/// Immutable once received; each snapshot replaces it wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackInfo {
    /// Track title; also the track's identity for display purposes
    pub title: String,
    /// Performing artist
    pub artist: String,
    /// Album name
    pub album: String,
    /// Track length in milliseconds
    pub duration_ms: u64,
    /// Cover art location, when the host provides one
    pub artwork_url: Option<String>,
}

/// Authoritative playback state as last pushed by the host.
///
/// Produced exclusively by the snapshot reducer; superseded atomically by
/// the next `PlaybackStateUpdate`. Never merged field-by-field.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaybackSnapshot {
    /// Whether the host reports active playback
    pub playing: bool,
    /// Track loaded on the host, if any
    pub track: Option<TrackInfo>,
    /// Host-reported position in milliseconds, clamped to the track length
    pub position_ms: u64,
    /// Wall-clock receipt time of this snapshot
    pub received_at: Option<DateTime<Utc>>,
}

/// One entry of the host playlist.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistEntry {
    /// Host-assigned identity, significant for reorder commands
    pub id: String,
    /// Track title
    pub title: String,
    /// Performing artist
    pub artist: String,
    /// Album name
    pub album: String,
}

/// Host playlist; ordering is owned by the host.
///
/// Replaced wholesale on every `PlaylistUpdate`. Locally issued reorder
/// commands are never reconciled into this value; the host's next update
/// is authoritative even when a local move has not round-tripped yet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaylistState {
    /// Ordered playlist entries
    pub tracks: Vec<PlaylistEntry>,
    /// Index of the entry currently loaded on the host
    pub current_index: usize,
}

/// Shuffle and repeat state, updated independently of playback snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackModes {
    /// Whether shuffle is enabled
    pub shuffle: bool,
    /// Active repeat mode
    pub repeat: RepeatMode,
}

/// An in-progress seek gesture.
///
/// While `active`, this is the exclusive source of truth for the displayed
/// position: extrapolation is suspended and snapshot positions are recorded
/// without touching the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeekInteraction {
    /// Whether a drag is in progress
    pub active: bool,
    /// Position under the user's finger, clamped to the track length
    pub position_ms: u64,
}

/// Aggregate client-side session state.
///
/// Owned exclusively by the session event loop; every other component
/// receives copies or read-only views and returns new values instead of
/// mutating in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    /// Connection lifecycle phase
    pub phase: ConnectionPhase,
    /// Latest authoritative playback snapshot
    pub playback: PlaybackSnapshot,
    /// Latest authoritative playlist
    pub playlist: PlaylistState,
    /// Shuffle and repeat modes
    pub modes: PlaybackModes,
    /// Player volume
    pub volume: Volume,
    /// In-progress seek gesture, if any
    pub seek: SeekInteraction,
    /// Position currently shown to the user, in milliseconds
    pub displayed_position_ms: u64,
}

impl SessionState {
    /// Length of the current track, when one is loaded.
    pub fn duration_ms(&self) -> Option<u64> {
        self.playback.track.as_ref().map(|track| track.duration_ms)
    }

    /// Clamp a position into the valid range for the current track.
    ///
    /// With no track loaded the only valid position is zero.
    pub fn clamp_position(&self, position_ms: u64) -> u64 {
        match self.duration_ms() {
            Some(duration) => position_ms.min(duration),
            None => 0,
        }
    }
}
