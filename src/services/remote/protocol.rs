use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::RepeatMode;

/// Discrete playback action carried by a `PlaybackCommand`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlaybackAction {
    /// Start or resume playback
    Play,
    /// Pause playback
    Pause,
    /// Skip to the next track
    Next,
    /// Go back to the previous track
    Previous,
}

/// Host-reported playback status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlaybackStatus {
    /// Host is playing
    Playing,
    /// Host is paused
    Paused,
}

/// Track payload of a `PlaybackStateUpdate`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTrack {
    /// Track title
    pub title: String,
    /// Performing artist
    pub artist: String,
    /// Album name
    pub album: String,
    /// Cover art location; absent means no artwork
    #[serde(default)]
    pub artwork_url: Option<String>,
    /// Track length in float milliseconds
    pub duration: f64,
}

/// Playlist entry payload of a `PlaylistUpdate`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WirePlaylistEntry {
    /// Host-assigned entry identity
    pub id: String,
    /// Track title
    pub title: String,
    /// Performing artist
    pub artist: String,
    /// Album name
    pub album: String,
}

/// Outbound messages, client to host.
///
/// Serialized as a JSON object with a `type` tag and type-specific fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Pairing handshake, sent once at connection start
    ControllerConnect {
        /// Opaque pairing/auth key
        key: String,
    },
    /// Transport control (play/pause/next/previous)
    PlaybackCommand {
        /// Action to perform
        action: PlaybackAction,
    },
    /// Absolute seek
    SeekCommand {
        /// Target position in float milliseconds
        position: f64,
    },
    /// Enable or disable shuffle
    ShuffleCommand {
        /// Desired shuffle state
        enabled: bool,
    },
    /// Set the repeat mode
    RepeatCommand {
        /// Desired repeat mode
        mode: RepeatMode,
    },
    /// Set the player volume
    VolumeCommand {
        /// Volume in [0, 1]
        volume: f64,
    },
    /// Remove one playlist entry
    PlaylistRemoveCommand {
        /// Index of the entry to remove
        index: usize,
    },
    /// Move one playlist entry
    #[serde(rename_all = "camelCase")]
    PlaylistMoveCommand {
        /// Index the entry is moved from
        from_index: usize,
        /// Target index in the post-removal frame
        to_index: usize,
    },
    /// Ask the host to push a full state snapshot
    RequestCurrentState,
}

/// Inbound messages, host to client.
///
/// Anything with an unrecognized `type` tag or a failed schema check is
/// rejected at decode time and never reaches the reducer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// Full playback snapshot: status, track, position
    #[serde(rename_all = "camelCase")]
    PlaybackStateUpdate {
        /// Host playback status
        state: PlaybackStatus,
        /// Track loaded on the host
        track: WireTrack,
        /// Playback position in float milliseconds
        current_position: f64,
    },
    /// Full playlist replacement
    #[serde(rename_all = "camelCase")]
    PlaylistUpdate {
        /// Ordered playlist entries
        tracks: Vec<WirePlaylistEntry>,
        /// Index of the current entry; negative means none
        current_index: i64,
    },
    /// Shuffle and repeat replacement
    #[serde(rename_all = "camelCase")]
    PlaybackModeUpdate {
        /// Shuffle enabled
        shuffle: bool,
        /// Active repeat mode
        repeat_mode: RepeatMode,
    },
    /// Volume replacement
    VolumeUpdate {
        /// Volume in [0, 1]
        volume: f64,
    },
}

impl ServerMessage {
    /// Decode one inbound channel payload.
    ///
    /// Returns `None` for unknown `type` tags, missing fields, and
    /// malformed JSON. A forward-incompatible host must not break the
    /// client, so every rejection is a logged no-op.
    pub fn decode(raw: &str) -> Option<Self> {
        match serde_json::from_str(raw) {
            Ok(message) => Some(message),
            Err(err) => {
                debug!("Ignoring inbound message: {err}");
                None
            }
        }
    }
}

/// User intents accepted by the session.
///
/// Every intent has exactly one wire encoding; submission is
/// fire-and-forget and never waits for host confirmation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    /// Start or resume playback
    Play,
    /// Pause playback
    Pause,
    /// Toggle between play and pause
    TogglePlayPause,
    /// Skip to the next track
    Next,
    /// Go back to the previous track
    Previous,
    /// Seek to an absolute position
    SeekTo {
        /// Target position in milliseconds
        position_ms: u64,
    },
    /// Enable or disable shuffle
    SetShuffle(bool),
    /// Set the repeat mode
    SetRepeat(RepeatMode),
    /// Set the player volume (already clamped to [0, 1])
    SetVolume(f64),
    /// Ask the host for a full state snapshot
    RequestFullState,
    /// Remove one playlist entry
    RemoveFromPlaylist {
        /// Index of the entry to remove
        index: usize,
    },
    /// Move one playlist entry to a new index
    MoveInPlaylist {
        /// Current index of the entry
        from: usize,
        /// Desired index after the move
        to: usize,
    },
}

impl Intent {
    /// Encode this intent into its outbound wire message.
    ///
    /// Total and pure: well-formed inputs are produced by clamping at the
    /// caller boundary, so no validation happens here. `playing` is the
    /// current optimistic playing flag and is consulted only by
    /// `TogglePlayPause`, which resolves to exactly one `PlaybackCommand`.
    ///
    /// `MoveInPlaylist` encodes `toIndex` in the post-removal frame: moving
    /// an entry forward past its origin shifts the target down by one.
    pub fn encode(&self, playing: bool) -> ClientMessage {
        match *self {
            Intent::Play => ClientMessage::PlaybackCommand {
                action: PlaybackAction::Play,
            },
            Intent::Pause => ClientMessage::PlaybackCommand {
                action: PlaybackAction::Pause,
            },
            Intent::TogglePlayPause => ClientMessage::PlaybackCommand {
                action: if playing {
                    PlaybackAction::Pause
                } else {
                    PlaybackAction::Play
                },
            },
            Intent::Next => ClientMessage::PlaybackCommand {
                action: PlaybackAction::Next,
            },
            Intent::Previous => ClientMessage::PlaybackCommand {
                action: PlaybackAction::Previous,
            },
            Intent::SeekTo { position_ms } => ClientMessage::SeekCommand {
                position: position_ms as f64,
            },
            Intent::SetShuffle(enabled) => ClientMessage::ShuffleCommand { enabled },
            Intent::SetRepeat(mode) => ClientMessage::RepeatCommand { mode },
            Intent::SetVolume(volume) => ClientMessage::VolumeCommand { volume },
            Intent::RequestFullState => ClientMessage::RequestCurrentState,
            Intent::RemoveFromPlaylist { index } => ClientMessage::PlaylistRemoveCommand { index },
            Intent::MoveInPlaylist { from, to } => ClientMessage::PlaylistMoveCommand {
                from_index: from,
                to_index: if from < to { to - 1 } else { to },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn playback_intents_encode_to_playback_commands() {
        assert_eq!(
            serde_json::to_value(Intent::Play.encode(false)).unwrap(),
            json!({"type": "PlaybackCommand", "action": "PLAY"})
        );
        assert_eq!(
            serde_json::to_value(Intent::Next.encode(false)).unwrap(),
            json!({"type": "PlaybackCommand", "action": "NEXT"})
        );
        assert_eq!(
            serde_json::to_value(Intent::Previous.encode(true)).unwrap(),
            json!({"type": "PlaybackCommand", "action": "PREVIOUS"})
        );
    }

    #[test]
    fn toggle_resolves_against_current_playing_flag() {
        assert_eq!(
            Intent::TogglePlayPause.encode(true),
            ClientMessage::PlaybackCommand {
                action: PlaybackAction::Pause
            }
        );
        assert_eq!(
            Intent::TogglePlayPause.encode(false),
            ClientMessage::PlaybackCommand {
                action: PlaybackAction::Play
            }
        );
    }

    #[test]
    fn seek_and_volume_encode_as_floats() {
        assert_eq!(
            serde_json::to_value(Intent::SeekTo { position_ms: 10_000 }.encode(true)).unwrap(),
            json!({"type": "SeekCommand", "position": 10000.0})
        );
        assert_eq!(
            serde_json::to_value(Intent::SetVolume(0.5).encode(true)).unwrap(),
            json!({"type": "VolumeCommand", "volume": 0.5})
        );
    }

    #[test]
    fn repeat_mode_uses_wire_casing() {
        assert_eq!(
            serde_json::to_value(Intent::SetRepeat(RepeatMode::One).encode(true)).unwrap(),
            json!({"type": "RepeatCommand", "mode": "ONE"})
        );
    }

    #[test]
    fn forward_move_adjusts_target_into_post_removal_frame() {
        assert_eq!(
            serde_json::to_value(Intent::MoveInPlaylist { from: 1, to: 3 }.encode(false)).unwrap(),
            json!({"type": "PlaylistMoveCommand", "fromIndex": 1, "toIndex": 2})
        );
    }

    #[test]
    fn backward_move_keeps_target_unchanged() {
        assert_eq!(
            serde_json::to_value(Intent::MoveInPlaylist { from: 3, to: 1 }.encode(false)).unwrap(),
            json!({"type": "PlaylistMoveCommand", "fromIndex": 3, "toIndex": 1})
        );
    }

    #[test]
    fn request_current_state_is_a_bare_tag() {
        assert_eq!(
            serde_json::to_value(Intent::RequestFullState.encode(false)).unwrap(),
            json!({"type": "RequestCurrentState"})
        );
    }

    #[test]
    fn decodes_playback_state_update() {
        let raw = r#"{
            "type": "PlaybackStateUpdate",
            "state": "PLAYING",
            "track": {"title": "Aja", "artist": "Steely Dan", "album": "Aja", "duration": 200000.0},
            "currentPosition": 50000.0
        }"#;

        let message = ServerMessage::decode(raw).unwrap();
        let ServerMessage::PlaybackStateUpdate {
            state,
            track,
            current_position,
        } = message
        else {
            panic!("wrong variant");
        };

        assert_eq!(state, PlaybackStatus::Playing);
        assert_eq!(track.title, "Aja");
        assert_eq!(track.artwork_url, None);
        assert_eq!(current_position, 50000.0);
    }

    #[test]
    fn decodes_playlist_update_with_extra_entry_fields() {
        let raw = r#"{
            "type": "PlaylistUpdate",
            "tracks": [{"id": "t1", "title": "a", "artist": "b", "album": "c", "bitrate": 320}],
            "currentIndex": 0
        }"#;

        let message = ServerMessage::decode(raw).unwrap();
        let ServerMessage::PlaylistUpdate { tracks, .. } = message else {
            panic!("wrong variant");
        };
        assert_eq!(tracks[0].id, "t1");
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert_eq!(ServerMessage::decode(r#"{"type": "Unknown"}"#), None);
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let raw = r#"{"type": "PlaybackModeUpdate", "shuffle": true}"#;
        assert_eq!(ServerMessage::decode(raw), None);
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert_eq!(ServerMessage::decode("not json"), None);
    }
}
