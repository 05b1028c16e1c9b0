use chrono::{DateTime, Utc};

use super::protocol::{PlaybackStatus, ServerMessage, WirePlaylistEntry, WireTrack};
use super::types::{PlaybackSnapshot, PlaylistEntry, PlaylistState, SessionState, TrackInfo, Volume};

/// Extrapolation signal produced alongside a reduced state.
///
/// The reducer itself is side-effect-free; the session applies this to the
/// position clock after swapping in the new state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ClockCommand {
    /// Leave the clock as it is
    Keep,
    /// Re-anchor the clock at the given position and run it
    Restart {
        /// New reference position in milliseconds
        position_ms: u64,
    },
    /// Stop the clock
    Stop,
}

impl From<&WireTrack> for TrackInfo {
    fn from(track: &WireTrack) -> Self {
        Self {
            title: track.title.clone(),
            artist: track.artist.clone(),
            album: track.album.clone(),
            duration_ms: track.duration.max(0.0) as u64,
            artwork_url: track.artwork_url.clone(),
        }
    }
}

impl From<&WirePlaylistEntry> for PlaylistEntry {
    fn from(entry: &WirePlaylistEntry) -> Self {
        Self {
            id: entry.id.clone(),
            title: entry.title.clone(),
            artist: entry.artist.clone(),
            album: entry.album.clone(),
        }
    }
}

/// Fold one inbound message into the session state.
///
/// Deterministic and synchronous: each message tag replaces its state slice
/// wholesale. A playback snapshot arriving mid-drag is recorded but leaves
/// the displayed position alone; the drag wins until release.
pub(crate) fn reduce(
    state: &SessionState,
    message: &ServerMessage,
    received_at: DateTime<Utc>,
) -> (SessionState, ClockCommand) {
    let mut next = state.clone();

    match message {
        ServerMessage::PlaybackStateUpdate {
            state: status,
            track,
            current_position,
        } => {
            let track = TrackInfo::from(track);
            let playing = *status == PlaybackStatus::Playing;
            let position_ms = (current_position.max(0.0) as u64).min(track.duration_ms);

            next.playback = PlaybackSnapshot {
                playing,
                track: Some(track),
                position_ms,
                received_at: Some(received_at),
            };

            if next.seek.active {
                (next, ClockCommand::Keep)
            } else {
                next.displayed_position_ms = position_ms;
                let command = if playing {
                    ClockCommand::Restart { position_ms }
                } else {
                    ClockCommand::Stop
                };
                (next, command)
            }
        }
        ServerMessage::PlaylistUpdate {
            tracks,
            current_index,
        } => {
            next.playlist = PlaylistState {
                tracks: tracks.iter().map(PlaylistEntry::from).collect(),
                current_index: usize::try_from(*current_index).unwrap_or(0),
            };
            (next, ClockCommand::Keep)
        }
        ServerMessage::PlaybackModeUpdate {
            shuffle,
            repeat_mode,
        } => {
            next.modes.shuffle = *shuffle;
            next.modes.repeat = *repeat_mode;
            (next, ClockCommand::Keep)
        }
        ServerMessage::VolumeUpdate { volume } => {
            next.volume = Volume::new(*volume);
            (next, ClockCommand::Keep)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::types::{RepeatMode, SeekInteraction};
    use super::*;

    fn playback_update(playing: bool, position: f64, artwork: Option<&str>) -> ServerMessage {
        ServerMessage::PlaybackStateUpdate {
            state: if playing {
                PlaybackStatus::Playing
            } else {
                PlaybackStatus::Paused
            },
            track: WireTrack {
                title: "Kid Charlemagne".to_string(),
                artist: "Steely Dan".to_string(),
                album: "The Royal Scam".to_string(),
                artwork_url: artwork.map(str::to_string),
                duration: 200_000.0,
            },
            current_position: position,
        }
    }

    #[test]
    fn playback_update_replaces_snapshot_and_restarts_clock() {
        let state = SessionState::default();
        let (next, command) = reduce(&state, &playback_update(true, 50_000.0, None), Utc::now());

        assert!(next.playback.playing);
        assert_eq!(next.playback.position_ms, 50_000);
        assert_eq!(next.displayed_position_ms, 50_000);
        assert_eq!(
            command,
            ClockCommand::Restart {
                position_ms: 50_000
            }
        );
    }

    #[test]
    fn paused_update_stops_clock() {
        let state = SessionState::default();
        let (next, command) = reduce(&state, &playback_update(false, 12_000.0, None), Utc::now());

        assert!(!next.playback.playing);
        assert_eq!(command, ClockCommand::Stop);
    }

    #[test]
    fn snapshot_fields_never_survive_replacement() {
        let state = SessionState::default();
        let (with_art, _) = reduce(
            &state,
            &playback_update(true, 1_000.0, Some("http://host/cover.png")),
            Utc::now(),
        );
        assert!(
            with_art
                .playback
                .track
                .as_ref()
                .unwrap()
                .artwork_url
                .is_some()
        );

        // The next update omits artwork; none may leak through.
        let (without_art, _) = reduce(&with_art, &playback_update(true, 2_000.0, None), Utc::now());
        assert_eq!(
            without_art.playback.track.as_ref().unwrap().artwork_url,
            None
        );
    }

    #[test]
    fn position_beyond_duration_is_clamped() {
        let state = SessionState::default();
        let (next, _) = reduce(&state, &playback_update(true, 999_999.0, None), Utc::now());

        assert_eq!(next.playback.position_ms, 200_000);
        assert_eq!(next.displayed_position_ms, 200_000);
    }

    #[test]
    fn active_drag_records_snapshot_but_keeps_displayed_position() {
        let mut state = SessionState::default();
        state.seek = SeekInteraction {
            active: true,
            position_ms: 10_000,
        };
        state.displayed_position_ms = 10_000;

        let (next, command) = reduce(&state, &playback_update(true, 90_000.0, None), Utc::now());

        assert_eq!(next.playback.position_ms, 90_000);
        assert_eq!(next.displayed_position_ms, 10_000);
        assert_eq!(command, ClockCommand::Keep);
    }

    #[test]
    fn playlist_update_replaces_wholesale() {
        let raw = ServerMessage::PlaylistUpdate {
            tracks: vec![WirePlaylistEntry {
                id: "t9".to_string(),
                title: "Peg".to_string(),
                artist: "Steely Dan".to_string(),
                album: "Aja".to_string(),
            }],
            current_index: 0,
        };

        let mut state = SessionState::default();
        state.playlist.tracks = vec![
            PlaylistEntry {
                id: "a".to_string(),
                title: "a".to_string(),
                artist: "a".to_string(),
                album: "a".to_string(),
            },
            PlaylistEntry {
                id: "b".to_string(),
                title: "b".to_string(),
                artist: "b".to_string(),
                album: "b".to_string(),
            },
        ];
        state.playlist.current_index = 1;

        let (next, _) = reduce(&state, &raw, Utc::now());
        assert_eq!(next.playlist.tracks.len(), 1);
        assert_eq!(next.playlist.tracks[0].id, "t9");
        assert_eq!(next.playlist.current_index, 0);
    }

    #[test]
    fn negative_current_index_maps_to_zero() {
        let raw = ServerMessage::PlaylistUpdate {
            tracks: vec![],
            current_index: -1,
        };
        let (next, _) = reduce(&SessionState::default(), &raw, Utc::now());
        assert_eq!(next.playlist.current_index, 0);
    }

    #[test]
    fn mode_and_volume_updates_replace_their_slices() {
        let state = SessionState::default();

        let (next, _) = reduce(
            &state,
            &ServerMessage::PlaybackModeUpdate {
                shuffle: true,
                repeat_mode: RepeatMode::One,
            },
            Utc::now(),
        );
        assert!(next.modes.shuffle);
        assert_eq!(next.modes.repeat, RepeatMode::One);

        let (next, _) = reduce(
            &next,
            &ServerMessage::VolumeUpdate { volume: 1.4 },
            Utc::now(),
        );
        assert_eq!(*next.volume, 1.0);
    }
}
