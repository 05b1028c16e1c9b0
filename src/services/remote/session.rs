use std::sync::Arc;

use futures::Stream;
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, info, instrument};

use crate::services::common::Property;

use super::{
    error::SessionError,
    media_session::MediaSessionHandler,
    monitoring::{SessionCommand, SessionMonitor},
    protocol::{ClientMessage, Intent},
    transport::MessageChannel,
    types::{
        ConnectionPhase, PlaybackModes, PlaybackSnapshot, PlaylistState, RepeatMode, Volume,
    },
};

/// Synchronization session with a remote player host.
///
/// Mirrors the host's playback state into reactive properties and turns
/// user intents into outbound commands without waiting for round-trip
/// confirmation. Each property can be watched independently for efficient
/// UI updates; `watch()` merges them all.
///
/// Intent submission is fire-and-forget: after the channel is lost every
/// submission is silently dropped and reconnection is a fresh, explicit
/// `connect` call. The session never retries on its own.
pub struct RemoteSession {
    commands: mpsc::UnboundedSender<SessionCommand>,

    /// Connection lifecycle phase
    pub phase: Property<ConnectionPhase>,
    /// Latest authoritative playback snapshot
    pub playback: Property<PlaybackSnapshot>,
    /// Latest authoritative playlist
    pub playlist: Property<PlaylistState>,
    /// Shuffle and repeat modes
    pub modes: Property<PlaybackModes>,
    /// Player volume
    pub volume: Property<Volume>,
    /// Displayed playback position in milliseconds
    pub position: Property<u64>,

    /// Handle to the event loop task
    monitor_handle: Option<JoinHandle<()>>,
}

impl RemoteSession {
    /// Connect over an established channel and start mirroring state.
    ///
    /// Sends the pairing handshake and an initial full-state request, then
    /// spawns the event loop. The host is expected to push a snapshot in
    /// response; this call does not wait for it, so the properties hold
    /// defaults until the first update arrives.
    ///
    /// # Errors
    /// Returns `SessionError` if the handshake cannot be encoded or sent
    #[instrument(skip_all)]
    pub async fn connect(
        channel: Arc<dyn MessageChannel>,
        pairing_key: &str,
        media: Arc<dyn MediaSessionHandler>,
    ) -> Result<Self, SessionError> {
        info!("Connecting to remote player host");

        let phase = Property::new(ConnectionPhase::Connecting);
        let playback = Property::new(PlaybackSnapshot::default());
        let playlist = Property::new(PlaylistState::default());
        let modes = Property::new(PlaybackModes::default());
        let volume = Property::new(Volume::default());
        let position = Property::new(0u64);

        send_message(
            channel.as_ref(),
            &ClientMessage::ControllerConnect {
                key: pairing_key.to_string(),
            },
        )
        .await?;
        send_message(channel.as_ref(), &ClientMessage::RequestCurrentState).await?;

        phase.set(ConnectionPhase::Connected);

        let (commands, commands_rx) = mpsc::unbounded_channel();
        let monitor = SessionMonitor::new(
            Arc::clone(&channel),
            media,
            phase.clone(),
            playback.clone(),
            playlist.clone(),
            modes.clone(),
            volume.clone(),
            position.clone(),
        );
        let monitor_handle = Some(monitor.start(commands_rx));

        Ok(Self {
            commands,
            phase,
            playback,
            playlist,
            modes,
            volume,
            position,
            monitor_handle,
        })
    }

    /// Start or resume playback.
    pub fn play(&self) {
        self.submit(SessionCommand::Intent(Intent::Play));
    }

    /// Pause playback.
    pub fn pause(&self) {
        self.submit(SessionCommand::Intent(Intent::Pause));
    }

    /// Toggle between play and pause.
    pub fn toggle_play_pause(&self) {
        self.submit(SessionCommand::Intent(Intent::TogglePlayPause));
    }

    /// Skip to the next track.
    pub fn next(&self) {
        self.submit(SessionCommand::Intent(Intent::Next));
    }

    /// Go back to the previous track.
    pub fn previous(&self) {
        self.submit(SessionCommand::Intent(Intent::Previous));
    }

    /// Seek to an absolute position, clamped to the track length.
    pub fn seek_to(&self, position_ms: u64) {
        self.submit(SessionCommand::Intent(Intent::SeekTo { position_ms }));
    }

    /// Enable or disable shuffle.
    pub fn set_shuffle(&self, enabled: bool) {
        self.submit(SessionCommand::Intent(Intent::SetShuffle(enabled)));
    }

    /// Set the repeat mode.
    pub fn set_repeat(&self, mode: RepeatMode) {
        self.submit(SessionCommand::Intent(Intent::SetRepeat(mode)));
    }

    /// Cycle repeat mode to the next state.
    ///
    /// Cycles through: Off → All → One → Off
    pub fn cycle_repeat(&self) {
        let next = match self.modes.get().repeat {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        };
        self.set_repeat(next);
    }

    /// Set the player volume, clamped to [0, 1].
    pub fn set_volume(&self, volume: f64) {
        self.submit(SessionCommand::Intent(Intent::SetVolume(*Volume::new(
            volume,
        ))));
    }

    /// Ask the host to push a full state snapshot.
    pub fn request_full_state(&self) {
        self.submit(SessionCommand::Intent(Intent::RequestFullState));
    }

    /// Remove one playlist entry by index.
    pub fn remove_from_playlist(&self, index: usize) {
        self.submit(SessionCommand::Intent(Intent::RemoveFromPlaylist { index }));
    }

    /// Move one playlist entry to a new index.
    pub fn move_in_playlist(&self, from: usize, to: usize) {
        self.submit(SessionCommand::Intent(Intent::MoveInPlaylist { from, to }));
    }

    /// Begin a seek drag at the given position.
    ///
    /// Suspends extrapolation and snapshot-driven position updates; sends
    /// nothing.
    pub fn begin_drag(&self, position_ms: u64) {
        self.submit(SessionCommand::BeginDrag(position_ms));
    }

    /// Move an active seek drag. Purely local; no outbound traffic per
    /// intermediate value.
    pub fn update_drag(&self, position_ms: u64) {
        self.submit(SessionCommand::UpdateDrag(position_ms));
    }

    /// Release a seek drag, sending exactly one seek command.
    pub fn end_drag(&self, position_ms: u64) {
        self.submit(SessionCommand::EndDrag(position_ms));
    }

    /// Shut the session down and close the channel.
    pub fn shutdown(&self) {
        self.submit(SessionCommand::Shutdown);
    }

    /// Watch every state slice as one merged stream.
    ///
    /// The stream emits a session handle whenever any slice changes; read
    /// the properties for current values.
    pub fn watch(&self) -> impl Stream<Item = RemoteSession> + Send {
        crate::watch_all!(self, phase, playback, playlist, modes, volume, position)
    }

    fn submit(&self, command: SessionCommand) {
        if self.commands.send(command).is_err() {
            debug!("Session loop has ended; command dropped");
        }
    }
}

async fn send_message(
    channel: &dyn MessageChannel,
    message: &ClientMessage,
) -> Result<(), SessionError> {
    let payload = serde_json::to_string(message)?;
    channel.send(payload).await?;
    Ok(())
}

impl Clone for RemoteSession {
    fn clone(&self) -> Self {
        Self {
            commands: self.commands.clone(),
            phase: self.phase.clone(),
            playback: self.playback.clone(),
            playlist: self.playlist.clone(),
            modes: self.modes.clone(),
            volume: self.volume.clone(),
            position: self.position.clone(),
            monitor_handle: None,
        }
    }
}

impl Drop for RemoteSession {
    fn drop(&mut self) {
        if let Some(handle) = self.monitor_handle.take() {
            handle.abort();
        }
    }
}
