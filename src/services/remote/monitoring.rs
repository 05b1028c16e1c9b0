use std::{sync::Arc, time::Duration};

use chrono::Utc;
use tokio::{
    sync::mpsc::UnboundedReceiver,
    task::JoinHandle,
    time::{Instant, MissedTickBehavior, interval},
};
use tracing::{debug, info, warn};

use crate::services::common::Property;

use super::{
    media_session::MediaSessionHandler,
    position::PositionClock,
    protocol::{ClientMessage, Intent, ServerMessage},
    reducer::{self, ClockCommand},
    transport::{ChannelEvent, MessageChannel},
    types::{
        ConnectionPhase, PlaybackModes, PlaybackSnapshot, PlaylistState, SeekInteraction,
        SessionState, Volume,
    },
};

/// How often the displayed position is recomputed while extrapolating.
const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// Commands accepted by the session event loop.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum SessionCommand {
    /// A user intent to encode and send
    Intent(Intent),
    /// A seek drag started at the given position
    BeginDrag(u64),
    /// The drag moved; purely local, no outbound traffic
    UpdateDrag(u64),
    /// The drag was released at the given position
    EndDrag(u64),
    /// Tear the session down
    Shutdown,
}

/// Single owner of the session state.
///
/// Runs one task that multiplexes inbound channel events, user commands
/// and the extrapolation ticker. Handlers run to completion before the
/// next event is processed, so no locking is needed anywhere.
pub(super) struct SessionMonitor {
    channel: Arc<dyn MessageChannel>,
    media: Arc<dyn MediaSessionHandler>,
    state: SessionState,
    clock: PositionClock,
    phase: Property<ConnectionPhase>,
    playback: Property<PlaybackSnapshot>,
    playlist: Property<PlaylistState>,
    modes: Property<PlaybackModes>,
    volume: Property<Volume>,
    position: Property<u64>,
}

impl SessionMonitor {
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        channel: Arc<dyn MessageChannel>,
        media: Arc<dyn MediaSessionHandler>,
        phase: Property<ConnectionPhase>,
        playback: Property<PlaybackSnapshot>,
        playlist: Property<PlaylistState>,
        modes: Property<PlaybackModes>,
        volume: Property<Volume>,
        position: Property<u64>,
    ) -> Self {
        let state = SessionState {
            phase: ConnectionPhase::Connected,
            ..SessionState::default()
        };

        Self {
            channel,
            media,
            state,
            clock: PositionClock::new(),
            phase,
            playback,
            playlist,
            modes,
            volume,
            position,
        }
    }

    /// Spawn the event loop task.
    pub(super) fn start(self, commands: UnboundedReceiver<SessionCommand>) -> JoinHandle<()> {
        tokio::spawn(self.run(commands))
    }

    async fn run(mut self, mut commands: UnboundedReceiver<SessionCommand>) {
        let channel = Arc::clone(&self.channel);
        let mut ticker = interval(TICK_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                event = channel.recv() => match event {
                    Some(ChannelEvent::Message(raw)) => self.handle_inbound(&raw),
                    Some(ChannelEvent::Closed { reason }) => {
                        self.handle_channel_lost(reason);
                        break;
                    }
                    None => {
                        self.handle_channel_lost(None);
                        break;
                    }
                },
                command = commands.recv() => match command {
                    Some(SessionCommand::Shutdown) | None => {
                        self.teardown().await;
                        break;
                    }
                    Some(command) => self.handle_command(command).await,
                },
                _ = ticker.tick() => self.handle_tick(),
            }
        }
    }

    fn handle_inbound(&mut self, raw: &str) {
        let Some(message) = ServerMessage::decode(raw) else {
            return;
        };

        let (next, clock_command) = reducer::reduce(&self.state, &message, Utc::now());

        match clock_command {
            ClockCommand::Restart { position_ms } => {
                self.clock.set_duration(next.duration_ms());
                self.clock.reset(position_ms, Instant::now());
            }
            ClockCommand::Stop => self.clock.stop(),
            ClockCommand::Keep => {}
        }

        self.state = next;
        self.publish();

        if matches!(
            message,
            ServerMessage::PlaybackStateUpdate { .. } | ServerMessage::PlaybackModeUpdate { .. }
        ) {
            self.notify_media_session();
        }
    }

    async fn handle_command(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::Intent(intent) => self.apply_intent(intent).await,
            SessionCommand::BeginDrag(position_ms) => {
                let clamped = self.state.clamp_position(position_ms);
                self.state.seek = SeekInteraction {
                    active: true,
                    position_ms: clamped,
                };
                self.state.displayed_position_ms = clamped;
                self.clock.stop();
                self.publish();
            }
            SessionCommand::UpdateDrag(position_ms) => {
                if !self.state.seek.active {
                    return;
                }
                let clamped = self.state.clamp_position(position_ms);
                self.state.seek.position_ms = clamped;
                self.state.displayed_position_ms = clamped;
                self.publish();
            }
            SessionCommand::EndDrag(position_ms) => {
                let clamped = self.state.clamp_position(position_ms);
                self.state.seek = SeekInteraction::default();
                self.state.displayed_position_ms = clamped;
                self.publish();

                // Extrapolation stays stopped until the host confirms the
                // seek with its next snapshot.
                self.send(ClientMessage::SeekCommand {
                    position: clamped as f64,
                })
                .await;
            }
            SessionCommand::Shutdown => {}
        }
    }

    async fn apply_intent(&mut self, intent: Intent) {
        let playing_at_submit = self.state.playback.playing;

        // Clamp at the caller boundary; the encoder never validates.
        let intent = match intent {
            Intent::SeekTo { position_ms } => Intent::SeekTo {
                position_ms: self.state.clamp_position(position_ms),
            },
            other => other,
        };

        match intent {
            Intent::Play => self.apply_optimistic_playing(true),
            Intent::Pause => self.apply_optimistic_playing(false),
            Intent::TogglePlayPause => self.apply_optimistic_playing(!playing_at_submit),
            Intent::SeekTo { position_ms } => {
                self.state.displayed_position_ms = position_ms;
                self.clock.stop();
            }
            Intent::SetShuffle(enabled) => self.state.modes.shuffle = enabled,
            Intent::SetRepeat(mode) => self.state.modes.repeat = mode,
            Intent::SetVolume(volume) => self.state.volume = Volume::new(volume),
            Intent::Next
            | Intent::Previous
            | Intent::RequestFullState
            | Intent::RemoveFromPlaylist { .. }
            | Intent::MoveInPlaylist { .. } => {}
        }

        self.publish();

        if matches!(
            intent,
            Intent::Play
                | Intent::Pause
                | Intent::TogglePlayPause
                | Intent::SetShuffle(_)
                | Intent::SetRepeat(_)
        ) {
            self.notify_media_session();
        }

        self.send(intent.encode(playing_at_submit)).await;
    }

    /// Flip the local playing flag ahead of host confirmation.
    ///
    /// A play transition restarts extrapolation from the displayed
    /// position; a pause freezes it. The next snapshot re-anchors either
    /// way and silently wins if the host disagrees.
    fn apply_optimistic_playing(&mut self, playing: bool) {
        self.state.playback.playing = playing;

        if self.state.seek.active {
            return;
        }

        match (playing, self.state.duration_ms()) {
            (true, Some(duration)) => {
                self.clock.set_duration(Some(duration));
                self.clock
                    .start(self.state.displayed_position_ms, Instant::now());
            }
            _ => self.clock.stop(),
        }
    }

    fn handle_tick(&mut self) {
        if self.state.seek.active {
            return;
        }

        if let Some(position_ms) = self.clock.tick(Instant::now()) {
            self.state.displayed_position_ms = position_ms;
            self.position.set(position_ms);
        }
    }

    async fn send(&self, message: ClientMessage) {
        let payload = match serde_json::to_string(&message) {
            Ok(payload) => payload,
            Err(err) => {
                warn!("Failed to encode outbound message: {err}");
                return;
            }
        };

        // Fire-and-forget: a failed send is dropped, the next full state
        // request resynchronizes.
        if let Err(err) = self.channel.send(payload).await {
            debug!("Outbound message dropped: {err}");
        }
    }

    fn handle_channel_lost(&mut self, reason: Option<String>) {
        match reason {
            Some(reason) => warn!("Channel to player host lost: {reason}"),
            None => warn!("Channel to player host lost"),
        }

        self.clock.stop();
        self.state.phase = ConnectionPhase::Disconnected;
        self.publish();
    }

    async fn teardown(&mut self) {
        info!("Shutting down remote session");

        self.clock.stop();
        self.state.phase = ConnectionPhase::Closed;
        self.publish();
        self.channel.close().await;
    }

    fn publish(&self) {
        self.phase.set(self.state.phase);
        self.playback.set(self.state.playback.clone());
        self.playlist.set(self.state.playlist.clone());
        self.modes.set(self.state.modes);
        self.volume.set(self.state.volume);
        self.position.set(self.state.displayed_position_ms);
    }

    fn notify_media_session(&self) {
        self.media.update_playback_state(
            self.state.playback.playing,
            self.state.displayed_position_ms,
            self.state.duration_ms(),
            self.state.modes,
        );
        self.media
            .update_now_playing(self.state.playback.track.as_ref());
    }
}
