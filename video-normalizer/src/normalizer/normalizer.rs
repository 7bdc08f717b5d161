use std::sync::Arc;

use derive_more::Display;
use fx_callback::{Callback, Subscription};
use log::{debug, trace};
use tokio::select;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;

use video_core::core::players::{PlaybackStatus, Player};

use crate::normalizer::{
    BufferDebouncer, NormalizerConfig, NormalizerError, NormalizerHandle, PlayableProgress,
    Progress, Result,
};

/// Normalizes the raw playback status stream of a [Player] into sparse, change-only callbacks.
///
/// The normalizer subscribes to the player's status ticks and compares selected snapshot fields
/// against the previously observed values, invoking the configured callback only on an actual
/// transition. The buffering flag is additionally debounced before it is compared. The `paused`
/// directive is forwarded to the player as `play`/`pause` commands, once per transition.
///
/// Detaching (or dropping) the normalizer stops the observation and cancels any pending
/// debounce timer.
#[derive(Debug, Display)]
#[display("{}", inner)]
pub struct StatusNormalizer {
    inner: Arc<InnerStatusNormalizer>,
}

impl StatusNormalizer {
    /// Attach a new normalizer to the given player with the given configuration.
    ///
    /// The configured `paused` value is applied as a transition from the implicit unset state,
    /// issuing an initial `play` or `pause` command to the player.
    pub fn attach(player: Arc<Box<dyn Player>>, config: NormalizerConfig) -> Self {
        let handle = NormalizerHandle::new();
        trace!("Attaching status normalizer {} with {:?}", handle, config);
        let status_receiver = player.subscribe();
        let (command_sender, command_receiver) = unbounded_channel();
        let inner = Arc::new(InnerStatusNormalizer {
            handle,
            player,
            command_sender,
            cancellation_token: CancellationToken::new(),
        });

        let inner_main = inner.clone();
        tokio::spawn(async move {
            inner_main
                .start(config, command_receiver, status_receiver)
                .await;
        });

        Self { inner }
    }

    /// The unique handle of this normalizer instance.
    pub fn handle(&self) -> NormalizerHandle {
        self.inner.handle.clone()
    }

    /// Update the paused directive of the playback.
    ///
    /// A changed value issues a `play` (false) or `pause` (true) command to the player;
    /// an unchanged value issues no command.
    ///
    /// # Returns
    ///
    /// It returns an error when the normalizer has already been detached.
    pub fn set_paused(&self, paused: bool) -> Result<()> {
        self.inner.send_command(NormalizerCommand::SetPaused(paused))
    }

    /// Detach the normalizer from the player, stopping the status observation.
    ///
    /// Any pending debounce timer is canceled. Detaching an already-detached normalizer is a
    /// no-op.
    pub fn detach(&self) {
        debug!("Detaching status normalizer {}", self.inner.handle);
        self.inner.cancellation_token.cancel();
    }
}

impl Drop for StatusNormalizer {
    fn drop(&mut self) {
        self.inner.cancellation_token.cancel();
    }
}

#[derive(Debug, PartialEq)]
enum NormalizerCommand {
    SetPaused(bool),
}

#[derive(Debug, Display)]
#[display("{}", handle)]
struct InnerStatusNormalizer {
    handle: NormalizerHandle,
    player: Arc<Box<dyn Player>>,
    command_sender: UnboundedSender<NormalizerCommand>,
    cancellation_token: CancellationToken,
}

impl InnerStatusNormalizer {
    /// Start the main loop of the normalizer.
    ///
    /// All status ticks, directives and settled debounce values are processed on this single
    /// loop, one at a time.
    async fn start(
        &self,
        config: NormalizerConfig,
        mut command_receiver: UnboundedReceiver<NormalizerCommand>,
        mut status_receiver: Subscription<PlaybackStatus>,
    ) {
        let (settled_sender, mut settled_receiver) = unbounded_channel();
        let mut debouncer = BufferDebouncer::new(config.buffer_update_interval, settled_sender);
        let mut state = NormalizerState::default();

        self.apply_paused(&mut state, config.paused).await;

        loop {
            select! {
                _ = self.cancellation_token.cancelled() => break,
                Some(command) = command_receiver.recv() => self.handle_command(command, &mut state).await,
                status = status_receiver.recv() => {
                    match status {
                        Ok(status) => self.handle_status_tick(&*status, &config, &mut state, &mut debouncer),
                        Err(RecvError::Lagged(skipped)) => {
                            debug!("Status normalizer {} lagged behind {} status ticks", self, skipped)
                        },
                        Err(RecvError::Closed) => break,
                    }
                },
                Some(value) = settled_receiver.recv() => self.handle_settled_buffering(value, &config, &mut state),
            }
        }

        debouncer.cancel();
        debug!("Status normalizer {} main loop ended", self);
    }

    async fn handle_command(&self, command: NormalizerCommand, state: &mut NormalizerState) {
        trace!("Status normalizer {} handling command {:?}", self, command);
        match command {
            NormalizerCommand::SetPaused(paused) => self.apply_paused(state, paused).await,
        }
    }

    /// Apply the paused directive, issuing a play/pause command to the player on each
    /// transition. The first applied value counts as a transition from the unset state.
    async fn apply_paused(&self, state: &mut NormalizerState, paused: bool) {
        if state.paused == Some(paused) {
            trace!("Status normalizer {} paused directive is unchanged", self);
            return;
        }

        state.paused = Some(paused);
        if paused {
            debug!("Status normalizer {} pausing the player playback", self);
            self.player.pause().await;
        } else {
            debug!("Status normalizer {} starting the player playback", self);
            self.player.play().await;
        }
    }

    /// Process a single raw status tick.
    ///
    /// Unloaded snapshots are ignored entirely. For loaded snapshots, the change checks run in
    /// a fixed order and each invokes at most one callback per tick. A check is skipped when
    /// its callback is not registered.
    fn handle_status_tick(
        &self,
        status: &PlaybackStatus,
        config: &NormalizerConfig,
        state: &mut NormalizerState,
        debouncer: &mut BufferDebouncer,
    ) {
        let status = match status {
            PlaybackStatus::Unloaded => {
                trace!("Status normalizer {} ignoring unloaded status tick", self);
                return;
            }
            PlaybackStatus::Loaded(e) => e,
        };
        trace!(
            "Status normalizer {} processing status tick {:?}",
            self,
            status
        );

        if let Some(on_play) = config.on_play.as_ref() {
            if state.last_playing != Some(status.is_playing) {
                debug!(
                    "Status normalizer {} playing state changed to {}",
                    self, status.is_playing
                );
                on_play(status.is_playing);
                state.last_playing = Some(status.is_playing);
            }
        }

        if config.on_buffer.is_some() {
            debouncer.feed(status.is_buffering);
        }

        if let Some(on_progress) = config.on_progress.as_ref() {
            if state.last_progress_millis != Some(status.position_millis) {
                on_progress(Progress {
                    progress: status.position_millis,
                    percent: Self::percent_of(status.position_millis, status.duration_millis),
                });
                state.last_progress_millis = Some(status.position_millis);
            }
        }

        if let Some(on_playable_progress) = config.on_playable_progress.as_ref() {
            if state.last_playable_millis != Some(status.playable_duration_millis) {
                on_playable_progress(PlayableProgress {
                    playable_duration: status.playable_duration_millis,
                    playable_duration_percent: Self::percent_of(
                        status.playable_duration_millis,
                        status.duration_millis,
                    ),
                });
                state.last_playable_millis = Some(status.playable_duration_millis);
            }
        }

        if let Some(on_volume_change) = config.on_volume_change.as_ref() {
            if state.last_volume != Some(status.volume) {
                debug!(
                    "Status normalizer {} volume changed to {}",
                    self, status.volume
                );
                on_volume_change(status.volume);
                state.last_volume = Some(status.volume);
            }
        }

        if let Some(on_end) = config.on_end.as_ref() {
            if status.did_just_finish {
                debug!("Status normalizer {} reached the end of the media", self);
                on_end();
            }
        }
    }

    /// Process a settled buffering value reported by the debouncer.
    /// The debouncer can settle on the same value twice, in which case no callback is invoked.
    fn handle_settled_buffering(
        &self,
        value: bool,
        config: &NormalizerConfig,
        state: &mut NormalizerState,
    ) {
        if value != state.last_buffering {
            debug!(
                "Status normalizer {} buffering state changed to {}",
                self, value
            );
            if let Some(on_buffer) = config.on_buffer.as_ref() {
                on_buffer(value);
            }
            state.last_buffering = value;
        }
    }

    fn send_command(&self, command: NormalizerCommand) -> Result<()> {
        self.command_sender.send(command).map_err(|e| {
            debug!("Status normalizer {} failed to send command, {}", self, e);
            NormalizerError::Detached
        })
    }

    // the division is intentionally unguarded, a 0 duration yields a non-finite
    // percentage which is delivered as-is
    fn percent_of(value: u64, duration: u64) -> f64 {
        100.0 * value as f64 / duration as f64
    }
}

/// The remembered values of the previously observed status fields.
///
/// The playing and position values start unset, so the first observed loaded tick counts as a
/// transition. The volume starts at the player default of 1.0 and the buffering value at
/// false; neither reports a callback until an actual change is observed.
#[derive(Debug)]
struct NormalizerState {
    paused: Option<bool>,
    last_playing: Option<bool>,
    last_buffering: bool,
    last_progress_millis: Option<u64>,
    last_playable_millis: Option<u64>,
    last_volume: Option<f32>,
}

impl Default for NormalizerState {
    fn default() -> Self {
        Self {
            paused: None,
            last_playing: None,
            last_buffering: false,
            last_progress_millis: None,
            last_playable_millis: None,
            last_volume: Some(1.0),
        }
    }
}
