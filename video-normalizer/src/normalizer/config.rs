use std::fmt::{Debug, Formatter};
use std::time::Duration;

use crate::normalizer::{PlayableProgress, Progress};

/// The default damping window of the buffering debouncer.
pub const DEFAULT_BUFFER_UPDATE_INTERVAL: Duration = Duration::from_millis(10);

/// The callback type invoked with a changed status value.
pub type StatusCallback<E> = Box<dyn Fn(E) + Send>;

/// The callback type invoked when the media playback reached the end of the media.
pub type EndedCallback = Box<dyn Fn() + Send>;

/// The configuration of a status normalizer.
///
/// Every callback is optional; an absent callback skips the corresponding change check
/// entirely.
pub struct NormalizerConfig {
    pub(crate) paused: bool,
    pub(crate) buffer_update_interval: Duration,
    pub(crate) on_play: Option<StatusCallback<bool>>,
    pub(crate) on_buffer: Option<StatusCallback<bool>>,
    pub(crate) on_volume_change: Option<StatusCallback<f32>>,
    pub(crate) on_end: Option<EndedCallback>,
    pub(crate) on_progress: Option<StatusCallback<Progress>>,
    pub(crate) on_playable_progress: Option<StatusCallback<PlayableProgress>>,
}

impl NormalizerConfig {
    pub fn builder() -> NormalizerConfigBuilder {
        NormalizerConfigBuilder::builder()
    }

    /// The paused directive value to apply when the normalizer is attached.
    pub fn paused(&self) -> bool {
        self.paused
    }

    /// The damping window used to debounce the buffering flag.
    pub fn buffer_update_interval(&self) -> Duration {
        self.buffer_update_interval
    }
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            paused: false,
            buffer_update_interval: DEFAULT_BUFFER_UPDATE_INTERVAL,
            on_play: None,
            on_buffer: None,
            on_volume_change: None,
            on_end: None,
            on_progress: None,
            on_playable_progress: None,
        }
    }
}

impl Debug for NormalizerConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NormalizerConfig")
            .field("paused", &self.paused)
            .field("buffer_update_interval", &self.buffer_update_interval)
            .field("on_play", &self.on_play.is_some())
            .field("on_buffer", &self.on_buffer.is_some())
            .field("on_volume_change", &self.on_volume_change.is_some())
            .field("on_end", &self.on_end.is_some())
            .field("on_progress", &self.on_progress.is_some())
            .field("on_playable_progress", &self.on_playable_progress.is_some())
            .finish()
    }
}

/// Builder for creating new [NormalizerConfig] instances.
#[derive(Default)]
pub struct NormalizerConfigBuilder {
    paused: Option<bool>,
    buffer_update_interval: Option<Duration>,
    on_play: Option<StatusCallback<bool>>,
    on_buffer: Option<StatusCallback<bool>>,
    on_volume_change: Option<StatusCallback<f32>>,
    on_end: Option<EndedCallback>,
    on_progress: Option<StatusCallback<Progress>>,
    on_playable_progress: Option<StatusCallback<PlayableProgress>>,
}

impl NormalizerConfigBuilder {
    pub fn builder() -> Self {
        Self::default()
    }

    /// Sets the initial paused directive of the playback.
    pub fn paused(mut self, paused: bool) -> Self {
        self.paused = Some(paused);
        self
    }

    /// Sets the damping window used to debounce the buffering flag.
    /// A zero interval degrades to immediate reporting.
    pub fn buffer_update_interval(mut self, interval: Duration) -> Self {
        self.buffer_update_interval = Some(interval);
        self
    }

    /// Sets the callback invoked on each play/pause transition.
    pub fn on_play<C>(mut self, callback: C) -> Self
    where
        C: Fn(bool) + Send + 'static,
    {
        self.on_play = Some(Box::new(callback));
        self
    }

    /// Sets the callback invoked on each debounced buffering transition.
    pub fn on_buffer<C>(mut self, callback: C) -> Self
    where
        C: Fn(bool) + Send + 'static,
    {
        self.on_buffer = Some(Box::new(callback));
        self
    }

    /// Sets the callback invoked on each volume change.
    pub fn on_volume_change<C>(mut self, callback: C) -> Self
    where
        C: Fn(f32) + Send + 'static,
    {
        self.on_volume_change = Some(Box::new(callback));
        self
    }

    /// Sets the callback invoked on each tick where the playback reached the end of the media.
    pub fn on_end<C>(mut self, callback: C) -> Self
    where
        C: Fn() + Send + 'static,
    {
        self.on_end = Some(Box::new(callback));
        self
    }

    /// Sets the callback invoked on each playback position change.
    pub fn on_progress<C>(mut self, callback: C) -> Self
    where
        C: Fn(Progress) + Send + 'static,
    {
        self.on_progress = Some(Box::new(callback));
        self
    }

    /// Sets the callback invoked on each playable range change.
    pub fn on_playable_progress<C>(mut self, callback: C) -> Self
    where
        C: Fn(PlayableProgress) + Send + 'static,
    {
        self.on_playable_progress = Some(Box::new(callback));
        self
    }

    pub fn build(self) -> NormalizerConfig {
        NormalizerConfig {
            paused: self.paused.unwrap_or(false),
            buffer_update_interval: self
                .buffer_update_interval
                .unwrap_or(DEFAULT_BUFFER_UPDATE_INTERVAL),
            on_play: self.on_play,
            on_buffer: self.on_buffer,
            on_volume_change: self.on_volume_change,
            on_end: self.on_end,
            on_progress: self.on_progress,
            on_playable_progress: self.on_playable_progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = NormalizerConfig::default();

        assert_eq!(false, config.paused());
        assert_eq!(DEFAULT_BUFFER_UPDATE_INTERVAL, config.buffer_update_interval());
        assert!(config.on_play.is_none());
        assert!(config.on_buffer.is_none());
        assert!(config.on_volume_change.is_none());
        assert!(config.on_end.is_none());
        assert!(config.on_progress.is_none());
        assert!(config.on_playable_progress.is_none());
    }

    #[test]
    fn test_builder() {
        let config = NormalizerConfig::builder()
            .paused(true)
            .buffer_update_interval(Duration::from_millis(50))
            .on_play(|_| {})
            .on_end(|| {})
            .build();

        assert_eq!(true, config.paused());
        assert_eq!(Duration::from_millis(50), config.buffer_update_interval());
        assert!(config.on_play.is_some());
        assert!(config.on_buffer.is_none());
        assert!(config.on_end.is_some());
    }
}
