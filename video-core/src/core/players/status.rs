use derive_more::Display;

/// A raw playback status snapshot as emitted by a [crate::core::players::Player] on every tick.
///
/// Snapshot fields are only meaningful while the media is loaded, so the unloaded case carries
/// no data at all.
#[derive(Debug, Display, Clone, PartialEq)]
pub enum PlaybackStatus {
    /// The player has no media loaded, or the media is still being prepared.
    #[display("unloaded")]
    Unloaded,
    /// The player has media loaded and the snapshot fields are meaningful.
    #[display("loaded, position {}ms", _0.position_millis)]
    Loaded(LoadedStatus),
}

/// The status snapshot of loaded media.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedStatus {
    /// Indicates if the player is currently playing.
    pub is_playing: bool,
    /// Indicates if the player is buffering the media.
    pub is_buffering: bool,
    /// The current playback position in millis.
    pub position_millis: u64,
    /// The portion of the media that is ready to play, in millis.
    pub playable_duration_millis: u64,
    /// The total duration of the media in millis, 0 when not yet known.
    pub duration_millis: u64,
    /// The playback volume between 0.0 and 1.0.
    pub volume: f32,
    /// Indicates if the media playback just reached the end of the media.
    pub did_just_finish: bool,
}

impl LoadedStatus {
    pub fn builder() -> LoadedStatusBuilder {
        LoadedStatusBuilder::builder()
    }
}

impl From<LoadedStatus> for PlaybackStatus {
    fn from(value: LoadedStatus) -> Self {
        PlaybackStatus::Loaded(value)
    }
}

/// Builder for creating new [LoadedStatus] snapshots.
///
/// The playable duration and total duration default to 0 when absent from the underlying
/// player status.
#[derive(Debug)]
pub struct LoadedStatusBuilder {
    is_playing: bool,
    is_buffering: bool,
    position_millis: u64,
    playable_duration_millis: u64,
    duration_millis: u64,
    volume: f32,
    did_just_finish: bool,
}

impl Default for LoadedStatusBuilder {
    fn default() -> Self {
        Self {
            is_playing: false,
            is_buffering: false,
            position_millis: 0,
            playable_duration_millis: 0,
            duration_millis: 0,
            volume: 1.0,
            did_just_finish: false,
        }
    }
}

impl LoadedStatusBuilder {
    pub fn builder() -> Self {
        Self::default()
    }

    pub fn is_playing(mut self, is_playing: bool) -> Self {
        self.is_playing = is_playing;
        self
    }

    pub fn is_buffering(mut self, is_buffering: bool) -> Self {
        self.is_buffering = is_buffering;
        self
    }

    pub fn position_millis(mut self, position_millis: u64) -> Self {
        self.position_millis = position_millis;
        self
    }

    pub fn playable_duration_millis(mut self, playable_duration_millis: u64) -> Self {
        self.playable_duration_millis = playable_duration_millis;
        self
    }

    pub fn duration_millis(mut self, duration_millis: u64) -> Self {
        self.duration_millis = duration_millis;
        self
    }

    pub fn volume(mut self, volume: f32) -> Self {
        self.volume = volume;
        self
    }

    pub fn did_just_finish(mut self, did_just_finish: bool) -> Self {
        self.did_just_finish = did_just_finish;
        self
    }

    pub fn build(self) -> LoadedStatus {
        LoadedStatus {
            is_playing: self.is_playing,
            is_buffering: self.is_buffering,
            position_millis: self.position_millis,
            playable_duration_millis: self.playable_duration_millis,
            duration_millis: self.duration_millis,
            volume: self.volume,
            did_just_finish: self.did_just_finish,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let status = LoadedStatus::builder().position_millis(1500).build();

        assert_eq!(1500, status.position_millis);
        assert_eq!(
            0, status.playable_duration_millis,
            "expected the playable duration to have defaulted to 0"
        );
        assert_eq!(
            0, status.duration_millis,
            "expected the duration to have defaulted to 0"
        );
        assert_eq!(1.0, status.volume);
        assert_eq!(false, status.is_playing);
        assert_eq!(false, status.is_buffering);
        assert_eq!(false, status.did_just_finish);
    }

    #[test]
    fn test_from_loaded_status() {
        let status = LoadedStatus::builder()
            .is_playing(true)
            .position_millis(100)
            .duration_millis(1000)
            .build();

        let result = PlaybackStatus::from(status.clone());

        assert_eq!(PlaybackStatus::Loaded(status), result);
    }
}
