/// The playback position progress of the media.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    /// The current playback position in millis.
    pub progress: u64,
    /// The playback position as a percentage of the total duration.
    ///
    /// This value is not finite while the total duration is still unknown (0), in which case it
    /// is delivered as-is to the consumer.
    pub percent: f64,
}

/// The playable range progress of the media, distinct from the playback position.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayableProgress {
    /// The portion of the media that is ready to play, in millis.
    pub playable_duration: u64,
    /// The playable portion as a percentage of the total duration.
    ///
    /// Not finite while the total duration is still unknown (0), delivered as-is.
    pub playable_duration_percent: f64,
}
