use std::fmt::{Debug, Display};

use async_trait::async_trait;
use fx_callback::Callback;

use crate::core::players::PlaybackStatus;

/// The playback engine that decodes and renders media.
///
/// The player pushes [PlaybackStatus] snapshots at its own cadence through the
/// [Callback] subscription and accepts fire-and-forget playback commands.
/// The completion or failure of a command is not observable through this trait.
#[async_trait]
pub trait Player: Debug + Display + Callback<PlaybackStatus> + Send + Sync {
    /// Request the player to start or resume the playback.
    async fn play(&self);

    /// Request the player to pause the playback.
    async fn pause(&self);
}
