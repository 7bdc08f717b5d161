use std::time::Duration;

use log::{debug, trace};
use tokio::select;
use tokio::sync::mpsc::UnboundedSender;
use tokio::time;
use tokio_util::sync::CancellationToken;

/// A trailing-edge debouncer for the buffering flag of the playback status.
///
/// Bursts of buffering flips arriving within the damping window collapse into a single settled
/// value, always the most recently fed one. The settled value is reported through the given
/// channel once the window elapses without a superseding [BufferDebouncer::feed] call.
#[derive(Debug)]
pub struct BufferDebouncer {
    interval: Duration,
    sender: UnboundedSender<bool>,
    pending: Option<CancellationToken>,
}

impl BufferDebouncer {
    /// Creates a new debouncer which reports settled values on the given channel.
    pub fn new(interval: Duration, sender: UnboundedSender<bool>) -> Self {
        Self {
            interval,
            sender,
            pending: None,
        }
    }

    /// Feed a new buffering value into the debouncer.
    ///
    /// Any still-pending report is superseded; the value is reported once the damping window
    /// elapses without another feed. A zero interval reports immediately.
    pub fn feed(&mut self, value: bool) {
        self.cancel();

        if self.interval.is_zero() {
            Self::report(&self.sender, value);
            return;
        }

        trace!("Buffer debouncer scheduling settled value {}", value);
        let token = CancellationToken::new();
        self.pending = Some(token.clone());

        let sender = self.sender.clone();
        let interval = self.interval;
        tokio::spawn(async move {
            select! {
                _ = token.cancelled() => {},
                _ = time::sleep(interval) => Self::report(&sender, value),
            }
        });
    }

    /// Cancel any pending report. Canceling an already-fired or already-canceled report is a
    /// no-op.
    pub fn cancel(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }

    fn report(sender: &UnboundedSender<bool>, value: bool) {
        if let Err(e) = sender.send(value) {
            debug!("Buffer debouncer failed to report settled value, {}", e);
        }
    }
}

impl Drop for BufferDebouncer {
    fn drop(&mut self) {
        self.cancel()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;
    use tokio::sync::mpsc::unbounded_channel;
    use video_core::{init_logger, recv_timeout};

    #[tokio::test]
    async fn test_feed_settles_on_last_value() {
        init_logger!();
        let (tx, mut rx) = unbounded_channel();
        let mut debouncer = BufferDebouncer::new(Duration::from_millis(50), tx);

        debouncer.feed(true);
        debouncer.feed(false);
        debouncer.feed(true);

        let result = recv_timeout!(&mut rx, Duration::from_millis(500));
        assert_eq!(true, result, "expected the last fed value to have settled");

        let result = select! {
            _ = time::sleep(Duration::from_millis(150)) => None,
            value = rx.recv() => value,
        };
        assert_eq!(
            None, result,
            "expected the intermediate values to have been dropped"
        );
    }

    #[tokio::test]
    async fn test_feed_zero_interval_reports_immediately() {
        init_logger!();
        let (tx, mut rx) = unbounded_channel();
        let mut debouncer = BufferDebouncer::new(Duration::ZERO, tx);

        debouncer.feed(true);

        let result = rx.try_recv();
        assert_eq!(Ok(true), result, "expected the value to have been reported immediately");
    }

    #[tokio::test]
    async fn test_cancel_pending_report() {
        init_logger!();
        let (tx, mut rx) = unbounded_channel();
        let mut debouncer = BufferDebouncer::new(Duration::from_millis(50), tx);

        debouncer.feed(true);
        debouncer.cancel();
        // canceling twice is a no-op
        debouncer.cancel();

        let result = select! {
            _ = time::sleep(Duration::from_millis(150)) => None,
            value = rx.recv() => value,
        };
        assert_eq!(None, result, "expected the pending report to have been canceled");
    }

    #[tokio::test]
    async fn test_feed_supersedes_pending_report() {
        init_logger!();
        let (tx, mut rx) = unbounded_channel();
        let mut debouncer = BufferDebouncer::new(Duration::from_millis(100), tx);

        debouncer.feed(true);
        time::sleep(Duration::from_millis(50)).await;
        debouncer.feed(false);

        let result = recv_timeout!(&mut rx, Duration::from_millis(500));
        assert_eq!(
            false, result,
            "expected the fresh feed to have reset the pending window"
        );
    }
}
