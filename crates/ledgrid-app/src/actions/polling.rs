//! Periodic status polling.
//!
//! The poller only emits [`Message::PollTick`]. Whether a tick turns into a
//! request is decided by the update function, which skips ticks while a poll
//! is still outstanding.

use std::time::Duration;

use ledgrid_core::prelude::*;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::message::Message;

/// Spawn the poll timer.
///
/// The first tick fires immediately so the grid is populated on startup.
/// The loop runs until the shutdown channel receives `true` or `msg_tx`
/// is closed.
pub fn spawn_status_polling(
    msg_tx: mpsc::Sender<Message>,
    interval: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        debug!("Status polling every {:?}", interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if msg_tx.send(Message::PollTick).await.is_err() {
                        // Channel closed, engine is shutting down
                        break;
                    }
                }
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }

        debug!("Status polling stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_is_immediate() {
        let (tx, mut rx) = mpsc::channel(8);
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = spawn_status_polling(tx, Duration::from_secs(1), shutdown_rx);

        let msg = rx.recv().await;
        assert!(matches!(msg, Some(Message::PollTick)));
        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_follow_interval() {
        let (tx, mut rx) = mpsc::channel(8);
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = spawn_status_polling(tx, Duration::from_millis(500), shutdown_rx);

        for _ in 0..3 {
            assert!(matches!(rx.recv().await, Some(Message::PollTick)));
        }
        handle.abort();
    }

    #[tokio::test]
    async fn test_shutdown_stops_polling() {
        let (tx, _rx) = mpsc::channel(8);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = spawn_status_polling(tx, Duration::from_secs(60), shutdown_rx);
        shutdown_tx.send(true).unwrap();

        let joined = tokio::time::timeout(Duration::from_secs(1), handle).await;
        assert!(joined.is_ok());
    }

    #[tokio::test]
    async fn test_closed_channel_stops_polling() {
        let (tx, rx) = mpsc::channel(8);
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        drop(rx);

        let handle = spawn_status_polling(tx, Duration::from_millis(10), shutdown_rx);

        let joined = tokio::time::timeout(Duration::from_secs(1), handle).await;
        assert!(joined.is_ok());
    }
}
