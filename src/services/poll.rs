//! Cancellable recurring poll for simulated playback
//!
//! The embedded-player position poll is modeled as an interval task whose
//! JoinHandle is wrapped in an abort-on-drop guard. The guard is owned by
//! the App for exactly as long as playback runs; dropping it (pause, close,
//! end of video) releases the timer deterministically.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration};

/// Abort-on-drop handle for a recurring scheduled task
#[derive(Debug)]
pub struct PollTask {
    handle: JoinHandle<()>,
}

impl PollTask {
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for PollTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Spawn a poll that reports elapsed playback seconds on every tick
pub fn spawn_player_poll(tx: mpsc::UnboundedSender<f64>, period: Duration) -> PollTask {
    let handle = tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.tick().await; // first tick is immediate, skip it
        loop {
            ticker.tick().await;
            if tx.send(period.as_secs_f64()).is_err() {
                break; // receiver gone, stop polling
            }
        }
    });
    PollTask { handle }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_poll_reports_elapsed_seconds() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _task = spawn_player_poll(tx, Duration::from_millis(10));
        let tick = tokio::time::timeout(Duration::from_millis(500), rx.recv())
            .await
            .expect("poll should tick")
            .expect("channel open");
        assert!((tick - 0.01).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_dropping_guard_aborts_poll() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let task = spawn_player_poll(tx, Duration::from_millis(10));

        tokio::time::timeout(Duration::from_millis(500), rx.recv())
            .await
            .expect("poll should tick");

        drop(task);

        // the aborted task drops its sender; the channel must close after
        // any already-queued ticks drain
        loop {
            match tokio::time::timeout(Duration::from_millis(500), rx.recv()).await {
                Ok(Some(_)) => continue,
                Ok(None) => break,
                Err(_) => panic!("poll task kept running after guard drop"),
            }
        }
    }
}
