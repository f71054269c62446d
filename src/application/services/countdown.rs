//! Cancellable one-second countdown task.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};
use tracing::debug;

const TICK: Duration = Duration::from_secs(1);

/// Emits one message per second with the seconds left, ending at zero.
///
/// The task is aborted on [`CountdownTimer::cancel`] and on drop, so ticks
/// never reach a screen that has been torn down.
#[derive(Debug, Default)]
pub struct CountdownTimer {
    handle: Option<JoinHandle<()>>,
}

impl CountdownTimer {
    /// Spawns the countdown; `tick` maps the remaining seconds to a message.
    pub fn start<T, F>(seconds: u32, tx: mpsc::UnboundedSender<T>, tick: F) -> Self
    where
        T: Send + 'static,
        F: Fn(u32) -> T + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + TICK, TICK);

            for remaining in (0..seconds).rev() {
                ticker.tick().await;
                if tx.send(tick(remaining)).is_err() {
                    debug!("Countdown receiver closed");
                    return;
                }
            }

            debug!("Countdown finished");
        });

        Self {
            handle: Some(handle),
        }
    }

    /// Replaces any running countdown with a fresh one.
    pub fn restart<T, F>(&mut self, seconds: u32, tx: mpsc::UnboundedSender<T>, tick: F)
    where
        T: Send + 'static,
        F: Fn(u32) -> T + Send + 'static,
    {
        self.cancel();
        *self = Self::start(seconds, tx, tick);
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
