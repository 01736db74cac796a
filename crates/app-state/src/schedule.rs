//! Cancellable scheduled work owned by a screen
//!
//! Each screen that fakes progress (recording clock, analysis steps) runs
//! its whole timed sequence as one task wrapped in a [`ScreenTimer`]. The
//! task is aborted when the timer is cancelled or dropped.

use std::future::Future;
use tokio::task::JoinHandle;

/// Handle to a screen's scheduled task
#[derive(Debug)]
pub struct ScreenTimer {
    name: &'static str,
    handle: Option<JoinHandle<()>>,
}

impl ScreenTimer {
    /// Spawn `task` on the current runtime
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<F>(name: &'static str, task: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tracing::debug!(timer = name, "Timer started");
        Self {
            name,
            handle: Some(tokio::spawn(task)),
        }
    }

    /// Name given at spawn time
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the task is still scheduled
    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Abort the task; no-op when already finished or cancelled
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            if !handle.is_finished() {
                tracing::debug!(timer = self.name, "Timer cancelled");
            }
            handle.abort();
        }
    }
}

impl Drop for ScreenTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
