use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::tracker::SessionTracker;

/// Cancellation handle for the background session sweep. The task is
/// aborted on [`shutdown`] or when the handle is dropped.
///
/// [`shutdown`]: SweeperHandle::shutdown
pub struct SweeperHandle {
    task: JoinHandle<()>,
}

impl SweeperHandle {
    pub fn shutdown(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for SweeperHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Spawn a task that sweeps expired sessions every `period`.
///
/// Must be called from within a tokio runtime. The returned handle owns
/// the task; keep it alive for as long as the sweep should run.
pub fn start_sweeper(tracker: Arc<SessionTracker>, period: Duration) -> SweeperHandle {
    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        // The first tick completes immediately; skip it so the first
        // sweep happens one full period after startup.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            tracker.sweep_expired();
        }
    });
    SweeperHandle { task }
}
