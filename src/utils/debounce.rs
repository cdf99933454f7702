// Trailing-edge debounce on tokio tasks
//
// Each call cancels the previous not-yet-fired invocation and schedules its
// own after the quiet window. Superseded invocations are dropped entirely,
// side effects included. Once the window elapses the work detaches onto its
// own task, so a later call can no longer cancel an invocation that has
// already fired.

use parking_lot::Mutex;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Coalesces rapid repeated invocations into a single trailing call.
pub struct Debouncer {
    wait: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: Mutex::new(None),
        }
    }

    /// Schedule `task` to run after the quiet window, dropping any pending
    /// invocation that has not fired yet. Only the last call within a quiet
    /// window ever executes.
    pub fn call<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let wait = self.wait;
        let mut pending = self.pending.lock();
        if let Some(handle) = pending.take() {
            handle.abort();
        }
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            // Detach so the running invocation survives a later abort.
            tokio::spawn(task);
        }));
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.lock().take() {
            handle.abort();
        }
    }
}
