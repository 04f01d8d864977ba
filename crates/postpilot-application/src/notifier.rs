//! Best-effort remote notifications.
//!
//! Local mutations are committed before the remote side hears about them.
//! The notifier runs each remote call as a spawned task, logs its failure and
//! never feeds the outcome back into store state.

use postpilot_core::Result;
use std::future::Future;
use tokio::sync::Mutex;
use tokio::task::JoinSet;

#[derive(Debug, Default)]
pub struct Notifier {
    tasks: Mutex<JoinSet<()>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns `call` in the background. Errors are logged with `label`.
    pub async fn dispatch<F>(&self, label: &'static str, call: F)
    where
        F: Future<Output = Result<()>> + Send + 'static,
    {
        let mut tasks = self.tasks.lock().await;

        // Reap finished tasks.
        while tasks.try_join_next().is_some() {}

        tasks.spawn(async move {
            match call.await {
                Ok(()) => tracing::debug!("[Notifier] {} delivered", label),
                Err(e) => tracing::warn!("[Notifier] {} failed: {}", label, e),
            }
        });
    }

    /// Waits for every in-flight notification to finish.
    pub async fn flush(&self) {
        let mut tasks = self.tasks.lock().await;
        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                tracing::warn!("[Notifier] Notification task aborted: {}", e);
            }
        }
    }
}
