use crate::api::LogSource;
use crate::dashboard::state::{Dashboard, DashboardState};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Owns a periodic refresh task. Dropping it stops the task after the
/// current fetch, if any, completes.
pub struct RefreshHandle {
    shutdown: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl RefreshHandle {
    pub fn cancel(&self) {
        let _ = self.shutdown.send(true);
    }

    /// Cancel and wait for the task to exit.
    pub async fn stop(mut self) {
        self.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "refresh task ended abnormally");
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}

/// Refresh `dashboard` every `every` (first tick immediately) and hand each
/// new state to `on_update`. Nothing is reported once shutdown is signalled.
pub fn spawn_periodic_refresh<S, F>(
    dashboard: Arc<Dashboard<S>>,
    every: Duration,
    mut on_update: F,
) -> RefreshHandle
where
    S: LogSource + 'static,
    F: FnMut(&DashboardState) + Send + 'static,
{
    let (tx, mut rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::debug!(every_secs = every.as_secs_f64(), "periodic refresh started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = rx.changed() => break,
            }

            // Failures land in the state's `last_error`.
            let _ = dashboard.refresh().await;

            if *rx.borrow() {
                break;
            }
            on_update(&dashboard.snapshot());
        }

        tracing::debug!("periodic refresh stopped");
    });

    RefreshHandle {
        shutdown: tx,
        task: Some(task),
    }
}
