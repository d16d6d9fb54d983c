//! Fixed-interval scheduler with cancellation.
//!
//! Every tick starts a new run of the task under a child token of the
//! scheduler's root token. Starting a run cancels the previous one if it
//! is still in flight, so at most one run is outstanding and a late
//! response can never overwrite a newer one. Shutting down cancels the
//! root token, which cancels the outstanding run, and waits for the loop
//! to exit.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use schoolhub_core::error::AppError;
use schoolhub_core::result::AppResult;

use crate::task::RefreshTask;

/// Runs a [`RefreshTask`] on a fixed interval.
#[derive(Debug, Clone)]
pub struct RefreshScheduler {
    /// Time between ticks. The first tick fires immediately.
    period: Duration,
    /// Root token; every run gets a child of it.
    cancel: CancellationToken,
}

impl RefreshScheduler {
    /// Create a scheduler ticking every `period`.
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            cancel: CancellationToken::new(),
        }
    }

    /// Create a scheduler from an interval in seconds.
    pub fn every_seconds(seconds: u64) -> Self {
        Self::new(Duration::from_secs(seconds))
    }

    /// Tick period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Start the loop on the current runtime.
    pub fn spawn(self, task: Arc<dyn RefreshTask>) -> RefreshHandle {
        let cancel = self.cancel.clone();
        info!(task = task.name(), period_secs = self.period.as_secs(), "Refresh scheduler started");
        let join = tokio::spawn(run(task, self.period, self.cancel));
        RefreshHandle { cancel, join }
    }
}

/// Handle to a running scheduler.
#[derive(Debug)]
pub struct RefreshHandle {
    cancel: CancellationToken,
    join: JoinHandle<()>,
}

impl RefreshHandle {
    /// Token that stops the scheduler when cancelled.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Whether the loop has exited.
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Cancel the scheduler and any outstanding run, then wait for exit.
    pub async fn shutdown(self) -> AppResult<()> {
        self.cancel.cancel();
        self.join
            .await
            .map_err(|e| AppError::internal(format!("Refresh scheduler panicked: {e}")))?;
        info!("Refresh scheduler stopped");
        Ok(())
    }
}

async fn run(task: Arc<dyn RefreshTask>, period: Duration, root: CancellationToken) {
    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut in_flight: Option<(CancellationToken, JoinHandle<()>)> = None;

    loop {
        tokio::select! {
            biased;
            _ = root.cancelled() => break,
            _ = ticker.tick() => {
                if let Some((previous, handle)) = in_flight.take() {
                    if !handle.is_finished() {
                        debug!(task = task.name(), "Cancelling superseded refresh");
                    }
                    previous.cancel();
                }
                let token = root.child_token();
                let handle = tokio::spawn(run_once(Arc::clone(&task), token.clone()));
                in_flight = Some((token, handle));
            }
        }
    }

    if let Some((token, handle)) = in_flight {
        token.cancel();
        let _ = handle.await;
    }
    debug!(task = task.name(), "Refresh loop exited");
}

async fn run_once(task: Arc<dyn RefreshTask>, cancel: CancellationToken) {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            debug!(task = task.name(), "Refresh cancelled before completion");
        }
        result = task.refresh(cancel.clone()) => match result {
            Ok(()) => debug!(task = task.name(), "Refresh completed"),
            Err(e) if cancel.is_cancelled() => {
                debug!(task = task.name(), error = %e, "Refresh result discarded");
            }
            Err(e) => error!(task = task.name(), error = %e, "Refresh failed"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct Probe {
        delay: Duration,
        started: AtomicUsize,
        applied: AtomicUsize,
    }

    impl Probe {
        fn new(delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                delay,
                started: AtomicUsize::new(0),
                applied: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl RefreshTask for Probe {
        fn name(&self) -> &str {
            "probe"
        }

        async fn refresh(&self, cancel: CancellationToken) -> AppResult<()> {
            self.started.fetch_add(1, Ordering::SeqCst);
            time::sleep(self.delay).await;
            if cancel.is_cancelled() {
                return Err(AppError::cancelled("superseded"));
            }
            self.applied.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_on_interval() {
        let probe = Probe::new(Duration::from_secs(1));
        let handle = RefreshScheduler::every_seconds(30).spawn(probe.clone());

        time::sleep(Duration::from_secs(65)).await;
        assert_eq!(probe.started.load(Ordering::SeqCst), 3);
        assert_eq!(probe.applied.load(Ordering::SeqCst), 3);

        handle.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_runs_are_superseded() {
        let probe = Probe::new(Duration::from_secs(45));
        let handle = RefreshScheduler::every_seconds(30).spawn(probe.clone());

        time::sleep(Duration::from_secs(100)).await;
        assert_eq!(probe.started.load(Ordering::SeqCst), 4);
        assert_eq!(probe.applied.load(Ordering::SeqCst), 0);

        handle.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_cancels_outstanding_run_and_stops() {
        let probe = Probe::new(Duration::from_secs(10));
        let handle = RefreshScheduler::every_seconds(30).spawn(probe.clone());

        time::sleep(Duration::from_secs(5)).await;
        handle.shutdown().await.unwrap();

        time::sleep(Duration::from_secs(120)).await;
        assert_eq!(probe.started.load(Ordering::SeqCst), 1);
        assert_eq!(probe.applied.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_external_cancel_stops_loop() {
        let probe = Probe::new(Duration::from_millis(10));
        let handle = RefreshScheduler::every_seconds(30).spawn(probe.clone());
        time::sleep(Duration::from_secs(1)).await;

        handle.cancel_token().cancel();
        time::sleep(Duration::from_secs(1)).await;
        assert!(handle.is_finished());
    }
}
