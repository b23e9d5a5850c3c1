use crate::app::action::Action;
use crate::domain::backend::AutomationBackend;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::{AbortHandle, JoinHandle, JoinSet};
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Fetches allowed to run at once; the oldest is cancelled to make room.
pub const MAX_IN_FLIGHT_FETCHES: usize = 3;

/// Fixed-period command-log poller.
///
/// The first fetch happens one period after `spawn`. Every tick starts its
/// own fetch, so a hung request never holds back the next one. At most
/// [`MAX_IN_FLIGHT_FETCHES`] run at once. Results are forwarded in tick
/// order: a snapshot that finishes after a newer one has been delivered is
/// dropped. There is no backoff: a failed tick is simply followed by the next.
///
/// `shutdown` (or dropping the poller) stops the timer and cancels every
/// in-flight fetch; nothing reaches the action channel afterwards.
pub struct HistoryPoller {
    stop_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl HistoryPoller {
    pub fn spawn(
        backend: Arc<dyn AutomationBackend>,
        period: Duration,
        tx: mpsc::Sender<Action>,
    ) -> Self {
        let (stop_tx, mut stop_rx) = oneshot::channel();
        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut fetches = JoinSet::new();
            let mut in_flight: VecDeque<AbortHandle> = VecDeque::new();
            let mut next_seq: u64 = 0;
            let mut delivered: Option<u64> = None;

            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => {
                        if tx.is_closed() {
                            break;
                        }
                        in_flight.retain(|handle| !handle.is_finished());
                        if in_flight.len() >= MAX_IN_FLIGHT_FETCHES {
                            if let Some(oldest) = in_flight.pop_front() {
                                tracing::debug!("cancelling oldest history fetch");
                                oldest.abort();
                            }
                        }
                        next_seq += 1;
                        in_flight.push_back(fetches.spawn(poll_once(backend.clone(), next_seq)));
                    }
                    Some(joined) = fetches.join_next(), if !fetches.is_empty() => {
                        // Aborted fetches come back as a `JoinError`.
                        let Ok((seq, action)) = joined else { continue };
                        if delivered.is_some_and(|last| seq < last) {
                            tracing::debug!(seq, "dropping stale history snapshot");
                            continue;
                        }
                        delivered = Some(seq);
                        if tx.send(action).await.is_err() {
                            break;
                        }
                    }
                }
            }

            fetches.shutdown().await;
            tracing::debug!("history poller stopped");
        });

        Self {
            stop_tx: Some(stop_tx),
            task: Some(task),
        }
    }

    /// Stops polling and waits until no fetch is left running.
    pub async fn shutdown(mut self) {
        if let Some(stop) = self.stop_tx.take() {
            let _ = stop.send(());
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for HistoryPoller {
    fn drop(&mut self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }
}

async fn poll_once(backend: Arc<dyn AutomationBackend>, seq: u64) -> (u64, Action) {
    let action = match backend.command_history().await {
        Ok(history) => Action::HistoryLoaded(history),
        Err(e) => {
            tracing::warn!(error = %e, "command history poll failed");
            Action::HistoryFailed(e.to_string())
        }
    };
    (seq, action)
}
