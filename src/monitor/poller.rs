//! Background refresh timer.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use super::RefreshController;

/// Periodic refresh task tied to the lifetime of the view.
///
/// Dropping the poller stops the timer. Refreshes it already started are
/// left to finish on their own.
pub struct Poller {
    token: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl Poller {
    /// Refresh every `interval`, starting one interval from now.
    pub fn spawn(refresher: RefreshController, interval: Duration) -> Self {
        let token = CancellationToken::new();
        let cancelled = token.clone();

        let handle = tokio::spawn(async move {
            let mut timer = time::interval_at(time::Instant::now() + interval, interval);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = cancelled.cancelled() => break,
                    _ = timer.tick() => {
                        tracing::debug!("background refresh");
                        refresher.refresh();
                    }
                }
            }
            tracing::debug!("refresh timer stopped");
        });

        Self {
            token,
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled()
    }

    pub fn stop(&self) {
        self.token.cancel();
    }

    /// Stop and wait for the timer task to exit.
    pub async fn shutdown(mut self) {
        self.stop();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockMonitorApi;
    use crate::monitor::SyncEvent;
    use crate::state::MonitorStats;
    use std::sync::Arc;
    use tokio::sync::mpsc;

    fn controller() -> (RefreshController, mpsc::UnboundedReceiver<SyncEvent>) {
        let mut api = MockMonitorApi::new();
        api.expect_list_statuses().returning(|| Ok(vec![]));
        api.expect_get_stats().returning(|| Ok(MonitorStats::default()));
        let (tx, rx) = mpsc::unbounded_channel();
        (RefreshController::new(Arc::new(api), tx), rx)
    }

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<SyncEvent>) -> usize {
        let mut count = 0;
        while rx.try_recv().is_ok() {
            count += 1;
        }
        count
    }

    #[tokio::test(start_paused = true)]
    async fn refreshes_on_every_interval() {
        let (controller, mut rx) = controller();
        let poller = Poller::spawn(controller, Duration::from_secs(30));

        time::sleep(Duration::from_secs(29)).await;
        settle().await;
        assert_eq!(drain(&mut rx), 0);

        time::sleep(Duration::from_secs(62)).await;
        settle().await;
        assert_eq!(drain(&mut rx), 3);

        poller.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn stopping_cancels_the_timer() {
        let (controller, mut rx) = controller();
        let poller = Poller::spawn(controller, Duration::from_secs(30));
        assert!(poller.is_running());

        poller.stop();
        assert!(!poller.is_running());
        time::sleep(Duration::from_secs(120)).await;
        settle().await;
        assert_eq!(drain(&mut rx), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_cancels_the_timer() {
        let (controller, mut rx) = controller();
        drop(Poller::spawn(controller, Duration::from_secs(30)));

        time::sleep(Duration::from_secs(120)).await;
        settle().await;
        assert_eq!(drain(&mut rx), 0);
    }
}
