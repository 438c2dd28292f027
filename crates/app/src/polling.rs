//! Periodic refresh tasks: entropy, logs and clock.
//!
//! Each loop waits one full period before its first tick and runs ticks
//! sequentially, so two ticks of the same loop never overlap. All loops share
//! one [`CancellationToken`]; cancelling it also drops any request a tick is
//! waiting on.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::IntervalStream;
use tokio_util::sync::CancellationToken;

use crate::ports::{Clock, DashboardView, DeviceApi, Downloader, UserPrompt};
use crate::services::dashboard::DashboardClient;

/// Default entropy polling period.
pub const DEFAULT_ENTROPY_PERIOD: Duration = Duration::from_millis(500);
/// Default log polling period (only fetches on the data tab).
pub const DEFAULT_LOGS_PERIOD: Duration = Duration::from_millis(2000);
/// Default clock refresh period.
pub const DEFAULT_CLOCK_PERIOD: Duration = Duration::from_millis(1000);

/// Polling periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollingConfig {
    pub entropy: Duration,
    pub logs: Duration,
    pub clock: Duration,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            entropy: DEFAULT_ENTROPY_PERIOD,
            logs: DEFAULT_LOGS_PERIOD,
            clock: DEFAULT_CLOCK_PERIOD,
        }
    }
}

/// Handle on the running polling loops.
pub struct PollingTasks {
    shutdown: CancellationToken,
    handles: Vec<JoinHandle<()>>,
}

impl PollingTasks {
    /// Start the three polling loops against `client`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<A, V, P, D, C>(
        client: &Arc<DashboardClient<A, V, P, D, C>>,
        config: PollingConfig,
    ) -> Self
    where
        A: DeviceApi + 'static,
        V: DashboardView + 'static,
        P: UserPrompt + 'static,
        D: Downloader + 'static,
        C: Clock + 'static,
    {
        let shutdown = CancellationToken::new();

        let entropy = {
            let client = Arc::clone(client);
            spawn_loop("entropy", config.entropy, shutdown.clone(), move || {
                let client = Arc::clone(&client);
                async move {
                    client.refresh_entropy().await;
                }
            })
        };
        let logs = {
            let client = Arc::clone(client);
            spawn_loop("logs", config.logs, shutdown.clone(), move || {
                let client = Arc::clone(&client);
                async move {
                    client.poll_logs().await;
                }
            })
        };
        let clock = {
            let client = Arc::clone(client);
            spawn_loop("clock", config.clock, shutdown.clone(), move || {
                let client = Arc::clone(&client);
                async move { client.tick_clock() }
            })
        };

        tracing::info!(
            entropy_ms = config.entropy.as_millis(),
            logs_ms = config.logs.as_millis(),
            clock_ms = config.clock.as_millis(),
            "polling started"
        );

        Self {
            shutdown,
            handles: vec![entropy, logs, clock],
        }
    }

    /// Token shared by every loop. Cancelling it stops them all.
    #[must_use]
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Stop every loop and wait for them to finish.
    pub async fn shutdown(self) {
        self.shutdown.cancel();
        for handle in self.handles {
            if let Err(err) = handle.await {
                tracing::warn!(error = %err, "polling task ended abnormally");
            }
        }
        tracing::info!("polling stopped");
    }
}

fn spawn_loop<F, Fut>(
    name: &'static str,
    period: Duration,
    shutdown: CancellationToken,
    mut tick: F,
) -> JoinHandle<()>
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut ticks = IntervalStream::new(interval);

        loop {
            tokio::select! {
                () = shutdown.cancelled() => break,
                next = ticks.next() => {
                    if next.is_none() {
                        break;
                    }
                    tokio::select! {
                        () = shutdown.cancelled() => break,
                        () = tick() => {}
                    }
                }
            }
        }

        tracing::debug!(task = name, "polling loop stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, Harness, ViewCall};
    use pn2133_domain::tab::Tab;

    fn count_clock_ticks(h: &Harness) -> usize {
        h.view
            .calls()
            .iter()
            .filter(|c| matches!(c, ViewCall::Clock(_)))
            .count()
    }

    #[tokio::test(start_paused = true)]
    async fn should_tick_each_loop_at_its_own_period() {
        let h = Harness::new();
        h.client.check_system_status().await;
        let tasks = PollingTasks::spawn(&h.client, PollingConfig::default());

        tokio::time::sleep(Duration::from_millis(1100)).await;

        assert_eq!(h.api.count(|c| matches!(c, Call::Entropy)), 2);
        assert_eq!(count_clock_ticks(&h), 1);
        tasks.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn should_not_poll_entropy_while_offline() {
        let h = Harness::new();
        let tasks = PollingTasks::spawn(&h.client, PollingConfig::default());

        tokio::time::sleep(Duration::from_millis(1600)).await;

        assert_eq!(h.api.count(|c| matches!(c, Call::Entropy)), 0);
        tasks.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn should_poll_logs_only_on_data_tab() {
        let h = Harness::new();
        let tasks = PollingTasks::spawn(&h.client, PollingConfig::default());

        tokio::time::sleep(Duration::from_millis(2100)).await;
        assert_eq!(h.api.count(|c| matches!(c, Call::Logs)), 0);

        h.client.switch_tab(Tab::Data).await;
        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(h.api.count(|c| matches!(c, Call::Logs)), 2);
        tasks.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn should_stop_every_loop_on_shutdown() {
        let h = Harness::new();
        h.client.check_system_status().await;
        let tasks = PollingTasks::spawn(&h.client, PollingConfig::default());
        tokio::time::sleep(Duration::from_millis(600)).await;
        tasks.shutdown().await;

        let entropy_before = h.api.count(|c| matches!(c, Call::Entropy));
        let clock_before = count_clock_ticks(&h);
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert_eq!(h.api.count(|c| matches!(c, Call::Entropy)), entropy_before);
        assert_eq!(count_clock_ticks(&h), clock_before);
    }

    #[tokio::test(start_paused = true)]
    async fn should_cancel_entropy_request_in_flight_on_shutdown() {
        let h = Harness::new();
        h.client.check_system_status().await;
        let _gate = h.api.gate_entropy();
        let config = PollingConfig {
            entropy: Duration::from_millis(500),
            logs: Duration::from_secs(3600),
            clock: Duration::from_secs(3600),
        };
        let tasks = PollingTasks::spawn(&h.client, config);

        tokio::time::sleep(Duration::from_millis(1600)).await;
        assert_eq!(h.api.count(|c| matches!(c, Call::Entropy)), 1);

        tokio::time::timeout(Duration::from_secs(1), tasks.shutdown())
            .await
            .expect("shutdown hung on an in-flight request");

        assert!(
            !h.view
                .calls()
                .iter()
                .any(|c| matches!(c, ViewCall::Entropy(_)))
        );
    }

    #[test]
    fn should_default_to_dashboard_periods() {
        let config = PollingConfig::default();
        assert_eq!(config.entropy, Duration::from_millis(500));
        assert_eq!(config.logs, Duration::from_millis(2000));
        assert_eq!(config.clock, Duration::from_millis(1000));
    }
}
