//! Timer-driven data source.
//!
//! Spawns a background task that fetches the document once at startup and
//! again on every interval tick, reporting each attempt as an [`Update`].

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Interval, MissedTickBehavior};
use tracing::{info, warn};

use super::{DataSource, Fetch, Update};

/// A data source that polls a [`Fetch`] implementation on a fixed interval.
///
/// Only one request is ever in flight. When a tick or a manual refresh
/// arrives before the current request has finished, the current request is
/// dropped and a new one is issued, so a slow response can never overwrite
/// a newer one.
///
/// The background task is owned by this value and aborted when it is
/// dropped.
#[derive(Debug)]
pub struct PollingSource {
    receiver: mpsc::Receiver<Update>,
    refresh: mpsc::UnboundedSender<()>,
    description: String,
    task: JoinHandle<()>,
}

impl PollingSource {
    /// Spawn the polling task on the current tokio runtime.
    ///
    /// A zero `interval` fetches once and afterwards only on
    /// [`DataSource::request_refresh`].
    pub fn spawn(fetcher: Arc<dyn Fetch>, interval: Duration) -> Self {
        let (tx, rx) = mpsc::channel(16);
        let (refresh_tx, refresh_rx) = mpsc::unbounded_channel();
        let description = fetcher.describe();

        let task = tokio::spawn(run(fetcher, interval, tx, refresh_rx));

        Self {
            receiver: rx,
            refresh: refresh_tx,
            description,
            task,
        }
    }
}

impl Drop for PollingSource {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl DataSource for PollingSource {
    fn poll(&mut self) -> Option<Update> {
        self.receiver.try_recv().ok()
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn request_refresh(&mut self) {
        let _ = self.refresh.send(());
    }
}

/// Outcome of racing a request against the next trigger.
enum Step<T> {
    Finished(T),
    Superseded,
    Closed,
}

async fn run(
    fetcher: Arc<dyn Fetch>,
    interval: Duration,
    tx: mpsc::Sender<Update>,
    mut refresh: mpsc::UnboundedReceiver<()>,
) {
    let mut ticker = if interval.is_zero() {
        None
    } else {
        let mut ticker = time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; the startup fetch covers it.
        ticker.tick().await;
        Some(ticker)
    };

    let source = fetcher.describe();

    loop {
        info!(%source, "Attempting to fetch wait times");
        if tx.send(Update::Fetching).await.is_err() {
            break;
        }

        let step = {
            let request = fetcher.fetch();
            tokio::pin!(request);
            tokio::select! {
                result = &mut request => Step::Finished(result),
                alive = next_trigger(&mut ticker, &mut refresh) => {
                    if alive { Step::Superseded } else { Step::Closed }
                }
            }
        };

        let update = match step {
            Step::Finished(Ok(document)) => {
                info!(%source, timestamp = %document.timestamp, "Fetched wait times");
                Update::Loaded(document)
            }
            Step::Finished(Err(err)) => {
                warn!(%source, kind = ?err.kind(), error = %err, "Fetch failed");
                Update::Failed(err)
            }
            Step::Superseded => {
                info!(%source, "Request superseded by a newer one");
                continue;
            }
            Step::Closed => break,
        };

        if tx.send(update).await.is_err() {
            break;
        }

        if !next_trigger(&mut ticker, &mut refresh).await {
            break;
        }
    }
}

/// Wait for the next tick or manual refresh.
///
/// Returns `false` once nothing can trigger another fetch.
async fn next_trigger(
    ticker: &mut Option<Interval>,
    refresh: &mut mpsc::UnboundedReceiver<()>,
) -> bool {
    match ticker {
        Some(ticker) => tokio::select! {
            _ = ticker.tick() => true,
            request = refresh.recv() => request.is_some(),
        },
        None => refresh.recv().await.is_some(),
    }
}
