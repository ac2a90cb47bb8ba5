use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use log::{debug, warn};
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;

/// Runs a fetch on a fixed interval.
pub struct Poller;

impl Poller {
    /// Spawns `task` immediately and then once per `period`, until `token` is
    /// cancelled or the returned handle is dropped.
    ///
    /// Iterations never overlap: a tick that comes due while `task` is still
    /// running is skipped. A failed iteration is logged and polling carries on.
    pub fn spawn<F, Fut, E>(name: &'static str, period: Duration, token: CancellationToken, mut task: F) -> PollHandle
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        let loop_token = token.clone();
        let join = tokio::spawn(async move {
            debug!(poller = name; "Poller started");
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    biased;
                    _ = loop_token.cancelled() => break,
                    _ = ticker.tick() => {},
                }

                tokio::select! {
                    biased;
                    _ = loop_token.cancelled() => break,
                    result = task() => {
                        if let Err(e) = result {
                            warn!(poller = name, error:% = e; "Poll failed, retrying on the next tick");
                        }
                    },
                }
            }
            debug!(poller = name; "Poller stopped");
        });

        PollHandle { token, join: Some(join) }
    }
}

/// Owns a running poller. Dropping the handle cancels it.
pub struct PollHandle {
    token: CancellationToken,
    join: Option<JoinHandle<()>>,
}

impl PollHandle {
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Waits for the poller to stop. Does not cancel it.
    pub async fn join(mut self) {
        if let Some(join) = self.join.take() {
            if let Err(e) = join.await {
                warn!(error:% = e; "Poller task ended abnormally");
            }
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        if self.join.is_some() {
            self.token.cancel();
        }
    }
}
