//! Watch mode: keeps the recent blocks and latest transactions views fresh.
//!
//! The [`Watcher`] owns one [`Poller`] per view. Each poll loads the view,
//! renders it into a buffer and writes the buffer to the shared output in one
//! go so refreshes of different views never interleave.
//!
//! A failed poll (node unreachable, bad response) is logged and retried on the
//! next tick. The watcher stops on Ctrl+C, or once the optional watch
//! duration has elapsed, and cancels both pollers before returning.

use std::future::Future;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use log::info;
use tokio::sync::Mutex;
use tokio::{signal, time::sleep};
use tokio_util::sync::CancellationToken;

use crate::explorer::{Explorer, ExplorerError, MAX_PER_PAGE, render};
use crate::provider::{ChainDataProvider, Page};
use crate::tasks::poller::{PollHandle, Poller};

type SharedOutput = Arc<Mutex<Box<dyn Write + Send>>>;

pub struct Watcher<P> {
    explorer: Arc<Explorer<P>>,
    interval: Duration,
    duration: Option<Duration>,
    out: SharedOutput,
}

impl<P: ChainDataProvider + 'static> Watcher<P> {
    /// Creates a watcher that prints to stdout every `interval`.
    pub fn new(explorer: Arc<Explorer<P>>, interval: Duration) -> Self {
        Self {
            explorer,
            interval,
            duration: None,
            out: Arc::new(Mutex::new(Box::new(io::stdout()))),
        }
    }

    /// Stops the watcher on its own after `duration`.
    pub fn with_duration(mut self, duration: Option<Duration>) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_output(mut self, out: Box<dyn Write + Send>) -> Self {
        self.out = Arc::new(Mutex::new(out));
        self
    }

    /// Runs until Ctrl+C is pressed or the watch duration expires.
    pub async fn run(&self) -> Result<(), ExplorerError> {
        info!(interval_secs = self.interval.as_secs(); "Watching the chain. Press Ctrl+C to stop.");
        let duration = self.duration;
        let shutdown = async move {
            match duration {
                Some(duration) => {
                    tokio::select! {
                        res = signal::ctrl_c() => res,
                        _ = sleep(duration) => Ok(()),
                    }
                },
                None => signal::ctrl_c().await,
            }
        };
        self.run_until(shutdown).await
    }

    /// Runs until `shutdown` resolves, then cancels the pollers and waits for
    /// them to finish.
    pub async fn run_until<F>(&self, shutdown: F) -> Result<(), ExplorerError>
    where
        F: Future<Output = io::Result<()>>,
    {
        let root = CancellationToken::new();
        let blocks = self.spawn_blocks(root.child_token());
        let txs = self.spawn_txs(root.child_token());

        let result = shutdown.await;
        info!("Received shutdown signal, stopping pollers...");
        root.cancel();
        blocks.join().await;
        txs.join().await;

        info!("Watcher stopped.");
        Ok(result?)
    }

    fn spawn_blocks(&self, token: CancellationToken) -> PollHandle {
        let explorer = Arc::clone(&self.explorer);
        let out = Arc::clone(&self.out);
        Poller::spawn("recent_blocks", self.interval, token, move || {
            let explorer = Arc::clone(&explorer);
            let out = Arc::clone(&out);
            async move {
                let view = explorer.recent_blocks().await?;
                let mut buf = Vec::new();
                writeln!(buf, "== Recent blocks (tip {}) ==", view.latest_height)?;
                render::render_blocks(&mut buf, &view)?;
                writeln!(buf)?;
                out.lock().await.write_all(&buf)?;
                Ok::<(), ExplorerError>(())
            }
        })
    }

    fn spawn_txs(&self, token: CancellationToken) -> PollHandle {
        let explorer = Arc::clone(&self.explorer);
        let out = Arc::clone(&self.out);
        let page = Page::first(self.explorer.settings().default_per_page.min(MAX_PER_PAGE));
        Poller::spawn("latest_txs", self.interval, token, move || {
            let explorer = Arc::clone(&explorer);
            let out = Arc::clone(&out);
            async move {
                let view = explorer.latest_txs(page).await?;
                let mut buf = Vec::new();
                writeln!(buf, "== Latest transactions ==")?;
                render::render_latest_txs(&mut buf, &view)?;
                writeln!(buf)?;
                out.lock().await.write_all(&buf)?;
                Ok::<(), ExplorerError>(())
            }
        })
    }
}
