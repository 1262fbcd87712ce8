//! Background page fetching.
//!
//! The worker owns a small tokio runtime on its own thread.  Page numbers
//! arrive on an unbounded channel; each one becomes a task that runs the
//! blocking [`DataSource::fetch`] on the runtime's blocking pool, waits out the
//! configured artificial delay, and sends the outcome back to the UI thread
//! over an [`mpsc`] channel.
//!
//! ## For contributors
//!
//! Fetches are neither cancelled nor reordered: if page 3 answers before
//! page 2, the UI sees page 3 first.  Every [`FetchMsg`] carries the page it
//! answers so the controller can log which response arrived.

use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

use crate::source::{Article, DataSource, FetchError};

/// Message sent from the worker to the UI thread.
#[derive(Debug)]
pub struct FetchMsg {
    /// The page this message answers.
    pub page: u32,
    pub result: Result<Vec<Article>, FetchError>,
}

/// Spawn the fetch worker thread.
///
/// Returns the sender the controller pushes page numbers into, and the
/// receiver the main loop should drain on every tick.  The worker stops once
/// every clone of the sender has been dropped.
pub fn spawn(
    source: Arc<dyn DataSource>,
    delay: Duration,
) -> Result<(UnboundedSender<u32>, mpsc::Receiver<FetchMsg>)> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("newsfeed-fetch")
        .enable_all()
        .build()
        .context("failed to build fetch runtime")?;

    let (request_tx, request_rx) = unbounded_channel();
    let (result_tx, result_rx) = mpsc::channel();

    thread::Builder::new()
        .name("fetch-worker".into())
        .spawn(move || {
            runtime.block_on(serve(&source, request_rx, result_tx, delay));
        })
        .context("failed to spawn fetch worker thread")?;

    Ok((request_tx, result_rx))
}

async fn serve(
    source: &Arc<dyn DataSource>,
    mut requests: UnboundedReceiver<u32>,
    results: mpsc::Sender<FetchMsg>,
    delay: Duration,
) {
    while let Some(page) = requests.recv().await {
        debug!(source = source.name(), page, "fetch requested");
        let source = Arc::clone(source);
        let results = results.clone();

        tokio::spawn(async move {
            let result = tokio::task::spawn_blocking(move || source.fetch(page))
                .await
                .unwrap_or_else(|e| Err(FetchError::Worker(e.to_string())));

            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            // A closed receiver means the UI has exited.
            if results.send(FetchMsg { page, result }).is_err() {
                warn!(page, "dropping fetch result, UI is gone");
            }
        });
    }
    debug!("fetch request channel closed, worker stopping");
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::tests::make_article;
    use std::sync::Mutex;
    use std::time::Instant;

    const WAIT: Duration = Duration::from_secs(5);

    struct FakeSource {
        calls: Mutex<Vec<u32>>,
        fail: bool,
    }

    impl FakeSource {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                fail,
            })
        }
    }

    impl DataSource for FakeSource {
        fn name(&self) -> &str {
            "fake"
        }

        fn fetch(&self, page: u32) -> Result<Vec<Article>, FetchError> {
            self.calls.lock().unwrap().push(page);
            if self.fail {
                return Err(FetchError::Worker("boom".into()));
            }
            Ok(vec![make_article(&format!("p{page}"), "t", i64::from(page))])
        }
    }

    #[test]
    fn delivers_requested_page() {
        let source = FakeSource::new(false);
        let (tx, rx) = spawn(source.clone(), Duration::ZERO).unwrap();

        tx.send(4).unwrap();
        let msg = rx.recv_timeout(WAIT).unwrap();

        assert_eq!(msg.page, 4);
        let articles = msg.result.unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].id, "p4");
        assert_eq!(*source.calls.lock().unwrap(), vec![4]);
    }

    #[test]
    fn forwards_errors() {
        let (tx, rx) = spawn(FakeSource::new(true), Duration::ZERO).unwrap();

        tx.send(1).unwrap();
        let msg = rx.recv_timeout(WAIT).unwrap();

        assert_eq!(msg.page, 1);
        assert!(matches!(msg.result, Err(FetchError::Worker(_))));
    }

    #[test]
    fn applies_artificial_delay() {
        let delay = Duration::from_millis(80);
        let (tx, rx) = spawn(FakeSource::new(false), delay).unwrap();

        let started = Instant::now();
        tx.send(1).unwrap();
        rx.recv_timeout(WAIT).unwrap();

        assert!(started.elapsed() >= delay);
    }

    #[test]
    fn every_request_gets_an_answer() {
        let (tx, rx) = spawn(FakeSource::new(false), Duration::ZERO).unwrap();

        for page in 1..=3 {
            tx.send(page).unwrap();
        }
        let mut pages: Vec<u32> = (0..3).map(|_| rx.recv_timeout(WAIT).unwrap().page).collect();
        pages.sort_unstable();

        assert_eq!(pages, vec![1, 2, 3]);
    }

    #[test]
    fn stops_when_request_sender_dropped() {
        let (tx, rx) = spawn(FakeSource::new(false), Duration::ZERO).unwrap();
        drop(tx);

        assert!(matches!(
            rx.recv_timeout(WAIT),
            Err(mpsc::RecvTimeoutError::Disconnected)
        ));
    }
}
