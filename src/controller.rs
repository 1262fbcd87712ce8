//! The feed controller: page cursor, loading flag, and derived outputs.
//!
//! ## State machine
//!
//! ```text
//!            refresh()                     load_more()
//!   any ─────────────► page = 1    idle ─────────────► page += 1
//!                          │                               │
//!                          └──────────► emit(page) ◄───────┘
//!                                           │  loading = true
//!                                           ▼
//!                                   fetch channel ──► worker
//!                                                        │
//!                     receive(msg) ◄─────────────────────┘
//!                     loading = false, cells = derive(batch) or []
//! ```
//!
//! `load_more()` while loading is ignored entirely.
//!
//! ## Outputs
//!
//! The controller publishes to three [`watch`] channels.  [`FeedOutputs`]
//! reads them and substitutes a safe default for any channel that has failed
//! (its sending side is gone), so the view never has to handle an error.

use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::cell::{derive_cells, CellViewModel};
use crate::fetcher::FetchMsg;
use crate::source::FetchError;

pub const TITLE_LOADING: &str = "Loading...";
pub const TITLE_IDLE: &str = "Newsfeed";
/// Shown only when the title channel itself breaks, never for fetch errors.
pub const TITLE_FALLBACK: &str = "Something went wrong...";

fn title_for(loading: bool) -> &'static str {
    if loading {
        TITLE_LOADING
    } else {
        TITLE_IDLE
    }
}

pub struct FeedController {
    page: u32,
    loading: bool,
    fetch_tx: UnboundedSender<u32>,
    loading_tx: watch::Sender<bool>,
    title_tx: watch::Sender<String>,
    cells_tx: watch::Sender<Vec<CellViewModel>>,
}

impl FeedController {
    /// Create a controller that forwards fetch triggers to `fetch_tx`.
    ///
    /// Starts at page 1, not loading, with no cells.  Nothing is fetched
    /// until the first trigger.
    pub fn new(fetch_tx: UnboundedSender<u32>) -> (Self, FeedOutputs) {
        let (loading_tx, loading_rx) = watch::channel(false);
        let (title_tx, title_rx) = watch::channel(title_for(false).to_string());
        let (cells_tx, cells_rx) = watch::channel(Vec::new());

        let controller = Self {
            page: 1,
            loading: false,
            fetch_tx,
            loading_tx,
            title_tx,
            cells_tx,
        };
        let outputs = FeedOutputs {
            loading: loading_rx,
            title: title_rx,
            cells: cells_rx,
        };
        (controller, outputs)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Another set of outputs reading the same channels.
    pub fn subscribe(&self) -> FeedOutputs {
        FeedOutputs {
            loading: self.loading_tx.subscribe(),
            title: self.title_tx.subscribe(),
            cells: self.cells_tx.subscribe(),
        }
    }

    /// Go back to page 1 and fetch it, whether or not a fetch is in flight.
    pub fn refresh(&mut self) {
        self.page = 1;
        self.emit();
    }

    /// Fetch the next page unless a fetch is already in flight.
    ///
    /// Returns whether a fetch was triggered.
    pub fn load_more(&mut self) -> bool {
        if self.loading {
            debug!(page = self.page, "load more ignored while loading");
            return false;
        }
        self.page += 1;
        self.emit();
        true
    }

    /// Apply a worker result: success replaces the cells, failure clears
    /// them.  Either way loading ends.
    pub fn receive(&mut self, msg: FetchMsg) {
        if msg.page != self.page {
            debug!(page = msg.page, current = self.page, "applying out-of-date page");
        }
        match msg.result {
            Ok(articles) => {
                let cells = derive_cells(&articles);
                info!(page = msg.page, received = articles.len(), shown = cells.len(), "page loaded");
                self.cells_tx.send_replace(cells);
            }
            Err(err) => self.absorb_failure(msg.page, &err),
        }
        self.set_loading(false);
    }

    fn emit(&mut self) {
        info!(page = self.page, "current page");
        self.set_loading(true);
        if self.fetch_tx.send(self.page).is_err() {
            let err = FetchError::Worker("fetch worker has stopped".into());
            self.absorb_failure(self.page, &err);
            self.set_loading(false);
        }
    }

    fn absorb_failure(&mut self, page: u32, err: &FetchError) {
        if err.is_construction() {
            error!(page, error = %err, "request construction failed");
        } else {
            warn!(page, error = %err, "fetch failed");
        }
        self.cells_tx.send_replace(Vec::new());
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        self.loading_tx.send_replace(loading);
        self.title_tx.send_replace(title_for(loading).to_string());
    }
}

/// Read side of the controller's three output channels.
#[derive(Clone)]
pub struct FeedOutputs {
    loading: watch::Receiver<bool>,
    title: watch::Receiver<String>,
    cells: watch::Receiver<Vec<CellViewModel>>,
}

/// Latest value of `rx`, or `fallback` once its sender has gone away.
fn latest_or<T: Clone>(rx: &watch::Receiver<T>, fallback: T) -> T {
    match rx.has_changed() {
        Ok(_) => rx.borrow().clone(),
        Err(_) => fallback,
    }
}

impl FeedOutputs {
    pub fn is_loading(&self) -> bool {
        latest_or(&self.loading, false)
    }

    pub fn title(&self) -> String {
        latest_or(&self.title, TITLE_FALLBACK.to_string())
    }

    pub fn cells(&self) -> Vec<CellViewModel> {
        latest_or(&self.cells, Vec::new())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
