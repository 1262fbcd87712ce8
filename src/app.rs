use ratatui::widgets::ListState;

use newsfeed::cell::CellViewModel;
use newsfeed::controller::{FeedController, FeedOutputs};
use newsfeed::fetcher::FetchMsg;

pub struct App {
    controller: FeedController,
    outputs: FeedOutputs,
    /// Snapshot of the controller's cells, taken after every state change.
    pub cells: Vec<CellViewModel>,
    pub title: String,
    pub loading: bool,
    /// List selection state for scrolling.
    pub list_state: ListState,
    /// Whether the user has requested to quit.
    pub quit: bool,
}

impl App {
    pub fn new(controller: FeedController, outputs: FeedOutputs) -> Self {
        let mut app = Self {
            controller,
            outputs,
            cells: Vec::new(),
            title: String::new(),
            loading: false,
            list_state: ListState::default(),
            quit: false,
        };
        app.sync();
        app
    }

    pub fn page(&self) -> u32 {
        self.controller.page()
    }

    /// Pull the latest values from the controller's outputs.
    fn sync(&mut self) {
        self.loading = self.outputs.is_loading();
        self.title = self.outputs.title();
        self.cells = self.outputs.cells();
    }

    // -- triggers ------------------------------------------------------------

    pub fn refresh(&mut self) {
        self.controller.refresh();
        self.sync();
    }

    /// The user scrolled past the last cell.
    pub fn reached_bottom(&mut self) {
        self.controller.load_more();
        self.sync();
    }

    /// Apply a fetch result.  A new page replaces the list, so the
    /// selection goes back to the top.
    pub fn receive(&mut self, msg: FetchMsg) {
        self.controller.receive(msg);
        self.sync();
        let selected = if self.cells.is_empty() { None } else { Some(0) };
        self.list_state.select(selected);
    }

    // -- navigation ----------------------------------------------------------

    pub fn select_next(&mut self) {
        if self.cells.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 >= self.cells.len() => {
                self.reached_bottom();
                return;
            }
            Some(i) => i + 1,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_previous(&mut self) {
        if self.cells.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_first(&mut self) {
        if !self.cells.is_empty() {
            self.list_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        if !self.cells.is_empty() {
            self.list_state.select(Some(self.cells.len() - 1));
        }
    }
}
