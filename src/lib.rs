//! newsfeed — a paginated news-feed screen for the terminal.
//!
//! ## Architecture overview
//!
//! ```text
//!  refresh / load more   page    ┌────────────┐  FetchMsg  ┌──────────────┐
//!  ───────────────────► ──────► │ fetcher.rs │ ─────────► │ controller.rs│
//!  (controller.rs)     (channel)│ (runtime)  │ (channel)  │ (state)      │
//!                               └─────┬──────┘            └──────┬───────┘
//!                                     │ fetch(page)              │ watch
//!                               ┌─────▼──────┐            loading / title / cells
//!                               │  source/   │
//!                               └────────────┘
//! ```
//!
//! * **`source/`** — the `DataSource` trait, the `Article` record, the request
//!   builder, and the HTTP implementation.
//! * **`fetcher`** — background runtime that runs fetches off the UI thread.
//! * **`controller`** — page cursor + loading state machine and its outputs.
//! * **`cell`** — view-models and the dedup/sort derivation.
//! * **`config`** / **`logging`** — startup plumbing for the binary.

pub mod cell;
pub mod config;
pub mod controller;
pub mod fetcher;
pub mod logging;
pub mod source;
