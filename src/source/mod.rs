//! Data source abstraction layer.
//!
//! This module defines the [`DataSource`] trait, the [`Article`] record it
//! produces, and the request builder used to talk to the posts API.  The only
//! concrete source is [`HttpSource`].
//!
//! ## For contributors — adding a new source
//!
//! 1. Create a new file in this directory (e.g. `fixture.rs`).
//! 2. Define a struct and implement [`DataSource`] for it.
//! 3. Add `mod fixture;` below and re-export your struct.
//! 4. Construct it in `main.rs` instead of `HttpSource`.
//!
//! The fetch worker, controller, and UI are all source-agnostic.

mod article;
mod http;
pub mod request;

pub use article::Article;
pub use http::HttpSource;
pub use request::{ApiRoute, BuildError};

use thiserror::Error;

/// Why a page could not be fetched.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("could not build request: {0}")]
    Build(#[from] BuildError),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("could not decode articles: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("fetch task failed: {0}")]
    Worker(String),
}

impl FetchError {
    /// True for configuration problems that no amount of retrying fixes.
    pub fn is_construction(&self) -> bool {
        matches!(self, FetchError::Build(_))
    }
}

/// Trait that every data source must implement.
///
/// The fetch worker calls [`fetch()`](DataSource::fetch) on a blocking
/// thread of its runtime, so implementations must be [`Send`] + [`Sync`].
pub trait DataSource: Send + Sync {
    /// Human-readable label used in log lines.
    fn name(&self) -> &str;

    /// Fetch one page (1-based) of articles.
    fn fetch(&self, page: u32) -> Result<Vec<Article>, FetchError>;
}
