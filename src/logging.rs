//! Tracing setup.
//!
//! Logging is off unless `NEWSFEED_LOG` names a file: anything written to
//! stdout or stderr would corrupt the TUI.  The filter defaults to `info` and
//! honours `RUST_LOG`.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_ENV: &str = "NEWSFEED_LOG";

/// Where logs should go, if anywhere.
pub fn log_path(raw: Option<String>) -> Option<PathBuf> {
    raw.map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

/// Install the global subscriber when `NEWSFEED_LOG` is set.
pub fn init_tracing() {
    let Some(path) = log_path(std::env::var(LOG_ENV).ok()) else {
        return;
    };

    let file = match File::create(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: failed to create log file {}: {e}", path.display());
            return;
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    // A subscriber may already be installed (e.g. by a test harness).
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init();
}
