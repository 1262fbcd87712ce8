//! Command-line and environment configuration.
//!
//! Every option can come from a flag or an environment variable; flags win.
//! [`Settings::from_cli`] validates the raw values once at startup so the
//! rest of the program works with typed settings.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use url::Url;

use crate::source::request::parse_base_url;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000/api/";

#[derive(Debug, Parser)]
#[command(name = "newsfeed", version, about = "Page through a posts API in the terminal")]
pub struct Cli {
    /// Root of the posts API; requests go to `{base-url}/posts?page=N`.
    #[arg(long, env = "NEWSFEED_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Artificial delay added to every response, in milliseconds.
    #[arg(long, env = "NEWSFEED_DELAY_MS", default_value_t = 2000)]
    pub delay_ms: u64,

    /// HTTP request timeout, in seconds.
    #[arg(long, env = "NEWSFEED_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: Url,
    pub fetch_delay: Duration,
    pub request_timeout: Duration,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let base_url = parse_base_url(&cli.base_url).context("invalid --base-url")?;
        if cli.timeout_secs == 0 {
            bail!("--timeout-secs must be at least 1");
        }
        Ok(Self {
            base_url,
            fetch_delay: Duration::from_millis(cli.delay_ms),
            request_timeout: Duration::from_secs(cli.timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["newsfeed"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn explicit_flags_become_settings() {
        let cli = parse(&[
            "--base-url",
            "https://news.example.com/v2/",
            "--delay-ms",
            "0",
            "--timeout-secs",
            "3",
        ]);

        let settings = Settings::from_cli(&cli).unwrap();

        assert_eq!(settings.base_url.as_str(), "https://news.example.com/v2/");
        assert_eq!(settings.fetch_delay, Duration::ZERO);
        assert_eq!(settings.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn default_base_url_is_valid() {
        assert!(parse_base_url(DEFAULT_BASE_URL).is_ok());
    }

    #[test]
    fn bad_base_url_is_reported() {
        let cli = parse(&["--base-url", "::nope::"]);
        let err = Settings::from_cli(&cli).unwrap_err();
        assert!(err.to_string().contains("--base-url"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let cli = parse(&["--base-url", "https://a.example", "--timeout-secs", "0"]);
        assert!(Settings::from_cli(&cli).is_err());
    }

    #[test]
    fn non_numeric_delay_fails_to_parse() {
        assert!(Cli::try_parse_from(["newsfeed", "--delay-ms", "soon"]).is_err());
    }
}
