//! Command-line and environment configuration.
//!
//! Every flag has an environment fallback, and a `.env` file in the working
//! directory is read first (see [`load_env_file`]).

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Mergington High School activity sign-up API.
#[derive(Clone, Debug, Parser)]
#[command(version, about)]
pub struct Config {
    /// Socket address to listen on.
    #[arg(long, env = "SIGNUP_ADDR", default_value = "0.0.0.0:8000")]
    pub addr: SocketAddr,

    /// JSON file to seed the catalog from, shaped like `GET /activities`.
    /// The built-in activity table is used when unset.
    #[arg(long, env = "SIGNUP_SEED")]
    pub seed: Option<PathBuf>,

    /// Directory served under `/static/`; the repository ships the
    /// front-end in `static/`.
    #[arg(long, env = "SIGNUP_STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,

    /// Seconds open connections get to finish after SIGTERM / Ctrl-C.
    #[arg(long, env = "SIGNUP_DRAIN_TIMEOUT_SECS", default_value_t = 30)]
    pub drain_timeout_secs: u64,
}

impl Config {
    pub fn drain_timeout(&self) -> Duration {
        Duration::from_secs(self.drain_timeout_secs)
    }
}

/// Interprets the outcome of reading a `.env` file.
///
/// A missing file is the normal case and yields `Ok(None)`. Any other failure
/// (unreadable file, malformed line) is returned so the process does not start
/// on half-applied configuration.
pub fn load_env_file<T>(outcome: Result<T, dotenvy::Error>) -> Result<Option<T>, dotenvy::Error> {
    match outcome {
        Ok(loaded) => Ok(Some(loaded)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e),
    }
}
