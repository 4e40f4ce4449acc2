#![forbid(unsafe_code)]

//! Headless replay of panel input traces.
//!
//! A trace is a JSON-lines file of [`panelctl_core::PanelInput`] values.
//! [`replay::replay`] feeds it to a [`panelctl_core::PanelController`] and
//! reports one [`replay::FrameSample`] per rendered frame, which makes
//! gesture tuning reproducible without a UI host.

pub mod cli;
pub mod error;
pub mod replay;
pub mod trace;

pub use cli::{run, run_from_env};
pub use error::{ReplayError, Result};
pub use replay::{FrameSample, ReplayOptions, ReplaySummary, SettledRun, replay};
pub use trace::parse_trace;

use tracing_subscriber::EnvFilter;

/// Install a stderr `fmt` subscriber filtered by `RUST_LOG` (default `warn`).
///
/// Does nothing if a global subscriber is already set.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
