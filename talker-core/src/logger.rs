//! Logging setup on top of `tracing`.
//!
//! `log` crate records are forwarded to `tracing` as well, so dependencies
//! that use either end up in the same output.
//!
//! # Example
//!
//! ```ignore
//! use talker_core::logger::init_logging;
//! use tracing::info;
//!
//! init_logging("talker");
//! info!("Node started");
//! ```

use std::sync::OnceLock;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Install the global subscriber.
///
/// Output goes to stderr, filtered by `RUST_LOG` (default `info`). Calling
/// this more than once is harmless: only the first call has an effect.
pub fn init_logging(name: &str) {
    LOGGER_INITIALIZED.get_or_init(|| {
        tracing_log::LogTracer::init().ok();

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let fmt_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_file(false)
            .with_line_number(false)
            .with_span_events(FmtSpan::NONE)
            .with_writer(std::io::stderr);

        let installed = tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()
            .is_ok();

        if installed {
            tracing::debug!(logger = name, "logging initialized");
        }
    });
}
