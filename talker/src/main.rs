//! Publishes `hello world <seconds since epoch>` on `/chatter` at 10 Hz.
//!
//! ```bash
//! RUST_LOG=info cargo run -p talker
//! ros2 topic echo /chatter   # with RMW_IMPLEMENTATION=rmw_zenoh_cpp
//! ```
//!
//! SIGINT and SIGTERM both stop the talker cleanly with exit status 0.

use talker_core::{DynError, Talker, TalkerConfig, logger::init_logging};
use talker_zenoh::Context;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), DynError> {
    init_logging("talker");

    let config = TalkerConfig::default();
    let ctx = Context::new()?;
    let node = ctx.create_node(&config.node_name, config.node_options())?;
    let talker = Talker::new(&node, &config, ctx.shutdown_token())?;

    // The loop blocks on the rate limiter, keep it off the async workers.
    let mut worker = tokio::task::spawn_blocking(move || talker.run());

    let summary = tokio::select! {
        res = &mut worker => res??,
        res = shutdown_signal() => {
            ctx.shutdown();
            let signal = res?;
            info!(signal, "shutting down");
            worker.await??
        }
    };

    info!(
        published = summary.published,
        reason = ?summary.reason,
        "bye"
    );
    Ok(())
}

/// Resolves with the signal's name once the process is asked to stop.
#[cfg(unix)]
async fn shutdown_signal() -> std::io::Result<&'static str> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        res = tokio::signal::ctrl_c() => res.map(|()| "SIGINT"),
        _ = terminate.recv() => Ok("SIGTERM"),
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> std::io::Result<&'static str> {
    tokio::signal::ctrl_c().await.map(|()| "Ctrl-C")
}
