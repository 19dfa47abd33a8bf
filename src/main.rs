//! Note Cache - diagnostics console
//!
//! Runs a single note cache for the lifetime of the process and drives it
//! from line-oriented commands on stdin. Replies are JSON lines on stdout,
//! logs go to stderr.

use std::sync::Arc;

use anyhow::Context;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use note_cache::console::{self, responses::ErrorResponse, Command, Reply};
use note_cache::{Config, NoteCacheManager};

/// Startup sequence:
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the note cache, which starts its background sweep
/// 4. Serve console commands until `quit`, EOF, Ctrl+C or SIGTERM
/// 5. Stop the sweep before exiting
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "note_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting note cache console");

    let config = Config::from_env();
    info!(
        "Configuration loaded: capacity={}, ttl={}ms, sweep_interval={}ms",
        config.capacity, config.ttl_ms, config.sweep_interval_ms
    );

    let cache: Arc<NoteCacheManager<Value>> = Arc::new(NoteCacheManager::new(&config.cache()));

    let signalled = tokio::select! {
        result = run_console(Arc::clone(&cache)) => {
            result?;
            false
        }
        _ = shutdown_signal() => true,
    };

    cache.stop_cleanup();
    info!("Shutdown complete");

    if signalled {
        // A pending stdin read would otherwise hold up runtime shutdown.
        std::process::exit(0);
    }
    Ok(())
}

/// Reads commands from stdin until `quit` or EOF.
async fn run_console(cache: Arc<NoteCacheManager<Value>>) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        if line.trim().is_empty() {
            continue;
        }

        let (reply, quit) = match Command::parse(&line) {
            Ok(command) => {
                let quit = command == Command::Quit;
                (console::handle(&*cache, command), quit)
            }
            Err(err) => {
                warn!("rejected console input: {}", err);
                (Reply::Error(ErrorResponse::new(err.to_string())), false)
            }
        };

        let mut out = serde_json::to_string(&reply).context("failed to encode reply")?;
        out.push('\n');
        stdout
            .write_all(out.as_bytes())
            .await
            .context("failed to write reply")?;
        stdout.flush().await.context("failed to flush stdout")?;

        if quit {
            break;
        }
    }

    info!("Console closed");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
