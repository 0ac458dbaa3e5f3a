//! Recency Cache replay driver
//!
//! Reads cache commands from stdin and writes one JSON response per command
//! to stdout. Logs go to stderr.

use std::io::{self, BufWriter};

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recency_cache::{replay, Config, LruCache};

/// Entry point for the replay driver.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache with the configured capacity
/// 4. Replay stdin until EOF
fn main() -> anyhow::Result<()> {
    // Defaults to "info", can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recency_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env().context("failed to load configuration")?;
    info!(capacity = config.capacity, "Configuration loaded");

    let mut cache: LruCache<String, String> =
        LruCache::from_config(&config).context("invalid cache configuration")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let summary = replay::replay(&mut cache, stdin.lock(), BufWriter::new(stdout.lock()))
        .context("replay aborted by I/O error")?;

    let stats = cache.stats();
    info!(
        commands = summary.commands,
        errors = summary.errors,
        entries = stats.total_entries,
        hit_rate = stats.hit_rate(),
        "Replay complete"
    );
    Ok(())
}
