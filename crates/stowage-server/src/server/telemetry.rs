//! # Logging
//!
//! Everything is written through `tracing`. The library emits spans around
//! `preview`/`generate` and events for collisions and commits; `tower-http`
//! adds a span per request.
//!
//! Verbosity is controlled with `RUST_LOG` (default `info`):
//!
//! ```bash
//! RUST_LOG=stowage=debug,tower_http=debug cargo run
//! ```
//!
//! Set `LOG_FORMAT=json` for one JSON object per event.

use crate::server::config::LogFormat;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_telemetry(format: LogFormat) -> anyhow::Result<()> {
    let timer = fmt::time::ChronoLocal::rfc_3339();

    let pretty = (format == LogFormat::Pretty).then(|| {
        fmt::layer()
            .with_thread_ids(true)
            .with_line_number(true)
            .with_target(false)
            .with_timer(timer.clone())
            .with_file(true)
            .pretty()
    });

    let json = (format == LogFormat::Json).then(|| {
        fmt::layer()
            .with_timer(timer)
            .json()
            .flatten_event(true)
            .with_current_span(true)
    });

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(pretty)
        .with(json)
        .try_init()?;

    Ok(())
}
