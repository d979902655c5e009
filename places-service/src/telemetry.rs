//! Log output for `places_service` events.
//!
//! The binary installs [`layer`] next to its own fmt layer and filters
//! [`is_own_target`] events out of the latter, so provider calls are printed
//! once, with source location and span durations.

use std::io::{self, IsTerminal};

use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::format::{FmtSpan, Writer};
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, filter, fmt};

const TARGET_PREFIX: &str = "places_service";

/// `2025-09-12T10:20:30Z`
struct UtcSeconds;

impl FormatTime for UtcSeconds {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        w.write_str(&now)
    }
}

pub fn is_own_target(target: &str) -> bool {
    target.starts_with(TARGET_PREFIX)
}

/// Compact fmt layer that only lets `places_service` events through.
/// Closing `#[instrument]` spans (text search, detail lookups) report their
/// duration.
pub fn layer<S>() -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_timer(UtcSeconds)
        .with_target(true)
        .with_ansi(io::stdout().is_terminal())
        .with_span_events(FmtSpan::CLOSE)
        .event_format(fmt::format().compact().with_source_location(true))
        .with_filter(filter::filter_fn(|meta| is_own_target(meta.target())))
}

/// `RUST_LOG` when set. Otherwise `fallback` globally with `places_service`
/// at `level`.
pub fn env_filter(fallback: &str, level: Level) -> EnvFilter {
    if let Ok(from_env) = EnvFilter::try_from_default_env() {
        return from_env;
    }
    let base = EnvFilter::new(fallback);
    match library_directive(level) {
        Some(directive) => base.add_directive(directive),
        None => base,
    }
}

fn library_directive(level: Level) -> Option<Directive> {
    format!("{TARGET_PREFIX}={}", level.as_str().to_lowercase())
        .parse()
        .ok()
}
