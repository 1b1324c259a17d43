//! Structured logging setup using the `tracing` ecosystem.
//!
//! Configures a `tracing-subscriber` writing to stderr in one of three
//! formats. The default, [`LogFormat::Plain`], renders each event as
//! `LEVEL key=value ...` with no timestamp or target, which is the line
//! shape operators grep for (`service=... status=... latencyMs=...`).
//! `--json` and `--pretty` force the other two.

use tracing::Subscriber;
use tracing_subscriber::fmt::format::{DefaultFields, Format, Full};
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{filter::Targets, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::LogLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Plain,
    Json,
    Pretty,
}

#[must_use]
pub const fn resolve_format(pretty: bool, json: bool) -> LogFormat {
    if json {
        LogFormat::Json
    } else if pretty {
        LogFormat::Pretty
    } else {
        LogFormat::Plain
    }
}

/// `LEVEL key=value ...` lines without timestamp, target or colors.
pub fn plain_layer<S, W>(make_writer: W) -> fmt::Layer<S, DefaultFields, Format<Full, ()>, W>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + 'static,
{
    fmt::layer()
        .without_time()
        .with_target(false)
        .with_ansi(false)
        .with_writer(make_writer)
}

pub fn init(level: &LogLevel, format: LogFormat) {
    let filter = Targets::new().with_default(level.to_tracing_level());

    match format {
        LogFormat::Plain => {
            tracing_subscriber::registry()
                .with(filter)
                .with(plain_layer(std::io::stderr))
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_target(false)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }
}
