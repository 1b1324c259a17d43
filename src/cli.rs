//! Command-line interface definitions using clap derive macros.
//!
//! Contains the top-level [`Cli`] parser, the [`Commands`] enum for
//! subcommands (origin, gateway, health), and their associated argument
//! structs. Every service flag has an environment variable equivalent
//! for container deployments.

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "echo-chain",
    version,
    about = "Two-node HTTP call chain: echo origin and timeout-bounded gateway",
    propagate_version = true,
    after_help = "\x1b[1mQuick start:\x1b[0m\n  \
        echo-chain origin                       Start the echo origin on :8080\n  \
        echo-chain gateway                      Start the gateway on :8081\n  \
        echo-chain health http://localhost:8081 Probe a running instance"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the echo origin service
    Origin(OriginArgs),

    /// Start the gateway service that calls the echo origin
    Gateway(GatewayArgs),

    /// Check health of a running instance
    Health(HealthArgs),
}

#[derive(Args)]
pub struct OriginArgs {
    /// Service name stamped on every log line
    #[arg(long, env = "SERVICE_NAME", default_value = "service-a")]
    pub service_name: String,

    /// Listen port
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Listen address
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[command(flatten)]
    pub logging: LoggingArgs,
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        echo-chain gateway                                          Defaults\n  \
        echo-chain gateway --echo-base-url http://echo:8080         Remote origin\n  \
        ECHO_TIMEOUT_SECONDS=0.25 echo-chain gateway --pretty       Tight timeout, local dev")]
pub struct GatewayArgs {
    /// Service name stamped on every log line
    #[arg(long, env = "SERVICE_NAME", default_value = "service-b")]
    pub service_name: String,

    /// Listen port
    #[arg(short, long, env = "PORT", default_value_t = 8081)]
    pub port: u16,

    /// Listen address
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    // -- Upstream --
    /// Base URL of the echo origin
    #[arg(
        long,
        env = "ECHO_BASE_URL",
        default_value = "http://localhost:8080",
        help_heading = "Upstream"
    )]
    pub echo_base_url: String,

    /// Timeout for the whole outbound echo call, in seconds
    #[arg(
        long,
        env = "ECHO_TIMEOUT_SECONDS",
        default_value_t = 1.0,
        help_heading = "Upstream"
    )]
    pub echo_timeout_seconds: f64,

    #[command(flatten)]
    pub logging: LoggingArgs,
}

#[derive(Args)]
pub struct LoggingArgs {
    /// Log level
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Force pretty (human-readable, multi-line) log output
    #[arg(long)]
    pub pretty: bool,

    /// Force JSON log output
    #[arg(long, conflicts_with = "pretty")]
    pub json: bool,
}

#[derive(Args)]
pub struct HealthArgs {
    /// URL of the running instance
    #[arg(default_value = "http://localhost:8080")]
    pub url: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}
