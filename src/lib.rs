//! echo-chain is a minimal two-node HTTP call chain.
//!
//! The **origin** service answers `GET /echo?msg=..` by echoing `msg`
//! back as JSON. The **gateway** service answers `GET /call-echo?msg=..`
//! by calling the origin under a timeout and translating every failure
//! mode (non-200, timeout, connection error) into one stable 503
//! contract. Both log one access line per request with its latency.
//!
//! # Architecture
//!
//! - [`cli`] -- Command-line argument parsing with clap derive macros.
//! - [`cmd`] -- Subcommand dispatch and execution (origin, gateway, health).
//! - [`config`] -- Immutable startup configuration and its validation.
//! - [`error`] -- Unified error types using `thiserror`.
//! - [`gateway`] -- `GET /call-echo` and the timeout-bounded outbound call.
//! - [`health`] -- `GET /health` endpoint handler.
//! - [`logging`] -- Tracing setup with plain, JSON and pretty output.
//! - [`middleware`] -- Per-request access logging with latency.
//! - [`origin`] -- `GET /echo`.
//! - [`params`] -- Shared `msg` query parameter validation.
//! - [`server`] -- Router construction, HTTP client, graceful shutdown.

// Binary crate — public functions are internal, not consumed by external users.
#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod gateway;
pub mod health;
pub mod logging;
pub mod middleware;
pub mod origin;
pub mod params;
pub mod server;
