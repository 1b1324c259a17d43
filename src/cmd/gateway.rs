//! `echo-chain gateway` — start the gateway service.
//!
//! Builds the immutable [`GatewayConfig`] and the shared outbound HTTP
//! client once, then serves `/call-echo` until shutdown.

use crate::cli::GatewayArgs;
use crate::config::GatewayConfig;
use crate::error::EchoChainError;
use crate::logging;
use crate::server;

pub async fn execute(args: &GatewayArgs) -> Result<(), EchoChainError> {
    let log_format = logging::resolve_format(args.logging.pretty, args.logging.json);
    logging::init(&args.logging.log_level, log_format);

    let config = GatewayConfig::from_args(args)?;

    tracing::info!(
        service = %config.service.service_name,
        echo_endpoint = %config.echo_endpoint,
        timeout = ?config.echo_timeout,
        "gateway configured"
    );

    let router = server::gateway_router(&config, server::build_http_client());

    server::serve(&config.service, router, server::shutdown_signal()).await
}
