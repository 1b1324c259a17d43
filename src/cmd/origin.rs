//! `echo-chain origin` — start the echo origin service.

use crate::cli::OriginArgs;
use crate::config::ServiceConfig;
use crate::error::EchoChainError;
use crate::logging;
use crate::server;

pub async fn execute(args: &OriginArgs) -> Result<(), EchoChainError> {
    let log_format = logging::resolve_format(args.logging.pretty, args.logging.json);
    logging::init(&args.logging.log_level, log_format);

    let config = ServiceConfig::from_origin_args(args)?;
    let router = server::origin_router(&config);

    server::serve(&config, router, server::shutdown_signal()).await
}
