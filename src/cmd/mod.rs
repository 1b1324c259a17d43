//! Subcommand dispatch and execution.
//!
//! The [`dispatch`] function routes the parsed CLI to the appropriate
//! subcommand handler: [`origin`], [`gateway`], or [`health`]. Each
//! handler lives in its own submodule.

pub mod gateway;
pub mod health;
pub mod origin;

use crate::cli::{Cli, Commands};
use crate::error::EchoChainError;

pub async fn dispatch(cli: Cli) -> Result<(), EchoChainError> {
    match cli.command {
        Some(Commands::Origin(ref args)) => origin::execute(args).await,
        Some(Commands::Gateway(ref args)) => gateway::execute(args).await,
        Some(Commands::Health(args)) => health::execute(args).await,
        None => {
            print_welcome();
            Ok(())
        }
    }
}

fn print_welcome() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        "\n  echo-chain v{version} \u{2014} echo origin and timeout-bounded gateway\n\n  \
         No command provided. To get started:\n\n    \
         echo-chain origin                 Start the echo origin (:8080)\n    \
         echo-chain gateway                Start the gateway (:8081 -> :8080)\n    \
         echo-chain health <url>           Probe a running instance\n    \
         echo-chain --help                 See all commands and options\n"
    );
}
