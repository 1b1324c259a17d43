use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = echo_chain::cli::Cli::parse();
    if let Err(e) = echo_chain::cmd::dispatch(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
