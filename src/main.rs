//! tfcaccess - Main entry point

use clap::Parser;
use log::debug;

use tfcaccess::{run_team_access_command, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    debug!("Starting tfcaccess v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_team_access_command(&cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
