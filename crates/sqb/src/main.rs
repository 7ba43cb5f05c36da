//! SQL Query Bridge - Entry Point
//!
//! Binary entry point for the SQL Query Bridge server: parse the CLI, then
//! hand over to the server crate for configuration, wiring, and serving.

// Force-link sqb-providers to ensure linkme registrations are included
extern crate sqb_providers;

use clap::Parser;
use sqb_server::run;

/// Command line interface for SQL Query Bridge
#[derive(Parser, Debug)]
#[command(name = "sqb")]
#[command(about = "SQL Query Bridge - natural language to SQL server")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (defaults to ./sqb.toml when present)
    #[arg(short, long)]
    pub config: Option<std::path::PathBuf>,

    /// Bind address override (e.g. 0.0.0.0:8080)
    #[arg(long)]
    pub listen: Option<std::net::SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    run(cli.config.as_deref(), cli.listen).await
}
