use anyhow::Result;
use clap::{Parser, Subcommand};

/// planora - salon planning service
#[derive(Parser)]
#[command(name = "planora")]
#[command(about = "Planning views for the salon booking platform", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Probe the booking API and report what the planning views would see
    CheckUpstream,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = planora::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    planora::observability::init_observability(&config.observability.log_level)?;

    match cli.command {
        Commands::Serve { host, port } => planora::cli::server::serve(config, host, port).await,
        Commands::CheckUpstream => planora::cli::upstream::check(config).await,
    }
}
