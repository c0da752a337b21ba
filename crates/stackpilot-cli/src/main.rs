mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "stackpilot")]
#[command(about = "Provision a Lambda + API Gateway chain with CloudFormation")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the bootstrap, build, and function stacks in order
    Up,
    /// Empty the buckets and delete all three stacks in reverse order
    Down {
        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Inspect the provisioned REST API
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Up => commands::up().await?,
        Commands::Down { yes } => commands::down(yes).await?,
        Commands::Status => commands::status().await?,
    }

    Ok(())
}
