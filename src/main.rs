use clap::{Parser, Subcommand};
use leaderboard_cutoffs::{
    api::{Fetcher, LeaderboardApi, LeaderboardClient, ReqwestTransport},
    config::Settings,
    resolver::PercentileResolver,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(name = "leaderboard-cutoffs")]
#[clap(about = "Compute leaderboard point thresholds for percentile cutoffs", long_about = None)]
struct Cli {
    /// Settings file layered over the built-in defaults
    #[clap(short, long)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the points held at every configured percentile (default)
    Cutoffs {
        /// Print the report as JSON
        #[clap(long)]
        json: bool,
    },

    /// Print the total participant count
    Total,

    /// Print the entry standing at a given rank
    Rank {
        rank: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::load(cli.config.as_deref())?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.app.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = settings.validate() {
        error!("Invalid settings: {}", e);
        return Err(anyhow::anyhow!(e));
    }

    // One pooled client for the whole run
    let transport = Arc::new(ReqwestTransport::new(
        settings.timeout(),
        settings.leaderboard.user_agent.clone(),
    )?);
    let fetcher = Fetcher::new(transport, settings.retry_policy());
    let client = Arc::new(LeaderboardClient::new(fetcher, &settings.leaderboard.base_url)?);

    info!("Using leaderboard at {}", client.base_url());

    match cli.command.unwrap_or(Commands::Cutoffs { json: false }) {
        Commands::Cutoffs { json } => {
            let resolver = PercentileResolver::new(client);
            let report = resolver.resolve_report(&settings.percentiles).await.map_err(|e| {
                error!("Error: {}", e);
                e
            })?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report);
            }
        }

        Commands::Total => {
            let total = client.total_participants().await?;
            println!("Total participants: {}", total);
        }

        Commands::Rank { rank } => {
            let entry = client.entry_at_rank(rank).await?;
            println!("Rank: {}", entry.rank);
            println!("Address: {}", entry.address);
            println!("Score: {}", entry.score);
            println!("Multiplier: {}", entry.multiplier);
            println!("Total score: {}", entry.total_score);
        }
    }

    Ok(())
}
