use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pickleball_stats::api::state::AppState;
use pickleball_stats::api::{build_router, cors_layer};
use pickleball_stats::calculate::{
    compute_leaderboard, compute_player_stats, compute_rankings, compute_team_streaks,
};
use pickleball_stats::config::AppConfig;
use pickleball_stats::models::PlayerId;
use pickleball_stats::seed::{seed_players, Roster};
use pickleball_stats::storage::{JsonlRepository, Repository, StorageConfig};

#[derive(Parser)]
#[command(name = "pickleball-stats")]
#[command(about = "Pickleball doubles score tracker with player and team statistics")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },

    /// Create the demo roster
    Seed {
        /// Add roster players even when some already exist
        #[arg(long)]
        force: bool,

        /// TOML roster file (defaults to the built-in roster)
        #[arg(long)]
        roster: Option<PathBuf>,
    },

    /// Print a player's stats and rankings
    Stats {
        /// Player ID
        #[arg(long)]
        player: String,
    },

    /// Print current team win streaks
    Streaks,

    /// Print the active-player leaderboard
    Leaderboard,

    /// Delete every recorded match
    ClearMatches {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    let log_level = cli.log_level.unwrap_or_else(|| config.log_level.clone());

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(cli.json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!cli.json_logs).then(|| tracing_subscriber::fmt::layer()))
        .init();

    tracing::info!("Starting pickleball-stats v{}", env!("CARGO_PKG_VERSION"));

    let repo = Arc::new(JsonlRepository::new(StorageConfig::new(config.data_dir.clone())));
    tracing::debug!("Using JSONL store at {}", config.data_dir.display());

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.validate()?;

            let state = AppState::new(repo);
            let app = build_router(state).layer(cors_layer(&config.server.cors_origin));
            let addr = config.server.bind_addr();
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Seed { force, roster } => {
            let roster = match roster {
                Some(path) => Roster::from_file(&path)?,
                None => Roster::default(),
            };
            let created = seed_players(&*repo, &roster, force).await?;
            for player in &created {
                println!("{}  {}", player.id, player.name);
            }
        }
        Commands::Stats { player } => {
            let id = PlayerId::from(player);
            let Some(player) = repo.get_player(&id).await? else {
                bail!("Player {} not found", id);
            };
            let matches = repo.matches_for_player(&id).await?;
            print_json(&json!({
                "player": player,
                "stats": compute_player_stats(&id, &matches),
                "rankings": compute_rankings(&id, &matches),
            }))?;
        }
        Commands::Streaks => {
            let matches = repo.list_matches().await?;
            print_json(&compute_team_streaks(&matches))?;
        }
        Commands::Leaderboard => {
            let players = repo.list_players().await?;
            let matches = repo.list_matches().await?;
            print_json(&compute_leaderboard(&players, &matches))?;
        }
        Commands::ClearMatches { yes } => {
            if !yes {
                bail!("Refusing to delete all matches without --yes");
            }
            let removed = repo.clear_matches().await?;
            println!("Deleted {} matches", removed);
        }
    }

    Ok(())
}
