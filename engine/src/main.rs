use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Parser;
use tracing::{error, info};

use calcio_engine::analyzer::GeminiClient;
use calcio_engine::config::Config;
use calcio_engine::orchestrator::Orchestrator;
use calcio_engine::stats::SampleStats;
use calcio_engine::types::Match;

#[derive(Parser)]
#[command(name = "calcio", about = "Match prediction engine for the calcio dashboard")]
struct Cli {
    /// Home team name
    #[arg(long)]
    home: String,

    /// Away team name
    #[arg(long)]
    away: String,

    /// Home team id in the stats provider
    #[arg(long, default_value_t = 0)]
    home_id: u32,

    /// Away team id in the stats provider
    #[arg(long, default_value_t = 1)]
    away_id: u32,

    /// Kickoff time (RFC 3339, defaults to now)
    #[arg(long)]
    kickoff: Option<DateTime<Utc>>,

    /// Venue name
    #[arg(long)]
    venue: Option<String>,

    /// Decimal odds for the home win
    #[arg(long)]
    home_odds: f64,

    /// Decimal odds for the draw
    #[arg(long)]
    draw_odds: f64,

    /// Decimal odds for the away win
    #[arg(long)]
    away_odds: f64,

    /// Load config from a specific .env file
    #[arg(long)]
    config_file: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let cfg = Config::from_env_file(cli.config_file.as_deref())?;

    let gemini = GeminiClient::new(&cfg)?;
    if !gemini.is_configured() {
        error!("GEMINI_API_KEY is not set — every analysis will use the heuristic fallback");
    }

    info!(
        "Analyzing {} vs {} (timeout {}s, model {})",
        cli.home, cli.away, cfg.completion_timeout_secs, cfg.gemini_model
    );

    let fixture = Match {
        home_team: cli.home,
        away_team: cli.away,
        home_id: cli.home_id,
        away_id: cli.away_id,
        kickoff: cli.kickoff.unwrap_or_else(Utc::now),
        venue: cli.venue,
        home_odds: cli.home_odds,
        draw_odds: cli.draw_odds,
        away_odds: cli.away_odds,
    };

    let orchestrator = Orchestrator::new(SampleStats, gemini);
    let prediction = orchestrator.analyze(&fixture).await?;

    println!("{}", serde_json::to_string_pretty(&prediction)?);
    Ok(())
}
