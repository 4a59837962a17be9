//! Score the latest bar of an OHLCV CSV with one signal agent.
//!
//! # Usage
//! ```sh
//! cargo run --bin score -- --input data/SPY_1d.csv --agent sarext
//! cargo run --bin score -- --input data/SPY_1d.csv --agent adx --json
//! ```
//!
//! # Environment Variables
//! Agent hyperparameters (`SAR_START_AF`, `ATR_PERIOD`, `MODEL_ALPHA`, ...) are
//! read from the environment or `.env` unless `--config` points at a TOML file.

use anyhow::{Context, Result};
use clap::Parser;
use rustsignal::application::agents::AgentFactory;
use rustsignal::config::AgentsConfig;
use rustsignal::domain::market::agent_kind::AgentKind;
use rustsignal::domain::market::signal::SignalBias;
use rustsignal::infrastructure::{init_logging, load_ohlcv_csv};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{Level, info};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// OHLCV CSV file (timestamp/date, open, high, low, close, volume)
    #[arg(long)]
    input: PathBuf,

    /// Agent: sarext, volatility_momentum, atr, stoch, adx
    #[arg(long, default_value = "sarext")]
    agent: String,

    /// Current price (defaults to the last close)
    #[arg(long)]
    price: Option<f64>,

    /// Only use the most recent N bars (0 = all)
    #[arg(long, default_value_t = 0)]
    tail: usize,

    /// TOML file with agent hyperparameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print a JSON report instead of text
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Serialize)]
struct ScoreReport {
    agent: AgentKind,
    bars: usize,
    last_timestamp: Option<i64>,
    current_price: f64,
    score: f64,
    bias: SignalBias,
    ideal_lookback_days: u32,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    init_logging(if args.verbose { Level::DEBUG } else { Level::WARN });

    let kind: AgentKind = args.agent.parse()?;
    let config = match &args.config {
        Some(path) => AgentsConfig::from_toml_file(path)?,
        None => AgentsConfig::from_env()?,
    };
    info!("Agent config: {:?}", config);

    let mut history = load_ohlcv_csv(&args.input)?;
    if args.tail > 0 {
        history = history.tail(args.tail);
    }

    let current_price = match args.price {
        Some(price) => price,
        None => history
            .last_close()
            .context("Input has no close prices; pass --price explicitly")?,
    };

    let mut agent = AgentFactory::create(kind, &config)?;
    info!(
        "Scoring {} bars with {} (ideal lookback {} days)",
        history.len(),
        agent.name(),
        kind.ideal_lookback_days()
    );
    let score = agent
        .predict(current_price, &history)
        .with_context(|| format!("{} failed to score {}", agent.name(), args.input.display()))?;

    let report = ScoreReport {
        agent: kind,
        bars: history.len(),
        last_timestamp: history.timestamps().last().copied(),
        current_price,
        score,
        bias: SignalBias::from_score(score),
        ideal_lookback_days: kind.ideal_lookback_days(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{} | price {:.4} | score {:+.4} | {}",
            agent.name(),
            report.current_price,
            report.score,
            report.bias
        );
    }
    Ok(())
}
