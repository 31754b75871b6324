//! rf-slot — local session driver for the slot engine
//!
//! Usage:
//!   rf-slot init                      - Print the init payload
//!   rf-slot spin --count 3            - Play spins and print each spin payload
//!   rf-slot spin --rig grid.json      - Force the first spin's grid
//!   rf-slot simulate --spins 100000   - Play many spins and report RTP

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};

use rf_slot_engine::wire::{InitResponse, RigRequest, SpinResponse};
use rf_slot_engine::{SlotConfig, SlotEngine, SlotError, SlotSession};

#[derive(Parser)]
#[command(name = "rf-slot", about = "Slot engine session driver")]
struct Cli {
    /// Game config (JSON or YAML); built-in 5x3 game if omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// RNG seed for reproducible sessions
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct BetArgs {
    /// Bet per line
    #[arg(short, long)]
    bet: Option<u64>,

    /// Active line count
    #[arg(short, long)]
    lines: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the init payload (display grid, state, lines, paytable)
    Init,
    /// Play spins and print each spin payload
    Spin {
        /// Number of spins
        #[arg(short = 'n', long, default_value_t = 1)]
        count: u32,

        /// JSON file with a `rigData` grid forced onto the first spin
        #[arg(short, long)]
        rig: Option<PathBuf>,

        #[command(flatten)]
        bet: BetArgs,
    },
    /// Play many spins and report session statistics
    Simulate {
        /// Number of spins
        #[arg(short = 'n', long, default_value_t = 100_000)]
        spins: u64,

        /// Starting bankroll, overriding the config
        #[arg(long)]
        balance: Option<u64>,

        #[command(flatten)]
        bet: BetArgs,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SlotConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SlotConfig::default(),
    };
    if let Commands::Simulate { balance: Some(balance), .. } = &cli.command {
        config.starting_balance = *balance;
    }
    let config = Arc::new(config);
    let engine = match cli.seed {
        Some(seed) => SlotEngine::with_seed(config, seed),
        None => SlotEngine::new(config),
    };
    let mut session = SlotSession::new(engine);

    match cli.command {
        Commands::Init => print_init(&mut session),
        Commands::Spin { count, rig, bet } => {
            apply_bet(&mut session, &bet)?;
            if let Some(path) = rig {
                session.rig(load_rig(&path)?)?;
            }
            run_spins(&mut session, count)
        }
        Commands::Simulate { spins, bet, .. } => {
            apply_bet(&mut session, &bet)?;
            simulate(&mut session, spins)
        }
    }
}

fn apply_bet(session: &mut SlotSession, bet: &BetArgs) -> Result<()> {
    if let Some(lines) = bet.lines {
        session.set_lines(lines)?;
    }
    if let Some(per_line) = bet.bet {
        session.set_bet_per_line(per_line)?;
    }
    Ok(())
}

fn load_rig(path: &Path) -> Result<rf_slot_engine::Grid> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read rig file {}", path.display()))?;
    let request: RigRequest = serde_json::from_str(&text)
        .with_context(|| format!("Invalid rig file {}", path.display()))?;
    Ok(request.rig_data)
}

fn print_init(session: &mut SlotSession) -> Result<()> {
    let response = InitResponse::from(&session.init());
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn run_spins(session: &mut SlotSession, count: u32) -> Result<()> {
    for index in 0..count {
        match session.spin() {
            Ok(outcome) => {
                let response = SpinResponse::from(&outcome);
                println!("{}", serde_json::to_string_pretty(&response)?);
            }
            Err(SlotError::InsufficientFunds { balance, total_bet }) => {
                log::warn!("Stopped after {} spins: insufficient funds", index);
                bail!("Insufficient funds: balance {}, total bet {}", balance, total_bet);
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

fn simulate(session: &mut SlotSession, spins: u64) -> Result<()> {
    let mut played = 0;
    while played < spins {
        match session.spin() {
            Ok(_) => played += 1,
            Err(SlotError::InsufficientFunds { .. }) => {
                log::info!("Bankroll exhausted after {} spins", played);
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    let stats = session.stats();
    let state = session.state();
    println!("Spins:              {}", stats.total_spins);
    println!("Free spins:         {}", stats.free_spins);
    println!("Features triggered: {}", stats.features_triggered);
    println!("Total bet:          {}", stats.total_bet);
    println!("Total win:          {}", stats.total_win);
    println!("Biggest win:        {}", stats.max_win);
    println!("RTP:                {:.2}%", stats.rtp());
    println!("Hit rate:           {:.2}%", stats.hit_rate());
    println!("Final balance:      {}", state.balance);
    Ok(())
}
