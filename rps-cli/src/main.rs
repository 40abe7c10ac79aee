mod commands;
mod config;

use clap::{Parser, Subcommand};
use config::CliConfig;
use rps_engine::GameError;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "rps")]
#[command(about = "Provably fair rock-paper-scissors with any odd number of moves")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Move names in cycle order (odd count, at least 3, unique)
    moves: Vec<String>,

    /// Directory holding config.json
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Also print each revealed round as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the win/lose table for a move list
    Rules {
        /// Move names in cycle order
        moves: Vec<String>,
    },
    /// Check a revealed key and move against an HMAC
    Verify {
        /// Revealed HMAC key (hex encoded)
        key: String,
        /// Revealed computer move
        #[arg(value_name = "MOVE")]
        mv: String,
        /// HMAC shown before the round (hex encoded)
        hmac: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let data_dir = cli.data_dir.clone().unwrap_or_else(config::default_data_dir);
    let config = match CliConfig::load(&data_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    let log_level = if cli.verbose || config.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "rps={},rps_engine={}",
            log_level, log_level
        )))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let json = cli.json || config.json_output;

    // Execute command
    let result = match cli.command {
        Some(Commands::Rules { moves }) => commands::show_rules(config.resolve_moves(moves)),
        Some(Commands::Verify { key, mv, hmac }) => commands::verify(&key, &mv, &hmac),
        None => commands::play(config.resolve_moves(cli.moves), json),
    };

    if let Err(e) = result {
        match e.downcast_ref::<GameError>() {
            Some(GameError::InvalidMoveList(reason)) => {
                eprintln!("Error: {}", reason);
                eprintln!(
                    "Incorrect number of arguments. Please provide an odd number (>= 3) of unique moves."
                );
                eprintln!("Example: rps rock Spock paper lizard scissors");
            }
            Some(GameError::CommitmentMismatch) => {
                eprintln!("FAIRNESS VIOLATION: {}", e);
            }
            _ => {
                eprintln!("Error: {:#}", e);
            }
        }
        std::process::exit(1);
    }
}
