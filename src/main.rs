//! Lucky Seven CLI - play, inspect and soak-test games from the terminal.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// The Lucky Seven - a solo squad-versus-threats card game
#[derive(Parser, Debug)]
#[command(name = "lucky-seven")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a game in the terminal
    Play {
        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        #[command(flatten)]
        settings: cli::SettingsArgs,
    },

    /// Set up a game and print the board
    Show {
        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Advance this many phases before printing
        #[arg(short, long, default_value = "0")]
        advance: u32,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::ShowFormat,

        #[command(flatten)]
        settings: cli::SettingsArgs,
    },

    /// Run many random-input games and aggregate outcomes
    Soak {
        /// Number of games to run (default: 1000)
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Starting seed (increments for each game)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Inputs per game before it is abandoned (default: 10000)
        #[arg(long)]
        max_inputs: Option<u32>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::SoakFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,

        #[command(flatten)]
        settings: cli::SettingsArgs,
    },

    /// Print the effective settings as JSON
    Settings {
        #[command(flatten)]
        settings: cli::SettingsArgs,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    // The TUI owns the terminal, so it only logs when given a file.
    let log_to_stderr = !matches!(args.command, Commands::Play { .. });
    if let Err(e) = cli::init_logging(args.log_file.as_deref(), log_to_stderr) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    let result = match args.command {
        Commands::Play { seed, settings } => cli::play::execute(seed, &settings),

        Commands::Show {
            seed,
            advance,
            format,
            settings,
        } => cli::show::execute(seed, advance, format, &settings),

        Commands::Soak {
            games,
            seed,
            threads,
            max_inputs,
            format,
            progress,
            settings,
        } => cli::soak::execute(games, seed, threads, max_inputs, format, progress, &settings),

        Commands::Settings { settings } => cli::settings::execute(&settings),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
