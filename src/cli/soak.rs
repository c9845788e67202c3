//! Soak command implementation.

// Games per second is a display value
#![allow(clippy::cast_precision_loss)]

use super::output::{format_soak_text, SoakStats};
use super::{seed_or_random, CliError, SettingsArgs, SoakFormat};
use indicatif::{ProgressBar, ProgressStyle};
use lucky_seven::soak::{run_game, SoakConfig};
use rayon::prelude::*;
use std::time::Instant;

/// Execute the soak command.
///
/// # Errors
///
/// Returns an error if the settings cannot be loaded, the output cannot be
/// serialized, or any game broke an invariant.
pub(crate) fn execute(
    games: u64,
    seed: Option<u64>,
    threads: Option<usize>,
    max_inputs: Option<u32>,
    format: SoakFormat,
    progress: bool,
    settings: &SettingsArgs,
) -> Result<(), CliError> {
    let settings = settings.resolve()?;
    let base_seed = seed_or_random(seed);

    let mut config = SoakConfig::default();
    if let Some(n) = max_inputs {
        config.max_inputs = n;
    }

    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let pb = if progress {
        let pb = ProgressBar::new(games);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games ({per_sec})")
            .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
            .progress_chars("=>-");
        pb.set_style(style);
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();
    tracing::info!(games, base_seed, "soak started");

    // Each thread accumulates into its own stats, merged at the end
    let stats = (0..games)
        .into_par_iter()
        .fold(SoakStats::default, |mut local, i| {
            let result = run_game(base_seed.wrapping_add(i), &settings, &config);
            local.add_result(&result);
            if let Some(pb) = &pb {
                pb.inc(1);
            }
            local
        })
        .reduce(SoakStats::default, |mut a, b| {
            a.merge(b);
            a
        });

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();
    let games_per_sec = if duration.as_secs_f64() > 0.0 {
        stats.games_played as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    match format {
        SoakFormat::Text => {
            println!();
            print!("{}", format_soak_text(&stats));
            println!();
            println!("Duration: {:.2}s ({:.0} games/sec)", duration.as_secs_f64(), games_per_sec);
        }
        SoakFormat::Json => {
            let json = serde_json::to_string_pretty(&stats)?;
            println!("{json}");
        }
    }

    if stats.failures().is_empty() {
        Ok(())
    } else {
        Err(CliError::new(format!(
            "{} games broke an invariant",
            stats.failures().len()
        )))
    }
}
