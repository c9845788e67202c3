//! CLI command implementations for Lucky Seven.

pub(crate) mod play;
pub(crate) mod settings;
pub(crate) mod show;
pub(crate) mod soak;

mod output;

use clap::ValueEnum;
use lucky_seven::game::ThreatKind;
use lucky_seven::{Settings, SettingsError};
use std::error::Error;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Output format for the `show` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ShowFormat {
    /// Human-readable board.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Output format for the `soak` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum SoakFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Settings shared by every command: an optional JSON file plus overrides.
#[derive(clap::Args, Debug, Clone, Default)]
pub(crate) struct SettingsArgs {
    /// Settings JSON file
    #[arg(long = "settings")]
    file: Option<PathBuf>,

    /// Squad members removed at setup
    #[arg(long)]
    subtract: Option<u8>,

    /// Threat deck size
    #[arg(long)]
    threats: Option<u8>,

    /// Tanks in the deck
    #[arg(long)]
    tanks: Option<u8>,

    /// Machine guns in the deck
    #[arg(long)]
    machine_guns: Option<u8>,

    /// Mortars in the deck
    #[arg(long)]
    mortars: Option<u8>,

    /// Threats reduced to zero strength do not counter-attack
    #[arg(long)]
    zero_strength_holds_fire: bool,

    /// Lost squad members add a final turn
    #[arg(long)]
    extra_final_turns: bool,

    /// Encountered threats may be moved to another column
    #[arg(long)]
    selectable_columns: bool,
}

impl SettingsArgs {
    /// Load the file (or defaults), apply overrides and clamp.
    pub(crate) fn resolve(&self) -> Result<Settings, CliError> {
        let mut settings = match &self.file {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        if let Some(n) = self.subtract {
            settings.squad_members_subtraction = n;
        }
        if let Some(n) = self.threats {
            settings.threat_count_total = n;
        }
        let counts = [
            (ThreatKind::Tank, self.tanks),
            (ThreatKind::MachineGun, self.machine_guns),
            (ThreatKind::Mortar, self.mortars),
        ];
        for (kind, count) in counts {
            if let Some(n) = count {
                settings.threat_count_mapping.set(kind, n);
            }
        }
        settings.threat_cannot_attack_at_zero_strength |= self.zero_strength_holds_fire;
        settings.final_turns_increase_from_defeated_squad_members |= self.extra_final_turns;
        settings.selectable_column_for_encountered_threats |= self.selectable_columns;
        Ok(settings.normalised())
    }
}

/// Seed from the clock when none is given.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn seed_or_random(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    })
}

/// Install the tracing subscriber.
///
/// `RUST_LOG` overrides the default `lucky_seven=info` filter. Logs go to
/// `log_file` if given, else to stderr when `to_stderr` is set.
pub(crate) fn init_logging(log_file: Option<&Path>, to_stderr: bool) -> Result<(), CliError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lucky_seven=info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match log_file {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                CliError::new(format!("Failed to create {}: {e}", path.display()))
            })?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None if to_stderr => builder.with_writer(std::io::stderr).init(),
        None => {}
    }
    Ok(())
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<SettingsError> for CliError {
    fn from(e: SettingsError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("JSON serialization failed: {e}"))
    }
}
