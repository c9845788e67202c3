//! Show command implementation.

use super::output::JsonGame;
use super::{seed_or_random, CliError, SettingsArgs, ShowFormat};
use lucky_seven::view::render_ascii;
use lucky_seven::Controller;

/// Execute the show command.
///
/// # Errors
///
/// Returns an error if the settings cannot be loaded or the output cannot
/// be serialized.
pub(crate) fn execute(
    seed: Option<u64>,
    advance: u32,
    format: ShowFormat,
    settings: &SettingsArgs,
) -> Result<(), CliError> {
    let settings = settings.resolve()?;
    let seed = seed_or_random(seed);

    let mut controller = Controller::new(settings, seed);
    for _ in 0..advance {
        if !controller.on_advance_phase() {
            break;
        }
    }
    let state = controller.state();

    match format {
        ShowFormat::Text => {
            println!("Seed: {seed}");
            print!("{}", render_ascii(state));
        }
        ShowFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonGame::from_state(state))?;
            println!("{json}");
        }
    }

    Ok(())
}
