//! Settings command implementation.

use super::{CliError, SettingsArgs};

/// Execute the settings command: print the effective settings as JSON.
///
/// # Errors
///
/// Returns an error if the settings file cannot be read or parsed.
pub(crate) fn execute(settings: &SettingsArgs) -> Result<(), CliError> {
    let settings = settings.resolve()?;
    println!("{}", settings.to_json()?);
    Ok(())
}
