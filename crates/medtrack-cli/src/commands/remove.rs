//! `medtrack remove`: delete a stored medication.

use tracing::instrument;

use crate::{
    cli::{GlobalArgs, RemoveArgs},
    commands::{medication_service, parse_id},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(id = %args.id))]
pub fn execute(
    args: RemoveArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let id = parse_id(&args.id)?;
    let service = medication_service(global, config);

    // Resolve first so a wrong id fails before prompting.
    let record = service.get(&id)?;

    if !args.yes && !confirm(&format!("Remove {}?", record.display_name()))? {
        return Err(CliError::Cancelled);
    }

    let removed = service.remove(&id)?;
    if output.is_json() {
        return output.json(&removed);
    }
    output.success(&format!("Removed {} ({})", removed.display_name(), removed.id))?;
    Ok(())
}

#[cfg(feature = "interactive")]
fn confirm(prompt: &str) -> CliResult<bool> {
    if !console::Term::stderr().is_term() {
        return Err(CliError::InvalidInput {
            message: "confirmation needs a terminal, pass --yes to remove without asking".into(),
            source: None,
        });
    }
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "Failed to read confirmation".into(),
            source: std::io::Error::other(e),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm(_prompt: &str) -> CliResult<bool> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}
