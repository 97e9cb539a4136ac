//! `medtrack add`: record a new medication.

use tracing::instrument;

use medtrack_core::domain::MedicationForm;

use crate::{
    cli::{AddArgs, GlobalArgs},
    commands::{GivenMeasurements, check_form, fill_form, medication_service, print_record},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(
    args: AddArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let mut form = MedicationForm::new(config.number_locale()?);
    let given = GivenMeasurements::of(&args.fields);
    fill_form(&mut form, args.fields);
    check_form(&form)?;

    let submission = medication_service(global, config).submit_new(&form)?;
    let record = &submission.record;
    given.warn_unrecorded(output, &submission.applied)?;

    if output.is_json() {
        return output.json(record);
    }

    output.success(&format!("Added {}", record.display_name()))?;
    print_record(output, record)?;
    Ok(())
}
