//! `medtrack edit`: change a stored medication.
//!
//! The stored record is loaded into a form, the given flags are laid on top
//! and the result goes through the same validation as `add`.

use tracing::instrument;

use crate::{
    cli::{EditArgs, GlobalArgs},
    commands::{
        GivenMeasurements, check_form, fill_form, medication_service, parse_id, print_record,
    },
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(id = %args.id))]
pub fn execute(
    args: EditArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let id = parse_id(&args.id)?;
    let service = medication_service(global, config);

    if args.fields.is_empty() {
        let record = service.get(&id)?;
        output.warning("No fields given, record left unchanged")?;
        return if output.is_json() {
            output.json(&record)
        } else {
            print_record(output, &record)
        };
    }

    let mut form = service.edit_form(&id, config.number_locale()?)?;
    let given = GivenMeasurements::of(&args.fields);
    fill_form(&mut form, args.fields);
    check_form(&form)?;

    let submission = service.submit_edit(&id, &form)?;
    let record = &submission.record;
    given.warn_unrecorded(output, &submission.applied)?;

    if output.is_json() {
        return output.json(record);
    }

    output.success(&format!("Updated {}", record.display_name()))?;
    print_record(output, record)?;
    Ok(())
}
