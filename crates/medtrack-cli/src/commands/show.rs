//! `medtrack show`: print one medication.

use crate::{
    cli::{GlobalArgs, ShowArgs},
    commands::{medication_service, parse_id, print_record},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(
    args: ShowArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let id = parse_id(&args.id)?;
    let record = medication_service(global, config).get(&id)?;

    if output.is_json() {
        return output.json(&record);
    }
    print_record(output, &record)
}
