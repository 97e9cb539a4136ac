//! Implementation of the `medtrack list` command.

use medtrack_core::domain::{ApproxMeasurement, MedicationRecord};

use crate::{
    cli::{ListArgs, ListFormat, global::GlobalArgs},
    commands::medication_service,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(
    args: ListArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let records = medication_service(global, config).list()?;
    tracing::debug!(count = records.len(), "Medications loaded");

    // --output-format json implies a JSON list
    let format = if output.is_json() {
        ListFormat::Json
    } else {
        args.format
    };

    match format {
        ListFormat::Table => {
            if records.is_empty() {
                output.info("No medications recorded. Add one with: medtrack add --name <NAME>")?;
                return Ok(());
            }
            output.header(&format!(
                "{:<36}  {:<20}  {:<22}  {:<14}  {}",
                "ID", "NAME", "STRENGTH", "DOSE", "FREQUENCY"
            ))?;
            for r in &records {
                output.data(&format!(
                    "{:<36}  {:<20}  {:<22}  {:<14}  {}",
                    r.id,
                    r.display_name(),
                    cell(&r.strength),
                    cell(&r.dose),
                    cell(&r.frequency),
                ))?;
            }
        }

        ListFormat::Json => output.json(&records)?,

        ListFormat::List => {
            for r in &records {
                output.data(&format!("{}  {}", r.id, r))?;
            }
        }

        ListFormat::Csv => {
            output.data("id,name,strength,dose,frequency")?;
            for r in &records {
                output.data(&csv_row(r))?;
            }
        }
    }

    Ok(())
}

fn cell(measurement: &Option<ApproxMeasurement>) -> String {
    measurement
        .as_ref()
        .map(|m| m.display_text())
        .unwrap_or_else(|| "-".into())
}

fn csv_row(record: &MedicationRecord) -> String {
    let text = |m: &Option<ApproxMeasurement>| {
        m.as_ref().map(|m| m.display_text()).unwrap_or_default()
    };
    [
        record.id.to_string(),
        record.name.clone().unwrap_or_default(),
        text(&record.strength),
        text(&record.dose),
        text(&record.frequency),
    ]
    .iter()
    .map(|f| csv_field(f))
    .collect::<Vec<_>>()
    .join(",")
}

/// Quote a field when it contains a separator, quote or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}
