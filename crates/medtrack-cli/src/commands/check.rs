//! `medtrack check`: run the field validator on one value.
//!
//! Exits 0 when the value passes and 2 when it does not, so the command can
//! be used from scripts.

use serde::Serialize;

use medtrack_core::domain::{FieldDescriptor, FieldReport, FieldStatus, FieldValidator};

use crate::{
    cli::CheckArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[derive(Serialize)]
struct CheckOutcome<'a> {
    text: &'a str,
    required: bool,
    numeric: bool,
    status: FieldStatus,
}

pub fn execute(args: CheckArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let mut field = FieldDescriptor::new("input")
        .with_locale(config.number_locale()?)
        .with_text(args.text.as_str());
    if args.required {
        field = field.required();
    }
    if args.numeric {
        field = field.numeric();
    }

    let status = FieldValidator::check(&field);
    tracing::debug!(%status, "Input checked");

    if output.is_json() {
        output.json(&CheckOutcome {
            text: &args.text,
            required: args.required,
            numeric: args.numeric,
            status,
        })?;
    } else if status.is_valid() {
        output.success(&format!("{:?} is valid", args.text))?;
    }

    if status.is_valid() {
        Ok(())
    } else {
        Err(CliError::InvalidForm {
            fields: vec![FieldReport {
                label: field.label().to_owned(),
                status,
            }],
        })
    }
}
