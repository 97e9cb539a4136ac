//! Command handlers, one module per subcommand.
//!
//! Handlers take the parsed arguments plus the shared global flags, config
//! and output manager, and return a [`CliResult`].

pub mod add;
pub mod check;
pub mod completions;
pub mod config;
pub mod edit;
pub mod init;
pub mod list;
pub mod remind;
pub mod remove;
pub mod show;
pub mod units;

use std::str::FromStr;

use medtrack_adapters::{JsonFileStore, StaticVocabulary};
use medtrack_core::{
    application::{ActionPlanService, MedicationService},
    domain::{AppliedFields, MedicationForm, MedicationRecord, RecordId},
};

use crate::{
    cli::{GlobalArgs, MedicationArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// The store selected by `--store` / `storage.path`.
pub(crate) fn open_store(global: &GlobalArgs, config: &AppConfig) -> JsonFileStore {
    let path = config.store_path(global);
    tracing::debug!(path = %path.display(), "Opening medication store");
    JsonFileStore::open(path)
}

pub(crate) fn medication_service(global: &GlobalArgs, config: &AppConfig) -> MedicationService {
    MedicationService::new(
        Box::new(open_store(global, config)),
        Box::new(StaticVocabulary::new()),
    )
}

pub(crate) fn action_plan_service(global: &GlobalArgs, config: &AppConfig) -> ActionPlanService {
    ActionPlanService::new(Box::new(open_store(global, config)))
}

pub(crate) fn parse_id(id: &str) -> CliResult<RecordId> {
    RecordId::from_str(id).map_err(|e| CliError::Core(e.into()))
}

/// Copy the given inputs onto `form`. Absent flags leave the form untouched.
///
/// A free-text frequency clears the structured pair and vice versa, so the
/// value the user typed is the one that gets applied.
pub(crate) fn fill_form(form: &mut MedicationForm, args: MedicationArgs) {
    if let Some(name) = args.name {
        form.name.set_text(name);
    }
    if let Some(amount) = args.strength {
        form.strength_amount.set_text(amount);
    }
    if let Some(unit) = args.strength_unit {
        form.strength_unit.set_text(unit);
    }
    if let Some(amount) = args.dose {
        form.dose_amount.set_text(amount);
    }
    if let Some(unit) = args.dose_unit {
        form.dose_unit.set_text(unit);
    }

    let structured = args.frequency_amount.is_some() || args.frequency_unit.is_some();
    if let Some(amount) = args.frequency_amount {
        form.frequency_amount.set_text(amount);
    }
    if let Some(unit) = args.frequency_unit {
        form.frequency_unit.set_text(unit);
    }
    if structured {
        form.frequency_text.clear();
    } else if let Some(text) = args.frequency {
        form.frequency_amount.set_text("");
        form.frequency_unit.set_text("");
        form.frequency_text.set_text(text);
    }
}

/// Which measurements were given a non-blank value on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct GivenMeasurements {
    strength: bool,
    dose: bool,
    frequency: bool,
}

impl GivenMeasurements {
    pub(crate) fn of(args: &MedicationArgs) -> Self {
        let given = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        Self {
            strength: given(&args.strength) || given(&args.strength_unit),
            dose: given(&args.dose) || given(&args.dose_unit),
            frequency: given(&args.frequency_amount)
                || given(&args.frequency_unit)
                || given(&args.frequency),
        }
    }

    /// Measurements that were given but whose setter did not take effect.
    pub(crate) fn unrecorded(&self, applied: &AppliedFields) -> Vec<&'static str> {
        [
            ("strength", self.strength, applied.strength),
            ("dose", self.dose, applied.dose),
            ("frequency", self.frequency, applied.frequency),
        ]
        .into_iter()
        .filter(|(_, given, applied)| *given && !*applied)
        .map(|(label, ..)| label)
        .collect()
    }

    pub(crate) fn warn_unrecorded(
        &self,
        output: &OutputManager,
        applied: &AppliedFields,
    ) -> CliResult<()> {
        for label in self.unrecorded(applied) {
            output.warning(&format!(
                "{label} not recorded: give both an amount and a unit"
            ))?;
        }
        Ok(())
    }
}

/// Reject the form with every invalid field and its status.
pub(crate) fn check_form(form: &MedicationForm) -> CliResult<()> {
    let report = form.evaluate();
    if report.all_valid() {
        return Ok(());
    }
    Err(CliError::InvalidForm {
        fields: report.invalid().cloned().collect(),
    })
}

/// Multi-line human rendering of a record.
pub(crate) fn print_record(output: &OutputManager, record: &MedicationRecord) -> CliResult<()> {
    let or_dash = |m: Option<String>| m.unwrap_or_else(|| "-".into());

    output.header(record.display_name())?;
    output.data(&format!("  id         {}", record.id))?;
    output.data(&format!(
        "  strength   {}",
        or_dash(record.strength.as_ref().map(|m| m.display_text()))
    ))?;
    output.data(&format!(
        "  dose       {}",
        or_dash(record.dose.as_ref().map(|m| m.display_text()))
    ))?;
    output.data(&format!(
        "  frequency  {}",
        or_dash(record.frequency.as_ref().map(|m| m.display_text()))
    ))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_form_sets_only_given_inputs() {
        let mut form = MedicationForm::default();
        form.dose_amount.set_text("1");
        fill_form(
            &mut form,
            MedicationArgs {
                name: Some("Advil".into()),
                strength: Some("200".into()),
                ..Default::default()
            },
        );
        assert_eq!(form.name.text(), "Advil");
        assert_eq!(form.strength_amount.text(), "200");
        assert_eq!(form.dose_amount.text(), "1");
    }

    #[test]
    fn free_text_frequency_replaces_structured() {
        let mut form = MedicationForm::default();
        form.frequency_amount.set_text("2");
        form.frequency_unit.set_text("times per day");
        fill_form(
            &mut form,
            MedicationArgs {
                frequency: Some("as needed".into()),
                ..Default::default()
            },
        );
        assert_eq!(form.frequency_amount.text(), "");
        assert_eq!(form.frequency_text.text(), "as needed");
    }

    #[test]
    fn structured_frequency_replaces_free_text() {
        let mut form = MedicationForm::default();
        form.frequency_text.set_text("with food");
        fill_form(
            &mut form,
            MedicationArgs {
                frequency_amount: Some("3".into()),
                frequency_unit: Some("times per day".into()),
                ..Default::default()
            },
        );
        assert_eq!(form.frequency_text.text(), "");
        assert_eq!(form.frequency_amount.text(), "3");
    }

    #[test]
    fn check_form_reports_every_invalid_field() {
        let mut form = MedicationForm::default();
        form.dose_amount.set_text("two");
        match check_form(&form) {
            Err(CliError::InvalidForm { fields }) => {
                let labels: Vec<_> = fields.iter().map(|f| f.label.as_str()).collect();
                assert_eq!(labels, vec!["name", "dose amount"]);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn amount_without_unit_is_unrecorded() {
        let given = GivenMeasurements::of(&MedicationArgs {
            name: Some("Advil".into()),
            dose: Some("2".into()),
            frequency: Some("daily".into()),
            ..Default::default()
        });
        let applied = AppliedFields {
            name: true,
            strength: false,
            dose: false,
            frequency: true,
        };
        assert_eq!(given.unrecorded(&applied), vec!["dose"]);
    }

    #[test]
    fn blank_inputs_are_not_given() {
        let given = GivenMeasurements::of(&MedicationArgs {
            strength: Some("  ".into()),
            ..Default::default()
        });
        assert!(given.unrecorded(&AppliedFields::default()).is_empty());
    }

    #[test]
    fn malformed_id_is_user_error() {
        assert_eq!(parse_id("not-a-uuid").unwrap_err().exit_code(), 2);
    }
}
