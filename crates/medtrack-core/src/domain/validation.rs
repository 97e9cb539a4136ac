use std::fmt;

use serde::Serialize;

use crate::domain::{entities::field::FieldDescriptor, locale::NumberLocale};

/// Outcome of checking one input against its constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldStatus {
    Valid,
    /// Required input is blank.
    Empty,
    /// Non-blank input is not a decimal number.
    NotNumeric,
}

impl FieldStatus {
    pub fn is_valid(self) -> bool {
        self == Self::Valid
    }

    pub fn describe(self) -> &'static str {
        match self {
            Self::Valid => "ok",
            Self::Empty => "is required",
            Self::NotNumeric => "must be a number",
        }
    }
}

impl fmt::Display for FieldStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// An input that can report whether its current content is acceptable.
pub trait Validate {
    fn label(&self) -> &str;

    fn status(&self) -> FieldStatus;

    fn is_valid(&self) -> bool {
        self.status().is_valid()
    }
}

/// Anything that can appear on a form.
///
/// Widgets that carry no constraints keep the default and are skipped by the
/// aggregator.
pub trait Widget {
    fn as_validator(&self) -> Option<&dyn Validate> {
        None
    }
}

/// Single-field validation rules.
pub struct FieldValidator;

impl FieldValidator {
    /// Check `field` against its declared constraints.
    ///
    /// The emptiness rule runs first: a blank required numeric field is
    /// `Empty`, not `NotNumeric`.
    pub fn check(field: &FieldDescriptor) -> FieldStatus {
        let text = field.text();
        if field.required_non_empty() && Self::is_blank(text) {
            return FieldStatus::Empty;
        }
        if field.required_numeric() && !Self::is_numeric(text, field.locale()) {
            return FieldStatus::NotNumeric;
        }
        FieldStatus::Valid
    }

    pub fn validate(field: &FieldDescriptor) -> bool {
        Self::check(field).is_valid()
    }

    pub fn is_blank(text: &str) -> bool {
        text.trim().is_empty()
    }

    /// Blank text passes; the emptiness rule owns that case.
    pub fn is_numeric(text: &str, locale: NumberLocale) -> bool {
        Self::is_blank(text) || locale.parse(text).is_some()
    }
}

/// Status of one validator-capable widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldReport {
    pub label: String,
    pub status: FieldStatus,
}

/// Statuses of every validator-capable widget on a form, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormReport {
    pub fields: Vec<FieldReport>,
}

impl FormReport {
    pub fn all_valid(&self) -> bool {
        self.fields.iter().all(|f| f.status.is_valid())
    }

    pub fn invalid(&self) -> impl Iterator<Item = &FieldReport> {
        self.fields.iter().filter(|f| !f.status.is_valid())
    }

    pub fn invalid_labels(&self) -> Vec<String> {
        self.invalid().map(|f| f.label.clone()).collect()
    }
}

/// Reduces the widgets of a form into one submit decision.
pub struct FormValidationAggregator;

impl FormValidationAggregator {
    /// Evaluate every validator-capable widget. Never short-circuits.
    pub fn evaluate(widgets: &[&dyn Widget]) -> FormReport {
        let fields = widgets
            .iter()
            .filter_map(|w| w.as_validator())
            .map(|v| FieldReport {
                label: v.label().to_string(),
                status: v.status(),
            })
            .collect();
        FormReport { fields }
    }

    /// `true` when no validator-capable widget is invalid. Vacuously `true`
    /// for an empty form.
    pub fn can_submit(widgets: &[&dyn Widget]) -> bool {
        Self::evaluate(widgets).all_valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::field::{PickerField, StaticLabel};

    fn field(text: &str, required: bool, numeric: bool) -> FieldDescriptor {
        let mut f = FieldDescriptor::new("f").with_text(text);
        if required {
            f = f.required();
        }
        if numeric {
            f = f.numeric();
        }
        f
    }

    // ── FieldValidator ────────────────────────────────────────────────────────

    #[test]
    fn no_constraints_always_valid() {
        for text in ["", "   ", "abc", "12"] {
            assert!(FieldValidator::validate(&field(text, false, false)), "{text:?}");
        }
    }

    #[test]
    fn required_fails_iff_trimmed_text_is_empty() {
        assert_eq!(FieldValidator::check(&field("", true, false)), FieldStatus::Empty);
        assert_eq!(FieldValidator::check(&field(" \t\n", true, false)), FieldStatus::Empty);
        assert!(FieldValidator::validate(&field(" x ", true, false)));
    }

    #[test]
    fn numeric_rule() {
        assert!(FieldValidator::validate(&field("12.5", false, true)));
        assert!(FieldValidator::validate(&field("", false, true)));
        assert!(FieldValidator::validate(&field("  ", false, true)));
        assert!(FieldValidator::validate(&field(" 45 ", false, true)));
        assert_eq!(FieldValidator::check(&field("12abc", false, true)), FieldStatus::NotNumeric);
        assert_eq!(FieldValidator::check(&field("abc", false, true)), FieldStatus::NotNumeric);
    }

    #[test]
    fn required_numeric_empty_fails_emptiness_first() {
        assert_eq!(FieldValidator::check(&field("", true, true)), FieldStatus::Empty);
        assert!(FieldValidator::validate(&field("45", true, true)));
        assert_eq!(FieldValidator::check(&field("4x", true, true)), FieldStatus::NotNumeric);
    }

    #[test]
    fn numeric_rule_follows_field_locale() {
        let f = field("2,5", false, true).with_locale(NumberLocale::new(',', None));
        assert!(FieldValidator::validate(&f));
        assert!(!FieldValidator::validate(&field("2,5", false, true)));
    }

    // ── FormValidationAggregator ──────────────────────────────────────────────

    #[test]
    fn empty_form_can_submit() {
        assert!(FormValidationAggregator::can_submit(&[]));
    }

    #[test]
    fn decorative_widgets_are_ignored() {
        let label = StaticLabel::new("Dose");
        let widgets: [&dyn Widget; 1] = [&label];
        assert!(FormValidationAggregator::can_submit(&widgets));
        assert!(FormValidationAggregator::evaluate(&widgets).fields.is_empty());
    }

    #[test]
    fn all_valid_fields_can_submit() {
        let name = field("Advil", true, false);
        let amount = field("2", false, true);
        let label = StaticLabel::new("Strength");
        let widgets: [&dyn Widget; 3] = [&name, &label, &amount];
        assert!(FormValidationAggregator::can_submit(&widgets));
    }

    #[test]
    fn one_invalid_field_blocks_submit_and_all_are_evaluated() {
        let name = FieldDescriptor::new("name").required();
        let amount = FieldDescriptor::new("dose amount").numeric().with_text("x");
        let unit = PickerField::new(FieldDescriptor::new("dose unit"), ["Tablets"]);
        let widgets: [&dyn Widget; 3] = [&name, &amount, &unit];

        let report = FormValidationAggregator::evaluate(&widgets);
        assert!(!report.all_valid());
        assert_eq!(report.fields.len(), 3);
        assert_eq!(report.invalid_labels(), vec!["name", "dose amount"]);
        assert_eq!(report.fields[1].status, FieldStatus::NotNumeric);
        assert!(!FormValidationAggregator::can_submit(&widgets));
    }
}
