//! Form inputs: text fields, pickers and decorative labels.
//!
//! A field owns its raw text and its declared constraints. Whether the text
//! currently satisfies them is decided by
//! [`FieldValidator`](crate::domain::validation::FieldValidator); the
//! [`Validate`] and [`Widget`] impls here only wire the fields into it.

use crate::domain::{
    locale::NumberLocale,
    validation::{FieldStatus, FieldValidator, Validate, Widget},
};

// ── FieldDescriptor ───────────────────────────────────────────────────────────

/// One text input and its constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    label: String,
    raw_text: String,
    required_non_empty: bool,
    required_numeric: bool,
    locale: NumberLocale,
}

impl FieldDescriptor {
    /// An unconstrained, empty input.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            raw_text: String::new(),
            required_non_empty: false,
            required_numeric: false,
            locale: NumberLocale::default(),
        }
    }

    /// Require non-blank text.
    pub fn required(mut self) -> Self {
        self.required_non_empty = true;
        self
    }

    /// Require the text to be a decimal number when it is not blank.
    pub fn numeric(mut self) -> Self {
        self.required_numeric = true;
        self
    }

    pub fn with_locale(mut self, locale: NumberLocale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.raw_text = text.into();
        self
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.raw_text = text.into();
    }

    pub fn clear(&mut self) {
        self.raw_text.clear();
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn text(&self) -> &str {
        &self.raw_text
    }

    /// The raw text, or `None` when it is blank.
    pub fn value(&self) -> Option<&str> {
        if FieldValidator::is_blank(&self.raw_text) {
            None
        } else {
            Some(&self.raw_text)
        }
    }

    pub fn required_non_empty(&self) -> bool {
        self.required_non_empty
    }

    pub fn required_numeric(&self) -> bool {
        self.required_numeric
    }

    pub fn locale(&self) -> NumberLocale {
        self.locale
    }
}

impl Validate for FieldDescriptor {
    fn label(&self) -> &str {
        &self.label
    }

    fn status(&self) -> FieldStatus {
        FieldValidator::check(self)
    }
}

impl Widget for FieldDescriptor {
    fn as_validator(&self) -> Option<&dyn Validate> {
        Some(self)
    }
}

// ── PickerField ───────────────────────────────────────────────────────────────

/// A text input filled by choosing a row from a fixed list.
///
/// The text can still be set directly; it is validated by the same rules as
/// any other input and is not required to be one of the choices.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerField {
    input: FieldDescriptor,
    choices: Vec<String>,
}

impl PickerField {
    pub fn new<I, S>(input: FieldDescriptor, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input,
            choices: choices.into_iter().map(Into::into).collect(),
        }
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    /// Copy the choice at `row` into the input. Out-of-range rows are
    /// ignored.
    pub fn select(&mut self, row: usize) -> bool {
        match self.choices.get(row) {
            Some(choice) => {
                self.input.raw_text = choice.clone();
                true
            }
            None => false,
        }
    }

    /// Row of the current text, if it is one of the choices.
    pub fn selected_row(&self) -> Option<usize> {
        self.choices.iter().position(|c| *c == self.input.raw_text)
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.input.set_text(text);
    }

    pub fn input(&self) -> &FieldDescriptor {
        &self.input
    }

    pub fn text(&self) -> &str {
        self.input.text()
    }

    pub fn value(&self) -> Option<&str> {
        self.input.value()
    }
}

impl Validate for PickerField {
    fn label(&self) -> &str {
        self.input.label()
    }

    fn status(&self) -> FieldStatus {
        FieldValidator::check(&self.input)
    }
}

impl Widget for PickerField {
    fn as_validator(&self) -> Option<&dyn Validate> {
        Some(self)
    }
}

// ── StaticLabel ───────────────────────────────────────────────────────────────

/// Decorative text. Never takes part in validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticLabel {
    pub text: String,
}

impl StaticLabel {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Widget for StaticLabel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_value_is_none_when_blank() {
        let field = FieldDescriptor::new("name").with_text("   ");
        assert_eq!(field.value(), None);
        assert_eq!(field.text(), "   ");

        let field = field.with_text("Advil");
        assert_eq!(field.value(), Some("Advil"));
    }

    #[test]
    fn field_is_validator_capable() {
        let field = FieldDescriptor::new("name").required();
        let validator = field.as_validator().unwrap();
        assert_eq!(validator.label(), "name");
        assert_eq!(validator.status(), FieldStatus::Empty);
    }

    #[test]
    fn picker_select_copies_choice() {
        let mut picker = PickerField::new(FieldDescriptor::new("dose unit"), ["Tablets", "Drops"]);
        assert!(picker.select(1));
        assert_eq!(picker.text(), "Drops");
        assert_eq!(picker.selected_row(), Some(1));
    }

    #[test]
    fn picker_ignores_out_of_range_row() {
        let mut picker = PickerField::new(FieldDescriptor::new("dose unit"), ["Tablets"]);
        picker.set_text("Tablets");
        assert!(!picker.select(5));
        assert_eq!(picker.text(), "Tablets");
    }

    #[test]
    fn picker_accepts_free_text() {
        let mut picker = PickerField::new(FieldDescriptor::new("unit").required(), ["mg"]);
        picker.set_text("grains");
        assert_eq!(picker.selected_row(), None);
        assert!(picker.is_valid());
    }

    #[test]
    fn static_label_is_not_a_validator() {
        assert!(StaticLabel::new("Dose").as_validator().is_none());
    }
}
