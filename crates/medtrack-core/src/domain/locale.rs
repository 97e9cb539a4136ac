//! Locale-aware decimal parsing shared by the numeric field rule and the
//! record builder.
//!
//! Parsing is all-or-nothing: the trimmed input must be consumed entirely.
//! `12abc` is rejected rather than read as `12`, and the textual specials
//! `inf` / `nan` that `f64::from_str` would accept are rejected too.

use serde::{Deserialize, Serialize};

/// Separators used when reading decimal numbers typed by a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberLocale {
    pub decimal_separator: char,
    pub grouping_separator: Option<char>,
}

impl NumberLocale {
    pub const fn new(decimal_separator: char, grouping_separator: Option<char>) -> Self {
        Self {
            decimal_separator,
            grouping_separator,
        }
    }

    /// `1234.5` style, no grouping.
    pub const fn posix() -> Self {
        Self::new('.', None)
    }

    /// Parse `text` as a decimal number in this locale.
    pub fn parse(&self, text: &str) -> Option<f64> {
        parse_decimal(text, *self)
    }

    /// Render `value` the way [`Self::parse`] reads it back.
    ///
    /// No grouping separators are written.
    pub fn format(&self, value: f64) -> String {
        let text = format!("{value}");
        if self.decimal_separator == '.' {
            text
        } else {
            text.replace('.', &self.decimal_separator.to_string())
        }
    }
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self::posix()
    }
}

/// Parse a decimal number, requiring the whole trimmed input to be numeric.
///
/// Accepted shape: `[+-] digits [grouping digits]* [decimal digits*] [e [+-] digits]`.
/// At least one mantissa digit is required. Returns `None` for anything else,
/// including values that overflow to infinity.
pub fn parse_decimal(text: &str, locale: NumberLocale) -> Option<f64> {
    let chars: Vec<char> = text.trim().chars().collect();
    let mut pos = 0;
    let mut normalized = String::with_capacity(chars.len());

    if let Some(&c) = chars.first() {
        if c == '+' || c == '-' {
            normalized.push(c);
            pos += 1;
        }
    }

    let mut mantissa_digits = 0usize;
    while pos < chars.len() {
        let c = chars[pos];
        if c.is_ascii_digit() {
            normalized.push(c);
            mantissa_digits += 1;
            pos += 1;
        } else if Some(c) == locale.grouping_separator
            && mantissa_digits > 0
            && chars.get(pos + 1).is_some_and(char::is_ascii_digit)
        {
            pos += 1;
        } else {
            break;
        }
    }

    if pos < chars.len() && chars[pos] == locale.decimal_separator {
        normalized.push('.');
        pos += 1;
        while pos < chars.len() && chars[pos].is_ascii_digit() {
            normalized.push(chars[pos]);
            mantissa_digits += 1;
            pos += 1;
        }
    }

    if mantissa_digits == 0 {
        return None;
    }

    if pos < chars.len() && (chars[pos] == 'e' || chars[pos] == 'E') {
        normalized.push('e');
        pos += 1;
        if pos < chars.len() && (chars[pos] == '+' || chars[pos] == '-') {
            normalized.push(chars[pos]);
            pos += 1;
        }
        let start = pos;
        while pos < chars.len() && chars[pos].is_ascii_digit() {
            normalized.push(chars[pos]);
            pos += 1;
        }
        if pos == start {
            return None;
        }
    }

    if pos != chars.len() {
        return None;
    }

    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}
