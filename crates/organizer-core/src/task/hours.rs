//! Estimated-duration coercion.
//!
//! `time_to_take` is stored as free text by the task form, so a record may
//! carry `2`, `"2.5"`, `"3 hours"`, `null` or something unusable. Parsing is
//! explicit: [`Hours::parse`] yields a [`ParsedHours`] and each consumer
//! decides how to treat [`ParsedHours::Unparseable`].

use serde::{Deserialize, Serialize};

/// Hours charged for a task whose duration cannot be parsed.
pub const UNPARSEABLE_HOURS: f64 = 1.0;

/// Hours charged for a task explicitly estimated at zero.
pub const ZERO_DURATION_HOURS: f64 = 0.5;

/// Raw estimated duration as stored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Hours {
    Number(f64),
    Text(String),
    #[default]
    Missing,
    Other(serde_json::Value),
}

/// Result of parsing a raw duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParsedHours {
    Parsed(f64),
    Unparseable,
}

impl ParsedHours {
    pub fn value(self) -> Option<f64> {
        match self {
            ParsedHours::Parsed(v) => Some(v),
            ParsedHours::Unparseable => None,
        }
    }
}

impl Hours {
    /// Parse the raw value.
    ///
    /// Text is read like a leading float literal: surrounding whitespace is
    /// ignored and trailing non-numeric text is dropped, so `"3 hours"`
    /// parses as `3`. Non-finite values are unparseable.
    pub fn parse(&self) -> ParsedHours {
        let value = match self {
            Hours::Number(n) => Some(*n),
            Hours::Text(s) => parse_float_prefix(s),
            Hours::Missing | Hours::Other(_) => None,
        };

        match value {
            Some(v) if v.is_finite() => ParsedHours::Parsed(v),
            _ => ParsedHours::Unparseable,
        }
    }

    /// Hours this task consumes from a day's capacity.
    ///
    /// Exactly zero counts as half an hour and unparseable durations as one
    /// hour; anything else is used as parsed.
    pub fn effective(&self) -> f64 {
        effective_hours(self.parse())
    }
}

impl From<f64> for Hours {
    fn from(value: f64) -> Self {
        Hours::Number(value)
    }
}

impl From<&str> for Hours {
    fn from(value: &str) -> Self {
        Hours::Text(value.to_string())
    }
}

/// Capacity accounting for a parsed duration.
pub fn effective_hours(parsed: ParsedHours) -> f64 {
    match parsed {
        ParsedHours::Parsed(v) if v == 0.0 => ZERO_DURATION_HOURS,
        ParsedHours::Parsed(v) => v,
        ParsedHours::Unparseable => UNPARSEABLE_HOURS,
    }
}

/// Longest leading decimal literal of `s`, if any.
fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when followed by at least one digit.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_parse_as_is() {
        assert_eq!(Hours::Number(2.0).parse(), ParsedHours::Parsed(2.0));
        assert_eq!(Hours::Number(0.0).parse(), ParsedHours::Parsed(0.0));
    }

    #[test]
    fn numeric_text_parses() {
        assert_eq!(Hours::from("2.5").parse(), ParsedHours::Parsed(2.5));
        assert_eq!(Hours::from("  4").parse(), ParsedHours::Parsed(4.0));
        assert_eq!(Hours::from(".5").parse(), ParsedHours::Parsed(0.5));
        assert_eq!(Hours::from("3.").parse(), ParsedHours::Parsed(3.0));
        assert_eq!(Hours::from("1e1").parse(), ParsedHours::Parsed(10.0));
    }

    #[test]
    fn trailing_text_is_ignored() {
        assert_eq!(Hours::from("3 hours").parse(), ParsedHours::Parsed(3.0));
        assert_eq!(Hours::from("1.5h").parse(), ParsedHours::Parsed(1.5));
        assert_eq!(Hours::from("2e").parse(), ParsedHours::Parsed(2.0));
    }

    #[test]
    fn garbage_is_unparseable() {
        assert_eq!(Hours::from("abc").parse(), ParsedHours::Unparseable);
        assert_eq!(Hours::from("").parse(), ParsedHours::Unparseable);
        assert_eq!(Hours::from(".").parse(), ParsedHours::Unparseable);
        assert_eq!(Hours::from("-").parse(), ParsedHours::Unparseable);
        assert_eq!(Hours::Missing.parse(), ParsedHours::Unparseable);
        assert_eq!(Hours::Other(serde_json::Value::Bool(true)).parse(), ParsedHours::Unparseable);
    }

    #[test]
    fn non_finite_is_unparseable() {
        assert_eq!(Hours::Number(f64::NAN).parse(), ParsedHours::Unparseable);
        assert_eq!(Hours::Number(f64::INFINITY).parse(), ParsedHours::Unparseable);
        assert_eq!(Hours::from("1e400").parse(), ParsedHours::Unparseable);
    }

    #[test]
    fn effective_hours_normalization() {
        assert_eq!(Hours::Number(0.0).effective(), 0.5);
        assert_eq!(Hours::from("0").effective(), 0.5);
        assert_eq!(Hours::from("abc").effective(), 1.0);
        assert_eq!(Hours::Missing.effective(), 1.0);
        assert_eq!(Hours::Number(2.25).effective(), 2.25);
    }

    #[test]
    fn deserializes_every_shape() {
        let raw: Vec<Hours> = serde_json::from_str(r#"[2, "3", null, true]"#).unwrap();
        assert_eq!(
            raw,
            vec![
                Hours::Number(2.0),
                Hours::Text("3".into()),
                Hours::Missing,
                Hours::Other(serde_json::Value::Bool(true)),
            ]
        );
    }
}
