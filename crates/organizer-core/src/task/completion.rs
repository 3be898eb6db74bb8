//! Completion state.
//!
//! The store writes `is_completed` as a boolean from the edit form, as `0`/`1`
//! from older rows, and as a fractional progress value from the progress
//! control; hand-edited rows sometimes carry those as strings. Everything is
//! funnelled into [`Completion`], a fraction in `[0, 1]` where `false` is `0`
//! and `true` is `1`.

use serde::{Deserialize, Serialize};

/// Progress added by one step of the progress control.
pub const PROGRESS_STEP: f64 = 0.25;

/// Raw completion value as stored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompletionValue {
    Flag(bool),
    Fraction(f64),
    #[default]
    Missing,
    Other(serde_json::Value),
}

impl CompletionValue {
    /// Canonical fraction for this value.
    ///
    /// Numbers are clamped into `[0, 1]`. Strings holding a boolean or a
    /// number are read as that value; anything else counts as not started.
    pub fn canonical(&self) -> Completion {
        match self {
            CompletionValue::Flag(done) => Completion::from(*done),
            CompletionValue::Fraction(f) => Completion::new(*f),
            CompletionValue::Other(serde_json::Value::String(s)) => parse_text(s),
            CompletionValue::Missing | CompletionValue::Other(_) => Completion::NONE,
        }
    }
}

fn parse_text(raw: &str) -> Completion {
    let raw = raw.trim();
    if let Ok(done) = raw.parse::<bool>() {
        return Completion::from(done);
    }
    raw.parse::<f64>().map(Completion::new).unwrap_or(Completion::NONE)
}

impl From<bool> for CompletionValue {
    fn from(value: bool) -> Self {
        CompletionValue::Flag(value)
    }
}

impl From<f64> for CompletionValue {
    fn from(value: f64) -> Self {
        CompletionValue::Fraction(value)
    }
}

/// Completion fraction in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Completion(f64);

impl Completion {
    pub const NONE: Completion = Completion(0.0);
    pub const FULL: Completion = Completion(1.0);

    /// Clamp `fraction` into `[0, 1]`. NaN maps to zero.
    pub fn new(fraction: f64) -> Self {
        if fraction.is_nan() {
            tracing::debug!("completion value is NaN, treating as not started");
            return Self::NONE;
        }
        if !(0.0..=1.0).contains(&fraction) {
            tracing::debug!(fraction, "completion value outside [0, 1], clamping");
        }
        Self(fraction.clamp(0.0, 1.0))
    }

    pub fn fraction(self) -> f64 {
        self.0
    }

    /// Any progress at all. Used for display classification.
    pub fn is_started(self) -> bool {
        self.0 > 0.0
    }

    pub fn is_full(self) -> bool {
        self.0 >= 1.0
    }

    /// One click of the progress control: add a step, capped at full; a full
    /// task wraps back to zero.
    pub fn advance(self) -> Self {
        if self.is_full() {
            Self::NONE
        } else {
            Self((self.0 + PROGRESS_STEP).min(1.0))
        }
    }

    /// Mark fully complete.
    pub fn complete(self) -> Self {
        Self::FULL
    }
}

impl From<bool> for Completion {
    fn from(done: bool) -> Self {
        if done {
            Self::FULL
        } else {
            Self::NONE
        }
    }
}
