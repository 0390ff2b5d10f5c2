//! The rule evaluator: raw value + declared rules -> verdict.

use serde::{Deserialize, Serialize};

use super::messages::Locale;
use super::rule::Validations;

/// One failure reported for a field.
///
/// `rule` is the id of the failed rule, or `None` for an externally
/// supplied error that did not name one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(rename = "error", default)]
    pub rule: Option<String>,
    pub message: String,
}

impl FieldError {
    pub fn new(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            rule: Some(rule.into()),
            message: message.into(),
        }
    }

    /// An error with no rule id, as supplied by a caller.
    pub fn custom(message: impl Into<String>) -> Self {
        Self {
            rule: None,
            message: message.into(),
        }
    }
}

/// Outcome of evaluating one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub valid: bool,
    pub errors: Vec<FieldError>,
}

/// Evaluate `value` against `validations` with English messages.
///
/// See [`evaluate_in`].
pub fn evaluate(value: &str, validations: &Validations) -> Verdict {
    evaluate_in(value, validations, Locale::default())
}

/// Evaluate `value` against every declared rule, in declaration order.
///
/// All rules run; every failure is collected. The verdict is valid iff
/// no rule failed, so an empty rule set is always valid.
pub fn evaluate_in(value: &str, validations: &Validations, locale: Locale) -> Verdict {
    let errors: Vec<FieldError> = validations
        .iter()
        .filter(|spec| !spec.rule.check(value))
        .map(|spec| {
            let message = spec
                .message
                .clone()
                .unwrap_or_else(|| locale.message(&spec.rule));
            FieldError::new(spec.rule.id(), message)
        })
        .collect();

    Verdict {
        valid: errors.is_empty(),
        errors,
    }
}
