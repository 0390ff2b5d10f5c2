//! Validation rules and the ordered rule set declared on a field.

use std::fmt;

use email_address::EmailAddress;
use regex::Regex;
use serde::Deserialize;
use serde::de::{self, Deserializer, MapAccess, Visitor};

use crate::error::{FormError, FormResult};

pub const REQUIRED: &str = "required";
pub const MIN_LENGTH: &str = "minLength";
pub const MAX_LENGTH: &str = "maxLength";
pub const PATTERN: &str = "pattern";
pub const EMAIL: &str = "email";
pub const NUMERIC: &str = "numeric";
pub const MIN: &str = "min";
pub const MAX: &str = "max";
pub const EQUALS: &str = "equals";
pub const CONTAINS: &str = "contains";

/// A compiled regular expression used by the `pattern` rule.
#[derive(Debug, Clone)]
pub struct Pattern(Regex);

impl Pattern {
    /// Compile a pattern. Fails with [`FormError::InvalidPattern`].
    pub fn new(pattern: &str) -> FormResult<Self> {
        Regex::new(pattern)
            .map(Self)
            .map_err(|source| FormError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.0.is_match(value)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

/// A single parameterized check applied to a raw field value.
///
/// Every rule except [`Rule::Required`] passes on an empty value, so
/// emptiness is governed by `required` alone.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// Value must contain something other than whitespace.
    Required,
    /// At least this many characters.
    MinLength(usize),
    /// At most this many characters.
    MaxLength(usize),
    /// Value must match the expression somewhere.
    Pattern(Pattern),
    /// Value must be an email address.
    Email,
    /// Value must parse as a finite number.
    Numeric,
    /// Numeric value must be at least this.
    Min(f64),
    /// Numeric value must be at most this.
    Max(f64),
    /// Value must equal this exactly.
    Equals(String),
    /// Value must contain this substring.
    Contains(String),
}

impl Rule {
    /// The rule id, as used in declarations and error entries.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Required => REQUIRED,
            Self::MinLength(_) => MIN_LENGTH,
            Self::MaxLength(_) => MAX_LENGTH,
            Self::Pattern(_) => PATTERN,
            Self::Email => EMAIL,
            Self::Numeric => NUMERIC,
            Self::Min(_) => MIN,
            Self::Max(_) => MAX,
            Self::Equals(_) => EQUALS,
            Self::Contains(_) => CONTAINS,
        }
    }

    /// Check a raw value against this rule.
    pub fn check(&self, value: &str) -> bool {
        if value.is_empty() && !matches!(self, Self::Required) {
            return true;
        }

        match self {
            Self::Required => !value.trim().is_empty(),
            Self::MinLength(min) => value.chars().count() >= *min,
            Self::MaxLength(max) => value.chars().count() <= *max,
            Self::Pattern(pattern) => pattern.is_match(value),
            Self::Email => EmailAddress::is_valid(value),
            Self::Numeric => parse_number(value).is_some(),
            Self::Min(min) => parse_number(value).is_some_and(|n| n >= *min),
            Self::Max(max) => parse_number(value).is_some_and(|n| n <= *max),
            Self::Equals(expected) => value == expected,
            Self::Contains(needle) => value.contains(needle.as_str()),
        }
    }

    /// Build a rule from a declared id and parameter.
    ///
    /// Returns `Ok(None)` for flag rules switched off (`"required": false`).
    pub fn from_param(id: &str, param: &RuleParam) -> FormResult<Option<Self>> {
        let invalid = |reason: &str| FormError::InvalidRuleParam {
            rule: id.to_string(),
            reason: reason.to_string(),
        };

        let rule = match (id, param) {
            (REQUIRED, RuleParam::Flag(on)) => on.then_some(Self::Required),
            (EMAIL, RuleParam::Flag(on)) => on.then_some(Self::Email),
            (NUMERIC, RuleParam::Flag(on)) => on.then_some(Self::Numeric),
            (REQUIRED | EMAIL | NUMERIC, _) => return Err(invalid("expected a boolean")),
            (MIN_LENGTH, param) => Some(Self::MinLength(
                param
                    .as_length()
                    .ok_or_else(|| invalid("expected a non-negative integer"))?,
            )),
            (MAX_LENGTH, param) => Some(Self::MaxLength(
                param
                    .as_length()
                    .ok_or_else(|| invalid("expected a non-negative integer"))?,
            )),
            (MIN, RuleParam::Number(n)) => Some(Self::Min(*n)),
            (MAX, RuleParam::Number(n)) => Some(Self::Max(*n)),
            (MIN | MAX, _) => return Err(invalid("expected a number")),
            (PATTERN, RuleParam::Text(pattern)) => Some(Self::Pattern(Pattern::new(pattern)?)),
            (EQUALS, RuleParam::Text(expected)) => Some(Self::Equals(expected.clone())),
            (CONTAINS, RuleParam::Text(needle)) => Some(Self::Contains(needle.clone())),
            (PATTERN | EQUALS | CONTAINS, _) => return Err(invalid("expected a string")),
            _ => return Err(FormError::UnknownRule(id.to_string())),
        };

        Ok(rule)
    }
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// A declared rule parameter before it is interpreted by its rule.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RuleParam {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl RuleParam {
    fn as_length(&self) -> Option<usize> {
        match self {
            Self::Number(n) if *n >= 0.0 && n.fract() == 0.0 => Some(*n as usize),
            _ => None,
        }
    }
}

/// A rule plus an optional message that replaces the locale default.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSpec {
    pub rule: Rule,
    pub message: Option<String>,
}

impl From<Rule> for RuleSpec {
    fn from(rule: Rule) -> Self {
        Self {
            rule,
            message: None,
        }
    }
}

/// The ordered set of rules declared on one field.
///
/// Behaves like a mapping from rule id to parameters that remembers
/// declaration order: inserting a rule whose id is already present
/// replaces it in place.
///
/// # Example
///
/// ```
/// use formstate::validation::Validations;
///
/// let rules = Validations::new().required().min_length(3).max_length(40);
/// assert_eq!(rules.ids().collect::<Vec<_>>(), ["required", "minLength", "maxLength"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Validations {
    rules: Vec<RuleSpec>,
}

impl Validations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a rule, replacing any earlier rule with the same id.
    pub fn insert(&mut self, spec: impl Into<RuleSpec>) {
        let spec = spec.into();
        match self.rules.iter_mut().find(|s| s.rule.id() == spec.rule.id()) {
            Some(existing) => *existing = spec,
            None => self.rules.push(spec),
        }
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.insert(rule);
        self
    }

    /// Add a rule with a message that overrides the locale default.
    pub fn rule_with_message(mut self, rule: Rule, message: impl Into<String>) -> Self {
        self.insert(RuleSpec {
            rule,
            message: Some(message.into()),
        });
        self
    }

    pub fn required(self) -> Self {
        self.rule(Rule::Required)
    }

    pub fn min_length(self, min: usize) -> Self {
        self.rule(Rule::MinLength(min))
    }

    pub fn max_length(self, max: usize) -> Self {
        self.rule(Rule::MaxLength(max))
    }

    /// Add a `pattern` rule. Fails if the expression does not compile.
    pub fn pattern(self, pattern: &str) -> FormResult<Self> {
        Ok(self.rule(Rule::Pattern(Pattern::new(pattern)?)))
    }

    pub fn email(self) -> Self {
        self.rule(Rule::Email)
    }

    pub fn numeric(self) -> Self {
        self.rule(Rule::Numeric)
    }

    pub fn min(self, min: f64) -> Self {
        self.rule(Rule::Min(min))
    }

    pub fn max(self, max: f64) -> Self {
        self.rule(Rule::Max(max))
    }

    pub fn equals(self, expected: impl Into<String>) -> Self {
        self.rule(Rule::Equals(expected.into()))
    }

    pub fn contains(self, needle: impl Into<String>) -> Self {
        self.rule(Rule::Contains(needle.into()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuleSpec> {
        self.rules.iter()
    }

    /// Rule ids in declaration order.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|s| s.rule.id())
    }

    pub fn get(&self, id: &str) -> Option<&RuleSpec> {
        self.rules.iter().find(|s| s.rule.id() == id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DeclaredParam {
    Detailed {
        value: RuleParam,
        #[serde(default)]
        message: Option<String>,
    },
    Plain(RuleParam),
}

impl<'de> Deserialize<'de> for Validations {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ValidationsVisitor;

        impl<'de> Visitor<'de> for ValidationsVisitor {
            type Value = Validations;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping of rule ids to parameters")
            }

            fn visit_none<E: de::Error>(self) -> Result<Validations, E> {
                Ok(Validations::new())
            }

            fn visit_unit<E: de::Error>(self) -> Result<Validations, E> {
                Ok(Validations::new())
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Validations, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserializer.deserialize_map(self)
            }

            fn visit_map<A>(self, mut map: A) -> Result<Validations, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut validations = Validations::new();
                while let Some((id, declared)) = map.next_entry::<String, DeclaredParam>()? {
                    let (param, message) = match declared {
                        DeclaredParam::Detailed { value, message } => (value, message),
                        DeclaredParam::Plain(value) => (value, None),
                    };
                    if let Some(rule) = Rule::from_param(&id, &param).map_err(de::Error::custom)? {
                        validations.insert(RuleSpec { rule, message });
                    }
                }
                Ok(validations)
            }
        }

        // `null` declares no rules
        deserializer.deserialize_option(ValidationsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_in_place() {
        let rules = Validations::new()
            .required()
            .min_length(3)
            .email()
            .min_length(5);

        assert_eq!(rules.ids().collect::<Vec<_>>(), ["required", "minLength", "email"]);
        assert_eq!(rules.get(MIN_LENGTH).map(|s| &s.rule), Some(&Rule::MinLength(5)));
    }

    #[test]
    fn test_non_required_rules_pass_on_empty() {
        for rule in [
            Rule::MinLength(3),
            Rule::Email,
            Rule::Numeric,
            Rule::Min(1.0),
            Rule::Equals("x".into()),
        ] {
            assert!(rule.check(""), "{} should pass on empty", rule.id());
        }
        assert!(!Rule::Required.check(""));
        assert!(!Rule::Required.check("   "));
    }

    #[test]
    fn test_length_counts_chars() {
        assert!(Rule::MaxLength(4).check("ñañá"));
        assert!(!Rule::MinLength(5).check("ñañá"));
    }

    #[test]
    fn test_numeric_bounds() {
        assert!(Rule::Min(0.0).check("0"));
        assert!(!Rule::Min(0.0).check("-1"));
        assert!(!Rule::Max(10.0).check("abc"));
        assert!(!Rule::Numeric.check("inf"));
        assert!(Rule::Numeric.check(" 2.5 "));
    }

    #[test]
    fn test_from_param_flags() {
        assert_eq!(
            Rule::from_param(REQUIRED, &RuleParam::Flag(true)).ok().flatten(),
            Some(Rule::Required)
        );
        assert_eq!(
            Rule::from_param(REQUIRED, &RuleParam::Flag(false)).ok().flatten(),
            None
        );
        assert!(matches!(
            Rule::from_param(REQUIRED, &RuleParam::Number(1.0)),
            Err(FormError::InvalidRuleParam { .. })
        ));
    }

    #[test]
    fn test_from_param_rejects_fractional_length() {
        assert!(matches!(
            Rule::from_param(MIN_LENGTH, &RuleParam::Number(2.5)),
            Err(FormError::InvalidRuleParam { .. })
        ));
    }

    #[test]
    fn test_from_param_unknown_rule() {
        assert!(matches!(
            Rule::from_param("shout", &RuleParam::Flag(true)),
            Err(FormError::UnknownRule(id)) if id == "shout"
        ));
    }

    #[test]
    fn test_bad_pattern() {
        assert!(matches!(
            Validations::new().pattern("(unclosed"),
            Err(FormError::InvalidPattern { .. })
        ));
    }
}
