//! Field state table.
//!
//! [`FormState`] is a value: every transition returns a new state and
//! leaves the old one intact. The controller holds the single current
//! state and replaces it wholesale on each event.

use std::collections::HashMap;

use log::debug;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::error::{FormError, FormResult};
use crate::node::FieldDescriptor;
use crate::validation::{FieldError, Locale, Validations, evaluate_in};

/// Key of the aggregate verdict in a serialized [`SubmitResult`].
pub const VALID_KEY: &str = "valid";

/// State of one field.
///
/// `valid` starts `false`: a field that was never evaluated is not
/// considered valid, even with no rules. The first evaluation settles it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldRecord {
    pub value: String,
    pub touched: bool,
    pub valid: bool,
    pub errors: Vec<FieldError>,
    #[serde(skip)]
    pub validations: Validations,
}

/// Per-field outcome of a change or submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldResult {
    pub value: String,
    pub valid: bool,
    pub errors: Vec<FieldError>,
}

impl FieldResult {
    fn of(record: &FieldRecord) -> Self {
        Self {
            value: record.value.clone(),
            valid: record.valid,
            errors: record.errors.clone(),
        }
    }
}

/// Aggregated outcome of a submission.
///
/// Serializes as a flat map: `{"valid": bool, "<field>": {...}, ...}` with
/// fields in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitResult {
    /// True iff every field passed its last evaluation.
    pub valid: bool,
    pub fields: Vec<(String, FieldResult)>,
}

impl SubmitResult {
    pub fn get(&self, name: &str) -> Option<&FieldResult> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, result)| result)
    }

    /// Field values by name, for handing the submission on.
    pub fn values(&self) -> HashMap<&str, &str> {
        self.fields
            .iter()
            .map(|(name, result)| (name.as_str(), result.value.as_str()))
            .collect()
    }
}

impl Serialize for SubmitResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        map.serialize_entry(VALID_KEY, &self.valid)?;
        for (name, result) in &self.fields {
            map.serialize_entry(name, result)?;
        }
        map.end()
    }
}

/// All field records of a form, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    order: Vec<String>,
    fields: HashMap<String, FieldRecord>,
    locale: Locale,
}

impl FormState {
    /// Build the initial state for the discovered fields.
    ///
    /// Each field starts untouched and unvalidated with its preset value,
    /// or an empty string if none is given.
    pub fn initialize(
        discovered: &[FieldDescriptor],
        presets: &HashMap<String, String>,
        locale: Locale,
    ) -> FormResult<Self> {
        let mut order = Vec::with_capacity(discovered.len());
        let mut fields = HashMap::with_capacity(discovered.len());

        for field in discovered {
            let record = FieldRecord {
                value: presets.get(&field.name).cloned().unwrap_or_default(),
                touched: false,
                valid: false,
                errors: Vec::new(),
                validations: field.validations.clone(),
            };
            if fields.insert(field.name.clone(), record).is_some() {
                return Err(FormError::DuplicateField(field.name.clone()));
            }
            order.push(field.name.clone());
        }

        for name in presets.keys().filter(|name| !fields.contains_key(*name)) {
            debug!("Ignoring preset value for undeclared field '{name}'");
        }

        Ok(Self {
            order,
            fields,
            locale,
        })
    }

    /// Set one field's value, mark it touched and re-evaluate it.
    ///
    /// Every other field is carried over unchanged.
    pub fn apply_change(
        &self,
        name: &str,
        value: impl Into<String>,
    ) -> FormResult<(Self, FieldResult)> {
        let Some(current) = self.fields.get(name) else {
            return Err(FormError::UnknownField(name.to_string()));
        };

        let value = value.into();
        let verdict = evaluate_in(&value, &current.validations, self.locale);
        let record = FieldRecord {
            value,
            touched: true,
            valid: verdict.valid,
            errors: verdict.errors,
            validations: current.validations.clone(),
        };
        let result = FieldResult::of(&record);

        let mut next = self.clone();
        next.fields.insert(name.to_string(), record);
        Ok((next, result))
    }

    /// Evaluate every field, mark all touched, and aggregate the outcome.
    pub fn apply_submit(&self) -> (Self, SubmitResult) {
        let mut next = self.clone();
        let mut result = SubmitResult {
            valid: true,
            fields: Vec::with_capacity(self.order.len()),
        };

        for name in &self.order {
            let Some(record) = next.fields.get_mut(name) else {
                continue;
            };
            let verdict = evaluate_in(&record.value, &record.validations, self.locale);
            record.touched = true;
            record.valid = verdict.valid;
            record.errors = verdict.errors;

            result.valid &= record.valid;
            result.fields.push((name.clone(), FieldResult::of(record)));
        }

        (next, result)
    }

    pub fn get(&self, name: &str) -> Option<&FieldRecord> {
        self.fields.get(name)
    }

    /// Records in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldRecord)> {
        self.order
            .iter()
            .filter_map(|name| self.fields.get(name).map(|record| (name.as_str(), record)))
    }

    /// Field names in declaration order.
    pub fn names(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// True iff every field's last evaluation passed.
    pub fn is_valid(&self) -> bool {
        self.fields.values().all(|record| record.valid)
    }
}
