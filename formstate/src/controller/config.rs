//! Form configuration.

use std::collections::HashMap;

use serde::Deserialize;

use crate::validation::Locale;

/// Per-form configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Label of the submit button. No button is rendered when unset or empty.
    pub submit_label: Option<String>,

    /// Initial values by field name. Applied once, at construction.
    pub values: HashMap<String, String>,

    /// Language of the default validation messages.
    pub locale: Locale,
}

impl FormConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the submit button label.
    pub fn submit_label(mut self, label: impl Into<String>) -> Self {
        self.submit_label = Some(label.into());
        self
    }

    /// Preset the initial value of one field.
    pub fn value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Preset several initial values.
    pub fn values<K, V>(mut self, values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.values
            .extend(values.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Set the message locale.
    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// The submit label, if one should be rendered.
    pub fn visible_submit_label(&self) -> Option<&str> {
        self.submit_label
            .as_deref()
            .filter(|label| !label.is_empty())
    }
}
