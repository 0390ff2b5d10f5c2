//! Error types for form construction and event dispatch.
//!
//! Validation failures are not errors: they are reported as
//! [`FieldError`](crate::validation::FieldError) entries on the field. The
//! variants here cover misconfigured declarations (which abort
//! construction) and change events that violate the renderer contract
//! (which are rejected without touching state).

use thiserror::Error;

/// Errors raised while building or driving a form.
#[derive(Debug, Clone, Error)]
pub enum FormError {
    /// A field declaration has an empty name.
    #[error("Field declared without a name at {path}")]
    MissingName {
        /// Child index path from the root of the declared tree, e.g. `1/0/2`.
        path: String,
    },

    /// Two field declarations share a name.
    #[error("Field '{0}' is declared more than once")]
    DuplicateField(String),

    /// The name collides with the aggregate `valid` key of a submit result.
    #[error("Field name '{0}' is reserved")]
    ReservedName(String),

    /// A change event names a field the form does not track.
    #[error("Unknown field '{0}'")]
    UnknownField(String),

    /// A change event arrived without a field name.
    #[error("Change event has no field name")]
    MalformedEvent,

    /// A re-declared tree does not contain exactly the original fields.
    #[error("Declared fields changed: expected [{expected}], found [{found}]")]
    FieldSetChanged {
        /// Field names discovered at construction.
        expected: String,
        /// Field names discovered in the new tree.
        found: String,
    },

    /// A validation mapping names a rule this crate does not know.
    #[error("Unknown validation rule '{0}'")]
    UnknownRule(String),

    /// A rule parameter has the wrong shape for its rule.
    #[error("Invalid parameter for rule '{rule}': {reason}")]
    InvalidRuleParam {
        /// The rule id.
        rule: String,
        /// What was wrong with the parameter.
        reason: String,
    },

    /// A `pattern` rule does not compile.
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern as declared.
        pattern: String,
        /// The regex compiler error.
        #[source]
        source: regex::Error,
    },
}

impl FormError {
    /// Whether this error indicates a misconfigured declaration.
    ///
    /// Configuration errors abort construction; the rest are rejected events.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Self::UnknownField(_) | Self::MalformedEvent)
    }
}

/// Result alias used throughout the crate.
pub type FormResult<T> = Result<T, FormError>;
