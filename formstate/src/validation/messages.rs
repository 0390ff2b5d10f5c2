//! Default rule messages per locale.

use serde::Deserialize;

use super::rule::Rule;

/// Language of the default validation messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    /// The default message for a failed rule.
    pub fn message(self, rule: &Rule) -> String {
        match self {
            Self::En => english(rule),
            Self::Es => spanish(rule),
        }
    }
}

fn english(rule: &Rule) -> String {
    match rule {
        Rule::Required => "This field is required.".to_string(),
        Rule::MinLength(n) => format!("Must be at least {n} characters long."),
        Rule::MaxLength(n) => format!("Must be at most {n} characters long."),
        Rule::Pattern(_) => "Invalid format.".to_string(),
        Rule::Email => "Enter a valid email address.".to_string(),
        Rule::Numeric => "Must be a number.".to_string(),
        Rule::Min(n) => format!("Must be greater than or equal to {n}."),
        Rule::Max(n) => format!("Must be less than or equal to {n}."),
        Rule::Equals(expected) => format!("Must be \"{expected}\"."),
        Rule::Contains(needle) => format!("Must contain \"{needle}\"."),
    }
}

fn spanish(rule: &Rule) -> String {
    match rule {
        Rule::Required => "Este campo es obligatorio.".to_string(),
        Rule::MinLength(n) => format!("Debe tener al menos {n} caracteres."),
        Rule::MaxLength(n) => format!("Debe tener como máximo {n} caracteres."),
        Rule::Pattern(_) => "Formato inválido.".to_string(),
        Rule::Email => "Ingrese un correo electrónico válido.".to_string(),
        Rule::Numeric => "Debe ser un número.".to_string(),
        Rule::Min(n) => format!("Debe ser mayor o igual a {n}."),
        Rule::Max(n) => format!("Debe ser menor o igual a {n}."),
        Rule::Equals(expected) => format!("Debe ser \"{expected}\"."),
        Rule::Contains(needle) => format!("Debe contener \"{needle}\"."),
    }
}
