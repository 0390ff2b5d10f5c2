//! Declared form tree.
//!
//! A form's children are declared as a tree of [`Node`]s. Fields may sit at
//! any depth inside [`Node::Wrapper`]s; opaque nodes are carried through
//! untouched.

mod walk;

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::validation::{FieldError, Rule, Validations};

pub use walk::{
    ChangeEvent, ChangeHandler, FieldDescriptor, FieldProps, FieldView, RenderNode, discover,
    find_field, inject,
};

/// A node in the declared tree
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// Absent child (renders nothing)
    #[default]
    Empty,

    /// A named, validated input
    Field(FieldDecl),

    /// Structural container
    Wrapper {
        #[serde(default)]
        class: Option<String>,
        #[serde(default)]
        children: Vec<Node>,
    },

    /// Anything else; never a field, even if its attributes carry a name
    Opaque(Opaque),
}

impl Node {
    /// Create an empty node
    pub const fn empty() -> Self {
        Self::Empty
    }

    /// Create a field node
    pub fn field(decl: FieldDecl) -> Self {
        Self::Field(decl)
    }

    /// Create a wrapper node
    pub fn wrapper(children: Vec<Node>) -> Self {
        Self::Wrapper {
            class: None,
            children,
        }
    }

    /// Create a wrapper node with a class
    pub fn wrapper_with_class(class: impl Into<String>, children: Vec<Node>) -> Self {
        Self::Wrapper {
            class: Some(class.into()),
            children,
        }
    }

    /// Create an opaque text node
    pub fn text(text: impl Into<String>) -> Self {
        Self::Opaque(Opaque::new("text").text(text))
    }

    /// Check if node is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The field name, if this node is a field
    pub fn field_name(&self) -> Option<&str> {
        match self {
            Self::Field(decl) => Some(decl.name.as_str()),
            _ => None,
        }
    }
}

/// Presentation kind of a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Widget {
    #[default]
    Text,
    Password,
    Email,
    Number,
    TextArea,
    Select,
}

/// One choice of a select field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub display: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            display: display.into(),
        }
    }
}

/// Declaration of a single field.
///
/// Only `name`, `validations` and `custom_errors` matter to form state;
/// the rest is passed through to the presenter.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldDecl {
    pub name: String,
    pub widget: Widget,
    pub label: Option<String>,
    pub placeholder: Option<String>,
    /// Style hook for the host's presenter.
    pub class: Option<String>,
    /// Choices for [`Widget::Select`].
    pub options: Vec<SelectOption>,
    /// Placeholder line of a select with nothing chosen.
    pub default_option: Option<String>,
    pub validations: Validations,
    /// Externally supplied errors. When present (even empty) the field is
    /// always presented as touched and invalid.
    pub custom_errors: Option<Vec<FieldError>>,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn widget(mut self, widget: Widget) -> Self {
        self.widget = widget;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Add a select option. Switches the widget to [`Widget::Select`].
    pub fn option(mut self, value: impl Into<String>, display: impl Into<String>) -> Self {
        self.widget = Widget::Select;
        self.options.push(SelectOption::new(value, display));
        self
    }

    pub fn default_option(mut self, text: impl Into<String>) -> Self {
        self.default_option = Some(text.into());
        self
    }

    pub fn validations(mut self, validations: Validations) -> Self {
        self.validations = validations;
        self
    }

    /// Add a single rule.
    pub fn rule(mut self, rule: Rule) -> Self {
        self.validations.insert(rule);
        self
    }

    /// Shorthand for the `required` rule.
    pub fn required(self) -> Self {
        self.rule(Rule::Required)
    }

    pub fn custom_errors(mut self, errors: Vec<FieldError>) -> Self {
        self.custom_errors = Some(errors);
        self
    }
}

/// A node the form engine does not interpret.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Opaque {
    pub tag: String,
    pub text: Option<String>,
    pub attrs: BTreeMap<String, String>,
}

impl Opaque {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }
}
