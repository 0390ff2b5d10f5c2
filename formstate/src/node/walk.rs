//! Tree walking: field discovery and state injection.
//!
//! Both passes visit the declared tree depth-first, left to right. That
//! order is the canonical field order of the form.

use std::collections::HashSet;

use log::warn;

use super::{FieldDecl, Node, Opaque};
use crate::error::{FormError, FormResult};
use crate::state::{FieldRecord, FormState, VALID_KEY};
use crate::validation::{FieldError, Validations};

/// A field found by [`discover`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub validations: Validations,
}

/// Collect every field declared in `tree`, in depth-first order.
///
/// Fails on a field with an empty name, on a name used twice, and on the
/// reserved name `valid`.
pub fn discover(tree: &[Node]) -> FormResult<Vec<FieldDescriptor>> {
    let mut fields = Vec::new();
    let mut seen = HashSet::new();
    let mut path = Vec::new();
    discover_into(tree, &mut path, &mut seen, &mut fields)?;
    Ok(fields)
}

fn discover_into(
    nodes: &[Node],
    path: &mut Vec<usize>,
    seen: &mut HashSet<String>,
    fields: &mut Vec<FieldDescriptor>,
) -> FormResult<()> {
    for (index, node) in nodes.iter().enumerate() {
        path.push(index);
        match node {
            Node::Field(decl) => {
                if decl.name.is_empty() {
                    return Err(FormError::MissingName {
                        path: format_path(path),
                    });
                }
                if decl.name == VALID_KEY {
                    return Err(FormError::ReservedName(decl.name.clone()));
                }
                if !seen.insert(decl.name.clone()) {
                    return Err(FormError::DuplicateField(decl.name.clone()));
                }
                fields.push(FieldDescriptor {
                    name: decl.name.clone(),
                    validations: decl.validations.clone(),
                });
            }
            Node::Wrapper { children, .. } => discover_into(children, path, seen, fields)?,
            Node::Empty | Node::Opaque(_) => {}
        }
        path.pop();
    }
    Ok(())
}

fn format_path(path: &[usize]) -> String {
    path.iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Change request emitted by a presenter for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// Field the event targets. `None` means the presenter lost track of
    /// it, and the controller rejects the event.
    pub name: Option<String>,
    pub value: String,
}

impl ChangeEvent {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: value.into(),
        }
    }
}

/// Change handler bound to one field.
///
/// Presenters call it with the raw new value and hand the resulting
/// [`ChangeEvent`] to [`FormController::dispatch`](crate::FormController::dispatch).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeHandler {
    field: String,
}

impl ChangeHandler {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn call(&self, value: impl Into<String>) -> ChangeEvent {
        ChangeEvent::new(self.field.clone(), value)
    }
}

/// Props a field presenter receives.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldProps {
    pub value: String,
    pub valid: bool,
    pub touched: bool,
    pub errors: Vec<FieldError>,
    pub on_change: ChangeHandler,
}

impl FieldProps {
    /// Derive presenter props from a record.
    ///
    /// Custom errors, when declared, force the field to touched and invalid
    /// and are appended after the evaluator's own errors.
    pub fn present(name: &str, record: &FieldRecord, custom_errors: Option<&[FieldError]>) -> Self {
        let on_change = ChangeHandler::new(name);
        match custom_errors {
            Some(custom) => Self {
                value: record.value.clone(),
                valid: false,
                touched: true,
                errors: record.errors.iter().chain(custom).cloned().collect(),
                on_change,
            },
            None => Self {
                value: record.value.clone(),
                valid: record.valid,
                touched: record.touched,
                errors: record.errors.clone(),
                on_change,
            },
        }
    }

    /// Whether a presenter should show the error list.
    pub fn shows_errors(&self) -> bool {
        !self.valid && self.touched
    }
}

/// A declared field with its injected props.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldView {
    pub decl: FieldDecl,
    pub props: FieldProps,
}

/// A node of the renderable tree produced by [`inject`].
#[derive(Debug, Clone, PartialEq)]
pub enum RenderNode {
    Empty,
    Field(FieldView),
    Wrapper {
        class: Option<String>,
        children: Vec<RenderNode>,
    },
    Opaque(Opaque),
}

/// Attach current field state and change handlers to every field in `tree`.
///
/// Non-field nodes keep their shape; wrappers are rebuilt with injected
/// children. `state` is only read.
pub fn inject(tree: &[Node], state: &FormState) -> Vec<RenderNode> {
    tree.iter().map(|node| inject_node(node, state)).collect()
}

fn inject_node(node: &Node, state: &FormState) -> RenderNode {
    match node {
        Node::Empty => RenderNode::Empty,
        Node::Opaque(opaque) => RenderNode::Opaque(opaque.clone()),
        Node::Wrapper { class, children } => RenderNode::Wrapper {
            class: class.clone(),
            children: inject(children, state),
        },
        Node::Field(decl) => {
            let custom = decl.custom_errors.as_deref();
            let props = match state.get(&decl.name) {
                Some(record) => FieldProps::present(&decl.name, record, custom),
                None => {
                    warn!("Injecting field '{}' with no state record", decl.name);
                    FieldProps::present(&decl.name, &FieldRecord::default(), custom)
                }
            };
            RenderNode::Field(FieldView {
                decl: decl.clone(),
                props,
            })
        }
    }
}

/// Find an injected field by name.
pub fn find_field<'a>(nodes: &'a [RenderNode], name: &str) -> Option<&'a FieldView> {
    nodes.iter().find_map(|node| match node {
        RenderNode::Field(view) if view.decl.name == name => Some(view),
        RenderNode::Wrapper { children, .. } => find_field(children, name),
        _ => None,
    })
}
