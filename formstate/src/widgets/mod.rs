//! Plain-text presenters for rendered forms.
//!
//! These are reference renderers for hosts without a UI toolkit (and for
//! the command-line driver). Each field widget shows its label, its
//! current value, and its error list once the field is touched and
//! invalid.

mod input;
mod select;
mod textarea;

pub use input::render_input;
pub use select::render_select;
pub use textarea::render_textarea;

use crate::controller::RenderedForm;
use crate::node::{FieldProps, FieldView, RenderNode, Widget};

const INDENT: &str = "  ";

/// Render a whole form to lines of text.
pub fn render_form(form: &RenderedForm) -> Vec<String> {
    let mut lines = Vec::new();
    render_nodes(&form.children, 0, &mut lines);
    if let Some(label) = &form.submit_label {
        lines.push(format!("[ {label} ]"));
    }
    lines
}

fn render_nodes(nodes: &[RenderNode], depth: usize, lines: &mut Vec<String>) {
    for node in nodes {
        match node {
            RenderNode::Empty => {}
            RenderNode::Opaque(opaque) => {
                let text = opaque
                    .text
                    .clone()
                    .unwrap_or_else(|| format!("<{}>", opaque.tag));
                lines.push(indent(depth, &text));
            }
            RenderNode::Wrapper { children, .. } => render_nodes(children, depth + 1, lines),
            RenderNode::Field(view) => {
                lines.extend(render_field(view).iter().map(|line| indent(depth, line)));
            }
        }
    }
}

/// Render one field with the presenter matching its widget.
pub fn render_field(view: &FieldView) -> Vec<String> {
    match view.decl.widget {
        Widget::TextArea => render_textarea(view),
        Widget::Select => render_select(view),
        Widget::Text | Widget::Password | Widget::Email | Widget::Number => render_input(view),
    }
}

fn indent(depth: usize, line: &str) -> String {
    format!("{}{line}", INDENT.repeat(depth))
}

fn label_line(view: &FieldView) -> Option<String> {
    view.decl.label.as_ref().map(|label| format!("{label}:"))
}

fn error_lines(props: &FieldProps, bullet: &str) -> Vec<String> {
    if !props.shows_errors() {
        return Vec::new();
    }
    props
        .errors
        .iter()
        .map(|error| format!("{bullet}{}", error.message))
        .collect()
}
