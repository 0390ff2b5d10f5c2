//! Single-line input presenter.

use super::{error_lines, label_line};
use crate::node::{FieldView, Widget};

const MASK: char = '•';

/// Render a single-line input.
///
/// Password values are masked; an empty value shows the placeholder in
/// parentheses.
pub fn render_input(view: &FieldView) -> Vec<String> {
    let props = &view.props;
    let mut lines: Vec<String> = label_line(view).into_iter().collect();

    let shown = if props.value.is_empty() {
        view.decl
            .placeholder
            .as_ref()
            .map(|p| format!("({p})"))
            .unwrap_or_default()
    } else if view.decl.widget == Widget::Password {
        MASK.to_string().repeat(props.value.chars().count())
    } else {
        props.value.clone()
    };
    lines.push(format!("[{shown}]"));

    lines.extend(error_lines(props, "*"));
    lines
}
