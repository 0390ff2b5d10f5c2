//! Multi-line input presenter.

use super::{error_lines, label_line};
use crate::node::FieldView;

/// Render a textarea, one `| ` prefixed line per value line.
pub fn render_textarea(view: &FieldView) -> Vec<String> {
    let props = &view.props;
    let mut lines: Vec<String> = label_line(view).into_iter().collect();

    if props.value.is_empty() {
        let placeholder = view.decl.placeholder.as_deref().unwrap_or_default();
        lines.push(format!("| ({placeholder})"));
    } else {
        lines.extend(props.value.lines().map(|line| format!("| {line}")));
    }

    lines.extend(error_lines(props, "- "));
    lines
}
