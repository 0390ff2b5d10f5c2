//! Select presenter.

use super::{error_lines, label_line};
use crate::node::FieldView;

const DEFAULT_OPTION: &str = "Select an option";

/// Render a select: the placeholder line while nothing is chosen, then
/// every option with the chosen one marked.
pub fn render_select(view: &FieldView) -> Vec<String> {
    let props = &view.props;
    let mut lines: Vec<String> = label_line(view).into_iter().collect();

    let chosen = view.decl.options.iter().any(|o| o.value == props.value);
    if !chosen {
        let default = view.decl.default_option.as_deref().unwrap_or(DEFAULT_OPTION);
        lines.push(format!("-- {default} --"));
    }
    for option in &view.decl.options {
        let mark = if option.value == props.value { '•' } else { ' ' };
        lines.push(format!("({mark}) {}", option.display));
    }

    lines.extend(error_lines(props, "- "));
    lines
}
